//! Listing filters and pagination.

use crate::models::Prompt;

/// Category values that mean "do not filter by category".
///
/// Clients send these placeholder values when the category picker is on its
/// default selection, so they collapse to no constraint at all.
pub const CATEGORY_ALL_SENTINELS: &[&str] = &["全部", "All"];

/// Default page number when the client sends none.
pub const DEFAULT_PAGE: u64 = 1;

/// Default page size when the client sends none.
pub const DEFAULT_LIMIT: u64 = 20;

/// Normalized listing filter.
///
/// Built from the raw `category` and `search` query parameters. Sentinel and
/// empty values are collapsed during construction, so a constructed filter
/// only ever carries constraints that actually apply. Both constraints
/// combine with AND; the search term matches with OR across title,
/// description and content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PromptFilter {
    /// No constraints, every prompt matches.
    #[default]
    All,
    /// Exact category match.
    Category(String),
    /// Case-insensitive substring search across text fields.
    Search(String),
    /// Both an exact category match and a substring search.
    CategorySearch {
        /// Exact category to match.
        category: String,
        /// Substring searched across text fields.
        search: String,
    },
}

impl PromptFilter {
    /// Builds a filter from raw query parameter values.
    ///
    /// A missing or empty category, or one of the
    /// [`CATEGORY_ALL_SENTINELS`], yields no category constraint. A missing
    /// or empty search term yields no search constraint.
    #[must_use]
    pub fn from_params(category: Option<&str>, search: Option<&str>) -> Self {
        let category = category.filter(|c| !c.is_empty() && !CATEGORY_ALL_SENTINELS.contains(c));
        let search = search.filter(|s| !s.is_empty());

        match (category, search) {
            (None, None) => Self::All,
            (Some(c), None) => Self::Category(c.to_string()),
            (None, Some(s)) => Self::Search(s.to_string()),
            (Some(c), Some(s)) => Self::CategorySearch {
                category: c.to_string(),
                search: s.to_string(),
            },
        }
    }

    /// Returns the category constraint, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        match self {
            Self::Category(c) | Self::CategorySearch { category: c, .. } => Some(c),
            Self::All | Self::Search(_) => None,
        }
    }

    /// Returns the search term, if any.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        match self {
            Self::Search(s) | Self::CategorySearch { search: s, .. } => Some(s),
            Self::All | Self::Category(_) => None,
        }
    }

    /// Returns `true` when the filter carries no constraints.
    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Tests a prompt against this filter.
    ///
    /// This is the reference predicate: the in-memory backend applies it
    /// directly and the SQL backend mirrors it in its WHERE clause. Category
    /// comparison is exact (an uncategorized prompt never matches a category
    /// constraint); the search term is matched case-insensitively against
    /// title, description and content.
    #[must_use]
    pub fn matches(&self, prompt: &Prompt) -> bool {
        let category_ok = match self.category() {
            Some(category) => prompt.category.as_deref() == Some(category),
            None => true,
        };
        if !category_ok {
            return false;
        }
        match self.search() {
            Some(term) => {
                let needle = term.to_lowercase();
                prompt.title.to_lowercase().contains(&needle)
                    || prompt.description.to_lowercase().contains(&needle)
                    || prompt.content.to_lowercase().contains(&needle)
            }
            None => true,
        }
    }
}

/// Clamped pagination window.
///
/// Fields are private so a constructed request always holds usable values:
/// page is at least 1 and limit is at least 1. Out-of-range input falls back
/// rather than erroring, matching how the listing endpoint treats malformed
/// pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    /// Builds a page request from raw parameter values.
    ///
    /// Missing or non-positive pages become [`DEFAULT_PAGE`]; missing or
    /// non-positive limits become [`DEFAULT_LIMIT`].
    #[must_use]
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = match page {
            Some(p) if p >= 1 => p.unsigned_abs(),
            _ => DEFAULT_PAGE,
        };
        let limit = match limit {
            Some(l) if l >= 1 => l.unsigned_abs(),
            _ => DEFAULT_LIMIT,
        };
        Self { page, limit }
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// The maximum number of records in the page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of records to skip before the page starts.
    #[must_use]
    pub const fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}
