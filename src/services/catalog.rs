//! Catalog query service: listing, detail, and category facet.
//!
//! `CatalogService` is the only reader of the prompt store at runtime. It
//! normalizes raw query parameters into a [`PromptFilter`] and a
//! [`PageRequest`], runs every store call on the blocking pool under a
//! per-operation deadline, and dispatches the view-counter increment as a
//! detached background task so the detail response never waits on it.

use crate::models::{PageRequest, Prompt, PromptFilter, PromptId};
use crate::storage::PromptStore;
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Duration;

/// Default deadline for a single store operation.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default deadline for the background view increment.
pub const DEFAULT_INCREMENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Raw listing parameters as they arrive from the transport.
///
/// All fields are optional; [`CatalogService::list`] normalizes them.
/// Non-positive or missing `page`/`limit` fall back to the defaults, and
/// sentinel category values collapse to "no filter".
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    /// Exact category to filter by, if any.
    pub category: Option<String>,
    /// Substring to search for across title, description, and content.
    pub search: Option<String>,
    /// 1-based page number.
    pub page: Option<i64>,
    /// Page size.
    pub limit: Option<i64>,
}

impl ListParams {
    /// Creates empty parameters (first page of everything).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            category: None,
            search: None,
            page: None,
            limit: None,
        }
    }

    /// Sets the category filter.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the search term.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sets the pagination window.
    #[must_use]
    pub const fn with_page(mut self, page: i64, limit: i64) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }
}

/// One page of listing results.
#[derive(Debug, Clone)]
pub struct PromptPage {
    /// The prompts in this page, newest first.
    pub prompts: Vec<Prompt>,
    /// Total records matching the filter across all pages.
    ///
    /// Zero when the count query failed; the page itself is still valid.
    pub total: u64,
}

/// Catalog query service.
///
/// Holds an injected store handle rather than reaching for process-global
/// state, so tests can substitute an in-memory backend.
pub struct CatalogService {
    store: Arc<dyn PromptStore>,
    store_timeout: Duration,
    increment_timeout: Duration,
}

impl CatalogService {
    /// Creates a catalog service with default timeouts.
    #[must_use]
    pub fn new(store: Arc<dyn PromptStore>) -> Self {
        Self {
            store,
            store_timeout: DEFAULT_STORE_TIMEOUT,
            increment_timeout: DEFAULT_INCREMENT_TIMEOUT,
        }
    }

    /// Overrides the per-operation store deadline.
    #[must_use]
    pub const fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Overrides the background view-increment deadline.
    #[must_use]
    pub const fn with_increment_timeout(mut self, timeout: Duration) -> Self {
        self.increment_timeout = timeout;
        self
    }

    /// Returns one page of prompts matching the given parameters, plus the
    /// total count for the same filter.
    ///
    /// The count runs as a separate query after the page query. A count
    /// failure is not fatal: the page is returned with `total = 0`, because a
    /// listing with an approximate total beats failing the whole request.
    ///
    /// # Errors
    ///
    /// Returns an error if the page query itself fails or times out. A page
    /// is never returned alongside a failure.
    pub async fn list(&self, params: &ListParams) -> Result<PromptPage> {
        let filter = PromptFilter::from_params(params.category.as_deref(), params.search.as_deref());
        let page = PageRequest::new(params.page, params.limit);

        metrics::counter!("promptdex_list_requests_total").increment(1);

        let find_filter = filter.clone();
        let prompts = self
            .run_store("list_prompts", move |store| {
                store.find(&find_filter, page)
            })
            .await
            .inspect_err(|e| {
                metrics::counter!("promptdex_list_failures_total").increment(1);
                tracing::error!(error = %e, "Prompt listing failed");
            })?;

        let count_filter = filter.clone();
        let total = match self
            .run_store("count_prompts", move |store| store.count(&count_filter))
            .await
        {
            Ok(total) => total,
            Err(e) => {
                // Non-fatal: deliver the page with a degraded total.
                metrics::counter!("promptdex_count_failures_total").increment(1);
                tracing::warn!(error = %e, ?filter, "Count query failed, degrading total to 0");
                0
            }
        };

        tracing::debug!(
            returned = prompts.len(),
            total,
            page = page.page(),
            limit = page.limit(),
            "Prompt listing served"
        );

        Ok(PromptPage { prompts, total })
    }

    /// Fetches a single prompt by its string identifier.
    ///
    /// On a hit, a view-counter increment is dispatched as a fire-and-forget
    /// background task with its own deadline; the returned prompt reflects
    /// the state before the increment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidId`] for a malformed identifier (no store
    /// round-trip happens), [`Error::NotFound`] for a well-formed identifier
    /// with no record, or a store error.
    pub async fn get(&self, raw_id: &str) -> Result<Prompt> {
        metrics::counter!("promptdex_detail_requests_total").increment(1);

        let id = PromptId::parse(raw_id)?;

        let lookup_id = id.clone();
        let prompt = self
            .run_store("find_prompt_by_id", move |store| {
                store.find_by_id(&lookup_id)
            })
            .await
            .inspect_err(|e| {
                metrics::counter!("promptdex_detail_failures_total").increment(1);
                tracing::error!(error = %e, id = %id, "Prompt detail lookup failed");
            })?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        self.spawn_view_increment(id);

        Ok(prompt)
    }

    /// Returns the distinct category names present in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the facet query fails or times out.
    pub async fn categories(&self) -> Result<Vec<String>> {
        metrics::counter!("promptdex_facet_requests_total").increment(1);

        self.run_store("distinct_categories", |store| store.distinct_categories())
            .await
            .inspect_err(|e| {
                metrics::counter!("promptdex_facet_failures_total").increment(1);
                tracing::error!(error = %e, "Category facet query failed");
            })
    }

    /// Launches the detached view increment for a just-served prompt.
    ///
    /// The task owns its own deadline, decoupled from the request that
    /// triggered it; its outcome is logged and counted but never joined.
    /// A timeout here abandons the wait, not the in-flight store call.
    fn spawn_view_increment(&self, id: PromptId) {
        let store = Arc::clone(&self.store);
        let deadline = self.increment_timeout;

        tokio::spawn(async move {
            let task_id = id.clone();
            let task = tokio::task::spawn_blocking(move || store.increment_views(&task_id));

            let outcome = match tokio::time::timeout(deadline, task).await {
                Ok(Ok(Ok(true))) => "ok",
                Ok(Ok(Ok(false))) => {
                    // Record vanished between lookup and increment.
                    tracing::warn!(id = %id, "View increment matched no record");
                    "missing"
                }
                Ok(Ok(Err(e))) => {
                    tracing::warn!(id = %id, error = %e, "View increment failed");
                    "error"
                }
                Ok(Err(e)) => {
                    tracing::warn!(id = %id, error = %e, "View increment task panicked");
                    "error"
                }
                Err(_) => {
                    tracing::warn!(id = %id, "View increment timed out");
                    "timeout"
                }
            };

            metrics::counter!("promptdex_view_increments_total", "outcome" => outcome)
                .increment(1);
        });
    }

    /// Runs one store operation on the blocking pool under the per-operation
    /// deadline.
    async fn run_store<T, F>(&self, operation: &'static str, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(Arc<dyn PromptStore>) -> Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let task = tokio::task::spawn_blocking(move || f(store));

        match tokio::time::timeout(self.store_timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(Error::OperationFailed {
                operation: operation.to_string(),
                cause: e.to_string(),
            }),
            Err(_) => Err(Error::Timeout {
                operation: operation.to_string(),
            }),
        }
    }
}
