//! Prompt store trait definition.

use crate::Result;
use crate::models::{PageRequest, Prompt, PromptFilter, PromptId};

/// Trait for prompt catalog storage backends.
///
/// All backends observe the same listing order: newest `created_at` first,
/// with ascending `id` breaking ties so pages are stable across requests.
pub trait PromptStore: Send + Sync {
    /// Finds the prompts matching a filter, windowed to one page.
    ///
    /// # Arguments
    ///
    /// * `filter` - The normalized listing filter
    /// * `page` - The pagination window
    ///
    /// # Returns
    ///
    /// The matching prompts for the requested page, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be accessed.
    fn find(&self, filter: &PromptFilter, page: PageRequest) -> Result<Vec<Prompt>>;

    /// Gets a prompt by ID.
    ///
    /// # Returns
    ///
    /// The prompt if found, `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be accessed.
    fn find_by_id(&self, id: &PromptId) -> Result<Option<Prompt>>;

    /// Counts all prompts matching a filter, ignoring pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be accessed.
    fn count(&self, filter: &PromptFilter) -> Result<u64>;

    /// Lists the distinct category names in ascending order.
    ///
    /// Uncategorized prompts contribute nothing to the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be accessed.
    fn distinct_categories(&self) -> Result<Vec<String>>;

    /// Adds one view to a prompt's counter.
    ///
    /// # Returns
    ///
    /// `true` if a record was updated, `false` if the ID is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be accessed.
    fn increment_views(&self, id: &PromptId) -> Result<bool>;

    /// Inserts a new prompt record.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID already exists or the storage cannot be
    /// accessed.
    fn insert(&self, prompt: &Prompt) -> Result<()>;
}
