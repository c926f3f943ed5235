//! In-memory prompt store for testing.
//!
//! Provides a fast, non-persistent implementation of [`PromptStore`] for use
//! in unit tests and development scenarios.

use super::PromptStore;
use crate::models::{PageRequest, Prompt, PromptFilter, PromptId};
use crate::{Error, Result};
use std::collections::BTreeSet;
use std::sync::RwLock;

/// In-memory prompt store.
///
/// Uses `RwLock` for thread-safe access with reader-writer semantics.
/// Data is not persisted between runs. Observable behavior matches the
/// `SQLite` backend: same filter semantics, same listing order.
#[derive(Debug, Default)]
pub struct MemoryPromptStore {
    prompts: RwLock<Vec<Prompt>>,
}

impl MemoryPromptStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first, ascending ID on equal timestamps.
fn listing_order(a: &Prompt, b: &Prompt) -> std::cmp::Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.as_str().cmp(b.id.as_str()))
}

impl PromptStore for MemoryPromptStore {
    fn find(&self, filter: &PromptFilter, page: PageRequest) -> Result<Vec<Prompt>> {
        let prompts = self.prompts.read().map_err(|_| Error::OperationFailed {
            operation: "find_prompts".to_string(),
            cause: "Lock poisoned".to_string(),
        })?;

        let mut matching: Vec<Prompt> = prompts
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matching.sort_by(listing_order);

        let skip = usize::try_from(page.skip()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);
        Ok(matching.into_iter().skip(skip).take(take).collect())
    }

    fn find_by_id(&self, id: &PromptId) -> Result<Option<Prompt>> {
        let prompts = self.prompts.read().map_err(|_| Error::OperationFailed {
            operation: "find_prompt_by_id".to_string(),
            cause: "Lock poisoned".to_string(),
        })?;

        Ok(prompts.iter().find(|p| &p.id == id).cloned())
    }

    fn count(&self, filter: &PromptFilter) -> Result<u64> {
        let prompts = self.prompts.read().map_err(|_| Error::OperationFailed {
            operation: "count_prompts".to_string(),
            cause: "Lock poisoned".to_string(),
        })?;

        let total = prompts.iter().filter(|p| filter.matches(p)).count();
        Ok(u64::try_from(total).unwrap_or(u64::MAX))
    }

    fn distinct_categories(&self) -> Result<Vec<String>> {
        let prompts = self.prompts.read().map_err(|_| Error::OperationFailed {
            operation: "distinct_categories".to_string(),
            cause: "Lock poisoned".to_string(),
        })?;

        let categories: BTreeSet<String> =
            prompts.iter().filter_map(|p| p.category.clone()).collect();
        Ok(categories.into_iter().collect())
    }

    fn increment_views(&self, id: &PromptId) -> Result<bool> {
        let mut prompts = self.prompts.write().map_err(|_| Error::OperationFailed {
            operation: "increment_views".to_string(),
            cause: "Lock poisoned".to_string(),
        })?;

        match prompts.iter_mut().find(|p| &p.id == id) {
            Some(prompt) => {
                prompt.views += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn insert(&self, prompt: &Prompt) -> Result<()> {
        let mut prompts = self.prompts.write().map_err(|_| Error::OperationFailed {
            operation: "insert_prompt".to_string(),
            cause: "Lock poisoned".to_string(),
        })?;

        if prompts.iter().any(|p| p.id == prompt.id) {
            return Err(Error::OperationFailed {
                operation: "insert_prompt".to_string(),
                cause: format!("duplicate id: {}", prompt.id),
            });
        }

        prompts.push(prompt.clone());
        Ok(())
    }
}
