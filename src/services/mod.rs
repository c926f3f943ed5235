//! Business logic services.
//!
//! Services orchestrate storage backends and provide high-level operations.
//! They talk to storage only through the
//! [`PromptStore`](crate::storage::PromptStore) trait, so tests can inject an
//! in-memory backend.

mod catalog;
mod seed;

pub use catalog::{CatalogService, ListParams, PromptPage};
pub use seed::SeedService;
