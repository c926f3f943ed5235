//! # Promptdex
//!
//! A prompt catalog service.
//!
//! Promptdex stores reusable prompt records (title, body text, category,
//! tags, engagement counters) and serves paginated, filterable, searchable
//! listings over HTTP, alongside single-record retrieval with background
//! view tracking and a distinct-category facet.
//!
//! ## Features
//!
//! - Listing queries combining an exact category filter with case-insensitive
//!   substring search across title, description, and content
//! - Independent total counts per filter, degrading gracefully when the
//!   count query fails
//! - Fire-and-forget view-counter increments that never block a response
//! - Pluggable record store (`SQLite` or in-memory) behind a five-operation
//!   trait
//!
//! ## Example
//!
//! ```rust,ignore
//! use promptdex::{CatalogService, ListParams, StoreFactory, StoreBackendType};
//!
//! let store = StoreFactory::create_with_backend(StoreBackendType::Memory, None)?;
//! let catalog = CatalogService::new(store);
//! let page = catalog.list(&ListParams::default()).await?;
//! println!("{} of {} prompts", page.prompts.len(), page.total);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
// multiple_crate_versions is inherently crate-level (detects duplicate transitive dependencies).
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod http;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;

// Re-exports for convenience
pub use config::PromptdexConfig;
pub use models::{
    CategoryListResponse, PageRequest, Prompt, PromptDetailResponse, PromptFilter, PromptId,
    PromptListResponse,
};
pub use services::{CatalogService, ListParams, PromptPage, SeedService};
pub use storage::{MemoryPromptStore, PromptStore, SqlitePromptStore, StoreBackendType, StoreFactory};

/// Error type for promptdex operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidId` | Caller-supplied identifier fails shape validation (never reaches the store) |
/// | `NotFound` | Well-formed identifier with no matching record after a store lookup |
/// | `OperationFailed` | Store open/query/update failures, config parse failures, server setup failures |
/// | `Timeout` | A store operation exceeded its per-operation deadline |
///
/// Count failures on the listing path are deliberately not represented here:
/// they are swallowed at the service layer and degrade the total to zero.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The caller-supplied identifier is malformed.
    ///
    /// Raised before any store round-trip so that transports can map it to
    /// a 400 rather than a 404.
    #[error("invalid prompt id: {0}")]
    InvalidId(String),

    /// No record matches a well-formed identifier.
    #[error("prompt not found: {0}")]
    NotFound(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - `SQLite` open/query/update operations fail
    /// - The record store lock is poisoned
    /// - Configuration files cannot be read or parsed
    /// - The HTTP listener cannot be bound
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// A store operation exceeded its deadline.
    ///
    /// Every store call runs under a per-operation timeout; exceeding it
    /// fails that operation only and never hangs the caller.
    #[error("operation '{operation}' timed out")]
    Timeout {
        /// The operation that timed out.
        operation: String,
    },
}

/// Result type alias for promptdex operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidId("zzz".to_string());
        assert_eq!(err.to_string(), "invalid prompt id: zzz");

        let err = Error::NotFound("018f0d63".to_string());
        assert_eq!(err.to_string(), "prompt not found: 018f0d63");

        let err = Error::OperationFailed {
            operation: "list_prompts".to_string(),
            cause: "disk I/O error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "operation 'list_prompts' failed: disk I/O error"
        );

        let err = Error::Timeout {
            operation: "count_prompts".to_string(),
        };
        assert_eq!(err.to_string(), "operation 'count_prompts' timed out");
    }
}
