//! Storage backends for the prompt catalog.
//!
//! The catalog persists through a pluggable [`PromptStore`]:
//!
//! | Backend | Location | Use |
//! |---------|----------|-----|
//! | `SQLite` | `~/.config/promptdex/prompts.db` | Default persistent catalog |
//! | Memory | Process heap | Tests and ephemeral runs |

mod memory;
mod sqlite;
mod traits;

pub use memory::MemoryPromptStore;
pub use sqlite::SqlitePromptStore;
pub use traits::PromptStore;

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Backend type for the prompt store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackendType {
    /// `SQLite` database.
    #[default]
    Sqlite,
    /// In-memory store, lost on shutdown.
    Memory,
}

impl StoreBackendType {
    /// Parses a backend name as written in config files and environment
    /// variables. Matching is case-insensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sqlite" => Some(Self::Sqlite),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }

    /// Returns the canonical backend name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Memory => "memory",
        }
    }
}

/// Factory for creating prompt stores.
pub struct StoreFactory;

impl StoreFactory {
    /// Creates a store with an explicit backend type.
    ///
    /// # Arguments
    ///
    /// * `backend` - The backend type to use
    /// * `path` - Database path for the `SQLite` backend; falls back to
    ///   [`SqlitePromptStore::default_path`] when absent
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be initialized or no usable
    /// database path can be determined.
    pub fn create_with_backend(
        backend: StoreBackendType,
        path: Option<PathBuf>,
    ) -> Result<Arc<dyn PromptStore>> {
        match backend {
            StoreBackendType::Sqlite => {
                let db_path =
                    path.or_else(SqlitePromptStore::default_path)
                        .ok_or_else(|| Error::OperationFailed {
                            operation: "create_prompt_store".to_string(),
                            cause: "Could not determine database path".to_string(),
                        })?;
                Ok(Arc::new(SqlitePromptStore::new(db_path)?))
            }
            StoreBackendType::Memory => Ok(Arc::new(MemoryPromptStore::new())),
        }
    }
}
