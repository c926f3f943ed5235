//! Data models for promptdex.
//!
//! This module contains all the core data structures used throughout the system.

mod envelope;
mod prompt;
mod query;

pub use envelope::{CategoryListResponse, PromptDetailResponse, PromptListResponse};
pub use prompt::{Prompt, PromptId};
pub use query::{CATEGORY_ALL_SENTINELS, DEFAULT_LIMIT, DEFAULT_PAGE, PageRequest, PromptFilter};
