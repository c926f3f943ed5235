//! Response envelopes for the HTTP API.
//!
//! Every endpoint wraps its payload in an envelope carrying a `success` flag
//! and a human-readable `message`. Failures keep the same shape with empty
//! data, so clients can always deserialize the same structure.

use crate::models::Prompt;
use serde::{Deserialize, Serialize};

/// Envelope for the paginated prompt listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptListResponse {
    /// Whether the request succeeded.
    pub success: bool,
    /// Human-readable outcome message.
    pub message: String,
    /// The page of prompts, empty on failure.
    pub data: Vec<Prompt>,
    /// Total number of records matching the filter, across all pages.
    pub total: u64,
}

impl PromptListResponse {
    /// Builds a success envelope.
    #[must_use]
    pub fn ok(message: impl Into<String>, data: Vec<Prompt>, total: u64) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            total,
        }
    }

    /// Builds a failure envelope with empty data.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Vec::new(),
            total: 0,
        }
    }
}

/// Envelope for a single prompt detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDetailResponse {
    /// Whether the request succeeded.
    pub success: bool,
    /// Human-readable outcome message.
    pub message: String,
    /// The prompt, or `None` on failure.
    pub data: Option<Prompt>,
}

impl PromptDetailResponse {
    /// Builds a success envelope.
    #[must_use]
    pub fn ok(message: impl Into<String>, prompt: Prompt) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(prompt),
        }
    }

    /// Builds a failure envelope.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// Envelope for the category facet listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryListResponse {
    /// Whether the request succeeded.
    pub success: bool,
    /// Human-readable outcome message.
    pub message: String,
    /// Distinct category names, empty on failure.
    pub data: Vec<String>,
}

impl CategoryListResponse {
    /// Builds a success envelope.
    #[must_use]
    pub fn ok(message: impl Into<String>, categories: Vec<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: categories,
        }
    }

    /// Builds a failure envelope with empty data.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Vec::new(),
        }
    }
}
