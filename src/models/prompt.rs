//! Prompt records and identifiers.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a prompt.
///
/// Wraps the canonical hyphenated UUID string form. Identifiers arriving
/// from the outside (URL path segments, API payloads) must go through
/// [`PromptId::parse`] so malformed values are rejected before any storage
/// lookup happens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptId(String);

impl PromptId {
    /// Creates a prompt ID from a trusted string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Parses an untrusted string into a prompt ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidId`] if the string is not a well-formed UUID.
    pub fn parse(id: &str) -> Result<Self> {
        match uuid::Uuid::parse_str(id) {
            Ok(parsed) => Ok(Self(parsed.as_hyphenated().to_string())),
            Err(_) => Err(Error::InvalidId(id.to_string())),
        }
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PromptId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PromptId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A catalog prompt record.
///
/// Serializes with the wire field names used by the HTTP API, so the same
/// struct serves as both the storage row and the response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    /// Unique identifier.
    pub id: PromptId,
    /// Short human-readable title.
    pub title: String,
    /// One-paragraph description of what the prompt does.
    #[serde(default)]
    pub description: String,
    /// The full prompt text.
    pub content: String,
    /// Category name, or `None` when the record is uncategorized.
    #[serde(default)]
    pub category: Option<String>,
    /// Prompt kind (e.g. "text", "image").
    #[serde(rename = "type", default)]
    pub prompt_type: String,
    /// Categorization tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// URLs of preview images.
    #[serde(default)]
    pub preview_images: Vec<String>,
    /// Free-form usage guidance shown alongside the prompt.
    #[serde(default)]
    pub usage: String,
    /// Number of likes.
    #[serde(default)]
    pub likes: i64,
    /// Number of comments.
    #[serde(default)]
    pub comments: i64,
    /// Average rating (0.0 to 5.0).
    #[serde(default)]
    pub rating: f64,
    /// View counter, incremented on each detail fetch.
    #[serde(default)]
    pub views: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Prompt {
    /// Creates a new prompt with a generated ID and current timestamps.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: PromptId::generate(),
            title: title.into(),
            description: String::new(),
            content: content.into(),
            category: None,
            prompt_type: String::new(),
            tags: Vec::new(),
            preview_images: Vec::new(),
            usage: String::new(),
            likes: 0,
            comments: 0,
            rating: 0.0,
            views: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the prompt kind.
    #[must_use]
    pub fn with_type(mut self, prompt_type: impl Into<String>) -> Self {
        self.prompt_type = prompt_type.into();
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Sets the preview image URLs.
    #[must_use]
    pub fn with_preview_images(mut self, preview_images: Vec<String>) -> Self {
        self.preview_images = preview_images;
        self
    }

    /// Sets the usage guidance text.
    #[must_use]
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Sets the engagement counters in one call.
    #[must_use]
    pub const fn with_engagement(mut self, likes: i64, comments: i64, rating: f64) -> Self {
        self.likes = likes;
        self.comments = comments;
        self.rating = rating;
        self
    }

    /// Sets the view counter.
    #[must_use]
    pub const fn with_views(mut self, views: i64) -> Self {
        self.views = views;
        self
    }

    /// Sets both timestamps.
    #[must_use]
    pub const fn with_timestamps(
        mut self,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_id_parse_accepts_uuid() {
        let id = PromptId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8");
        assert!(id.is_ok());
    }

    #[test]
    fn test_prompt_id_parse_rejects_garbage() {
        let err = PromptId::parse("not-a-uuid");
        assert!(matches!(err, Err(Error::InvalidId(_))));
    }

    #[test]
    fn test_prompt_id_parse_rejects_empty() {
        assert!(PromptId::parse("").is_err());
    }

    #[test]
    fn test_generated_ids_are_valid_and_unique() {
        let a = PromptId::generate();
        let b = PromptId::generate();
        assert!(PromptId::parse(a.as_str()).is_ok());
        assert_ne!(a, b);
    }

    #[test]
    fn test_prompt_id_serializes_transparently() {
        let id = PromptId::new("abc");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc\"");
    }

    #[test]
    fn test_new_prompt_defaults() {
        let prompt = Prompt::new("Title", "Content");
        assert_eq!(prompt.title, "Title");
        assert_eq!(prompt.content, "Content");
        assert!(prompt.category.is_none());
        assert_eq!(prompt.views, 0);
        assert_eq!(prompt.created_at, prompt.updated_at);
    }

    #[test]
    fn test_builder_methods() {
        let prompt = Prompt::new("Title", "Content")
            .with_description("desc")
            .with_category("写作")
            .with_type("text")
            .with_tags(vec!["a".to_string(), "b".to_string()])
            .with_usage("paste into chat")
            .with_engagement(10, 2, 4.5)
            .with_views(100);
        assert_eq!(prompt.category.as_deref(), Some("写作"));
        assert_eq!(prompt.prompt_type, "text");
        assert_eq!(prompt.tags.len(), 2);
        assert_eq!(prompt.likes, 10);
        assert!((prompt.rating - 4.5).abs() < f64::EPSILON);
        assert_eq!(prompt.views, 100);
    }

    #[test]
    fn test_type_field_renames_on_the_wire() {
        let prompt = Prompt::new("Title", "Content").with_type("image");
        let json = serde_json::to_value(&prompt).unwrap();
        assert_eq!(json["type"], "image");
        assert!(json.get("prompt_type").is_none());
    }

    #[test]
    fn test_uncategorized_serializes_as_null() {
        let prompt = Prompt::new("Title", "Content");
        let json = serde_json::to_value(&prompt).unwrap();
        assert!(json["category"].is_null());
    }
}
