//! SQLite-backed prompt catalog storage.
//!
//! Stores the catalog in `~/.config/promptdex/prompts.db` by default.

use super::PromptStore;
use crate::models::{PageRequest, Prompt, PromptFilter, PromptId};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// `SQLite`-based prompt store.
pub struct SqlitePromptStore {
    /// Connection to the `SQLite` database.
    conn: Mutex<Connection>,
    /// Path to the `SQLite` database.
    db_path: PathBuf,
}

impl SqlitePromptStore {
    /// Creates a new `SQLite` prompt store.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::OperationFailed {
                operation: "create_catalog_dir".to_string(),
                cause: e.to_string(),
            })?;
        }

        let conn = Connection::open(&db_path).map_err(|e| Error::OperationFailed {
            operation: "open_catalog_db".to_string(),
            cause: e.to_string(),
        })?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };

        store.initialize()?;
        Ok(store)
    }

    /// Creates an in-memory `SQLite` store (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| Error::OperationFailed {
            operation: "open_catalog_db_memory".to_string(),
            cause: e.to_string(),
        })?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path: PathBuf::from(":memory:"),
        };

        store.initialize()?;
        Ok(store)
    }

    /// Returns the default database path.
    ///
    /// Returns `~/.config/promptdex/prompts.db` on Unix systems, or the
    /// platform-specific config directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        directories::BaseDirs::new().map(|d| d.config_dir().join("promptdex").join("prompts.db"))
    }

    /// Returns the database path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Initializes the database schema.
    fn initialize(&self) -> Result<()> {
        let conn = self.lock_conn()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS prompts (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                content TEXT NOT NULL,
                category TEXT,
                prompt_type TEXT NOT NULL DEFAULT '',
                tags TEXT NOT NULL DEFAULT '[]',
                preview_images TEXT NOT NULL DEFAULT '[]',
                usage TEXT NOT NULL DEFAULT '',
                likes INTEGER NOT NULL DEFAULT 0,
                comments INTEGER NOT NULL DEFAULT 0,
                rating REAL NOT NULL DEFAULT 0,
                views INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| Error::OperationFailed {
            operation: "create_prompts_table".to_string(),
            cause: e.to_string(),
        })?;

        // Index for the category filter and facet
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_prompts_category ON prompts(category)",
            [],
        )
        .map_err(|e| Error::OperationFailed {
            operation: "create_prompts_category_index".to_string(),
            cause: e.to_string(),
        })?;

        // Index for the newest-first listing order
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_prompts_created_at ON prompts(created_at)",
            [],
        )
        .map_err(|e| Error::OperationFailed {
            operation: "create_prompts_created_at_index".to_string(),
            cause: e.to_string(),
        })?;

        Ok(())
    }

    /// Locks the connection and returns a guard.
    fn lock_conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| Error::OperationFailed {
            operation: "lock_catalog_db".to_string(),
            cause: e.to_string(),
        })
    }
}

/// Escapes `LIKE` wildcards so a search term only matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Builds the WHERE clause tail and bind parameters for a filter.
///
/// The returned SQL starts with ` AND` so callers can append it to a
/// `WHERE 1=1` base. Search terms are wrapped in `%` and matched with
/// `LIKE ... ESCAPE` against title, description and content.
fn filter_clause(filter: &PromptFilter) -> (String, Vec<Box<dyn rusqlite::ToSql>>) {
    let mut sql = String::new();
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(category) = filter.category() {
        sql.push_str(" AND category = ?");
        params_vec.push(Box::new(category.to_string()));
    }

    if let Some(term) = filter.search() {
        let pattern = format!("%{}%", escape_like(term));
        sql.push_str(
            " AND (title LIKE ? ESCAPE '\\' \
             OR description LIKE ? ESCAPE '\\' \
             OR content LIKE ? ESCAPE '\\')",
        );
        params_vec.push(Box::new(pattern.clone()));
        params_vec.push(Box::new(pattern.clone()));
        params_vec.push(Box::new(pattern));
    }

    (sql, params_vec)
}

/// Maps a result row to a prompt.
///
/// Column order must match the SELECT lists in this module.
fn row_to_prompt(row: &rusqlite::Row<'_>) -> rusqlite::Result<Prompt> {
    let tags_json: String = row.get(6)?;
    let preview_images_json: String = row.get(7)?;

    Ok(Prompt {
        id: PromptId::new(row.get::<_, String>(0)?),
        title: row.get(1)?,
        description: row.get(2)?,
        content: row.get(3)?,
        category: row.get(4)?,
        prompt_type: row.get(5)?,
        tags: serde_json::from_str(&tags_json).unwrap_or_default(),
        preview_images: serde_json::from_str(&preview_images_json).unwrap_or_default(),
        usage: row.get(8)?,
        likes: row.get(9)?,
        comments: row.get(10)?,
        rating: row.get(11)?,
        views: row.get(12)?,
        created_at: row.get::<_, DateTime<Utc>>(13)?,
        updated_at: row.get::<_, DateTime<Utc>>(14)?,
    })
}

impl PromptStore for SqlitePromptStore {
    fn find(&self, filter: &PromptFilter, page: PageRequest) -> Result<Vec<Prompt>> {
        let conn = self.lock_conn()?;

        let (filter_sql, mut params_vec) = filter_clause(filter);
        let sql = format!(
            "SELECT id, title, description, content, category, prompt_type, tags, \
             preview_images, usage, likes, comments, rating, views, created_at, updated_at \
             FROM prompts WHERE 1=1{filter_sql} \
             ORDER BY created_at DESC, id ASC LIMIT ? OFFSET ?"
        );
        params_vec.push(Box::new(i64::try_from(page.limit()).unwrap_or(i64::MAX)));
        params_vec.push(Box::new(i64::try_from(page.skip()).unwrap_or(i64::MAX)));

        let mut stmt = conn.prepare(&sql).map_err(|e| Error::OperationFailed {
            operation: "prepare_find_prompts".to_string(),
            cause: e.to_string(),
        })?;

        let params_refs: Vec<&dyn rusqlite::ToSql> =
            params_vec.iter().map(AsRef::as_ref).collect();

        let rows = stmt
            .query_map(params_refs.as_slice(), row_to_prompt)
            .map_err(|e| Error::OperationFailed {
                operation: "find_prompts".to_string(),
                cause: e.to_string(),
            })?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row.map_err(|e| Error::OperationFailed {
                operation: "read_prompt_row".to_string(),
                cause: e.to_string(),
            })?);
        }

        Ok(results)
    }

    fn find_by_id(&self, id: &PromptId) -> Result<Option<Prompt>> {
        let conn = self.lock_conn()?;

        conn.query_row(
            "SELECT id, title, description, content, category, prompt_type, tags, \
             preview_images, usage, likes, comments, rating, views, created_at, updated_at \
             FROM prompts WHERE id = ?1",
            params![id.as_str()],
            row_to_prompt,
        )
        .optional()
        .map_err(|e| Error::OperationFailed {
            operation: "find_prompt_by_id".to_string(),
            cause: e.to_string(),
        })
    }

    fn count(&self, filter: &PromptFilter) -> Result<u64> {
        let conn = self.lock_conn()?;

        let (filter_sql, params_vec) = filter_clause(filter);
        let sql = format!("SELECT COUNT(*) FROM prompts WHERE 1=1{filter_sql}");

        let params_refs: Vec<&dyn rusqlite::ToSql> =
            params_vec.iter().map(AsRef::as_ref).collect();

        let total: i64 = conn
            .query_row(&sql, params_refs.as_slice(), |row| row.get(0))
            .map_err(|e| Error::OperationFailed {
                operation: "count_prompts".to_string(),
                cause: e.to_string(),
            })?;

        Ok(total.unsigned_abs())
    }

    fn distinct_categories(&self) -> Result<Vec<String>> {
        let conn = self.lock_conn()?;

        let mut stmt = conn
            .prepare(
                "SELECT DISTINCT category FROM prompts \
                 WHERE category IS NOT NULL ORDER BY category ASC",
            )
            .map_err(|e| Error::OperationFailed {
                operation: "prepare_distinct_categories".to_string(),
                cause: e.to_string(),
            })?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| Error::OperationFailed {
                operation: "distinct_categories".to_string(),
                cause: e.to_string(),
            })?;

        let mut categories = Vec::new();
        for row in rows {
            categories.push(row.map_err(|e| Error::OperationFailed {
                operation: "read_category_row".to_string(),
                cause: e.to_string(),
            })?);
        }

        Ok(categories)
    }

    fn increment_views(&self, id: &PromptId) -> Result<bool> {
        let conn = self.lock_conn()?;

        let rows_affected = conn
            .execute(
                "UPDATE prompts SET views = views + 1 WHERE id = ?1",
                params![id.as_str()],
            )
            .map_err(|e| Error::OperationFailed {
                operation: "increment_views".to_string(),
                cause: e.to_string(),
            })?;

        Ok(rows_affected > 0)
    }

    fn insert(&self, prompt: &Prompt) -> Result<()> {
        let conn = self.lock_conn()?;

        let tags_json = serde_json::to_string(&prompt.tags).map_err(|e| Error::OperationFailed {
            operation: "serialize_tags".to_string(),
            cause: e.to_string(),
        })?;

        let preview_images_json =
            serde_json::to_string(&prompt.preview_images).map_err(|e| Error::OperationFailed {
                operation: "serialize_preview_images".to_string(),
                cause: e.to_string(),
            })?;

        conn.execute(
            "INSERT INTO prompts
             (id, title, description, content, category, prompt_type, tags, preview_images,
              usage, likes, comments, rating, views, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                prompt.id.as_str(),
                prompt.title,
                prompt.description,
                prompt.content,
                prompt.category,
                prompt.prompt_type,
                tags_json,
                preview_images_json,
                prompt.usage,
                prompt.likes,
                prompt.comments,
                prompt.rating,
                prompt.views,
                prompt.created_at,
                prompt.updated_at,
            ],
        )
        .map_err(|e| Error::OperationFailed {
            operation: "insert_prompt".to_string(),
            cause: e.to_string(),
        })?;

        Ok(())
    }
}
