//! # Template Store
//!
//! SQLite persistence for categories, templates, saved forms, generated
//! document history and user profiles.
//!
//! Every operation opens its own connection to the database file, so a
//! `Store` is only a path and can be cloned freely into `web::block` closures.
//! Ids are server-generated UUIDs and timestamps are stored as UTC text.
//!
//! The operations are split by record kind into the sub-modules, each adding
//! an `impl Store` block.

mod categories;
mod documents;
mod profiles;
mod saved_forms;
mod stats;
mod templates;

use std::path::{Path, PathBuf};

use chrono::{DateTime, SubsecRound, Utc};
use log::info;
use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("stored JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
}

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS categories (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        name_ar TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        description_ar TEXT NOT NULL DEFAULT '',
        sort_order INTEGER NOT NULL DEFAULT 1,
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS templates (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        name_ar TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        description_ar TEXT NOT NULL DEFAULT '',
        category_id TEXT NOT NULL,
        sort_order INTEGER NOT NULL DEFAULT 1,
        is_active INTEGER NOT NULL DEFAULT 1,
        estimated_time TEXT NOT NULL DEFAULT '',
        markdown_content TEXT,
        fields TEXT NOT NULL DEFAULT '[]',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_templates_category ON templates (category_id);
    CREATE TABLE IF NOT EXISTS saved_forms (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        template_id TEXT NOT NULL,
        title TEXT NOT NULL,
        field_values TEXT NOT NULL DEFAULT '{}',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_saved_forms_user ON saved_forms (user_id);
    CREATE TABLE IF NOT EXISTS generated_documents (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        template_id TEXT NOT NULL,
        kind TEXT NOT NULL,
        title TEXT NOT NULL,
        generated_at TEXT NOT NULL,
        download_count INTEGER NOT NULL DEFAULT 0
    );
    CREATE INDEX IF NOT EXISTS idx_generated_documents_user ON generated_documents (user_id);
    CREATE TABLE IF NOT EXISTS user_profiles (
        uid TEXT PRIMARY KEY,
        email TEXT,
        display_name TEXT,
        photo_url TEXT,
        language TEXT NOT NULL DEFAULT 'fr',
        theme TEXT NOT NULL DEFAULT 'light',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
";

/// Handle on the SQLite database file.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection to the database file.
    pub fn connect(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        Ok(conn)
    }

    /// Create missing tables and seed the default categories into an empty
    /// store.
    pub fn init(&self) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;
        let seeded = self.seed_default_categories()?;
        if seeded > 0 {
            info!("Seeded {} default categories into {}", seeded, self.path.display());
        }
        Ok(())
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Current time at millisecond precision, which survives the text round trip.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}


#[cfg(test)]
mod tests {
    use super::testing::temp_store;

    #[test]
    fn init_is_idempotent() {
        let (_dir, store) = temp_store();
        store.init().unwrap();
        assert_eq!(store.list_categories().unwrap().len(), 9);
    }
}
