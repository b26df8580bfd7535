// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Embedded SQLite store.
//!
//! Used when no networked database is configured. The database file and its
//! parent directories are created on first open.

use super::{encode_document, parse_document, AdminRow, LeadRow, Store, StoredContent};
use crate::error::AppError;
use crate::models::{AdminUser, LeadRecord, NewLead};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

const SCHEMA: &[&str] = &[
    r"CREATE TABLE IF NOT EXISTS admin_users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL
    )",
    r"CREATE TABLE IF NOT EXISTS app_content (
        id INTEGER PRIMARY KEY CHECK (id = 1),
        content_json TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    r"CREATE TABLE IF NOT EXISTS leads (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        phone TEXT NOT NULL,
        email TEXT NOT NULL DEFAULT '',
        source TEXT NOT NULL CHECK (source IN ('enquire_now', 'price_sheet', 'brochure_download')),
        notes TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL
    )",
];

/// SQLite-backed store.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database file at `path`.
    pub async fn open(path: &Path) -> Result<Self, AppError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                AppError::Database(format!(
                    "Failed to create database directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open SQLite database: {}", e)))?;

        tracing::info!(path = %path.display(), "Opened SQLite database");

        Ok(Self { pool })
    }

    /// Private in-memory database, for tests and throwaway runs.
    ///
    /// Each SQLite connection has its own memory database, so the pool is
    /// pinned to one connection that is never recycled.
    pub async fn in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Underlying pool (used by tests to inspect tables).
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Store for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn migrate(&self) -> Result<(), AppError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn insert_admin_if_absent(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO admin_users (email, password_hash) VALUES (?, ?) \
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(email)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_content_if_absent(&self, document: &Value) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT INTO app_content (id, content_json, updated_at) VALUES (1, ?, ?) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(encode_document(document)?)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<AdminUser>, AppError> {
        let row: Option<AdminRow> =
            sqlx::query_as("SELECT id, email, password_hash FROM admin_users WHERE email = ?")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(AdminUser::from))
    }

    async fn get_content(&self) -> Result<Option<StoredContent>, AppError> {
        let row: Option<(String, DateTime<Utc>)> =
            sqlx::query_as("SELECT content_json, updated_at FROM app_content WHERE id = 1")
                .fetch_optional(&self.pool)
                .await?;

        row.map(|(raw, updated_at)| {
            Ok(StoredContent {
                document: parse_document(&raw)?,
                updated_at,
            })
        })
        .transpose()
    }

    async fn save_content(
        &self,
        document: &Map<String, Value>,
    ) -> Result<DateTime<Utc>, AppError> {
        let updated_at = Utc::now();
        let result =
            sqlx::query("UPDATE app_content SET content_json = ?, updated_at = ? WHERE id = 1")
                .bind(encode_document(document)?)
                .bind(updated_at)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotInitialized);
        }
        Ok(updated_at)
    }

    async fn create_lead(&self, lead: &NewLead) -> Result<LeadRecord, AppError> {
        let row: LeadRow = sqlx::query_as(
            "INSERT INTO leads (name, phone, email, source, notes, created_at) \
             VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING id, name, phone, email, source, notes, created_at",
        )
        .bind(&lead.name)
        .bind(&lead.phone)
        .bind(&lead.email)
        .bind(lead.source.as_str())
        .bind(&lead.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn list_leads(&self, limit: i64) -> Result<Vec<LeadRecord>, AppError> {
        let rows: Vec<LeadRow> = sqlx::query_as(
            "SELECT id, name, phone, email, source, notes, created_at \
             FROM leads ORDER BY id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(LeadRecord::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeadSource;

    fn lead(name: &str) -> NewLead {
        NewLead {
            name: name.to_string(),
            phone: "9876543210".to_string(),
            email: String::new(),
            source: LeadSource::EnquireNow,
            notes: String::new(),
        }
    }

    async fn migrated() -> SqliteStore {
        let store = SqliteStore::in_memory().await.unwrap();
        store.migrate().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_leads_listed_newest_first_and_capped() {
        let store = migrated().await;
        for name in ["first", "second", "third"] {
            store.create_lead(&lead(name)).await.unwrap();
        }

        let leads = store.list_leads(2).await.unwrap();
        let names: Vec<&str> = leads.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["third", "second"]);
        assert!(leads[0].id > leads[1].id);
    }

    #[tokio::test]
    async fn test_create_lead_returns_stored_record() {
        let store = migrated().await;
        let record = store.create_lead(&lead("Asha")).await.unwrap();

        assert_eq!(record.name, "Asha");
        assert_eq!(record.source, LeadSource::EnquireNow);
        assert_eq!(record.email, "");
        assert!(record.created_at.ends_with('Z'));
    }

    #[tokio::test]
    async fn test_save_without_seed_is_not_initialized() {
        let store = migrated().await;
        let err = store.save_content(&Map::new()).await.unwrap_err();
        assert!(matches!(err, AppError::NotInitialized));
    }

    #[tokio::test]
    async fn test_insert_if_absent_is_guarded() {
        let store = migrated().await;
        assert!(store.insert_admin_if_absent("a@b.co", "h1").await.unwrap());
        assert!(!store.insert_admin_if_absent("a@b.co", "h2").await.unwrap());

        let user = store.get_user_by_email("a@b.co").await.unwrap().unwrap();
        assert_eq!(user.password_hash, "h1");

        let doc = serde_json::json!({"v": 1});
        assert!(store.insert_content_if_absent(&doc).await.unwrap());
        assert!(!store
            .insert_content_if_absent(&serde_json::json!({"v": 2}))
            .await
            .unwrap());
        assert_eq!(store.get_content().await.unwrap().unwrap().document, doc);
    }

    #[tokio::test]
    async fn test_unknown_source_in_table_is_rejected() {
        let store = migrated().await;
        let err = sqlx::query(
            "INSERT INTO leads (name, phone, source, created_at) VALUES ('x', '1234567890', 'spam', '2026-01-01T00:00:00Z')",
        )
        .execute(store.pool())
        .await;
        assert!(err.is_err());
    }
}
