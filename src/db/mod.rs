//! Database layer.
//!
//! One [`Store`] interface with two interchangeable backends, chosen once at
//! startup from configuration:
//! - [`SqliteStore`]: embedded file, no server process
//! - [`PostgresStore`]: networked, pooled, optionally TLS

pub mod postgres;
pub mod sqlite;

pub use postgres::PostgresStore;
pub use sqlite::SqliteStore;

use crate::config::{Config, DatabaseTarget};
use crate::error::AppError;
use crate::models::{default_content, AdminUser, LeadRecord, NewLead};
use crate::services::auth::hash_password;
use crate::time_utils::format_utc_rfc3339;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Table names as constants.
pub mod tables {
    pub const ADMIN_USERS: &str = "admin_users";
    /// Single-row table; the only row has id 1.
    pub const APP_CONTENT: &str = "app_content";
    pub const LEADS: &str = "leads";
}

/// Bootstrap admin account created on first startup.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@gmail.com";
/// Hashed before storage; never persisted in clear.
pub const DEFAULT_ADMIN_PASSWORD: &str = "1234";

/// Upper bound on leads returned by a listing.
pub const MAX_LEADS: i64 = 500;

/// The content document together with its last write time.
#[derive(Debug, Clone)]
pub struct StoredContent {
    pub document: Value,
    pub updated_at: DateTime<Utc>,
}

/// Storage operations shared by every backend.
#[async_trait]
pub trait Store: Send + Sync {
    /// Short backend name for diagnostics.
    fn backend_name(&self) -> &'static str;

    /// Create tables if they do not exist.
    async fn migrate(&self) -> Result<(), AppError>;

    /// Insert an admin unless the email already exists. Returns whether a row was written.
    async fn insert_admin_if_absent(&self, email: &str, password_hash: &str)
        -> Result<bool, AppError>;

    /// Insert the content row unless it already exists. Returns whether a row was written.
    async fn insert_content_if_absent(&self, document: &Value) -> Result<bool, AppError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<AdminUser>, AppError>;

    async fn get_content(&self) -> Result<Option<StoredContent>, AppError>;

    /// Replace the whole content document and stamp a fresh `updated_at`.
    ///
    /// Last write wins; there is no revision check.
    async fn save_content(&self, document: &Map<String, Value>)
        -> Result<DateTime<Utc>, AppError>;

    async fn create_lead(&self, lead: &NewLead) -> Result<LeadRecord, AppError>;

    /// Most recent leads first, at most `limit` rows.
    async fn list_leads(&self, limit: i64) -> Result<Vec<LeadRecord>, AppError>;
}

/// Shared handle to the selected backend.
pub type StoreHandle = Arc<dyn Store>;

/// Open the configured backend, create the schema and seed defaults.
pub async fn initialize(config: &Config) -> Result<StoreHandle, AppError> {
    let store: StoreHandle = match &config.database {
        DatabaseTarget::Sqlite { path } => Arc::new(SqliteStore::open(path).await?),
        DatabaseTarget::Postgres { url, require_tls } => {
            Arc::new(PostgresStore::connect(url, *require_tls).await?)
        }
    };

    prepare(store.as_ref()).await?;
    Ok(store)
}

/// Idempotently create tables and seed the admin account and content document.
pub async fn prepare(store: &dyn Store) -> Result<(), AppError> {
    store.migrate().await?;

    if store
        .get_user_by_email(DEFAULT_ADMIN_EMAIL)
        .await?
        .is_none()
    {
        let password_hash = hash_password(DEFAULT_ADMIN_PASSWORD)?;
        if store
            .insert_admin_if_absent(DEFAULT_ADMIN_EMAIL, &password_hash)
            .await?
        {
            tracing::info!(email = DEFAULT_ADMIN_EMAIL, "Seeded default admin account");
        }
    }

    if store.get_content().await?.is_none() {
        let document = serde_json::to_value(default_content())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Default content: {}", e)))?;
        if store.insert_content_if_absent(&document).await? {
            tracing::info!("Seeded default content document");
        }
    }

    Ok(())
}

/// Lead row as read from either backend.
#[derive(sqlx::FromRow)]
struct LeadRow {
    id: i64,
    name: String,
    phone: String,
    email: String,
    source: String,
    notes: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<LeadRow> for LeadRecord {
    type Error = AppError;

    fn try_from(row: LeadRow) -> Result<Self, Self::Error> {
        let source = row.source.parse().map_err(|_| {
            AppError::Database(format!("Lead {} has unknown source {:?}", row.id, row.source))
        })?;

        Ok(LeadRecord {
            id: row.id,
            name: row.name,
            phone: row.phone,
            email: row.email,
            source,
            notes: row.notes,
            created_at: format_utc_rfc3339(row.created_at),
        })
    }
}

/// Admin row as read from either backend.
#[derive(sqlx::FromRow)]
struct AdminRow {
    id: i64,
    email: String,
    password_hash: String,
}

impl From<AdminRow> for AdminUser {
    fn from(row: AdminRow) -> Self {
        AdminUser {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
        }
    }
}

/// Decode a stored `content_json` column.
fn parse_document(raw: &str) -> Result<Value, AppError> {
    serde_json::from_str(raw)
        .map_err(|e| AppError::Database(format!("Stored content is not valid JSON: {}", e)))
}

fn encode_document<T: serde::Serialize + ?Sized>(document: &T) -> Result<String, AppError> {
    serde_json::to_string(document)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Content serialization failed: {}", e)))
}
