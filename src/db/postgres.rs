// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Networked Postgres store.
//!
//! Selected whenever `DATABASE_URL` is configured. Uses a small connection
//! pool; TLS is required for managed hosts or when explicitly requested.

use super::{encode_document, parse_document, AdminRow, LeadRow, Store, StoredContent};
use crate::error::AppError;
use crate::models::{AdminUser, LeadRecord, NewLead};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use std::str::FromStr;
use std::time::Duration;

const SCHEMA: &[&str] = &[
    r"CREATE TABLE IF NOT EXISTS admin_users (
        id BIGSERIAL PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL
    )",
    r"CREATE TABLE IF NOT EXISTS app_content (
        id INTEGER PRIMARY KEY CHECK (id = 1),
        content_json TEXT NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    r"CREATE TABLE IF NOT EXISTS leads (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        phone TEXT NOT NULL,
        email TEXT NOT NULL DEFAULT '',
        source TEXT NOT NULL CHECK (source IN ('enquire_now', 'price_sheet', 'brochure_download')),
        notes TEXT NOT NULL DEFAULT '',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
];

/// Postgres-backed store.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect a pool to `url`. With `require_tls`, plaintext connections are refused.
    pub async fn connect(url: &str, require_tls: bool) -> Result<Self, AppError> {
        let mut options = PgConnectOptions::from_str(url)
            .map_err(|e| AppError::Database(format!("Invalid DATABASE_URL: {}", e)))?;
        if require_tls {
            options = options.ssl_mode(PgSslMode::Require);
        }

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Postgres: {}", e)))?;

        tracing::info!(tls = require_tls, "Connected to Postgres");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PostgresStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
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
            "INSERT INTO admin_users (email, password_hash) VALUES ($1, $2) \
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
            "INSERT INTO app_content (id, content_json, updated_at) VALUES (1, $1, $2) \
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
            sqlx::query_as("SELECT id, email, password_hash FROM admin_users WHERE email = $1")
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
            sqlx::query("UPDATE app_content SET content_json = $1, updated_at = $2 WHERE id = 1")
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
             VALUES ($1, $2, $3, $4, $5, $6) \
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
             FROM leads ORDER BY id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(LeadRecord::try_from).collect()
    }
}
