//! PostgreSQL database layer
//!
//! Each operation checks a connection out of the pool (or begins a
//! transaction on one) for the duration of the call. Dropping the handle
//! returns it to the pool; an uncommitted transaction rolls back on drop.

use crate::config::Settings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use gallery_core::ports::{MemoryStore, TextStore};
use gallery_core::{GalleryError, Memory, NewMemory, TextEntry};
use sqlx::postgres::{PgPool, PgPoolOptions};

pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn connect(settings: &Settings) -> Result<Self> {
        tracing::info!(
            "Connecting to PostgreSQL at: {}",
            settings.redacted_connection_string()
        );

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(&settings.connection_string)
            .await
            .context("Failed to connect to PostgreSQL")?;

        tracing::info!(
            "PostgreSQL pool established (max_connections={})",
            settings.max_connections
        );

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS memories (
                id BIGSERIAL PRIMARY KEY,
                title TEXT NOT NULL,
                date TEXT NOT NULL,
                description TEXT,
                image_url TEXT NOT NULL,
                created_at TIMESTAMPTZ DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create memories table")?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS memories_created_at_idx
            ON memories (created_at DESC)
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create memories index")?;

        // Keys are provisioned out of band; nothing here inserts rows
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS texts (
                key TEXT PRIMARY KEY,
                value TEXT,
                updated_at TIMESTAMPTZ DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create texts table")?;

        tracing::info!("Database migrations complete");
        Ok(())
    }
}

fn db_error(e: sqlx::Error) -> GalleryError {
    GalleryError::Database(e.to_string())
}

#[async_trait]
impl MemoryStore for Database {
    async fn list_memories(&self) -> gallery_core::Result<Vec<Memory>> {
        let mut conn = self.pool.acquire().await.map_err(db_error)?;

        let rows: Vec<MemoryRow> = sqlx::query_as(
            r#"
            SELECT id, title, date, description, image_url, created_at
            FROM memories
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn insert_memory(&self, memory: &NewMemory) -> gallery_core::Result<i64> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO memories (title, date, description, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&memory.title)
        .bind(&memory.date)
        .bind(&memory.description)
        .bind(&memory.image_url)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(id)
    }

    async fn delete_memory(&self, id: &str) -> gallery_core::Result<u64> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        // The id arrives as text; the cast rejects anything non-numeric
        let result = sqlx::query(
            r#"
            DELETE FROM memories WHERE id = $1::bigint
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl TextStore for Database {
    async fn list_texts(&self) -> gallery_core::Result<Vec<TextEntry>> {
        let mut conn = self.pool.acquire().await.map_err(db_error)?;

        let rows: Vec<(String, Option<String>)> = sqlx::query_as(
            r#"
            SELECT key, value FROM texts
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|(key, value)| TextEntry { key, value })
            .collect())
    }

    async fn update_text(&self, key: &str, value: &str) -> gallery_core::Result<u64> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let result = sqlx::query(
            r#"
            UPDATE texts SET value = $1, updated_at = CURRENT_TIMESTAMP
            WHERE key = $2
            "#,
        )
        .bind(value)
        .bind(key)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(result.rows_affected())
    }
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct MemoryRow {
    id: i64,
    title: String,
    date: String,
    description: Option<String>,
    image_url: String,
    created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<MemoryRow> for Memory {
    fn from(r: MemoryRow) -> Self {
        Memory {
            id: r.id,
            title: r.title,
            date: r.date,
            description: r.description,
            image_url: r.image_url,
            created_at: r.created_at,
        }
    }
}
