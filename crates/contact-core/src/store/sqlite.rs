//! SQLite implementation of [`MessageStore`].
//!
//! Migrations are embedded at compile time (`./migrations`, relative to the
//! crate root) and run by [`SqliteStore::connect`]. Queries use the
//! runtime-checked `sqlx::query` form so no `DATABASE_URL` is needed to build.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::warn;
use uuid::Uuid;

use super::MessageStore;
use crate::message::{ContactMessage, MessageStatus, NewDocument};

type MessageRow = (i64, String, String, String, String, String, Option<String>);

/// SQLite-backed contact message collection.
///
/// Cloning is cheap; clones share the same connection pool.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the database at `url` and run pending migrations.
    ///
    /// `url` is a sqlx SQLite URL such as `"sqlite://contact.db"`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;
        Self::migrate(pool).await
    }

    /// A private in-memory database on a single pinned connection.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        // Every pooled connection would get its own empty database, so keep
        // exactly one alive for the lifetime of the pool.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::migrate(pool).await
    }

    async fn migrate(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Close the pool. Later queries fail with [`sqlx::Error::PoolClosed`].
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl MessageStore for SqliteStore {
    async fn insert(&self, doc: NewDocument) -> Result<Uuid, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO contact_messages (id, name, email, message, created_at, status) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(id.to_string())
        .bind(&doc.name)
        .bind(&doc.email)
        .bind(&doc.message)
        .bind(encode_timestamp(&doc.created_at))
        .bind(doc.status.as_ref())
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn find_recent(&self, limit: usize) -> Result<Vec<ContactMessage>, sqlx::Error> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<MessageRow> = sqlx::query_as(
            "SELECT seq, id, name, email, message, created_at, status \
             FROM contact_messages ORDER BY created_at DESC, seq DESC LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(decode_row).collect()
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

/// Fixed-width UTC text so that `ORDER BY created_at` is chronological.
fn encode_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_row(row: MessageRow) -> Result<ContactMessage, sqlx::Error> {
    let (seq, id, name, email, message, created_at, status) = row;
    let created_at = created_at
        .parse::<DateTime<Utc>>()
        .unwrap_or_else(|e: chrono::ParseError| {
            warn!(%id, raw = %created_at, error = %e, "failed to parse created_at; using epoch");
            DateTime::UNIX_EPOCH
        });
    let status = status.and_then(|raw| match raw.parse::<MessageStatus>() {
        Ok(s) => Some(s),
        Err(_) => {
            warn!(%id, raw = %raw, "unknown message status; treating as unread");
            None
        }
    });
    Ok(ContactMessage {
        id,
        seq,
        name,
        email,
        message,
        created_at,
        status,
    })
}
