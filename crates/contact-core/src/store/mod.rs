//! Document store abstraction.
//!
//! [`MessageStore`] is the capability the gateway needs from persistence:
//! insert a document and read the newest ones back. The default
//! implementation is [`sqlite::SqliteStore`]. To move to another database,
//! implement [`MessageStore`] for a new type and hand it to
//! [`crate::gateway::MessageGateway::new`].
//!
//! Trait methods use `impl Future` in their signatures, so no extra
//! `async-trait` crate is required.

pub mod sqlite;

pub use sqlite::SqliteStore;

use std::future::Future;

use uuid::Uuid;

use crate::message::{ContactMessage, NewDocument};

pub trait MessageStore: Send + Sync + 'static {
    /// Persist a new document and return the identifier the store assigned.
    fn insert(&self, doc: NewDocument) -> impl Future<Output = Result<Uuid, sqlx::Error>> + Send;

    /// Fetch at most `limit` documents, newest `created_at` first. Equal
    /// timestamps are ordered by insertion sequence, newest first.
    fn find_recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ContactMessage>, sqlx::Error>> + Send;
}
