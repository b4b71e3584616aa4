//! Message Store Gateway.
//!
//! The only component that reads or writes the document store. Stored
//! records ([`ContactMessage`]) never leave this module in their native
//! form: the read path always returns [`SerializedMessage`].

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};

use crate::message::{ContactMessage, MessageStatus, NewDocument, SerializedMessage};
use crate::store::MessageStore;
use crate::validation::NormalizedFields;

/// Number of messages returned when a caller has no preference.
pub const DEFAULT_LIST_LIMIT: usize = 20;

/// Hard cap on a single listing.
pub const MAX_LIST_LIMIT: usize = 20;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// The store is unreachable or rejected the operation.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Write and read paths over an injected [`MessageStore`].
///
/// The store handle is shared; cloning the gateway does not open new
/// connections.
#[derive(Debug)]
pub struct MessageGateway<S> {
    store: Arc<S>,
}

impl<S> Clone for MessageGateway<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: MessageStore> MessageGateway<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Store an accepted submission as a new `unread` message stamped with
    /// the current server time. Returns the store-assigned id.
    #[tracing::instrument(name = "contact.create", skip_all)]
    pub async fn create(&self, fields: NormalizedFields) -> Result<String, GatewayError> {
        let (name, email, message) = fields.into_parts();
        let doc = NewDocument {
            name,
            email,
            message,
            created_at: Utc::now(),
            status: MessageStatus::Unread,
        };
        let id = self.store.insert(doc).await?;
        info!(%id, "contact message stored");
        Ok(id.to_string())
    }

    /// The newest messages in wire form, at most `min(limit, MAX_LIST_LIMIT)`.
    #[tracing::instrument(name = "contact.list_recent", skip(self))]
    pub async fn list_recent(&self, limit: usize) -> Result<Vec<SerializedMessage>, GatewayError> {
        let limit = limit.min(MAX_LIST_LIMIT);
        let docs = self.store.find_recent(limit).await?;
        debug!(count = docs.len(), "loaded recent contact messages");
        Ok(docs
            .into_iter()
            .take(limit)
            .map(ContactMessage::into_wire)
            .collect())
    }
}
