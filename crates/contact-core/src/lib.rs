//! contact-core – validation and persistence pipeline for contact-form
//! submissions.
//!
//! A submission flows through [`validation::validate`], which turns an
//! untrusted JSON record into [`validation::NormalizedFields`]. The
//! [`gateway::MessageGateway`] is the only component that talks to the
//! document store: it stamps new messages, writes them, and projects stored
//! records into their wire shape ([`message::SerializedMessage`]).

pub mod gateway;
pub mod message;
pub mod store;
pub mod validation;

pub use gateway::{DEFAULT_LIST_LIMIT, GatewayError, MAX_LIST_LIMIT, MessageGateway};
pub use message::{MessageStatus, SerializedMessage};
pub use store::{MessageStore, SqliteStore};
pub use validation::{NormalizedFields, ValidationError, validate};
