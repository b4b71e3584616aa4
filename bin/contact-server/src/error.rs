//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a `{"message": ...}` JSON body with an appropriate status code.
//!
//! **Security note:** storage and rendering failures are logged with full
//! detail but only a generic message is returned to the caller so that
//! file paths, SQL, or other implementation details never leak to clients.

use axum::Json;
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use contact_core::{GatewayError, ValidationError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Methods served by `/api/contact`, as sent in the `Allow` header.
pub const CONTACT_ALLOWED_METHODS: &str = "POST, GET";

/// Generic text for a failed write.
pub const WRITE_FAILED: &str = "Server error occurred";

/// Generic text for a failed read.
pub const READ_FAILED: &str = "There has been an error in the Server";

/// Generic text for a page that failed to render.
pub const RENDER_FAILED: &str = "Internal server error";

/// All errors that can occur in the contact-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The submission failed type, presence, or email checks.
    #[error("invalid submission: {0}")]
    Validation(#[from] ValidationError),

    /// Persisting a new message failed.
    #[error("failed to store message: {0}")]
    StoreWrite(#[source] GatewayError),

    /// Listing messages failed.
    #[error("failed to list messages: {0}")]
    StoreRead(#[source] GatewayError),

    /// A page template failed to render.
    #[error("template error: {0}")]
    Render(#[from] minijinja::Error),

    /// The endpoint does not support this HTTP method.
    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Validation(_) => StatusCode::BAD_REQUEST,
            ServerError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ServerError::StoreWrite(_) | ServerError::StoreRead(_) | ServerError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text safe to show a visitor.
    pub fn client_message(&self) -> String {
        match self {
            ServerError::Validation(e) => e.to_string(),
            ServerError::MethodNotAllowed(m) => format!("Method {m} Not Allowed."),
            ServerError::StoreRead(_) => READ_FAILED.to_owned(),
            ServerError::StoreWrite(_) => WRITE_FAILED.to_owned(),
            ServerError::Render(_) => RENDER_FAILED.to_owned(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = Json(json!({ "message": self.client_message() }));

        match self {
            ServerError::MethodNotAllowed(_) => {
                (status, [(header::ALLOW, CONTACT_ALLOWED_METHODS)], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}
