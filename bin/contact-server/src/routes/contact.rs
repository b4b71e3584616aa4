//! JSON contact API: create a message, list recent messages.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use contact_core::{DEFAULT_LIST_LIMIT, MessageStatus, SerializedMessage, ValidationError, validate};
use serde_json::Value;
use tracing::debug;
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::schemas::contact::{ApiResponse, ContactSubmission, MessagesResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(create_message, list_messages),
    components(schemas(
        ContactSubmission,
        ApiResponse,
        MessagesResponse,
        SerializedMessage,
        MessageStatus
    ))
)]
pub struct ContactApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/contact",
        post(create_message)
            .get(list_messages)
            // `get` would otherwise answer HEAD as well.
            .head(method_not_allowed)
            .fallback(method_not_allowed),
    )
}

#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "contact",
    request_body = ContactSubmission,
    responses(
        (status = 201, description = "Message stored", body = ApiResponse),
        (status = 400, description = "Wrong field types, empty fields, or malformed email", body = ApiResponse),
        (status = 500, description = "Storage failure", body = ApiResponse),
    )
)]
pub async fn create_message(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<ApiResponse>), ServerError> {
    let input: Value = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "request body is not JSON");
        ValidationError::InvalidFormat
    })?;
    let fields = validate(&input)?;
    let id = state
        .gateway
        .create(fields)
        .await
        .map_err(ServerError::StoreWrite)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::created(id))))
}

#[utoipa::path(
    get,
    path = "/api/contact",
    tag = "contact",
    responses(
        (status = 200, description = "Up to 20 messages, newest first", body = MessagesResponse),
        (status = 500, description = "Storage failure", body = ApiResponse),
    )
)]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MessagesResponse>, ServerError> {
    let messages = state
        .gateway
        .list_recent(DEFAULT_LIST_LIMIT)
        .await
        .map_err(ServerError::StoreRead)?;
    Ok(Json(MessagesResponse::listed(messages)))
}

async fn method_not_allowed(method: Method) -> ServerError {
    ServerError::MethodNotAllowed(method)
}
