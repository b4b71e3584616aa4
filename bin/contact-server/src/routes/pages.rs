//! Server-rendered HTML pages.
//!
//! The messages page reads the store at request time. A storage failure
//! renders an empty list with an inline notice instead of failing the page.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use contact_core::{DEFAULT_LIST_LIMIT, MessageGateway, MessageStore, validate};
use serde_json::Value;
use tracing::error;

use crate::error::{ServerError, WRITE_FAILED};
use crate::schemas::contact::CREATED;
use crate::state::AppState;
use crate::views::{ContactForm, MessagesPage, Notice, NoticeKind, PAGE_LOAD_ERROR};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/contact", get(contact_form).post(submit_contact_form))
        .route("/messages", get(messages_page))
}

pub async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    Ok(Html(state.views.home()?))
}

pub async fn contact_form(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    Ok(Html(state.views.contact(&ContactForm::default())?))
}

/// Browser form post. Runs the same validation and write path as the API
/// and re-renders the form with the outcome.
pub async fn submit_contact_form(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<(StatusCode, Html<String>), ServerError> {
    let input = Value::Object(
        fields
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    );
    let echo = |key: &str| fields.get(key).cloned().unwrap_or_default();
    let mut form = ContactForm {
        name: echo("name"),
        email: echo("email"),
        message: echo("message"),
        notice: None,
    };

    let status = match validate(&input) {
        Err(e) => {
            form.notice = Some(Notice {
                kind: NoticeKind::Error,
                text: e.to_string(),
            });
            StatusCode::BAD_REQUEST
        }
        Ok(normalized) => match state.gateway.create(normalized).await {
            Ok(_) => {
                form = ContactForm {
                    notice: Some(Notice {
                        kind: NoticeKind::Success,
                        text: CREATED.to_owned(),
                    }),
                    ..ContactForm::default()
                };
                StatusCode::OK
            }
            Err(e) => {
                error!(error = %e, "failed to store contact form submission");
                form.notice = Some(Notice {
                    kind: NoticeKind::Error,
                    text: WRITE_FAILED.to_owned(),
                });
                StatusCode::INTERNAL_SERVER_ERROR
            }
        },
    };

    Ok((status, Html(state.views.contact(&form)?)))
}

pub async fn messages_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    let page = load_messages_page(&state.gateway).await;
    Ok(Html(state.views.messages(&page)?))
}

/// Recent messages for the listing page, or an empty list plus
/// [`PAGE_LOAD_ERROR`] when the store cannot be read.
pub async fn load_messages_page<S: MessageStore>(gateway: &MessageGateway<S>) -> MessagesPage {
    match gateway.list_recent(DEFAULT_LIST_LIMIT).await {
        Ok(messages) => MessagesPage {
            messages,
            error: None,
        },
        Err(e) => {
            error!(error = %e, "failed to load messages for page");
            MessagesPage {
                messages: Vec::new(),
                error: Some(PAGE_LOAD_ERROR),
            }
        }
    }
}
