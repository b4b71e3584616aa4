use contact_core::SerializedMessage;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Shape of a `POST /api/contact` body. Only used for documentation: the
/// handler accepts arbitrary JSON and validates it field by field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Envelope returned by the contact API. `id` is set after a successful
/// create; error responses carry only `message`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessagesResponse {
    pub message: String,
    pub messages: Vec<SerializedMessage>,
}

pub const CREATED: &str = "Message has been saved successfully";
pub const LISTED: &str = "Successfully got the messages";

impl ApiResponse {
    pub fn created(id: String) -> Self {
        Self {
            message: CREATED.to_owned(),
            id: Some(id),
        }
    }
}

impl MessagesResponse {
    pub fn listed(messages: Vec<SerializedMessage>) -> Self {
        Self {
            message: LISTED.to_owned(),
            messages,
        }
    }
}
