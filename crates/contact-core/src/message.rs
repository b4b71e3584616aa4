//! Stored and wire representations of a contact message.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Read state of a stored message. Only `Unread` is ever written here.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MessageStatus {
    Read,
    #[default]
    Unread,
}

/// A document about to be inserted. The store assigns `id` and `seq`.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub status: MessageStatus,
}

/// A single row of the `contact_messages` collection.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    /// Store-assigned id. Kept as stored text; clients treat it as opaque.
    pub id: String,
    /// Insertion sequence; breaks ties between equal `created_at` values.
    pub seq: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    /// `None` for legacy documents written without a status.
    pub status: Option<MessageStatus>,
}

/// Transport projection of [`ContactMessage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SerializedMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    /// ISO-8601 UTC timestamp with millisecond precision.
    pub created_at: String,
    pub status: MessageStatus,
}

impl ContactMessage {
    pub(crate) fn into_wire(self) -> SerializedMessage {
        SerializedMessage {
            id: self.id,
            name: self.name,
            email: self.email,
            message: self.message,
            created_at: iso_timestamp(&self.created_at),
            status: self.status.unwrap_or_default(),
        }
    }
}

/// Format a timestamp the way clients expect it on the wire,
/// e.g. `2026-10-19T08:15:30.123Z`.
pub fn iso_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn stored(status: Option<MessageStatus>) -> ContactMessage {
        ContactMessage {
            id: Uuid::new_v4().to_string(),
            seq: 1,
            name: "Ann".into(),
            email: "ann@example.com".into(),
            message: "Hi".into(),
            created_at: Utc.with_ymd_and_hms(2026, 10, 19, 8, 15, 30).unwrap(),
            status,
        }
    }

    #[test]
    fn wire_form_uses_string_id_and_iso_date() {
        let doc = stored(Some(MessageStatus::Read));
        let id = doc.id.clone();
        let wire = doc.into_wire();
        assert_eq!(wire.id, id);
        assert_eq!(wire.created_at, "2026-10-19T08:15:30.000Z");
        assert_eq!(wire.status, MessageStatus::Read);
    }

    #[test]
    fn missing_status_reads_as_unread() {
        assert_eq!(stored(None).into_wire().status, MessageStatus::Unread);
    }

    #[test]
    fn wire_json_is_camel_case() {
        let json = serde_json::to_value(stored(None).into_wire()).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
        assert_eq!(json["status"], "unread");
    }

    #[test]
    fn status_text_round_trips_through_strum() {
        assert_eq!(MessageStatus::Unread.as_ref(), "unread");
        assert_eq!("read".parse::<MessageStatus>().unwrap(), MessageStatus::Read);
        assert!("archived".parse::<MessageStatus>().is_err());
    }
}
