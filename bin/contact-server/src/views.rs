//! Server-side page rendering.
//!
//! Templates are compiled into the binary and auto-escaped (`.html`).

use chrono::{DateTime, Utc};
use contact_core::SerializedMessage;
use minijinja::{Environment, Value, context};
use serde::Serialize;

/// Shown on the messages page when the store cannot be read.
pub const PAGE_LOAD_ERROR: &str = "Database connection failed";

/// Model for `messages.html`.
#[derive(Debug, Clone, Serialize)]
pub struct MessagesPage {
    pub messages: Vec<SerializedMessage>,
    pub error: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// Model for `contact.html`. Field values are echoed back after a rejected
/// submission.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub notice: Option<Notice>,
}

#[derive(Debug)]
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("base.html", include_str!("../templates/base.html"))?;
        env.add_template("index.html", include_str!("../templates/index.html"))?;
        env.add_template("contact.html", include_str!("../templates/contact.html"))?;
        env.add_template("messages.html", include_str!("../templates/messages.html"))?;
        env.add_filter("datetime", format_datetime);
        Ok(Self { env })
    }

    pub fn home(&self) -> Result<String, minijinja::Error> {
        self.env.get_template("index.html")?.render(context! {})
    }

    pub fn contact(&self, form: &ContactForm) -> Result<String, minijinja::Error> {
        self.env.get_template("contact.html")?.render(form)
    }

    pub fn messages(&self, page: &MessagesPage) -> Result<String, minijinja::Error> {
        self.env.get_template("messages.html")?.render(page)
    }
}

/// `2026-10-19T08:15:30.123Z` → `10/19/2026, 08:15 AM UTC`. Unparseable
/// input is passed through and still escaped.
fn format_datetime(value: String) -> Value {
    match value.parse::<DateTime<Utc>>() {
        Ok(at) => Value::from_safe_string(at.format("%m/%d/%Y, %I:%M %p UTC").to_string()),
        Err(_) => Value::from(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contact_core::MessageStatus;

    fn sample(name: &str, status: MessageStatus) -> SerializedMessage {
        SerializedMessage {
            id: format!("id-{name}"),
            name: name.to_owned(),
            email: format!("{}@example.com", name.to_lowercase()),
            message: "Hello\nthere".to_owned(),
            created_at: "2026-10-19T08:15:30.123Z".to_owned(),
            status,
        }
    }

    #[test]
    fn formats_iso_dates_for_humans() {
        assert_eq!(
            format_datetime("2026-10-19T20:05:00.000Z".to_owned()).to_string(),
            "10/19/2026, 08:05 PM UTC"
        );
        assert_eq!(format_datetime("garbage".to_owned()).to_string(), "garbage");
    }

    #[test]
    fn messages_page_lists_each_message() {
        let views = Views::new().unwrap();
        let html = views
            .messages(&MessagesPage {
                messages: vec![
                    sample("Ann", MessageStatus::Unread),
                    sample("Bob", MessageStatus::Read),
                ],
                error: None,
            })
            .unwrap();
        assert!(html.contains("Total 2 messages"));
        assert!(html.contains("ann@example.com"));
        assert!(html.contains("10/19/2026, 08:15 AM UTC"));
        assert!(html.contains(">Unread<"));
        assert!(html.contains(">Read<"));
    }

    #[test]
    fn empty_messages_page_invites_first_message() {
        let views = Views::new().unwrap();
        let html = views
            .messages(&MessagesPage {
                messages: Vec::new(),
                error: None,
            })
            .unwrap();
        assert!(html.contains("No messages received yet."));
    }

    #[test]
    fn error_page_shows_notice() {
        let views = Views::new().unwrap();
        let html = views
            .messages(&MessagesPage {
                messages: Vec::new(),
                error: Some(PAGE_LOAD_ERROR),
            })
            .unwrap();
        assert!(html.contains("An Error Occurred"));
        assert!(html.contains(PAGE_LOAD_ERROR));
    }

    #[test]
    fn user_content_is_escaped() {
        let views = Views::new().unwrap();
        let mut msg = sample("Eve", MessageStatus::Unread);
        msg.message = "<script>alert(1)</script>".to_owned();
        let html = views
            .messages(&MessagesPage {
                messages: vec![msg],
                error: None,
            })
            .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn contact_form_echoes_values_and_notice() {
        let views = Views::new().unwrap();
        let html = views
            .contact(&ContactForm {
                name: "Ann".to_owned(),
                email: "nope".to_owned(),
                message: "Hi".to_owned(),
                notice: Some(Notice {
                    kind: NoticeKind::Error,
                    text: "Please enter a valid email.".to_owned(),
                }),
            })
            .unwrap();
        assert!(html.contains(r#"value="nope""#));
        assert!(html.contains("notice error"));
        assert!(html.contains("Please enter a valid email."));
    }
}
