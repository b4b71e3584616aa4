//! Submission validation.
//!
//! Checks run in a fixed order so the reported error is deterministic:
//! field types first, then presence after trimming, then the email shape.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use validator::Validate;

/// Single `@`, at least one `.` after it, no whitespace anywhere.
/// Deliberately lenient: `a@b.c.` passes, `user@localhost` does not.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Why a submission was rejected. `Display` is the text shown to visitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent or not a string, or the body is not an object.
    #[error("Please enter the correct format")]
    InvalidFormat,

    /// A required field is empty after trimming.
    #[error("Please enter all fields required")]
    MissingField,

    /// The email does not match [`EMAIL_PATTERN`].
    #[error("Please enter a valid email.")]
    InvalidEmail,
}

/// A submission that passed [`validate`]. Only this module can build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFields {
    name: String,
    email: String,
    message: String,
}

impl NormalizedFields {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn into_parts(self) -> (String, String, String) {
        (self.name, self.email, self.message)
    }
}

#[derive(Debug, Validate)]
struct TrimmedSubmission {
    #[validate(length(min = 1))]
    name: String,
    #[validate(length(min = 1), regex(path = *EMAIL_PATTERN))]
    email: String,
    #[validate(length(min = 1))]
    message: String,
}

/// Validate an untrusted `{name, email, message}` record.
///
/// On success `name` and `message` are trimmed and `email` is trimmed and
/// lowercased.
pub fn validate(input: &Value) -> Result<NormalizedFields, ValidationError> {
    let name = text_field(input, "name")?;
    let email = text_field(input, "email")?;
    let message = text_field(input, "message")?;

    let submission = TrimmedSubmission {
        name: name.trim().to_owned(),
        email: email.trim().to_owned(),
        message: message.trim().to_owned(),
    };

    if let Err(errors) = submission.validate() {
        let missing = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .any(|e| e.code == "length");
        return Err(if missing {
            ValidationError::MissingField
        } else {
            ValidationError::InvalidEmail
        });
    }

    Ok(NormalizedFields {
        name: submission.name,
        email: submission.email.to_lowercase(),
        message: submission.message,
    })
}

fn text_field<'a>(input: &'a Value, key: &str) -> Result<&'a str, ValidationError> {
    input
        .get(key)
        .and_then(Value::as_str)
        .ok_or(ValidationError::InvalidFormat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_the_ann_submission() {
        let fields = validate(&json!({
            "name": "Ann",
            "email": "ann@example.com ",
            "message": " Hi ",
        }))
        .unwrap();
        assert_eq!(fields.name(), "Ann");
        assert_eq!(fields.email(), "ann@example.com");
        assert_eq!(fields.message(), "Hi");
    }

    #[test]
    fn lowercases_and_trims_email() {
        let fields = validate(&json!({
            "name": "  Bob \n",
            "email": "\tBob.Smith@Example.ORG  ",
            "message": "line one\nline two",
        }))
        .unwrap();
        assert_eq!(fields.name(), "Bob");
        assert_eq!(fields.email(), "bob.smith@example.org");
        assert_eq!(fields.message(), "line one\nline two");
    }

    #[test]
    fn non_string_fields_are_invalid_format() {
        let cases = [
            json!({ "name": 1, "email": "a@b.com", "message": "hi" }),
            json!({ "name": "A", "email": null, "message": "hi" }),
            json!({ "name": "A", "email": "a@b.com", "message": ["hi"] }),
            json!({ "name": "A", "email": "a@b.com", "message": { "text": "hi" } }),
            json!({ "name": true, "email": "a@b.com", "message": "hi" }),
        ];
        for case in cases {
            assert_eq!(validate(&case), Err(ValidationError::InvalidFormat), "{case}");
        }
    }

    #[test]
    fn absent_field_is_invalid_format() {
        let input = json!({ "name": "A", "message": "hi" });
        assert_eq!(validate(&input), Err(ValidationError::InvalidFormat));
    }

    #[test]
    fn non_object_body_is_invalid_format() {
        for input in [json!(null), json!("text"), json!([1, 2, 3]), json!(42)] {
            assert_eq!(validate(&input), Err(ValidationError::InvalidFormat));
        }
    }

    #[test]
    fn type_check_wins_over_presence_check() {
        let input = json!({ "name": "", "email": 5, "message": "hi" });
        assert_eq!(validate(&input), Err(ValidationError::InvalidFormat));
    }

    #[test]
    fn empty_name_is_missing_field() {
        let input = json!({ "name": "", "email": "a@b.com", "message": "hi" });
        assert_eq!(validate(&input), Err(ValidationError::MissingField));
    }

    #[test]
    fn whitespace_only_fields_are_missing() {
        let cases = [
            json!({ "name": "   ", "email": "a@b.com", "message": "hi" }),
            json!({ "name": "A", "email": " \t ", "message": "hi" }),
            json!({ "name": "A", "email": "a@b.com", "message": "\n\n" }),
        ];
        for case in cases {
            assert_eq!(validate(&case), Err(ValidationError::MissingField), "{case}");
        }
    }

    #[test]
    fn presence_check_wins_over_email_format() {
        let input = json!({ "name": "", "email": "not-an-email", "message": "hi" });
        assert_eq!(validate(&input), Err(ValidationError::MissingField));
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in [
            "not-an-email",
            "a@b",
            "user@localhost",
            "a.b@c",
            "@b.com",
            "a@.com",
            "a@@b.com",
            "a b@c.com",
            "a@b.com extra",
        ] {
            let input = json!({ "name": "A", "email": email, "message": "hi" });
            assert_eq!(validate(&input), Err(ValidationError::InvalidEmail), "{email}");
        }
    }

    #[test]
    fn lenient_email_shapes_are_accepted() {
        for email in ["a@b.c", "a@b.c.", "x@y.z.w", "first.last+tag@sub.example.co"] {
            let input = json!({ "name": "A", "email": email, "message": "hi" });
            assert!(validate(&input).is_ok(), "{email}");
        }
    }

    #[test]
    fn extra_fields_are_ignored() {
        let input = json!({
            "name": "A",
            "email": "a@b.com",
            "message": "hi",
            "status": "read",
            "createdAt": "1999-01-01T00:00:00Z",
        });
        assert!(validate(&input).is_ok());
    }

    #[test]
    fn user_facing_text_matches_error_kind() {
        assert_eq!(
            ValidationError::InvalidFormat.to_string(),
            "Please enter the correct format"
        );
        assert_eq!(
            ValidationError::MissingField.to_string(),
            "Please enter all fields required"
        );
        assert_eq!(
            ValidationError::InvalidEmail.to_string(),
            "Please enter a valid email."
        );
    }
}
