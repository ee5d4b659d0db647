//! Contact form validation and submission.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::api::ApiClient;
use crate::error::FolioError;
use crate::models::contact::ContactMessage;
use crate::render::AlertKind;

pub const SUCCESS_MESSAGE: &str = "Thank you for your message! I'll get back to you soon.";
pub const FAILURE_MESSAGE: &str =
    "Failed to send message. Please try again or contact me directly via email.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Field {
    #[serde(rename = "firstName")]
    FirstName,
    #[serde(rename = "lastName")]
    LastName,
    #[serde(rename = "phoneNumber")]
    PhoneNumber,
    #[serde(rename = "message")]
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::FirstName,
        Field::LastName,
        Field::PhoneNumber,
        Field::Message,
    ];

    /// Form field name.
    pub fn name(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::PhoneNumber => "phoneNumber",
            Field::Message => "message",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == s)
    }

    fn value<'a>(&self, msg: &'a ContactMessage) -> &'a str {
        match self {
            Field::FirstName => &msg.first_name,
            Field::LastName => &msg.last_name,
            Field::PhoneNumber => &msg.phone_number,
            Field::Message => &msg.message,
        }
    }
}

/// Outcome of validating one field as the user types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldState {
    pub field: Field,
    pub valid: bool,
    /// Empty when valid.
    pub message: String,
}

impl FieldState {
    pub fn class(&self) -> &'static str {
        if self.valid {
            "is-valid"
        } else {
            "is-invalid"
        }
    }
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\+]?[1-9][\d]{0,15}$").expect("static regex"))
}

fn phone_noise_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s\-\(\)]").expect("static regex"))
}

/// Strip spaces, dashes and parentheses, then expect an optional `+` and
/// up to 16 digits not starting with 0.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits = phone_noise_re().replace_all(phone, "");
    phone_re().is_match(&digits)
}

pub fn validate_field(field: Field, value: &str) -> FieldState {
    let value = value.trim();
    let len = value.chars().count();
    let error = match field {
        Field::FirstName | Field::LastName => {
            let label = if field == Field::FirstName {
                "First name"
            } else {
                "Last name"
            };
            if value.is_empty() {
                Some(format!("{} is required", label))
            } else if len < 2 {
                Some(format!("{} must be at least 2 characters", label))
            } else {
                None
            }
        }
        Field::PhoneNumber => {
            if value.is_empty() {
                Some("Phone number is required".to_string())
            } else if !is_valid_phone(value) {
                Some("Please enter a valid phone number".to_string())
            } else {
                None
            }
        }
        Field::Message => {
            if value.is_empty() {
                Some("Message is required".to_string())
            } else if len < 10 {
                Some("Message must be at least 10 characters".to_string())
            } else {
                None
            }
        }
    };
    FieldState {
        field,
        valid: error.is_none(),
        message: error.unwrap_or_default(),
    }
}

pub fn validate_all(msg: &ContactMessage) -> Vec<FieldState> {
    Field::ALL
        .iter()
        .map(|f| validate_field(*f, f.value(msg)))
        .collect()
}

/// Submit-time checks. Every failure is reported; an empty vec means the
/// message may be sent. The length check counts the message as typed.
pub fn validate_submission(msg: &ContactMessage) -> Vec<String> {
    let mut errors = Vec::new();
    if msg.first_name.trim().is_empty() {
        errors.push("First name is required".to_string());
    }
    if msg.last_name.trim().is_empty() {
        errors.push("Last name is required".to_string());
    }
    if msg.phone_number.trim().is_empty() {
        errors.push("Phone number is required".to_string());
    } else if !is_valid_phone(&msg.phone_number) {
        errors.push("Please enter a valid phone number".to_string());
    }
    if msg.message.trim().is_empty() {
        errors.push("Message is required".to_string());
    } else if msg.message.chars().count() < 10 {
        errors.push("Message must be at least 10 characters long".to_string());
    }
    errors
}

/// State of the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmitControl {
    pub disabled: bool,
    pub busy: bool,
}

impl SubmitControl {
    fn begin(&mut self) {
        self.disabled = true;
        self.busy = true;
    }

    fn finish(&mut self) {
        self.disabled = false;
        self.busy = false;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: AlertKind,
    pub lines: Vec<String>,
    /// Milliseconds until the notice hides itself; `None` stays up.
    pub auto_hide: Option<u64>,
}

impl Notice {
    pub fn success(hide_ms: u64) -> Self {
        Notice {
            kind: AlertKind::Success,
            lines: vec![SUCCESS_MESSAGE.to_string()],
            auto_hide: Some(hide_ms),
        }
    }

    pub fn error(lines: Vec<String>) -> Self {
        Notice {
            kind: AlertKind::Danger,
            lines,
            auto_hide: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactOutcome {
    pub notice: Notice,
    /// Clear the form fields.
    pub reset: bool,
    pub result: Result<(), FolioError>,
}

/// Validate, then send. Invalid input never reaches the network. The
/// control is re-enabled whatever happens.
pub async fn submit(
    api: &ApiClient,
    msg: &ContactMessage,
    control: &mut SubmitControl,
    hide_ms: u64,
) -> ContactOutcome {
    let errors = validate_submission(msg);
    if !errors.is_empty() {
        log::debug!("[contact] rejected locally: {}", errors.join("; "));
        return ContactOutcome {
            notice: Notice::error(errors.clone()),
            reset: false,
            result: Err(FolioError::ValidationFailed(errors)),
        };
    }

    control.begin();
    let sent = api.submit_contact(msg).await;
    control.finish();

    match sent {
        Ok(_) => {
            log::info!("[contact] message sent");
            ContactOutcome {
                notice: Notice::success(hide_ms),
                reset: true,
                result: Ok(()),
            }
        }
        Err(e) => {
            log::warn!("[contact] submission failed: {}", e);
            ContactOutcome {
                notice: Notice::error(vec![FAILURE_MESSAGE.to_string()]),
                reset: false,
                result: Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(first: &str, last: &str, phone: &str, message: &str) -> ContactMessage {
        ContactMessage {
            first_name: first.into(),
            last_name: last.into(),
            phone_number: phone.into(),
            message: message.into(),
        }
    }

    #[test]
    fn test_phone_formats() {
        assert!(is_valid_phone("+1234567890"));
        assert!(is_valid_phone("(123) 456-7890"));
        assert!(is_valid_phone("+998 90 123-45-67"));
        assert!(!is_valid_phone(""));
        assert!(!is_valid_phone("0123"));
        assert!(!is_valid_phone("12345678901234567"));
        assert!(!is_valid_phone("12ab34"));
    }

    #[test]
    fn test_field_messages() {
        let s = validate_field(Field::FirstName, "  ");
        assert!(!s.valid);
        assert_eq!(s.message, "First name is required");
        assert_eq!(s.class(), "is-invalid");

        let s = validate_field(Field::LastName, " a ");
        assert_eq!(s.message, "Last name must be at least 2 characters");

        let s = validate_field(Field::PhoneNumber, "0123");
        assert_eq!(s.message, "Please enter a valid phone number");

        let s = validate_field(Field::Message, "   too short   ");
        assert_eq!(s.message, "Message must be at least 10 characters");

        let s = validate_field(Field::Message, "long enough message");
        assert!(s.valid);
        assert!(s.message.is_empty());
        assert_eq!(s.class(), "is-valid");
    }

    #[test]
    fn test_submission_aggregates() {
        let errors = validate_submission(&msg("", "", "", ""));
        assert_eq!(
            errors,
            vec![
                "First name is required",
                "Last name is required",
                "Phone number is required",
                "Message is required",
            ]
        );
        let errors = validate_submission(&msg("A", "B", "0123", "hi there"));
        assert_eq!(
            errors,
            vec![
                "Please enter a valid phone number",
                "Message must be at least 10 characters long",
            ]
        );
        assert!(validate_submission(&msg("Ali", "Valiyev", "+998901234567", "Hello, let's talk")).is_empty());
    }

    #[test]
    fn test_submission_counts_untrimmed_message() {
        // 9 visible characters plus padding passes submit-time, fails live.
        let padded = "  123456789 ";
        assert!(validate_submission(&msg("Al", "Bo", "+1234567890", padded)).is_empty());
        assert!(!validate_field(Field::Message, padded).valid);
    }

    #[test]
    fn test_field_parse() {
        assert_eq!(Field::parse("phoneNumber"), Some(Field::PhoneNumber));
        assert_eq!(Field::parse("email"), None);
    }
}
