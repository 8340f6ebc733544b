//! Contact form fields, validation and submission status.

use thiserror::Error;

/// Hidden subject sent with every message.
pub const SUBJECT: &str = "New message from portfolio";

pub const SUCCESS_MESSAGE: &str = "Message sent! I'll get back to you soon.";
pub const STATUS_ERROR_MESSAGE: &str = "Couldn't send right now. Please try again in a moment.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Check your connection and try again.";

/// Editable form fields, in focus order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContactField {
    #[default]
    Name,
    Email,
    Message,
}

impl ContactField {
    pub fn next(self) -> Self {
        match self {
            ContactField::Name => ContactField::Email,
            ContactField::Email => ContactField::Message,
            ContactField::Message => ContactField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ContactField::Name => ContactField::Message,
            ContactField::Email => ContactField::Name,
            ContactField::Message => ContactField::Email,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContactField::Name => "Name",
            ContactField::Email => "Email",
            ContactField::Message => "Message",
        }
    }
}

/// Why a form could not be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("email address looks invalid")]
    InvalidEmail,
}

/// The values a visitor has typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }

    /// Check required fields and the email shape.
    pub fn validate(&self) -> Result<(), FieldError> {
        for field in [ContactField::Name, ContactField::Email, ContactField::Message] {
            if self.get(field).trim().is_empty() {
                return Err(FieldError::Missing(field.label()));
            }
        }
        match self.email.trim().split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(FieldError::InvalidEmail),
        }
    }

    /// Form-encoded payload pairs, including the hidden subject.
    pub fn form_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.trim().to_string()),
            ("email", self.email.trim().to_string()),
            ("message", self.message.trim().to_string()),
            ("_subject", SUBJECT.to_string()),
        ]
    }
}

/// Where a submission currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Sending,
    Success(String),
    Error(String),
}

impl SubmitStatus {
    pub fn is_sending(&self) -> bool {
        matches!(self, SubmitStatus::Sending)
    }

    /// Message to show under the form, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            SubmitStatus::Idle | SubmitStatus::Sending => None,
            SubmitStatus::Success(msg) | SubmitStatus::Error(msg) => Some(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactFields {
        ContactFields {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Hello there".into(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_form() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let mut f = filled();
        f.email = "   ".into();
        f.message.clear();
        assert_eq!(f.validate(), Err(FieldError::Missing("Email")));
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        for bad in ["ada", "@example.com", "ada@"] {
            let mut f = filled();
            f.email = bad.into();
            assert_eq!(f.validate(), Err(FieldError::InvalidEmail), "{bad}");
        }
    }

    #[test]
    fn test_form_pairs_include_subject() {
        let pairs = filled().form_pairs();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[3], ("_subject", SUBJECT.to_string()));
    }

    #[test]
    fn test_field_focus_cycles() {
        let f = ContactField::Name;
        assert_eq!(f.next().next().next(), f);
        assert_eq!(f.prev(), ContactField::Message);
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(SubmitStatus::Idle.message(), None);
        assert_eq!(SubmitStatus::Sending.message(), None);
        assert_eq!(
            SubmitStatus::Error("nope".into()).message(),
            Some("nope")
        );
    }
}
