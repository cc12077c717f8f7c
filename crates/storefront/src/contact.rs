//! Contact form validation.

use mini_shop_core::{Email, EmailError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Acknowledgement shown after a successful submission.
pub const SUBMITTED_MESSAGE: &str = "Form submitted successfully!";

/// Validation failures for the contact form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("Please fill in all required fields.")]
    MissingFields,

    #[error("Please enter a valid email address.")]
    InvalidEmail(#[source] EmailError),
}

/// Raw contact form input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// A validated, trimmed contact submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: Email,
    pub message: String,
}

impl ContactForm {
    /// Validate the form.
    ///
    /// Required fields are checked before the email format, so a blank form
    /// reports missing fields rather than a bad address.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::MissingFields` if any field is blank after
    /// trimming, or `ContactError::InvalidEmail` if the address is malformed.
    pub fn validate(&self) -> Result<ContactSubmission, ContactError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(ContactError::MissingFields);
        }

        let email = Email::parse(email).map_err(ContactError::InvalidEmail)?;

        Ok(ContactSubmission {
            name: name.to_string(),
            email,
            message: message.to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_valid_submission_is_trimmed() {
        let sub = form("  Asha ", " asha@example.com ", " Hello there ")
            .validate()
            .unwrap();
        assert_eq!(sub.name, "Asha");
        assert_eq!(sub.email.as_str(), "asha@example.com");
        assert_eq!(sub.message, "Hello there");
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            form("", "a@b.co", "hi").validate(),
            Err(ContactError::MissingFields)
        );
        assert_eq!(
            form("Asha", "   ", "hi").validate(),
            Err(ContactError::MissingFields)
        );
        assert_eq!(
            form("Asha", "a@b.co", "\n").validate(),
            Err(ContactError::MissingFields)
        );
    }

    #[test]
    fn test_missing_fields_reported_before_bad_email() {
        assert_eq!(
            form("", "not-an-email", "").validate(),
            Err(ContactError::MissingFields)
        );
    }

    #[test]
    fn test_invalid_email() {
        let err = form("Asha", "asha@localhost", "hi").validate().unwrap_err();
        assert!(matches!(err, ContactError::InvalidEmail(_)));
        assert_eq!(err.to_string(), "Please enter a valid email address.");
    }

    #[test]
    fn test_deserialize_missing_keys_as_blank() {
        let parsed: ContactForm = serde_json::from_str(r#"{"name":"Asha"}"#).unwrap();
        assert_eq!(parsed.validate(), Err(ContactError::MissingFields));
    }
}
