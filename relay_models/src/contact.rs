use std::sync::LazyLock;

use nutype::nutype;
use regex::Regex;
use thiserror::Error;

/// Shape of an acceptable submitter address: `local@domain.tld`, no whitespace,
/// exactly one `@` before the last dot.
pub static CONTACT_EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

const PROJECT_REQUEST_MARKER: &str = "project request";

/// A validated contact form submission. Lives for a single request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub subject: Option<ContactSubject>,
    pub message: ContactMessageContent,
}

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

#[nutype(
    validate(regex = CONTACT_EMAIL_REGEX),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactEmail(String);

#[nutype(derive(Debug, Clone, PartialEq, Eq, From, Deref, Serialize, Deserialize))]
pub struct ContactSubject(String);

#[nutype(
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactValidationError {
    #[error("Name, email, and message are required.")]
    MissingFields,
    #[error("Invalid email address.")]
    InvalidEmail,
}

impl ContactSubmission {
    /// Validate the raw form fields. Presence is checked for all required
    /// fields before the email shape is looked at.
    pub fn new(
        name: Option<String>,
        email: Option<String>,
        subject: Option<String>,
        message: Option<String>,
    ) -> Result<Self, ContactValidationError> {
        let (Some(name), Some(email), Some(message)) =
            (present(name), present(email), present(message))
        else {
            return Err(ContactValidationError::MissingFields);
        };

        let email =
            ContactEmail::try_new(email).map_err(|_| ContactValidationError::InvalidEmail)?;
        let name = ContactName::try_new(name).map_err(|_| ContactValidationError::MissingFields)?;
        let message = ContactMessageContent::try_new(message)
            .map_err(|_| ContactValidationError::MissingFields)?;

        Ok(Self {
            name,
            email,
            subject: present(subject).map(ContactSubject::new),
            message,
        })
    }

    /// Whether the submission came from the project request form.
    pub fn is_project_request(&self) -> bool {
        self.subject
            .as_ref()
            .is_some_and(|subject| subject.to_lowercase().contains(PROJECT_REQUEST_MARKER))
    }

    /// The provided subject, or one synthesized from the submitter's name.
    pub fn resolve_subject(&self, site_name: &str) -> String {
        match &self.subject {
            Some(subject) => (**subject).clone(),
            None => format!("New message from {} via {site_name} website", *self.name),
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|x| !x.is_empty())
}
