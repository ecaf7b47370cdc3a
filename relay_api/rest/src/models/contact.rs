use relay_models::contact::{ContactSubmission, ContactValidationError};
use serde::Deserialize;
use tracing::{debug, warn};

/// Raw contact form fields. Every field is optional so that presence can be
/// validated in one place.
#[derive(Debug, Default, Deserialize)]
pub struct ApiContactSubmission {
    /// Full name of the submitter
    pub name: Option<String>,
    /// Email address of the submitter
    pub email: Option<String>,
    /// Subject of the message, synthesized if missing
    pub subject: Option<String>,
    /// Content of the message
    pub message: Option<String>,
}

impl ApiContactSubmission {
    /// Decode a request body. Anything that is not a json object with string
    /// fields counts as an empty submission.
    pub fn from_body(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::default();
        }

        serde_json::from_slice(body).unwrap_or_else(|err| {
            if cfg!(debug_assertions) {
                warn!("Treating malformed contact request body as empty: {err}");
            } else {
                debug!("Treating malformed contact request body as empty: {err}");
            }
            Self::default()
        })
    }
}

impl TryFrom<ApiContactSubmission> for ContactSubmission {
    type Error = ContactValidationError;

    fn try_from(value: ApiContactSubmission) -> Result<Self, Self::Error> {
        ContactSubmission::new(value.name, value.email, value.subject, value.message)
    }
}
