use std::future::Future;

use relay_models::contact::ContactSubmission;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Notify the business inbox about the submission and, if enabled, send an
    /// auto-reply to the submitter.
    ///
    /// All messages are dispatched concurrently and exactly once. The call only
    /// succeeds if every message has been accepted by the email provider.
    fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<(), ContactSendMessageError>> + Send;
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_send_message(
        mut self,
        submission: ContactSubmission,
        result: Result<(), ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("Failed to send message: {0}")]
    Send(ContactDispatchReport),
}

/// Outcome of every outbound message of a single submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDispatchReport {
    pub notice: DispatchOutcome,
    /// `None` if auto-replies are disabled.
    pub auto_reply: Option<DispatchOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent,
    /// The provider answered with a negative response.
    Rejected,
    /// No response within the configured send timeout.
    TimedOut,
    /// The message could not be built or the transport failed.
    Failed(String),
}

impl ContactDispatchReport {
    pub fn is_success(&self) -> bool {
        self.notice.is_sent()
            && self
                .auto_reply
                .as_ref()
                .map_or(true, DispatchOutcome::is_sent)
    }
}

impl DispatchOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

impl std::fmt::Display for ContactDispatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "notice: {}", self.notice)?;
        if let Some(auto_reply) = &self.auto_reply {
            write!(f, ", auto-reply: {auto_reply}")?;
        }
        Ok(())
    }
}

impl std::fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sent => f.write_str("sent"),
            Self::Rejected => f.write_str("rejected"),
            Self::TimedOut => f.write_str("timed out"),
            Self::Failed(err) => write!(f, "failed ({err})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_success() {
        for (notice, auto_reply, expected) in [
            (DispatchOutcome::Sent, None, true),
            (DispatchOutcome::Sent, Some(DispatchOutcome::Sent), true),
            (DispatchOutcome::Rejected, None, false),
            (DispatchOutcome::Sent, Some(DispatchOutcome::TimedOut), false),
            (DispatchOutcome::Failed("x".into()), Some(DispatchOutcome::Sent), false),
        ] {
            let report = ContactDispatchReport { notice, auto_reply };
            assert_eq!(report.is_success(), expected, "{report}");
        }
    }

    #[test]
    fn report_display() {
        let report = ContactDispatchReport {
            notice: DispatchOutcome::Sent,
            auto_reply: Some(DispatchOutcome::Failed("connection refused".into())),
        };
        assert_eq!(
            report.to_string(),
            "notice: sent, auto-reply: failed (connection refused)"
        );
    }
}
