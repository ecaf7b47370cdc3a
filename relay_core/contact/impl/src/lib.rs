use std::{sync::Arc, time::Duration};

use anyhow::Context;
use futures::future::{self, OptionFuture};
use relay_core_contact_contracts::{
    ContactDispatchReport, ContactSendMessageError, ContactService, DispatchOutcome,
};
use relay_email_contracts::{Email, EmailBody, EmailService};
use relay_models::{
    contact::ContactSubmission,
    email_address::{EmailAddress, EmailAddressWithName},
};
use relay_templates_contracts::{
    AutoReplyTemplate, ContactNoticeTemplate, ProjectRequestAutoReplyTemplate, RenderedTemplate,
    TemplateService,
};
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<EmailS, TemplateS> {
    email: EmailS,
    template: TemplateS,
    config: Arc<ContactServiceConfig>,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    pub site_name: String,
    pub inbox: EmailAddressWithName,
    pub sender: EmailAddressWithName,
    pub subject_prefix: Option<String>,
    pub auto_reply: Option<ContactAutoReplyConfig>,
    /// Upper bound for a single send. Exceeding it counts as a failed message.
    pub send_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ContactAutoReplyConfig {
    pub sender: EmailAddressWithName,
}

impl<EmailS, TemplateS> ContactServiceImpl<EmailS, TemplateS> {
    pub fn new(email: EmailS, template: TemplateS, config: ContactServiceConfig) -> Self {
        Self {
            email,
            template,
            config: config.into(),
        }
    }
}

impl<EmailS, TemplateS> ContactService for ContactServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<(), ContactSendMessageError> {
        let subject = submission.resolve_subject(&self.config.site_name);

        let notice = self.dispatch("notice", self.notice_email(&submission, &subject));
        let auto_reply: OptionFuture<_> = self
            .config
            .auto_reply
            .as_ref()
            .map(|auto_reply| {
                let email = self.auto_reply_email(auto_reply, &submission, &subject);
                self.dispatch("auto-reply", email)
            })
            .into();

        let (notice, auto_reply) = future::join(notice, auto_reply).await;
        let report = ContactDispatchReport { notice, auto_reply };

        if !report.is_success() {
            return Err(ContactSendMessageError::Send(report));
        }

        info!(project_request = submission.is_project_request(), "contact message sent");
        Ok(())
    }
}

impl<EmailS, TemplateS> ContactServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    fn notice_email(
        &self,
        submission: &ContactSubmission,
        subject: &str,
    ) -> anyhow::Result<Email> {
        let body = self.template.render(&ContactNoticeTemplate {
            site: self.config.site_name.clone(),
            subject: subject.into(),
            name: (*submission.name).clone(),
            email: (*submission.email).clone(),
            message: (*submission.message).clone(),
        })?;

        Ok(Email {
            from: self.config.sender.clone(),
            recipient: self.config.inbox.clone(),
            reply_to: Some(submitter_address(submission)?),
            subject: match &self.config.subject_prefix {
                Some(prefix) => format!("{prefix} {subject}"),
                None => subject.into(),
            },
            body: body.into_email_body(),
        })
    }

    fn auto_reply_email(
        &self,
        config: &ContactAutoReplyConfig,
        submission: &ContactSubmission,
        subject: &str,
    ) -> anyhow::Result<Email> {
        let site = self.config.site_name.clone();
        let name = (*submission.name).clone();
        let message = (*submission.message).clone();

        let (reply_subject, body) = if submission.is_project_request() {
            let body = self.template.render(&ProjectRequestAutoReplyTemplate {
                site,
                name,
                subject: subject.into(),
                message,
            })?;
            let reply_subject = format!(
                "We received your project request - {}",
                self.config.site_name
            );
            (reply_subject, body)
        } else {
            let body = self.template.render(&AutoReplyTemplate {
                site,
                name,
                subject: subject.into(),
                message,
            })?;
            let reply_subject = format!("Thank you for contacting {}", self.config.site_name);
            (reply_subject, body)
        };

        Ok(Email {
            from: config.sender.clone(),
            recipient: submitter_address(submission)?,
            reply_to: None,
            subject: reply_subject,
            body: body.into_email_body(),
        })
    }

    async fn dispatch(&self, kind: &'static str, email: anyhow::Result<Email>) -> DispatchOutcome {
        let email = match email {
            Ok(email) => email,
            Err(err) => {
                error!(kind, "Failed to build email: {err:#}");
                return DispatchOutcome::Failed(err.to_string());
            }
        };

        match tokio::time::timeout(self.config.send_timeout, self.email.send(email)).await {
            Ok(Ok(true)) => DispatchOutcome::Sent,
            Ok(Ok(false)) => {
                error!(kind, "Email provider rejected email");
                DispatchOutcome::Rejected
            }
            Ok(Err(err)) => {
                error!(kind, "Failed to send email: {err:#}");
                DispatchOutcome::Failed(err.to_string())
            }
            Err(_) => {
                error!(
                    kind,
                    timeout = ?self.config.send_timeout,
                    "Sending email timed out"
                );
                DispatchOutcome::TimedOut
            }
        }
    }
}

/// The submitter's address without a display name, so a crafted value such as
/// `Name <other@example.com>` is never accepted as a mailbox.
fn submitter_address(submission: &ContactSubmission) -> anyhow::Result<EmailAddressWithName> {
    submission
        .email
        .parse::<EmailAddress>()
        .map(Into::into)
        .with_context(|| format!("Invalid submitter address {:?}", *submission.email))
}

trait IntoEmailBody {
    fn into_email_body(self) -> EmailBody;
}

impl IntoEmailBody for RenderedTemplate {
    fn into_email_body(self) -> EmailBody {
        EmailBody {
            html: self.html,
            text: self.text,
        }
    }
}
