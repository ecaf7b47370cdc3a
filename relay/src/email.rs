use anyhow::Context;
use relay_config::EmailConfig;
use relay_email_impl::EmailServiceImpl;

/// Create the smtp transport. No connection is opened until the first email
/// is sent or the transport is pinged.
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(&config.smtp_url).context("Failed to create smtp transport")
}
