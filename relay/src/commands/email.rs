use anyhow::ensure;
use clap::Subcommand;
use relay_config::Config;
use relay_email_contracts::{Email, EmailBody, EmailService};
use relay_models::email_address::EmailAddressWithName;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email)?;

    let ok = email_service
        .send(Email {
            from: config.contact.sender,
            recipient,
            reply_to: None,
            subject: "Email Deliverability Test".into(),
            body: EmailBody {
                html: "<p>Email deliverability seems to be working!</p>".into(),
                text: "Email deliverability seems to be working!".into(),
            },
        })
        .await?;

    ensure!(ok, "Failed to send email");

    Ok(())
}
