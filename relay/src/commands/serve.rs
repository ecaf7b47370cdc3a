use anyhow::Context;
use relay_config::Config;
use relay_email_contracts::EmailService;
use tracing::info;

use crate::{email, environment};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to smtp server");
    let email = email::connect(&config.email)?;
    email.ping().await.context("Failed to ping smtp server")?;

    let server = environment::rest_server(&config, email)?;
    info!("Starting http server on {}", config.http.address);
    server.serve().await
}
