use relay_api_rest::RestServerConfig;
use relay_config::Config;
use relay_core_contact_impl::{ContactAutoReplyConfig, ContactServiceConfig};
use relay_core_health_impl::HealthServiceConfig;
use types::{Contact, Email, Health, RestServer, Template};

pub mod types;

/// Build the rest server and all of its dependencies from the config.
pub fn rest_server(config: &Config, email: Email) -> anyhow::Result<RestServer> {
    let template = Template::new()?;

    let contact = Contact::new(email.clone(), template, contact_service_config(config));
    let health = Health::new(email, health_service_config(config));

    Ok(RestServer::new(
        health,
        contact,
        RestServerConfig {
            addr: config.http.address,
        },
    ))
}

fn contact_service_config(config: &Config) -> ContactServiceConfig {
    ContactServiceConfig {
        site_name: config.contact.site_name.clone(),
        inbox: config.contact.inbox.clone(),
        sender: config.contact.sender.clone(),
        subject_prefix: config.contact.subject_prefix.clone(),
        auto_reply: config
            .contact
            .auto_reply
            .as_ref()
            .map(|auto_reply| ContactAutoReplyConfig {
                sender: auto_reply.sender.clone(),
            }),
        send_timeout: config.email.send_timeout.into(),
    }
}

fn health_service_config(config: &Config) -> HealthServiceConfig {
    HealthServiceConfig {
        cache_ttl: config.health.cache_ttl.into(),
        ping_timeout: config.email.send_timeout.into(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[tokio::test]
    async fn build_rest_server() {
        let config =
            relay_config::load_paths(&[Path::new(relay_config::DEFAULT_CONFIG_PATH)], false)
                .unwrap();
        let email = crate::email::connect(&config.email).unwrap();

        rest_server(&config, email).unwrap();
    }

    #[test]
    fn contact_config() {
        let config =
            relay_config::load_paths(&[Path::new(relay_config::DEFAULT_CONFIG_PATH)], false)
                .unwrap();

        let result = contact_service_config(&config);

        assert_eq!(result.site_name, config.contact.site_name);
        assert_eq!(result.inbox, config.contact.inbox);
        assert_eq!(
            result.auto_reply.map(|x| x.sender),
            config.contact.auto_reply.map(|x| x.sender)
        );
        assert_eq!(result.send_timeout, config.email.send_timeout.0);
    }
}
