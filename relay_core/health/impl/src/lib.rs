use std::{sync::Arc, time::Duration};

use relay_core_health_contracts::{HealthService, HealthStatus};
use relay_email_contracts::EmailService;
use tokio::{sync::RwLock, time::Instant};
use tracing::error;

#[derive(Debug, Clone)]
pub struct HealthServiceImpl<Email> {
    email: Email,
    config: HealthServiceConfig,
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthServiceConfig {
    pub cache_ttl: Duration,
    /// Upper bound for the smtp ping.
    pub ping_timeout: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: Instant,
}

impl<Email> HealthServiceImpl<Email> {
    pub fn new(email: Email, config: HealthServiceConfig) -> Self {
        Self {
            email,
            config,
            state: Default::default(),
        }
    }
}

impl<Email> HealthService for HealthServiceImpl<Email>
where
    Email: EmailService,
{
    async fn get_status(&self) -> HealthStatus {
        let now = Instant::now();
        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.cache_ttl)
        {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.cache_ttl)
        {
            return cached.status;
        }

        let email = match tokio::time::timeout(self.config.ping_timeout, self.email.ping()).await {
            Ok(Ok(())) => true,
            Ok(Err(err)) => {
                error!("Failed to ping smtp server: {err}");
                false
            }
            Err(_) => {
                error!("Timed out pinging smtp server");
                false
            }
        };

        let status = HealthStatus { email };

        cache_guard
            .insert(CachedStatus {
                status,
                timestamp: now,
            })
            .status
    }
}

#[cfg(test)]
mod tests {
    use relay_email_contracts::MockEmailService;

    use super::*;

    fn config() -> HealthServiceConfig {
        HealthServiceConfig {
            cache_ttl: Duration::from_secs(10),
            ping_timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn healthy() {
        // Arrange
        let email = MockEmailService::new().with_ping(true);
        let sut = HealthServiceImpl::new(email, config());

        // Act
        let result = sut.get_status().await;

        // Assert
        assert_eq!(result, HealthStatus { email: true });
    }

    #[tokio::test]
    async fn unhealthy() {
        // Arrange
        let email = MockEmailService::new().with_ping(false);
        let sut = HealthServiceImpl::new(email, config());

        // Act
        let result = sut.get_status().await;

        // Assert
        assert_eq!(result, HealthStatus { email: false });
    }

    #[tokio::test(start_paused = true)]
    async fn cached_until_ttl_expires() {
        // Arrange
        let email = MockEmailService::new().with_ping(true).with_ping(false);
        let sut = HealthServiceImpl::new(email, config());

        // Act
        let first = sut.get_status().await;
        tokio::time::advance(Duration::from_secs(5)).await;
        let cached = sut.get_status().await;
        tokio::time::advance(Duration::from_secs(6)).await;
        let refreshed = sut.get_status().await;

        // Assert
        assert_eq!(first, HealthStatus { email: true });
        assert_eq!(cached, HealthStatus { email: true });
        assert_eq!(refreshed, HealthStatus { email: false });
    }

    #[tokio::test(start_paused = true)]
    async fn ping_timeout() {
        // Arrange
        let mut email = MockEmailService::new();
        email
            .expect_ping()
            .once()
            .return_once(|| Box::pin(std::future::pending()));
        let sut = HealthServiceImpl::new(email, config());

        // Act
        let result = sut.get_status().await;

        // Assert
        assert_eq!(result, HealthStatus { email: false });
    }
}
