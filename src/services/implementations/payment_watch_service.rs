use crate::config::Config;
use crate::logger::{self, LogTag};
use crate::notifications::PaymentNotifier;
use crate::services::{Service, ServiceHealth};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Runs the purchase watcher timer
pub struct PaymentWatchService {
    notifier: Arc<PaymentNotifier>,
    interval: Duration,
    initial_delay: Duration,
    handle_started: bool,
}

impl PaymentWatchService {
    pub fn new(notifier: Arc<PaymentNotifier>, interval: Duration, initial_delay: Duration) -> Self {
        Self {
            notifier,
            interval,
            initial_delay,
            handle_started: false,
        }
    }

    pub fn from_config(notifier: Arc<PaymentNotifier>, config: &Config) -> Self {
        Self::new(
            notifier,
            Duration::from_secs(config.notifications.interval_secs),
            Duration::from_secs(config.notifications.initial_delay_secs),
        )
    }
}

#[async_trait]
impl Service for PaymentWatchService {
    fn name(&self) -> &'static str {
        "payment_watch"
    }

    fn priority(&self) -> i32 {
        60
    }

    fn is_enabled(&self, config: &Config) -> bool {
        config.notifications.enabled
    }

    async fn initialize(&mut self) -> Result<(), String> {
        if self.interval.is_zero() {
            return Err("notifications.interval_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    async fn start(&mut self, shutdown: Arc<Notify>) -> Result<Vec<JoinHandle<()>>, String> {
        logger::info(
            LogTag::Notifier,
            &format!(
                "Starting purchase watcher (interval {}s, first poll in {}s)",
                self.interval.as_secs(),
                self.initial_delay.as_secs()
            ),
        );

        let stop = shutdown.notified_owned();
        let handle = tokio::spawn(self.notifier.clone().run(self.interval, self.initial_delay, stop));
        self.handle_started = true;

        Ok(vec![handle])
    }

    async fn stop(&mut self) -> Result<(), String> {
        self.handle_started = false;
        logger::info(
            LogTag::Notifier,
            &format!(
                "Purchase watcher stopping with {} subscriber(s)",
                self.notifier.registry().len()
            ),
        );
        Ok(())
    }

    async fn health(&self) -> ServiceHealth {
        if !self.handle_started {
            return ServiceHealth::Unhealthy("watcher not running".to_string());
        }
        match self.notifier.watermark().await.value() {
            Some(_) => ServiceHealth::Healthy,
            None => ServiceHealth::Degraded("waiting for first payment list".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::{ApiError, PaymentEvent, PaymentSource};
    use crate::notifications::{DeliveryError, MessageSink, SubscriptionRegistry};
    use teloxide::types::ChatId;

    struct NoPayments;

    #[async_trait]
    impl PaymentSource for NoPayments {
        async fn fetch_payments(&self) -> Result<Vec<PaymentEvent>, ApiError> {
            Err(ApiError::NetworkError("offline".to_string()))
        }
    }

    struct NullSink;

    #[async_trait]
    impl MessageSink for NullSink {
        async fn deliver(&self, _destination: ChatId, _text: &str) -> Result<(), DeliveryError> {
            Ok(())
        }
    }

    fn notifier() -> Arc<PaymentNotifier> {
        Arc::new(PaymentNotifier::new(
            Arc::new(NoPayments),
            Arc::new(NullSink),
            Arc::new(SubscriptionRegistry::new()),
        ))
    }

    #[tokio::test]
    async fn test_zero_interval_is_rejected() {
        let mut service = PaymentWatchService::new(notifier(), Duration::ZERO, Duration::ZERO);
        assert!(service.initialize().await.is_err());
    }

    #[tokio::test]
    async fn test_lifecycle_and_health() {
        let mut config = Config::default();
        config.notifications.initial_delay_secs = 3600;
        let mut service = PaymentWatchService::from_config(notifier(), &config);

        assert!(service.is_enabled(&config));
        assert!(service.health().await.is_unhealthy());

        let shutdown = Arc::new(Notify::new());
        let handles = service.start(shutdown.clone()).await.unwrap();
        assert!(service.health().await.is_degraded());

        tokio::time::sleep(Duration::from_millis(20)).await;
        shutdown.notify_waiters();
        for handle in handles {
            assert!(tokio::time::timeout(Duration::from_secs(2), handle).await.is_ok());
        }

        config.notifications.enabled = false;
        assert!(!service.is_enabled(&config));
    }

    #[tokio::test]
    async fn test_stop_right_after_start() {
        let mut service = PaymentWatchService::new(
            notifier(),
            Duration::from_secs(60),
            Duration::from_secs(3600),
        );
        let shutdown = Arc::new(Notify::new());

        let handles = service.start(shutdown.clone()).await.unwrap();
        shutdown.notify_waiters();

        for handle in handles {
            let joined = tokio::time::timeout(Duration::from_secs(2), handle).await;
            assert!(joined.is_ok(), "watcher missed the shutdown notification");
        }
    }
}
