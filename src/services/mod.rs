mod health;
pub mod implementations;

pub use health::ServiceHealth;

use crate::config::Config;
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// How long `stop_all` waits for each task handle
const STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Core service trait that all services must implement
#[async_trait]
pub trait Service: Send + Sync {
    /// Unique service identifier
    fn name(&self) -> &'static str;

    /// Service priority (lower = starts earlier, stops later)
    fn priority(&self) -> i32 {
        100
    }

    /// Check if service is enabled in configuration
    fn is_enabled(&self, _config: &Config) -> bool {
        true
    }

    /// Initialize the service
    async fn initialize(&mut self) -> Result<(), String> {
        Ok(())
    }

    /// Start the service
    async fn start(&mut self, shutdown: Arc<Notify>) -> Result<Vec<JoinHandle<()>>, String>;

    /// Stop the service
    async fn stop(&mut self) -> Result<(), String> {
        Ok(())
    }

    /// Check service health
    async fn health(&self) -> ServiceHealth {
        ServiceHealth::Healthy
    }
}

pub struct ServiceManager {
    services: Vec<Box<dyn Service>>,
    handles: HashMap<&'static str, Vec<JoinHandle<()>>>,
    shutdown: Arc<Notify>,
    config: Config,
}

impl ServiceManager {
    pub fn new(config: Config) -> Self {
        Self {
            services: Vec::new(),
            handles: HashMap::new(),
            shutdown: Arc::new(Notify::new()),
            config,
        }
    }

    /// Register a service
    pub fn register(&mut self, service: Box<dyn Service>) {
        self.services.push(service);
        self.services.sort_by_key(|s| s.priority());
    }

    /// Names of services with running tasks, in start order
    pub fn running_services(&self) -> Vec<&'static str> {
        self.services
            .iter()
            .map(|s| s.name())
            .filter(|name| self.handles.contains_key(name))
            .collect()
    }

    /// Start all enabled services in priority order
    pub async fn start_all(&mut self) -> Result<(), String> {
        logger::info(LogTag::System, "Starting all services...");

        for service in self.services.iter_mut() {
            let name = service.name();
            if !service.is_enabled(&self.config) {
                logger::info(LogTag::System, &format!("Service disabled: {}", name));
                continue;
            }

            logger::debug(LogTag::System, &format!("Initializing service: {}", name));
            service.initialize().await?;

            logger::debug(LogTag::System, &format!("Starting service: {}", name));
            let handles = service.start(self.shutdown.clone()).await?;
            logger::info(
                LogTag::System,
                &format!("✅ Service started: {} ({} task(s))", name, handles.len()),
            );
            self.handles.insert(name, handles);
        }

        logger::info(LogTag::System, "✅ All services started");
        Ok(())
    }

    /// Stop all services in reverse priority order
    pub async fn stop_all(&mut self) -> Result<(), String> {
        logger::info(LogTag::System, "Stopping all services...");

        // Signal shutdown
        self.shutdown.notify_waiters();

        for service in self.services.iter_mut().rev() {
            let name = service.name();
            let handles = match self.handles.remove(name) {
                Some(handles) => handles,
                None => continue,
            };

            if let Err(e) = service.stop().await {
                logger::warning(
                    LogTag::System,
                    &format!("Service stop error for {}: {}", name, e),
                );
            }

            for handle in handles {
                if tokio::time::timeout(STOP_TIMEOUT, handle).await.is_err() {
                    logger::warning(
                        LogTag::System,
                        &format!(
                            "Task of {} did not finish within {}s",
                            name,
                            STOP_TIMEOUT.as_secs()
                        ),
                    );
                }
            }

            logger::info(LogTag::System, &format!("✅ Service stopped: {}", name));
        }

        logger::info(LogTag::System, "✅ All services stopped");
        Ok(())
    }

    /// Get health status
    pub async fn get_health(&self) -> HashMap<&'static str, ServiceHealth> {
        let mut health = HashMap::new();
        for service in &self.services {
            let status = if service.is_enabled(&self.config) {
                service.health().await
            } else {
                ServiceHealth::Disabled
            };
            health.insert(service.name(), status);
        }
        health
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct ProbeService {
        name: &'static str,
        priority: i32,
        enabled: bool,
        journal: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Service for ProbeService {
        fn name(&self) -> &'static str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn is_enabled(&self, _config: &Config) -> bool {
            self.enabled
        }

        async fn start(&mut self, shutdown: Arc<Notify>) -> Result<Vec<JoinHandle<()>>, String> {
            self.journal.lock().push(format!("start {}", self.name));
            let stop = shutdown.notified_owned();
            Ok(vec![tokio::spawn(async move {
                stop.await;
            })])
        }

        async fn stop(&mut self) -> Result<(), String> {
            self.journal.lock().push(format!("stop {}", self.name));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_start_and_stop_order() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let mut manager = ServiceManager::new(Config::default());

        for (name, priority, enabled) in [("late", 50, true), ("early", 10, true), ("off", 20, false)] {
            manager.register(Box::new(ProbeService {
                name,
                priority,
                enabled,
                journal: journal.clone(),
            }));
        }

        manager.start_all().await.unwrap();
        assert_eq!(manager.running_services(), vec!["early", "late"]);

        let health = manager.get_health().await;
        assert_eq!(health.get("off"), Some(&ServiceHealth::Disabled));
        assert!(health.values().all(|h| h.is_healthy()));

        manager.stop_all().await.unwrap();
        assert!(manager.running_services().is_empty());
        assert_eq!(
            *journal.lock(),
            vec!["start early", "start late", "stop late", "stop early"]
        );
    }
}
