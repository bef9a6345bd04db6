// Startup wiring and lifecycle using ServiceManager

use crate::apis::{PaymentClient, PaymentSource, ServerStatusClient, StatusSource};
use crate::config::{get_config_clone, resolve_bot_token, Config};
use crate::logger::{self, LogTag};
use crate::notifications::{PaymentNotifier, SubscriptionRegistry};
use crate::services::implementations::{PaymentWatchService, TelegramService};
use crate::services::ServiceManager;
use crate::telegram::{formatters, CommandContext, CommandRouter, CommandSettings, TelegramBot};
use crate::version::VERSION;
use std::sync::Arc;

/// Main bot execution function - handles the full bot lifecycle with ServiceManager
pub async fn run_bot() -> Result<(), String> {
    logger::info(
        LogTag::System,
        &format!("FrizMine monitor v{} starting up...", VERSION),
    );

    let config = get_config_clone();

    if !config.telegram.enabled {
        return Err(
            "Telegram is disabled ([telegram] enabled = false); use --once for a one-shot fetch"
                .to_string(),
        );
    }

    // 1. Token comes from the environment or the config file, never from code
    let token = resolve_bot_token(&config).ok_or_else(|| {
        format!(
            "No bot token configured: set {} or [telegram] bot_token",
            config.telegram.token_env_var
        )
    })?;

    // 2. Validate the token before anything else starts
    let bot = TelegramBot::connect(&token).await?;

    // 3. Shared state and services
    let mut service_manager = build_services(&config, bot)?;

    // 4. Start all enabled services
    service_manager.start_all().await?;

    for (name, health) in service_manager.get_health().await {
        if health.is_unhealthy() || health.is_degraded() {
            logger::warning(LogTag::System, &format!("Service {}: {}", name, health));
        } else {
            logger::debug(LogTag::System, &format!("Service {}: {}", name, health));
        }
    }

    logger::info(LogTag::System, "All services started - FrizMine monitor is running");

    // 5. Wait for shutdown signal
    wait_for_shutdown_signal().await?;

    // 6. Stop all services gracefully
    logger::info(LogTag::System, "Initiating graceful shutdown...");
    service_manager.stop_all().await?;

    logger::info(LogTag::System, "FrizMine monitor shut down successfully");
    Ok(())
}

/// Wire clients, registry, watcher and router into a ServiceManager
///
/// The registry instance is shared by the purchase watcher and the command
/// handlers.
fn build_services(config: &Config, bot: TelegramBot) -> Result<ServiceManager, String> {
    let status: Arc<dyn StatusSource> = Arc::new(ServerStatusClient::from_config(&config.api)?);
    let payments: Arc<dyn PaymentSource> = Arc::new(PaymentClient::from_config(&config.api)?);
    let registry = Arc::new(SubscriptionRegistry::new());

    let notifier = Arc::new(PaymentNotifier::new(
        payments.clone(),
        Arc::new(bot.clone()),
        registry.clone(),
    ));

    let context = Arc::new(CommandContext {
        status,
        payments,
        registry,
        settings: CommandSettings::from_config(config),
    });
    let router = Arc::new(CommandRouter::new(bot.clone(), context));

    let mut service_manager = ServiceManager::new(config.clone());
    service_manager.register(Box::new(TelegramService::new(
        bot,
        router,
        config.telegram.poll_timeout_secs,
    )));
    service_manager.register(Box::new(PaymentWatchService::from_config(notifier, config)));

    logger::info(LogTag::System, "All services registered (2 total)");
    Ok(service_manager)
}

/// One-shot fetch of both resources, printed to stdout
pub async fn run_once() -> Result<(), String> {
    let config = get_config_clone();
    let status = ServerStatusClient::from_config(&config.api)?;
    let payments = PaymentClient::from_config(&config.api)?;

    let (servers, recent) = tokio::join!(status.fetch(), payments.fetch());

    if let Err(e) = &servers {
        logger::error(LogTag::Api, &format!("Server status fetch failed: {}", e));
    }
    if let Err(e) = &recent {
        logger::error(LogTag::Api, &format!("Payment fetch failed: {}", e));
    }

    let servers = servers.unwrap_or_default();
    let recent = recent.unwrap_or_default();

    println!(
        "{}\n\n{}\n\n{}",
        formatters::render_server_status(&servers, config.display.progress_bar_width),
        formatters::render_payments(&recent, config.display.payments_limit),
        formatters::render_statistics(&servers, &recent)
    );

    if servers.is_empty() && recent.is_empty() {
        return Err("Both FrizMine API resources are unavailable".to_string());
    }
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C, SIGTERM on Unix)
async fn wait_for_shutdown_signal() -> Result<(), String> {
    logger::info(LogTag::System, "Waiting for shutdown signal (Ctrl+C)");

    #[cfg(unix)]
    let signal_name = {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())
            .map_err(|e| format!("Failed to bind SIGTERM: {}", e))?;

        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result.map_err(|e| format!("Failed to listen for Ctrl+C: {}", e))?;
                "SIGINT"
            }
            _ = sigterm.recv() => "SIGTERM",
        }
    };

    #[cfg(not(unix))]
    let signal_name = {
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| format!("Failed to listen for shutdown signal: {}", e))?;
        "CTRL_C"
    };

    logger::warning(
        LogTag::System,
        &format!("Shutdown signal received ({})", signal_name),
    );
    Ok(())
}
