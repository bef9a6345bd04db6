/// Purchase watcher
///
/// Polls the payment history on a fixed interval, diffs it against the
/// watermark and announces new purchases to every subscribed chat. A chat
/// whose delivery fails is unsubscribed on the spot.
///
/// The watermark lock is held for the whole tick so two ticks never
/// interleave. It advances before anything is sent: a crash mid fan-out loses
/// those announcements instead of repeating them.
use super::registry::SubscriptionRegistry;
use super::types::{DeliveryAttempt, DeliveryReport, MessageSink, SkipReason, TickOutcome};
use super::watermark::{Observation, Watermark};
use crate::apis::{PaymentEvent, PaymentSource};
use crate::logger::{self, LogTag};
use crate::telegram::formatters;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::futures::OwnedNotified;
use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;

pub struct PaymentNotifier {
    source: Arc<dyn PaymentSource>,
    sink: Arc<dyn MessageSink>,
    registry: Arc<SubscriptionRegistry>,
    watermark: Mutex<Watermark>,
}

impl PaymentNotifier {
    pub fn new(
        source: Arc<dyn PaymentSource>,
        sink: Arc<dyn MessageSink>,
        registry: Arc<SubscriptionRegistry>,
    ) -> Self {
        Self {
            source,
            sink,
            registry,
            watermark: Mutex::new(Watermark::Uninitialized),
        }
    }

    pub fn registry(&self) -> &Arc<SubscriptionRegistry> {
        &self.registry
    }

    pub async fn watermark(&self) -> Watermark {
        *self.watermark.lock().await
    }

    /// One poll / diff / notify cycle
    pub async fn tick(&self) -> TickOutcome {
        let mut watermark = self.watermark.lock().await;

        let events = match self.source.fetch_payments().await {
            Ok(events) => events,
            Err(e) => {
                logger::warning(
                    LogTag::Notifier,
                    &format!("Payment fetch failed, skipping tick: {}", e),
                );
                return TickOutcome::Skipped(SkipReason::FetchFailed(e));
            }
        };

        let observation = match watermark.observe(&events) {
            Some(observation) => observation,
            None => {
                logger::debug(LogTag::Notifier, "Payment list empty, skipping tick");
                return TickOutcome::Skipped(SkipReason::EmptyList);
            }
        };

        match observation {
            Observation::Initialized(id) => {
                logger::info(
                    LogTag::Notifier,
                    &format!("Watermark initialized at payment #{}", id),
                );
                TickOutcome::Initialized { watermark: id }
            }
            Observation::Unchanged(id) => {
                logger::debug(
                    LogTag::Notifier,
                    &format!("No new payments above #{}", id),
                );
                TickOutcome::Idle { watermark: id }
            }
            Observation::New(pending) => {
                let id = watermark.value().unwrap_or_default();
                logger::info(
                    LogTag::Notifier,
                    &format!(
                        "{} new payment(s), watermark advanced to #{}",
                        pending.len(),
                        id
                    ),
                );
                let report = self.fan_out(&pending).await;
                TickOutcome::Delivered {
                    watermark: id,
                    report,
                }
            }
        }
    }

    /// Send each event (oldest first) to a fresh registry snapshot
    pub async fn fan_out(&self, events: &[PaymentEvent]) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        for event in events {
            report.payment_ids.push(event.id);
            let text = formatters::render_new_payment(event);

            for destination in self.registry.snapshot() {
                let result = self.sink.deliver(destination, &text).await;

                if let Err(e) = &result {
                    logger::warning(
                        LogTag::Notifier,
                        &format!(
                            "Delivery of payment #{} to chat {} failed: {}",
                            event.id, destination.0, e
                        ),
                    );
                    if self.registry.remove(destination) {
                        logger::info(
                            LogTag::Subscriptions,
                            &format!("Chat {} removed after failed delivery", destination.0),
                        );
                        report.removed.push(destination);
                    }
                }

                report.attempts.push(DeliveryAttempt {
                    payment_id: event.id,
                    destination,
                    result,
                });
            }
        }

        logger::debug(
            LogTag::Notifier,
            &format!(
                "Fan-out done: {} delivered, {} failed, {} removed",
                report.delivered_count(),
                report.failed_count(),
                report.removed.len()
            ),
        );
        report
    }

    /// Tick every `period` after `initial_delay` until `stop` fires
    ///
    /// `stop` must be created before the task is spawned so a notification
    /// sent right after spawning is not lost.
    pub async fn run(self: Arc<Self>, period: Duration, initial_delay: Duration, stop: OwnedNotified) {
        tokio::pin!(stop);

        tokio::select! {
            _ = &mut stop => {
                logger::info(LogTag::Notifier, "Purchase watcher stopped before first tick");
                return;
            }
            _ = tokio::time::sleep(initial_delay) => {}
        }

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        logger::info(
            LogTag::Notifier,
            &format!("Purchase watcher running every {}s", period.as_secs()),
        );

        loop {
            tokio::select! {
                _ = &mut stop => {
                    logger::info(LogTag::Notifier, "Purchase watcher shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    let outcome = self.tick().await;
                    logger::verbose(LogTag::Notifier, &format!("Tick outcome: {:?}", outcome));
                }
            }
        }
    }
}
