//! Broadcast engine: one body to every registered user, each delivery attempted independently.

use dbot_core::Bot;
use futures::{stream, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use storage::{StorageError, UserStore};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    /// The transport rejected the send (blocked bot, deleted account, rate limit, network).
    Failed(String),
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryAttempt {
    pub user_id: i64,
    pub outcome: DeliveryOutcome,
}

/// One entry per registered user, in completion order.
#[derive(Debug, Clone, Default)]
pub struct BroadcastReport {
    pub attempts: Vec<DeliveryAttempt>,
}

impl BroadcastReport {
    /// Recipients whose send call returned without error. Not a confirmation of receipt.
    pub fn delivered(&self) -> usize {
        self.attempts.iter().fold(0, |n, a| match a.outcome {
            DeliveryOutcome::Delivered => n + 1,
            DeliveryOutcome::Failed(_) | DeliveryOutcome::TimedOut => n,
        })
    }

    pub fn total(&self) -> usize {
        self.attempts.len()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.delivered()
    }
}

#[derive(Clone)]
pub struct BroadcastEngine {
    store: Arc<dyn UserStore>,
    bot: Arc<dyn Bot>,
    send_timeout: Duration,
    concurrency: usize,
}

impl BroadcastEngine {
    /// `concurrency` bounds the sends in flight; values below 1 are treated as 1.
    pub fn new(
        store: Arc<dyn UserStore>,
        bot: Arc<dyn Bot>,
        send_timeout: Duration,
        concurrency: usize,
    ) -> Self {
        Self {
            store,
            bot,
            send_timeout,
            concurrency: concurrency.max(1),
        }
    }

    /// Attempts delivery of `body` to every registered user. Only reading the user list can fail;
    /// per-recipient failures are recorded in the report. No retries.
    #[instrument(skip(self, body), fields(body_len = body.len()))]
    pub async fn broadcast(&self, body: &str) -> Result<BroadcastReport, StorageError> {
        let user_ids = self.store.all_ids().await?;
        info!(recipients = user_ids.len(), concurrency = self.concurrency, "Broadcast started");

        let attempts: Vec<DeliveryAttempt> = stream::iter(user_ids)
            .map(|user_id| self.deliver(user_id, body))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let report = BroadcastReport { attempts };
        info!(
            delivered = report.delivered(),
            failed = report.failed(),
            "Broadcast finished"
        );
        Ok(report)
    }

    async fn deliver(&self, user_id: i64, body: &str) -> DeliveryAttempt {
        let outcome =
            match tokio::time::timeout(self.send_timeout, self.bot.send_message(user_id, body))
                .await
            {
                Ok(Ok(())) => DeliveryOutcome::Delivered,
                Ok(Err(e)) => {
                    warn!(user_id = user_id, error = %e, "Broadcast delivery failed");
                    DeliveryOutcome::Failed(e.to_string())
                }
                Err(_) => {
                    warn!(
                        user_id = user_id,
                        timeout_ms = self.send_timeout.as_millis() as u64,
                        "Broadcast delivery timed out"
                    );
                    DeliveryOutcome::TimedOut
                }
            };
        DeliveryAttempt { user_id, outcome }
    }
}
