//! The fetch, validate, notify poll loop

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::homework::{check_response, parse_status};
use crate::notifier::Notifier;
use crate::practicum::PracticumClient;

/// Drives the poll cycle and owns the `from_date` cursor.
///
/// The cursor never moves backwards and only advances after a cycle has
/// been fully processed, so a failed cycle re-fetches the same window.
pub struct Engine {
    client: PracticumClient,
    notifier: Arc<dyn Notifier>,
    cursor: i64,
    interval: Duration,
    cancel: CancellationToken,
    last_failure: Option<String>,
}

impl Engine {
    pub fn new(
        client: PracticumClient,
        notifier: Arc<dyn Notifier>,
        initial_cursor: i64,
        interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            client,
            notifier,
            cursor: initial_cursor,
            interval,
            cancel,
            last_failure: None,
        }
    }

    /// The timestamp the next fetch will use as `from_date`
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Run cycles until the cancellation token fires.
    ///
    /// The sleep between cycles is the same whether the cycle succeeded
    /// or failed.
    pub async fn run(&mut self) {
        loop {
            self.run_cycle().await;
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Poll loop cancelled");
                    break;
                }
            }
        }
    }

    /// One complete cycle including failure reporting.
    ///
    /// Never returns an error: a failed cycle is logged and reported to the
    /// chat, and the loop carries on with the next cycle.
    pub async fn run_cycle(&mut self) {
        match self.poll_once().await {
            Ok(notified) => {
                self.last_failure = None;
                if notified > 0 {
                    tracing::info!("Cycle complete, sent {} notification(s)", notified);
                }
            }
            Err(error) => {
                tracing::error!("{}", error);
                self.report_failure(&error.to_string()).await;
            }
        }
    }

    /// Fetch, validate, notify, and advance the cursor.
    async fn poll_once(&mut self) -> crate::Result<usize> {
        let response = self.client.fetch(self.cursor).await?;
        let homeworks = check_response(&response)?;
        let notified = if homeworks.is_empty() {
            tracing::debug!("No new homework statuses");
            0
        } else {
            // The API lists the newest change first; announce oldest first.
            for homework in homeworks.iter().rev() {
                let message = parse_status(homework)?;
                self.notifier.send_message(&message).await?;
            }
            homeworks.len()
        };
        self.advance_cursor(&response);
        Ok(notified)
    }

    /// Move the cursor to the server clock, never backwards.
    fn advance_cursor(&mut self, response: &Value) {
        match response.get("current_date").and_then(Value::as_i64) {
            Some(date) if date >= self.cursor => self.cursor = date,
            Some(date) => {
                tracing::debug!("Ignoring current_date {} behind cursor {}", date, self.cursor);
            }
            None => {
                tracing::debug!("No usable current_date, keeping cursor {}", self.cursor);
            }
        }
    }

    /// Best-effort failure report to the chat.
    ///
    /// A report identical to the last delivered one is suppressed so a
    /// persistent outage does not flood the chat once per cycle. If the
    /// report itself cannot be delivered it is only logged.
    async fn report_failure(&mut self, detail: &str) {
        let message = format!("Program failure: {}", detail);
        if self.last_failure.as_deref() == Some(message.as_str()) {
            tracing::debug!("Suppressing repeated failure report");
            return;
        }
        match self.notifier.send_message(&message).await {
            Ok(()) => {
                self.last_failure = Some(message);
            }
            Err(error) => {
                tracing::error!("Failed to deliver failure report: {}", error);
            }
        }
    }
}
