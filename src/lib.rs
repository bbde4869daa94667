//! Polls the Practicum homework-review API and forwards review-status
//! changes to a Telegram chat.

pub mod config;
pub mod engine;
pub mod error;
pub mod homework;
pub mod io;
pub mod logging;
pub mod notifier;
pub mod practicum;
pub mod telegram;

pub use config::Config;
pub use error::{BotError, Result};

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio_util::sync::CancellationToken;

use crate::engine::Engine;
use crate::io::ReqwestHttpClient;
use crate::notifier::Notifier;
use crate::practicum::PracticumClient;
use crate::telegram::TelegramNotifier;

/// Seconds between polls unless overridden on the command line
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

/// Current Unix time in seconds
pub fn current_epoch_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Wire everything up and poll until Ctrl-C.
pub async fn run(config: Config, interval: Duration, initial_cursor: i64) -> Result<()> {
    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::default());
    let cancel = CancellationToken::new();

    let client = PracticumClient::new(&config, Arc::clone(&http));
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(&config, http));

    let cancel_on_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", error);
            return;
        }
        tracing::info!("Shutdown signal received");
        cancel_on_signal.cancel();
    });

    let mut engine = Engine::new(client, notifier, initial_cursor, interval, cancel);
    tracing::info!("Poll loop started with cursor {}", initial_cursor);
    engine.run().await;
    tracing::info!("Poll loop stopped");

    Ok(())
}
