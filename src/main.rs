//! Command-line entry point for the homework bot

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use homework_bot::{logging, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Forwards homework review-status changes to a Telegram chat")]
#[command(version)]
struct Args {
    /// Seconds to wait between polls
    #[arg(long, default_value_t = homework_bot::DEFAULT_POLL_INTERVAL_SECS)]
    interval_seconds: u64,

    /// Start the cursor at zero and replay the full homework history
    #[arg(long)]
    backfill: bool,

    /// File that receives a copy of every log line
    #[arg(long, default_value = "program.log")]
    log_file: PathBuf,

    /// Log level when RUST_LOG is not set
    #[arg(short, long, default_value = "debug")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    dotenvy::dotenv().ok();

    logging::init(&args.log_file, args.log_level)?;
    tracing::debug!(
        "Parsed arguments: interval_seconds={}, backfill={}, log_file={}",
        args.interval_seconds,
        args.backfill,
        args.log_file.display()
    );

    // Without all three secrets there is nothing useful to do; stop before
    // the first request.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("{}; refusing to start", error);
            return Ok(());
        }
    };

    let initial_cursor = if args.backfill {
        0
    } else {
        homework_bot::current_epoch_secs()
    };

    homework_bot::run(
        config,
        Duration::from_secs(args.interval_seconds),
        initial_cursor,
    )
    .await?;

    Ok(())
}
