//! Logging setup: every line goes to a file and to stdout

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Renders `<timestamp>,<LEVEL> <message>` lines
struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        write!(writer, "{},{} ", timestamp, event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install the global subscriber: append to `log_file` and mirror to stdout.
///
/// `RUST_LOG` overrides `level` when set.
pub fn init(log_file: &Path, level: Level) -> crate::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    subscriber(log_file, filter)?.init();
    Ok(())
}

fn subscriber(
    log_file: &Path,
    filter: EnvFilter,
) -> crate::Result<impl tracing::Subscriber + Send + Sync> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;
    Ok(tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .event_format(LineFormat)
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
        .with(
            fmt::layer()
                .event_format(LineFormat)
                .with_writer(std::io::stdout),
        ))
}
