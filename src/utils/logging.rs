//! Logging utilities for the monitor.
//!
//! `setup_logging` writes to stderr, leaving stdout to the report;
//! `setup_logging_with_writer` accepts any `MakeWriter`, which the tests use to
//! capture output. Both honour `RUST_LOG` and fall back to `info`. Output is plain
//! text with no terminal escape codes.
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Setup logging for the monitor on stderr.
pub fn setup_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
	setup_logging_with_writer(std::io::stderr)?;
	Ok(())
}

/// Setup logging for the monitor with a custom writer
pub fn setup_logging_with_writer<W>(
	writer: W,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>
where
	W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::registry()
		.with(filter)
		.with(
			fmt::layer()
				.with_writer(writer)
				.event_format(
					fmt::format()
						.with_level(true)
						.with_target(true)
						.with_thread_ids(false)
						.with_thread_names(false)
						.with_ansi(false)
						.compact(),
				)
				.fmt_fields(fmt::format::DefaultFields::new()),
		)
		.try_init()?;
	Ok(())
}
