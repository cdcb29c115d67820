//! Diamond event monitor entry point.
//!
//! Reads either a transaction with its raw logs or a list of indexer events from a
//! JSON file, runs them through the processor and prints the resulting report.
//!
//! # Flow
//! 1. Loads `.env` and sets up logging on stderr
//! 2. Loads the monitor configuration from a file and/or the environment
//! 3. Processes the input, recording each event and notifying the webhook
//! 4. Prints the batch report as JSON on stdout

use diamond_event_monitor::{
	bootstrap::{
		create_processor, load_config, load_indexed_events, load_transaction, write_report,
	},
	utils::logging::setup_logging,
};

use clap::{Arg, Command};
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing::{error, info};

/// Main entry point for the event monitor.
///
/// # Errors
/// Returns an error if configuration or input loading fails. Failures of
/// individual events are part of the printed report.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	let matches = Command::new("diamond-event-monitor")
		.version(env!("CARGO_PKG_VERSION"))
		.about(
			"Classifies Diamond and Safe events, records the latest state of each and \
			 notifies a webhook.",
		)
		.arg(
			Arg::new("config")
				.long("config")
				.help("Path to a JSON monitor configuration (environment is used otherwise)")
				.value_name("PATH"),
		)
		.arg(
			Arg::new("events")
				.long("events")
				.help("Path to a JSON file with one indexer event or an array of them")
				.value_name("PATH")
				.conflicts_with("transaction"),
		)
		.arg(
			Arg::new("transaction")
				.long("transaction")
				.help("Path to a JSON file with a transaction and its logs")
				.value_name("PATH"),
		)
		.arg(
			Arg::new("storage-dir")
				.long("storage-dir")
				.help("Directory where event records are written")
				.value_name("DIR")
				.default_value("data"),
		)
		.get_matches();

	dotenv().ok();

	setup_logging().unwrap_or_else(|e| {
		error!("Failed to setup logging: {}", e);
	});

	let config_path = matches.get_one::<String>("config").map(PathBuf::from);
	let config = load_config(config_path.as_deref())
		.map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

	let storage_dir = matches
		.get_one::<String>("storage-dir")
		.map(PathBuf::from)
		.unwrap_or_else(|| PathBuf::from("data"));

	info!(
		diamond = %config.diamond_address,
		webhook = config.webhook_url.is_some(),
		storage = %storage_dir.display(),
		"monitor configured"
	);

	let processor = create_processor(config, &storage_dir)
		.map_err(|e| anyhow::anyhow!("Failed to create processor: {}", e))?;

	let report = if let Some(path) = matches.get_one::<String>("transaction") {
		let transaction = load_transaction(PathBuf::from(path).as_path())
			.map_err(|e| anyhow::anyhow!("Failed to read transaction {}: {}", path, e))?;
		processor.process_transaction(&transaction).await
	} else if let Some(path) = matches.get_one::<String>("events") {
		let events = load_indexed_events(PathBuf::from(path).as_path())
			.map_err(|e| anyhow::anyhow!("Failed to read events {}: {}", path, e))?;
		processor.process_indexed_events(&events).await
	} else {
		return Err(anyhow::anyhow!(
			"Nothing to process: pass --transaction or --events"
		));
	};

	info!(
		handled = report.handled_count(),
		unknown = report.unknown_count(),
		failed = report.failed_count(),
		"batch complete"
	);
	write_report(&report, std::io::stdout().lock())
		.map_err(|e| anyhow::anyhow!("Failed to write report: {}", e))?;
	Ok(())
}
