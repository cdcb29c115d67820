//! Bootstrap module for loading configuration and inputs and building the processor.
//!
//! Used by the binary; kept in the library so each step can be tested on its own.

use std::{error::Error, io::Write, path::Path};

use crate::{
	models::{ChainTransaction, ConfigLoader, IndexedEvent, MonitorConfig},
	services::{
		notification::HttpWebhookClient,
		processor::{BatchReport, EventProcessor},
		storage::FileEventStore,
	},
};

/// Type alias for handling ServiceResult
pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;

/// Processor type used by the binary
pub type FileEventProcessor = EventProcessor<FileEventStore, HttpWebhookClient>;

/// Loads the monitor configuration.
///
/// With a path, the file is read first and the environment overlaid on top;
/// without one, the configuration comes from the environment alone.
pub fn load_config(path: Option<&Path>) -> Result<MonitorConfig> {
	let config = match path {
		Some(path) => {
			let mut config = MonitorConfig::load_from_path(path)?;
			config.apply_env_overrides();
			config.validate()?;
			config
		}
		None => MonitorConfig::from_env()?,
	};
	Ok(config)
}

/// Reads indexer events from a JSON file holding either one event or an array of them
pub fn load_indexed_events(path: &Path) -> Result<Vec<IndexedEvent>> {
	let content = std::fs::read_to_string(path)?;
	let value: serde_json::Value = serde_json::from_str(&content)?;
	let events = if value.is_array() {
		serde_json::from_value(value)?
	} else {
		vec![serde_json::from_value(value)?]
	};
	Ok(events)
}

/// Reads a transaction with its logs from a JSON file
pub fn load_transaction(path: &Path) -> Result<ChainTransaction> {
	let content = std::fs::read_to_string(path)?;
	Ok(serde_json::from_str(&content)?)
}

/// Builds a processor that writes to `storage_dir` and notifies over HTTP
pub fn create_processor(
	config: MonitorConfig,
	storage_dir: &Path,
) -> Result<FileEventProcessor> {
	let store = FileEventStore::new(storage_dir);
	Ok(EventProcessor::with_http_notifier(config, store)?)
}

/// Writes `report` to `writer` as a single pretty-printed JSON document
pub fn write_report<W: Write>(report: &BatchReport, mut writer: W) -> Result<()> {
	serde_json::to_writer_pretty(&mut writer, report)?;
	writeln!(writer)?;
	writer.flush()?;
	Ok(())
}
