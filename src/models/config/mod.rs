//! Configuration loading and validation.
//!
//! The monitor's static configuration is read from an optional JSON file and then
//! overlaid with environment variables.

use std::path::Path;

mod error;
mod monitor_config;

pub use error::ConfigError;
pub use monitor_config::{
	MonitorConfig, DEFAULT_OWNER_ADDRESS, DEFAULT_SENDER, DEFAULT_SIGIL, ENV_ALLOWED_EMITTERS, ENV_DIAMOND_ADDRESS,
	ENV_MONITOR_SENDER, ENV_MONITOR_SIGIL, ENV_OWNER_ADDRESS, ENV_WEBHOOK_SECRET, ENV_WEBHOOK_URL,
};

/// Common interface for loading configuration files
pub trait ConfigLoader: Sized {
	/// Load a configuration from a specific file
	fn load_from_path(path: &Path) -> Result<Self, ConfigError>;

	/// Validate the loaded configuration
	fn validate(&self) -> Result<(), ConfigError>;

	fn is_json_file(path: &Path) -> bool {
		path.extension()
			.map(|ext| ext.to_string_lossy().to_lowercase() == "json")
			.unwrap_or(false)
	}
}
