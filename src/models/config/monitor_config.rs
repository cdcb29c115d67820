//! Monitor configuration loading and validation.
//!
//! This module implements the ConfigLoader trait for [`MonitorConfig`], and the
//! environment overlay applied on top of a file (or of the defaults).

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::{
	models::config::{ConfigError, ConfigLoader},
	utils::{are_same_address, is_valid_address},
};

pub const ENV_DIAMOND_ADDRESS: &str = "DIAMOND_ADDRESS";
pub const ENV_OWNER_ADDRESS: &str = "OWNER_ADDRESS";
pub const ENV_MONITOR_SIGIL: &str = "MONITOR_SIGIL";
pub const ENV_WEBHOOK_URL: &str = "WEBHOOK_URL";
pub const ENV_WEBHOOK_SECRET: &str = "WEBHOOK_SECRET";
pub const ENV_MONITOR_SENDER: &str = "MONITOR_SENDER";
pub const ENV_ALLOWED_EMITTERS: &str = "ALLOWED_EMITTERS";

pub const DEFAULT_OWNER_ADDRESS: &str = "0x67a977EAD94C3b955ECbf27886CE9f62464423b2";
pub const DEFAULT_SIGIL: &str = "◈";
pub const DEFAULT_SENDER: &str = "diamond-event-monitor";

fn default_owner_address() -> String {
	DEFAULT_OWNER_ADDRESS.to_string()
}

fn default_sigil() -> String {
	DEFAULT_SIGIL.to_string()
}

fn default_sender() -> String {
	DEFAULT_SENDER.to_string()
}

/// Static configuration shared by the classifier, handlers and notifier.
///
/// Passed explicitly to every component that needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
	/// Diamond proxy under watch; echoed in every notification
	pub diamond_address: String,
	/// The only owner an OwnershipTransferred may hand over to without being unauthorized
	#[serde(default = "default_owner_address")]
	pub owner_address: String,
	/// Short display tag included in notifications
	#[serde(default = "default_sigil")]
	pub sigil: String,
	/// Notifications are disabled when absent
	#[serde(default)]
	pub webhook_url: Option<String>,
	/// Enables HMAC signing of webhook requests
	#[serde(default)]
	pub webhook_secret: Option<String>,
	/// Value of the sender header on webhook requests
	#[serde(default = "default_sender")]
	pub sender: String,
	/// Contracts whose raw logs are classified; empty accepts every emitter
	#[serde(default)]
	pub allowed_emitters: Vec<String>,
}

impl MonitorConfig {
	/// Creates a configuration with defaults for everything but the diamond address
	pub fn new(diamond_address: impl Into<String>) -> Self {
		Self {
			diamond_address: diamond_address.into(),
			owner_address: default_owner_address(),
			sigil: default_sigil(),
			webhook_url: None,
			webhook_secret: None,
			sender: default_sender(),
			allowed_emitters: Vec::new(),
		}
	}

	pub fn with_owner_address(mut self, owner_address: impl Into<String>) -> Self {
		self.owner_address = owner_address.into();
		self
	}

	pub fn with_webhook_url(mut self, webhook_url: impl Into<String>) -> Self {
		self.webhook_url = Some(webhook_url.into());
		self
	}

	pub fn with_webhook_secret(mut self, secret: impl Into<String>) -> Self {
		self.webhook_secret = Some(secret.into());
		self
	}

	pub fn with_sigil(mut self, sigil: impl Into<String>) -> Self {
		self.sigil = sigil.into();
		self
	}

	pub fn with_allowed_emitters<I, A>(mut self, emitters: I) -> Self
	where
		I: IntoIterator<Item = A>,
		A: Into<String>,
	{
		self.allowed_emitters = emitters.into_iter().map(Into::into).collect();
		self
	}

	/// Whether raw logs emitted by `address` should be classified
	pub fn is_allowed_emitter(&self, address: &str) -> bool {
		self.allowed_emitters.is_empty()
			|| self
				.allowed_emitters
				.iter()
				.any(|allowed| are_same_address(allowed, address))
	}

	/// Builds a configuration from the process environment only
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Builds a configuration from an arbitrary key lookup
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let diamond_address = lookup(ENV_DIAMOND_ADDRESS)
			.ok_or_else(|| ConfigError::missing_variable(ENV_DIAMOND_ADDRESS))?;
		let mut config = Self::new(diamond_address);
		config.apply_overrides(lookup);
		config.validate()?;
		Ok(config)
	}

	/// Overlays the process environment on top of this configuration
	pub fn apply_env_overrides(&mut self) {
		self.apply_overrides(|key| std::env::var(key).ok());
	}

	/// Overlays values from `lookup` on top of this configuration.
	///
	/// Empty values are ignored, except for `WEBHOOK_URL` and `WEBHOOK_SECRET`
	/// where an empty value clears the setting.
	pub fn apply_overrides<F>(&mut self, lookup: F)
	where
		F: Fn(&str) -> Option<String>,
	{
		let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

		if let Some(value) = non_empty(ENV_DIAMOND_ADDRESS) {
			self.diamond_address = value;
		}
		if let Some(value) = non_empty(ENV_OWNER_ADDRESS) {
			self.owner_address = value;
		}
		if let Some(value) = non_empty(ENV_MONITOR_SIGIL) {
			self.sigil = value;
		}
		if let Some(value) = non_empty(ENV_MONITOR_SENDER) {
			self.sender = value;
		}
		if let Some(value) = lookup(ENV_WEBHOOK_URL) {
			self.webhook_url = Some(value).filter(|v| !v.trim().is_empty());
		}
		if let Some(value) = lookup(ENV_WEBHOOK_SECRET) {
			self.webhook_secret = Some(value).filter(|v| !v.is_empty());
		}
		if let Some(value) = lookup(ENV_ALLOWED_EMITTERS) {
			self.allowed_emitters = value
				.split(',')
				.map(str::trim)
				.filter(|emitter| !emitter.is_empty())
				.map(str::to_string)
				.collect();
		}
	}
}

impl ConfigLoader for MonitorConfig {
	/// Load a monitor configuration from a JSON file
	fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
		if !Self::is_json_file(path) {
			return Err(ConfigError::file_error(format!(
				"expected a .json configuration file, got {}",
				path.display()
			)));
		}
		let content = fs::read_to_string(path).map_err(|e| {
			ConfigError::file_error(format!("failed to read {}: {}", path.display(), e))
		})?;
		let config: MonitorConfig = serde_json::from_str(&content).map_err(|e| {
			ConfigError::parse_error(format!("failed to parse {}: {}", path.display(), e))
		})?;
		Ok(config)
	}

	/// Validate the monitor configuration
	fn validate(&self) -> Result<(), ConfigError> {
		if !is_valid_address(&self.diamond_address) {
			return Err(ConfigError::invalid_address(
				"diamond",
				self.diamond_address.clone(),
			));
		}
		if !is_valid_address(&self.owner_address) {
			return Err(ConfigError::invalid_address(
				"owner",
				self.owner_address.clone(),
			));
		}
		if let Some(emitter) = self
			.allowed_emitters
			.iter()
			.find(|emitter| !is_valid_address(emitter))
		{
			return Err(ConfigError::invalid_address("emitter", emitter.clone()));
		}
		if self.sigil.trim().is_empty() {
			return Err(ConfigError::validation_error("sigil cannot be empty"));
		}
		if self.sender.trim().is_empty() {
			return Err(ConfigError::validation_error("sender cannot be empty"));
		}
		if let Some(webhook_url) = &self.webhook_url {
			let parsed = url::Url::parse(webhook_url).map_err(|e| {
				ConfigError::validation_error(format!("invalid webhook url: {}", e))
			})?;
			if parsed.scheme() != "http" && parsed.scheme() != "https" {
				return Err(ConfigError::validation_error(format!(
					"webhook url must use http or https, got {}",
					parsed.scheme()
				)));
			}
		}
		Ok(())
	}
}
