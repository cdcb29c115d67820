//! Configuration error types.
//!
//! This module defines the error types that can occur during configuration
//! loading and validation.

use log::error;
use std::{error::Error, fmt};

/// Errors raised while loading or validating the monitor configuration
#[derive(Debug)]
pub enum ConfigError {
	/// A required environment variable is not set
	MissingVariable(String),

	/// An address setting is not `0x` followed by 40 hex characters
	InvalidAddress { field: String, value: String },

	/// Any other setting holds an unusable value
	ValidationError(String),

	/// The configuration file is not valid JSON for a monitor configuration
	ParseError(String),

	/// The configuration file could not be read
	FileError(String),
}

impl ConfigError {
	fn format_message(&self) -> String {
		match self {
			Self::MissingVariable(name) => format!("Missing environment variable: {}", name),
			Self::InvalidAddress { field, value } => {
				format!("Invalid {} address: {:?}", field, value)
			}
			Self::ValidationError(msg) => format!("Validation error: {}", msg),
			Self::ParseError(msg) => format!("Parse error: {}", msg),
			Self::FileError(msg) => format!("File error: {}", msg),
		}
	}

	/// Create a missing variable error and log it
	pub fn missing_variable(name: impl Into<String>) -> Self {
		let error = Self::MissingVariable(name.into());
		error!("{}", error.format_message());
		error
	}

	/// Create an invalid address error and log it
	pub fn invalid_address(field: impl Into<String>, value: impl Into<String>) -> Self {
		let error = Self::InvalidAddress {
			field: field.into(),
			value: value.into(),
		};
		error!("{}", error.format_message());
		error
	}

	/// Create a new validation error and log it
	pub fn validation_error(msg: impl Into<String>) -> Self {
		let error = Self::ValidationError(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn parse_error(msg: impl Into<String>) -> Self {
		let error = Self::ParseError(msg.into());
		error!("{}", error.format_message());
		error
	}

	pub fn file_error(msg: impl Into<String>) -> Self {
		let error = Self::FileError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for ConfigError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
	fn from(err: std::io::Error) -> Self {
		Self::file_error(err.to_string())
	}
}

impl From<serde_json::Error> for ConfigError {
	fn from(err: serde_json::Error) -> Self {
		Self::parse_error(err.to_string())
	}
}
