//! Event store error types.

use log::error;
use std::{error::Error, fmt};

/// Errors raised by an [`EventStore`](super::EventStore) write
#[derive(Debug)]
pub enum StorageError {
	/// The key cannot be used by this store (e.g. path separators for the file store)
	InvalidKey(String),
	/// The underlying write failed
	WriteError(String),
}

impl StorageError {
	fn format_message(&self) -> String {
		match self {
			Self::InvalidKey(msg) => format!("Invalid storage key: {}", msg),
			Self::WriteError(msg) => format!("Storage write error: {}", msg),
		}
	}

	/// Creates a new invalid key error with logging
	pub fn invalid_key(msg: impl Into<String>) -> Self {
		let error = Self::InvalidKey(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new write error with logging
	pub fn write_error(msg: impl Into<String>) -> Self {
		let error = Self::WriteError(msg.into());
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for StorageError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for StorageError {}

impl From<std::io::Error> for StorageError {
	fn from(err: std::io::Error) -> Self {
		Self::write_error(err.to_string())
	}
}
