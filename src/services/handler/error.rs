//! Handler error types.
//!
//! Raised when an event's arguments cannot be turned into a record. These stop
//! the current event only; the processor reports them and moves on.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandlerError {
	#[error("Invalid arguments for {event}: {reason}")]
	InvalidArgs { event: String, reason: String },

	#[error("Unsupported facet cut action {0}")]
	UnsupportedAction(u64),

	#[error("Failed to serialize record for {event}: {reason}")]
	Serialization { event: String, reason: String },
}

impl HandlerError {
	pub fn invalid_args(event: impl Into<String>, reason: impl Into<String>) -> Self {
		Self::InvalidArgs {
			event: event.into(),
			reason: reason.into(),
		}
	}
}
