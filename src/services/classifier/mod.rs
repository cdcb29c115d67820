//! Event classification.
//!
//! Two entry points feed the same [`DecodeOutcome`]:
//! - [`LogClassifier`] decodes raw logs against the known ABIs, first match wins
//! - [`IndexedEventClassifier`] routes indexer-supplied events by name

pub mod abi;
mod indexed;
mod log;

pub use indexed::{ArgsParser, IndexedEventClassifier};
pub use log::{LogClassifier, LogDecoder, SolEventDecoder};

use crate::models::MonitoredEvent;

/// Result of trying to identify one incoming event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
	/// The event was recognised and decoded
	Matched(MonitoredEvent),
	/// The event is not one the monitor knows about
	NoMatch,
}

impl DecodeOutcome {
	pub fn is_match(&self) -> bool {
		matches!(self, DecodeOutcome::Matched(_))
	}
}
