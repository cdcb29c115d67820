//! Processing outcomes.
//!
//! Every step that may fail is reported as a value, so callers (and tests) can see
//! what went wrong without reading logs.

use serde::Serialize;

use crate::{models::Severity, services::notification::DeliveryOutcome};

/// Result of one side-effecting step (store write or notification)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum StepResult {
	Success,
	Skipped(String),
	Failed(String),
}

impl StepResult {
	pub fn is_success(&self) -> bool {
		matches!(self, StepResult::Success)
	}

	pub fn is_failure(&self) -> bool {
		matches!(self, StepResult::Failed(_))
	}
}

impl From<DeliveryOutcome> for StepResult {
	fn from(outcome: DeliveryOutcome) -> Self {
		match outcome {
			DeliveryOutcome::Delivered { .. } => StepResult::Success,
			DeliveryOutcome::Disabled => StepResult::Skipped("webhook not configured".to_string()),
			DeliveryOutcome::Rejected { status } => {
				StepResult::Failed(format!("webhook returned status {}", status))
			}
			DeliveryOutcome::TransportFailed { reason } => StepResult::Failed(reason),
		}
	}
}

/// Result of processing one incoming event or log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum EventOutcome {
	/// The event was recognised and both side effects were attempted
	Handled {
		event: String,
		key: String,
		severity: Severity,
		storage: StepResult,
		notification: StepResult,
	},
	/// The event is not one the monitor knows about
	Unknown { reason: String },
	/// The event was recognised but could not be handled
	Failed { reason: String },
}

impl EventOutcome {
	pub fn is_handled(&self) -> bool {
		matches!(self, EventOutcome::Handled { .. })
	}
}

/// Outcomes for a batch, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
	pub outcomes: Vec<EventOutcome>,
}

impl BatchReport {
	pub fn push(&mut self, outcome: EventOutcome) {
		self.outcomes.push(outcome);
	}

	pub fn len(&self) -> usize {
		self.outcomes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.outcomes.is_empty()
	}

	pub fn handled_count(&self) -> usize {
		self.outcomes.iter().filter(|o| o.is_handled()).count()
	}

	pub fn unknown_count(&self) -> usize {
		self.outcomes
			.iter()
			.filter(|o| matches!(o, EventOutcome::Unknown { .. }))
			.count()
	}

	pub fn failed_count(&self) -> usize {
		self.outcomes
			.iter()
			.filter(|o| matches!(o, EventOutcome::Failed { .. }))
			.count()
	}

	/// Handled events whose store write or notification failed
	pub fn step_failure_count(&self) -> usize {
		self.outcomes
			.iter()
			.filter(|o| match o {
				EventOutcome::Handled {
					storage,
					notification,
					..
				} => storage.is_failure() || notification.is_failure(),
				_ => false,
			})
			.count()
	}
}
