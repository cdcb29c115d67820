//! Notification payload sent to the webhook receiver.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::StoredEventRecord;

/// Severity tag attached to every notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
	Critical,
	#[default]
	Medium,
}

impl Severity {
	pub fn as_str(&self) -> &'static str {
		match self {
			Severity::Critical => "CRITICAL",
			Severity::Medium => "MEDIUM",
		}
	}
}

impl fmt::Display for Severity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Body of a webhook notification. Built per dispatch, never stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
	pub event_type: String,
	pub severity: Severity,
	pub diamond_address: String,
	pub sigil: String,
	pub data: StoredEventRecord,
	/// RFC 3339 dispatch time
	pub timestamp: String,
}
