//! Stored event records.
//!
//! A [`StoredEventRecord`] is the JSON snapshot written to the event store. One
//! record fully replaces whatever was stored before under the same key.

use serde::Serialize;

/// Summary of one facet cut inside a DiamondCut record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CutSummary {
	/// "Add", "Replace" or "Remove"
	pub action: String,
	pub facet_address: String,
	pub function_selectors_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiamondCutDetails {
	pub cuts: Vec<CutSummary>,
	pub init: String,
	pub has_calldata: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipDetails {
	pub previous_owner: String,
	pub new_owner: String,
	/// Whether `new_owner` is the configured owner
	pub authorized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetDetails {
	pub facet_address: String,
	pub function_selectors_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeExecutionDetails {
	pub safe_tx_hash: String,
	pub payment: String,
	pub success: bool,
}

/// Event-specific fields, flattened into the record body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordDetails {
	DiamondCut(DiamondCutDetails),
	Ownership(OwnershipDetails),
	Facet(FacetDetails),
	SafeExecution(SafeExecutionDetails),
}

/// Snapshot of a monitored event, as persisted by the event store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEventRecord {
	pub event: String,
	pub block_number: u64,
	pub transaction_hash: String,
	pub from: String,
	#[serde(flatten)]
	pub details: RecordDetails,
	/// RFC 3339 time at which the record was built
	pub timestamp: String,
}

impl StoredEventRecord {
	pub fn to_json(&self) -> Result<String, serde_json::Error> {
		serde_json::to_string(self)
	}
}
