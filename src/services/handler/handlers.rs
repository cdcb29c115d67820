use chrono::{DateTime, SecondsFormat, Utc};

use crate::{
	models::{
		CutSummary, DiamondCutDetails, EventArgs, EventKind, FacetChange, FacetDetails,
		MonitorConfig, MonitoredEvent, OwnershipDetails, RecordDetails, SafeExecution,
		SafeExecutionDetails, Severity, StoredEventRecord,
	},
	services::handler::HandlerError,
	utils::{are_same_address, has_calldata},
};

/// What a handler produced for one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandledEvent {
	pub kind: EventKind,
	pub key: String,
	pub record: StoredEventRecord,
	pub severity: Severity,
}

impl HandledEvent {
	/// Serialized record body, as written to the store
	pub fn record_json(&self) -> Result<String, HandlerError> {
		self.record
			.to_json()
			.map_err(|e| HandlerError::Serialization {
				event: self.kind.as_str().to_string(),
				reason: e.to_string(),
			})
	}
}

/// Storage key for an event.
///
/// Facet events are keyed per block. Every other kind keeps a single "latest" entry.
pub fn storage_key(kind: EventKind, block_number: u64) -> String {
	match kind {
		EventKind::DiamondCut => "last_diamond_cut".to_string(),
		EventKind::OwnershipTransferred => "ownership_change".to_string(),
		EventKind::FacetAdded => format!("facet_added_{}", block_number),
		EventKind::FacetReplaced => format!("facet_replaced_{}", block_number),
		EventKind::FacetRemoved => format!("facet_removed_{}", block_number),
		EventKind::ExecutionSuccess => "safe_execution_success".to_string(),
		EventKind::ExecutionFailure => "safe_execution_failure".to_string(),
	}
}

fn facet_details(change: &FacetChange) -> RecordDetails {
	RecordDetails::Facet(FacetDetails {
		facet_address: change.facet_address.clone(),
		function_selectors_count: change.function_selectors.len(),
	})
}

fn safe_details(execution: &SafeExecution, success: bool) -> RecordDetails {
	RecordDetails::SafeExecution(SafeExecutionDetails {
		safe_tx_hash: execution.safe_tx_hash.clone(),
		payment: execution.payment.clone(),
		success,
	})
}

/// Handles an event using the current time as the record timestamp
pub fn handle_event(
	event: &MonitoredEvent,
	config: &MonitorConfig,
) -> Result<HandledEvent, HandlerError> {
	handle_event_at(event, config, Utc::now())
}

/// Handles an event with an explicit record timestamp
pub fn handle_event_at(
	event: &MonitoredEvent,
	config: &MonitorConfig,
	now: DateTime<Utc>,
) -> Result<HandledEvent, HandlerError> {
	let kind = event.kind();
	let mut severity = Severity::default();

	let details = match &event.args {
		EventArgs::DiamondCut {
			cuts,
			init,
			calldata,
		} => RecordDetails::DiamondCut(DiamondCutDetails {
			cuts: cuts
				.iter()
				.map(|cut| CutSummary {
					action: cut.action.label().to_string(),
					facet_address: cut.facet_address.clone(),
					function_selectors_count: cut.function_selectors.len(),
				})
				.collect(),
			init: init.clone(),
			has_calldata: has_calldata(calldata),
		}),
		EventArgs::OwnershipTransferred {
			previous_owner,
			new_owner,
		} => {
			if new_owner.trim().is_empty() {
				return Err(HandlerError::invalid_args(
					kind.as_str(),
					"newOwner is empty",
				));
			}
			severity = Severity::Critical;
			RecordDetails::Ownership(OwnershipDetails {
				previous_owner: previous_owner.clone(),
				new_owner: new_owner.clone(),
				authorized: are_same_address(new_owner, &config.owner_address),
			})
		}
		EventArgs::FacetAdded(change)
		| EventArgs::FacetReplaced(change)
		| EventArgs::FacetRemoved(change) => facet_details(change),
		EventArgs::ExecutionSuccess(execution) => safe_details(execution, true),
		EventArgs::ExecutionFailure(execution) => safe_details(execution, false),
	};

	Ok(HandledEvent {
		kind,
		key: storage_key(kind, event.block_number),
		record: StoredEventRecord {
			event: kind.as_str().to_string(),
			block_number: event.block_number,
			transaction_hash: event.transaction_hash.clone(),
			from: event.from.clone(),
			details,
			timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
		},
		severity,
	})
}
