//! Monitored event data structures.
//!
//! A [`MonitoredEvent`] is produced once per incoming log, either by decoding a raw
//! log against the known ABIs or by routing an indexer-supplied structured event.

use alloy::primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The closed set of event types the monitor understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
	DiamondCut,
	OwnershipTransferred,
	FacetAdded,
	FacetReplaced,
	FacetRemoved,
	ExecutionSuccess,
	ExecutionFailure,
}

impl EventKind {
	/// All kinds, in the order raw logs are tried against them
	pub const ALL: [EventKind; 7] = [
		EventKind::DiamondCut,
		EventKind::OwnershipTransferred,
		EventKind::FacetAdded,
		EventKind::FacetReplaced,
		EventKind::FacetRemoved,
		EventKind::ExecutionSuccess,
		EventKind::ExecutionFailure,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			EventKind::DiamondCut => "DiamondCut",
			EventKind::OwnershipTransferred => "OwnershipTransferred",
			EventKind::FacetAdded => "FacetAdded",
			EventKind::FacetReplaced => "FacetReplaced",
			EventKind::FacetRemoved => "FacetRemoved",
			EventKind::ExecutionSuccess => "ExecutionSuccess",
			EventKind::ExecutionFailure => "ExecutionFailure",
		}
	}
}

impl fmt::Display for EventKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for EventKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		EventKind::ALL
			.into_iter()
			.find(|kind| kind.as_str() == s)
			.ok_or_else(|| format!("unknown event name: {}", s))
	}
}

/// Facet cut action as encoded on-chain (`uint8`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacetCutAction {
	Add,
	Replace,
	Remove,
}

impl FacetCutAction {
	pub fn label(&self) -> &'static str {
		match self {
			FacetCutAction::Add => "Add",
			FacetCutAction::Replace => "Replace",
			FacetCutAction::Remove => "Remove",
		}
	}
}

impl TryFrom<u8> for FacetCutAction {
	type Error = u8;

	fn try_from(value: u8) -> Result<Self, Self::Error> {
		match value {
			0 => Ok(FacetCutAction::Add),
			1 => Ok(FacetCutAction::Replace),
			2 => Ok(FacetCutAction::Remove),
			other => Err(other),
		}
	}
}

/// One entry of a diamond cut
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetCut {
	pub action: FacetCutAction,
	pub facet_address: String,
	pub function_selectors: Vec<String>,
}

/// Facet address plus the selectors touched by a single facet event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetChange {
	pub facet_address: String,
	pub function_selectors: Vec<String>,
}

/// Safe wallet execution result payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeExecution {
	pub safe_tx_hash: String,
	/// Decimal rendering of the `uint256` payment
	pub payment: String,
}

/// Decoded arguments, specific to each event kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventArgs {
	DiamondCut {
		cuts: Vec<FacetCut>,
		init: String,
		calldata: String,
	},
	OwnershipTransferred {
		previous_owner: String,
		new_owner: String,
	},
	FacetAdded(FacetChange),
	FacetReplaced(FacetChange),
	FacetRemoved(FacetChange),
	ExecutionSuccess(SafeExecution),
	ExecutionFailure(SafeExecution),
}

impl EventArgs {
	pub fn kind(&self) -> EventKind {
		match self {
			EventArgs::DiamondCut { .. } => EventKind::DiamondCut,
			EventArgs::OwnershipTransferred { .. } => EventKind::OwnershipTransferred,
			EventArgs::FacetAdded(_) => EventKind::FacetAdded,
			EventArgs::FacetReplaced(_) => EventKind::FacetReplaced,
			EventArgs::FacetRemoved(_) => EventKind::FacetRemoved,
			EventArgs::ExecutionSuccess(_) => EventKind::ExecutionSuccess,
			EventArgs::ExecutionFailure(_) => EventKind::ExecutionFailure,
		}
	}
}

/// One decoded on-chain log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoredEvent {
	pub block_number: u64,
	pub transaction_hash: String,
	pub from: String,
	pub args: EventArgs,
}

impl MonitoredEvent {
	/// Event type tag, e.g. "DiamondCut"
	pub fn name(&self) -> &'static str {
		self.args.kind().as_str()
	}

	pub fn kind(&self) -> EventKind {
		self.args.kind()
	}
}

/// Structured event as delivered by an external indexer.
///
/// `args` is left as raw JSON; its shape depends on `name` and is parsed by the
/// indexed-event classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedEvent {
	pub name: String,
	pub block_number: u64,
	pub transaction_hash: String,
	pub from: String,
	#[serde(default)]
	pub args: serde_json::Value,
}

/// Raw log entry emitted by a contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionLog {
	pub address: Address,
	pub topics: Vec<B256>,
	pub data: Bytes,
}

/// Transaction with its logs, as delivered by a blockchain-action runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainTransaction {
	pub hash: B256,
	pub from: Address,
	pub block_number: u64,
	#[serde(default)]
	pub logs: Vec<TransactionLog>,
}

/// Transaction-level fields shared by every log of one transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext {
	pub block_number: u64,
	pub transaction_hash: String,
	pub from: String,
}
