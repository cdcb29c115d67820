//! Structured event classification.
//!
//! Indexer-supplied events already carry their name, so routing is a lookup in a
//! name to argument-parser registry. Names missing from the registry are skipped.

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

use crate::{
	models::{
		EventArgs, EventKind, FacetChange, FacetCut, FacetCutAction, IndexedEvent, MonitoredEvent,
		SafeExecution,
	},
	services::{classifier::DecodeOutcome, handler::HandlerError},
};

/// Turns the raw `args` of an indexed event into typed arguments
pub type ArgsParser = fn(&Value) -> Result<EventArgs, HandlerError>;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAction {
	Number(u64),
	Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFacetCut {
	facet_address: String,
	action: RawAction,
	#[serde(default)]
	function_selectors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawDiamondCut {
	#[serde(alias = "_diamondCut")]
	#[serde(rename = "diamondCut")]
	diamond_cut: Vec<RawFacetCut>,
	#[serde(alias = "_init")]
	#[serde(rename = "init")]
	init: String,
	#[serde(alias = "_calldata")]
	#[serde(rename = "calldata", default)]
	calldata: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOwnership {
	previous_owner: String,
	new_owner: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFacetChange {
	facet_address: String,
	#[serde(default)]
	function_selectors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawSafeExecution {
	#[serde(alias = "safeTxHash")]
	#[serde(rename = "txHash")]
	tx_hash: String,
	#[serde(default)]
	payment: Option<Value>,
}

fn parse_args<T: DeserializeOwned>(kind: EventKind, args: &Value) -> Result<T, HandlerError> {
	T::deserialize(args).map_err(|e| HandlerError::invalid_args(kind.as_str(), e.to_string()))
}

fn parse_action(raw: RawAction) -> Result<FacetCutAction, HandlerError> {
	let value = match raw {
		RawAction::Number(n) => n,
		RawAction::Text(text) => match text.as_str() {
			"Add" => return Ok(FacetCutAction::Add),
			"Replace" => return Ok(FacetCutAction::Replace),
			"Remove" => return Ok(FacetCutAction::Remove),
			other => other.parse::<u64>().map_err(|_| {
				HandlerError::invalid_args(
					EventKind::DiamondCut.as_str(),
					format!("unrecognised action {:?}", other),
				)
			})?,
		},
	};
	u8::try_from(value)
		.ok()
		.and_then(|v| FacetCutAction::try_from(v).ok())
		.ok_or(HandlerError::UnsupportedAction(value))
}

fn parse_diamond_cut(args: &Value) -> Result<EventArgs, HandlerError> {
	let raw: RawDiamondCut = parse_args(EventKind::DiamondCut, args)?;
	let cuts = raw
		.diamond_cut
		.into_iter()
		.map(|cut| {
			Ok(FacetCut {
				action: parse_action(cut.action)?,
				facet_address: cut.facet_address,
				function_selectors: cut.function_selectors,
			})
		})
		.collect::<Result<Vec<_>, HandlerError>>()?;
	Ok(EventArgs::DiamondCut {
		cuts,
		init: raw.init,
		calldata: raw.calldata,
	})
}

fn parse_ownership(args: &Value) -> Result<EventArgs, HandlerError> {
	let raw: RawOwnership = parse_args(EventKind::OwnershipTransferred, args)?;
	Ok(EventArgs::OwnershipTransferred {
		previous_owner: raw.previous_owner,
		new_owner: raw.new_owner,
	})
}

fn parse_facet_change(kind: EventKind, args: &Value) -> Result<FacetChange, HandlerError> {
	let raw: RawFacetChange = parse_args(kind, args)?;
	Ok(FacetChange {
		facet_address: raw.facet_address,
		function_selectors: raw.function_selectors,
	})
}

fn parse_facet_added(args: &Value) -> Result<EventArgs, HandlerError> {
	parse_facet_change(EventKind::FacetAdded, args).map(EventArgs::FacetAdded)
}

fn parse_facet_replaced(args: &Value) -> Result<EventArgs, HandlerError> {
	parse_facet_change(EventKind::FacetReplaced, args).map(EventArgs::FacetReplaced)
}

fn parse_facet_removed(args: &Value) -> Result<EventArgs, HandlerError> {
	parse_facet_change(EventKind::FacetRemoved, args).map(EventArgs::FacetRemoved)
}

fn parse_safe_execution(kind: EventKind, args: &Value) -> Result<SafeExecution, HandlerError> {
	let raw: RawSafeExecution = parse_args(kind, args)?;
	let payment = match raw.payment {
		None | Some(Value::Null) => "0".to_string(),
		Some(Value::String(s)) => s,
		Some(Value::Number(n)) => n.to_string(),
		Some(other) => {
			return Err(HandlerError::invalid_args(
				kind.as_str(),
				format!("payment must be a number or string, got {}", other),
			))
		}
	};
	Ok(SafeExecution {
		safe_tx_hash: raw.tx_hash,
		payment,
	})
}

fn parse_execution_success(args: &Value) -> Result<EventArgs, HandlerError> {
	parse_safe_execution(EventKind::ExecutionSuccess, args).map(EventArgs::ExecutionSuccess)
}

fn parse_execution_failure(args: &Value) -> Result<EventArgs, HandlerError> {
	parse_safe_execution(EventKind::ExecutionFailure, args).map(EventArgs::ExecutionFailure)
}

/// Name to argument-parser registry for indexer-supplied events
pub struct IndexedEventClassifier {
	parsers: HashMap<String, ArgsParser>,
}

impl IndexedEventClassifier {
	/// Creates an empty registry
	pub fn new() -> Self {
		Self {
			parsers: HashMap::new(),
		}
	}

	/// Registry covering every [`EventKind`]
	pub fn with_known_events() -> Self {
		let mut classifier = Self::new();
		classifier.register(EventKind::DiamondCut.as_str(), parse_diamond_cut);
		classifier.register(EventKind::OwnershipTransferred.as_str(), parse_ownership);
		classifier.register(EventKind::FacetAdded.as_str(), parse_facet_added);
		classifier.register(EventKind::FacetReplaced.as_str(), parse_facet_replaced);
		classifier.register(EventKind::FacetRemoved.as_str(), parse_facet_removed);
		classifier.register(EventKind::ExecutionSuccess.as_str(), parse_execution_success);
		classifier.register(EventKind::ExecutionFailure.as_str(), parse_execution_failure);
		classifier
	}

	/// Registers (or replaces) the parser for an event name
	pub fn register(&mut self, name: impl Into<String>, parser: ArgsParser) {
		self.parsers.insert(name.into(), parser);
	}

	pub fn is_registered(&self, name: &str) -> bool {
		self.parsers.contains_key(name)
	}

	/// Routes an indexed event by name.
	///
	/// Unknown names are logged as a warning and reported as `NoMatch`. Arguments
	/// that do not fit the named event are a [`HandlerError`].
	pub fn classify(&self, event: &IndexedEvent) -> Result<DecodeOutcome, HandlerError> {
		let Some(parser) = self.parsers.get(&event.name) else {
			warn!(
				event = %event.name,
				block = event.block_number,
				"unknown event name, skipping"
			);
			return Ok(DecodeOutcome::NoMatch);
		};

		let args = parser(&event.args)?;
		Ok(DecodeOutcome::Matched(MonitoredEvent {
			block_number: event.block_number,
			transaction_hash: event.transaction_hash.clone(),
			from: event.from.clone(),
			args,
		}))
	}
}

impl Default for IndexedEventClassifier {
	fn default() -> Self {
		Self::with_known_events()
	}
}
