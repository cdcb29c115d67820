//! Raw log classification.
//!
//! Each known event has a [`LogDecoder`]. The [`LogClassifier`] tries them in a fixed
//! order and the first one that decodes the log determines the event's identity.

use alloy::sol_types::SolEvent;
use std::marker::PhantomData;
use tracing::{debug, info};

use crate::{
	models::{
		EventArgs, EventKind, FacetChange, FacetCut, FacetCutAction, LogContext, MonitoredEvent,
		SafeExecution, TransactionLog,
	},
	services::{
		classifier::{abi, DecodeOutcome},
		handler::HandlerError,
	},
	utils::{address_to_string, b256_to_string, selector_to_string},
};

/// Decodes one raw log against a single known event ABI
pub trait LogDecoder: Send + Sync {
	/// Event kind this decoder recognises
	fn kind(&self) -> EventKind;

	/// Attempts to decode `log`.
	///
	/// # Returns
	/// * `Ok(DecodeOutcome::Matched)` - the log is this event
	/// * `Ok(DecodeOutcome::NoMatch)` - the log is something else
	/// * `Err(HandlerError)` - the log is this event but its arguments are unusable
	fn decode(
		&self,
		log: &TransactionLog,
		context: &LogContext,
	) -> Result<DecodeOutcome, HandlerError>;
}

type ArgsConverter<E> = fn(E) -> Result<EventArgs, HandlerError>;

/// [`LogDecoder`] backed by a `sol!` event binding
pub struct SolEventDecoder<E: SolEvent> {
	kind: EventKind,
	convert: ArgsConverter<E>,
	_event: PhantomData<fn() -> E>,
}

impl<E: SolEvent> SolEventDecoder<E> {
	pub fn new(kind: EventKind, convert: ArgsConverter<E>) -> Self {
		Self {
			kind,
			convert,
			_event: PhantomData,
		}
	}
}

impl<E: SolEvent> LogDecoder for SolEventDecoder<E> {
	fn kind(&self) -> EventKind {
		self.kind
	}

	fn decode(
		&self,
		log: &TransactionLog,
		context: &LogContext,
	) -> Result<DecodeOutcome, HandlerError> {
		if log.topics.first() != Some(&E::SIGNATURE_HASH) {
			return Ok(DecodeOutcome::NoMatch);
		}

		let decoded = match E::decode_raw_log(log.topics.iter().copied(), &log.data) {
			Ok(decoded) => decoded,
			Err(e) => {
				debug!(
					event = self.kind.as_str(),
					error = %e,
					"log carries the event signature but does not decode"
				);
				return Ok(DecodeOutcome::NoMatch);
			}
		};

		Ok(DecodeOutcome::Matched(MonitoredEvent {
			block_number: context.block_number,
			transaction_hash: context.transaction_hash.clone(),
			from: context.from.clone(),
			args: (self.convert)(decoded)?,
		}))
	}
}

fn facet_change(
	facet_address: alloy::primitives::Address,
	selectors: Vec<alloy::primitives::FixedBytes<4>>,
) -> FacetChange {
	FacetChange {
		facet_address: address_to_string(facet_address),
		function_selectors: selectors.into_iter().map(selector_to_string).collect(),
	}
}

fn convert_diamond_cut(event: abi::DiamondCut) -> Result<EventArgs, HandlerError> {
	let cuts = event
		._diamondCut
		.into_iter()
		.map(|cut| {
			let action = FacetCutAction::try_from(cut.action)
				.map_err(|raw| HandlerError::UnsupportedAction(raw.into()))?;
			Ok(FacetCut {
				action,
				facet_address: address_to_string(cut.facetAddress),
				function_selectors: cut
					.functionSelectors
					.into_iter()
					.map(selector_to_string)
					.collect(),
			})
		})
		.collect::<Result<Vec<_>, HandlerError>>()?;

	Ok(EventArgs::DiamondCut {
		cuts,
		init: address_to_string(event._init),
		calldata: format!("0x{}", hex::encode(&event._calldata)),
	})
}

fn convert_ownership(event: abi::OwnershipTransferred) -> Result<EventArgs, HandlerError> {
	Ok(EventArgs::OwnershipTransferred {
		previous_owner: address_to_string(event.previousOwner),
		new_owner: address_to_string(event.newOwner),
	})
}

fn convert_facet_added(event: abi::FacetAdded) -> Result<EventArgs, HandlerError> {
	Ok(EventArgs::FacetAdded(facet_change(
		event.facetAddress,
		event.functionSelectors,
	)))
}

fn convert_facet_replaced(event: abi::FacetReplaced) -> Result<EventArgs, HandlerError> {
	Ok(EventArgs::FacetReplaced(facet_change(
		event.facetAddress,
		event.functionSelectors,
	)))
}

fn convert_facet_removed(event: abi::FacetRemoved) -> Result<EventArgs, HandlerError> {
	Ok(EventArgs::FacetRemoved(facet_change(
		event.facetAddress,
		event.functionSelectors,
	)))
}

fn convert_execution_success(event: abi::ExecutionSuccess) -> Result<EventArgs, HandlerError> {
	Ok(EventArgs::ExecutionSuccess(SafeExecution {
		safe_tx_hash: b256_to_string(event.txHash),
		payment: event.payment.to_string(),
	}))
}

fn convert_execution_failure(event: abi::ExecutionFailure) -> Result<EventArgs, HandlerError> {
	Ok(EventArgs::ExecutionFailure(SafeExecution {
		safe_tx_hash: b256_to_string(event.txHash),
		payment: event.payment.to_string(),
	}))
}

/// Ordered list of log decoders; first match wins
pub struct LogClassifier {
	decoders: Vec<Box<dyn LogDecoder>>,
}

impl LogClassifier {
	/// Builds a classifier from an explicit decoder order
	pub fn new(decoders: Vec<Box<dyn LogDecoder>>) -> Self {
		Self { decoders }
	}

	/// Diamond decoders first, then the Safe wallet ones
	pub fn with_known_events() -> Self {
		Self::new(vec![
			Box::new(SolEventDecoder::<abi::DiamondCut>::new(
				EventKind::DiamondCut,
				convert_diamond_cut,
			)),
			Box::new(SolEventDecoder::<abi::OwnershipTransferred>::new(
				EventKind::OwnershipTransferred,
				convert_ownership,
			)),
			Box::new(SolEventDecoder::<abi::FacetAdded>::new(
				EventKind::FacetAdded,
				convert_facet_added,
			)),
			Box::new(SolEventDecoder::<abi::FacetReplaced>::new(
				EventKind::FacetReplaced,
				convert_facet_replaced,
			)),
			Box::new(SolEventDecoder::<abi::FacetRemoved>::new(
				EventKind::FacetRemoved,
				convert_facet_removed,
			)),
			Box::new(SolEventDecoder::<abi::ExecutionSuccess>::new(
				EventKind::ExecutionSuccess,
				convert_execution_success,
			)),
			Box::new(SolEventDecoder::<abi::ExecutionFailure>::new(
				EventKind::ExecutionFailure,
				convert_execution_failure,
			)),
		])
	}

	/// Kinds in the order they are tried
	pub fn kinds(&self) -> Vec<EventKind> {
		self.decoders.iter().map(|decoder| decoder.kind()).collect()
	}

	/// Classifies a single raw log.
	///
	/// A log that matches no decoder is logged as an unknown event and reported as
	/// `NoMatch`; it is never an error.
	pub fn classify(
		&self,
		log: &TransactionLog,
		context: &LogContext,
	) -> Result<DecodeOutcome, HandlerError> {
		for decoder in &self.decoders {
			if let DecodeOutcome::Matched(event) = decoder.decode(log, context)? {
				debug!(event = event.name(), "log classified");
				return Ok(DecodeOutcome::Matched(event));
			}
		}

		info!(
			address = %address_to_string(log.address),
			topic = %log.topics.first().map(|t| b256_to_string(*t)).unwrap_or_default(),
			"unknown event, skipping"
		);
		Ok(DecodeOutcome::NoMatch)
	}
}

impl Default for LogClassifier {
	fn default() -> Self {
		Self::with_known_events()
	}
}
