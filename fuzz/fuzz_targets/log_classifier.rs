#![no_main]

use alloy::{
	primitives::{Address, Bytes, B256},
	sol_types::SolEvent,
};
use diamond_event_monitor::{
	models::{EventKind, LogContext, TransactionLog},
	services::classifier::{abi, DecodeOutcome, LogClassifier},
};
use libfuzzer_sys::fuzz_target;

const SIGNATURES: [B256; 7] = [
	abi::DiamondCut::SIGNATURE_HASH,
	abi::OwnershipTransferred::SIGNATURE_HASH,
	abi::FacetAdded::SIGNATURE_HASH,
	abi::FacetReplaced::SIGNATURE_HASH,
	abi::FacetRemoved::SIGNATURE_HASH,
	abi::ExecutionSuccess::SIGNATURE_HASH,
	abi::ExecutionFailure::SIGNATURE_HASH,
];

// First byte picks the event signature and topic count, the next topics are taken
// 32 bytes at a time and whatever is left becomes the log data.
fuzz_target!(|data: &[u8]| {
	let Some((&selector, rest)) = data.split_first() else {
		return;
	};

	let mut topics = vec![SIGNATURES[selector as usize % SIGNATURES.len()]];
	let mut rest = rest;
	for _ in 0..(selector >> 4) % 3 {
		if rest.len() < 32 {
			break;
		}
		let (topic, tail) = rest.split_at(32);
		topics.push(B256::from_slice(topic));
		rest = tail;
	}

	let log = TransactionLog {
		address: Address::ZERO,
		topics,
		data: Bytes::copy_from_slice(rest),
	};
	let context = LogContext {
		block_number: 1,
		transaction_hash: "0x00".to_string(),
		from: "0x00".to_string(),
	};

	let classifier = LogClassifier::default();
	if let Ok(DecodeOutcome::Matched(event)) = classifier.classify(&log, &context) {
		assert!(EventKind::ALL.contains(&event.kind()));
	}
});
