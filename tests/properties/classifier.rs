use alloy::{
	primitives::{Bytes, B256},
	sol_types::SolEvent,
};
use proptest::prelude::*;

use diamond_event_monitor::{
	models::{EventArgs, EventKind, LogContext, TransactionLog},
	services::classifier::{abi, DecodeOutcome, LogClassifier},
	utils::address_to_string,
};

use crate::properties::strategies::{raw_address_strategy, selectors_strategy};

fn context() -> LogContext {
	LogContext {
		block_number: 9,
		transaction_hash: "0xabc".to_string(),
		from: "0xdef".to_string(),
	}
}

proptest! {
	#[test]
	fn facet_logs_keep_address_and_selector_count(
		facet in raw_address_strategy(),
		selectors in selectors_strategy(),
	) {
		let data = abi::FacetRemoved {
			facetAddress: facet,
			functionSelectors: selectors.clone(),
		}
		.encode_log_data();
		let log = TransactionLog {
			address: facet,
			topics: data.topics().to_vec(),
			data: data.data.clone(),
		};

		match LogClassifier::default().classify(&log, &context()).unwrap() {
			DecodeOutcome::Matched(event) => {
				prop_assert_eq!(event.kind(), EventKind::FacetRemoved);
				match event.args {
					EventArgs::FacetRemoved(change) => {
						prop_assert_eq!(change.facet_address, address_to_string(facet));
						prop_assert_eq!(change.function_selectors.len(), selectors.len());
					}
					other => prop_assert!(false, "unexpected args {:?}", other),
				}
			}
			DecodeOutcome::NoMatch => prop_assert!(false, "facet log not recognised"),
		}
	}

	#[test]
	fn unknown_topics_never_match(
		topic in any::<[u8; 32]>().prop_map(B256::from),
		data in prop::collection::vec(any::<u8>(), 0..256),
	) {
		let classifier = LogClassifier::default();
		let known: Vec<B256> = vec![
			abi::DiamondCut::SIGNATURE_HASH,
			abi::OwnershipTransferred::SIGNATURE_HASH,
			abi::FacetAdded::SIGNATURE_HASH,
			abi::FacetReplaced::SIGNATURE_HASH,
			abi::FacetRemoved::SIGNATURE_HASH,
			abi::ExecutionSuccess::SIGNATURE_HASH,
			abi::ExecutionFailure::SIGNATURE_HASH,
		];
		prop_assume!(!known.contains(&topic));

		let log = TransactionLog {
			address: Default::default(),
			topics: vec![topic],
			data: Bytes::from(data),
		};
		let outcome = classifier.classify(&log, &context()).unwrap();
		prop_assert!(!outcome.is_match());
	}
}
