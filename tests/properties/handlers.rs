use chrono::Utc;
use proptest::prelude::*;

use diamond_event_monitor::{
	models::{
		EventArgs, EventKind, MonitorConfig, MonitoredEvent, RecordDetails, Severity,
		DEFAULT_OWNER_ADDRESS,
	},
	services::handler::{handle_event_at, storage_key},
	utils::are_same_address,
};

use crate::properties::strategies::{address_strategy, event_kind_strategy, random_casing};

const DIAMOND: &str = "0x1234567890abcdef1234567890abcdef12345678";

fn ownership_event(new_owner: String) -> MonitoredEvent {
	MonitoredEvent {
		block_number: 1,
		transaction_hash: "0xabc".to_string(),
		from: "0xdef".to_string(),
		args: EventArgs::OwnershipTransferred {
			previous_owner: "0x1111111111111111111111111111111111111111".to_string(),
			new_owner,
		},
	}
}

fn authorized(details: &RecordDetails) -> bool {
	match details {
		RecordDetails::Ownership(ownership) => ownership.authorized,
		other => panic!("unexpected details {:?}", other),
	}
}

proptest! {
	#[test]
	fn owner_in_any_casing_is_authorized(owner in random_casing(DEFAULT_OWNER_ADDRESS)) {
		let handled = handle_event_at(
			&ownership_event(owner),
			&MonitorConfig::new(DIAMOND),
			Utc::now(),
		)
		.unwrap();

		prop_assert!(authorized(&handled.record.details));
		prop_assert_eq!(handled.severity, Severity::Critical);
		prop_assert_eq!(handled.key, "ownership_change");
	}

	#[test]
	fn other_owner_is_not_authorized(owner in address_strategy()) {
		prop_assume!(!are_same_address(&owner, DEFAULT_OWNER_ADDRESS));

		let handled = handle_event_at(
			&ownership_event(owner),
			&MonitorConfig::new(DIAMOND),
			Utc::now(),
		)
		.unwrap();

		prop_assert!(!authorized(&handled.record.details));
		prop_assert_eq!(handled.severity, Severity::Critical);
	}

	#[test]
	fn storage_key_depends_on_block_only_for_facet_events(
		kind in event_kind_strategy(),
		first in 0u64..u64::MAX,
		second in 0u64..u64::MAX,
	) {
		prop_assume!(first != second);
		let per_block = matches!(
			kind,
			EventKind::FacetAdded | EventKind::FacetReplaced | EventKind::FacetRemoved
		);

		prop_assert_eq!(storage_key(kind, first) != storage_key(kind, second), per_block);
		if per_block {
			let suffix = format!("_{}", first);
			prop_assert!(storage_key(kind, first).ends_with(&suffix));
		}
	}
}
