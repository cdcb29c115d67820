use alloy::primitives::{Address, FixedBytes};
use serde_json::Value;
use tempfile::tempdir;

use diamond_event_monitor::{
	models::MonitorConfig,
	services::{
		classifier::abi,
		processor::EventProcessor,
		storage::{EventStore, FileEventStore},
	},
};

use crate::integration::mocks::{to_log, transaction, DIAMOND};

#[tokio::test]
async fn test_file_store_writes_one_file_per_key() {
	let dir = tempdir().unwrap();
	let processor = EventProcessor::with_http_notifier(
		MonitorConfig::new(DIAMOND),
		FileEventStore::new(dir.path()),
	)
	.unwrap();

	let logs = vec![
		to_log(&abi::FacetAdded {
			facetAddress: Address::repeat_byte(0xaa),
			functionSelectors: vec![FixedBytes::from([0x01; 4])],
		}),
		to_log(&abi::FacetReplaced {
			facetAddress: Address::repeat_byte(0xbb),
			functionSelectors: vec![FixedBytes::from([0x02; 4]); 2],
		}),
	];
	let report = processor.process_transaction(&transaction(77, logs)).await;
	assert_eq!(report.handled_count(), 2);

	let added: Value = serde_json::from_str(
		&std::fs::read_to_string(dir.path().join("facet_added_77.json")).unwrap(),
	)
	.unwrap();
	assert_eq!(added["facetAddress"], format!("0x{}", "aa".repeat(20)));

	let replaced: Value = serde_json::from_str(
		&std::fs::read_to_string(dir.path().join("facet_replaced_77.json")).unwrap(),
	)
	.unwrap();
	assert_eq!(replaced["functionSelectorsCount"], 2);
}

#[tokio::test]
async fn test_file_store_overwrites_existing_value() {
	let dir = tempdir().unwrap();
	let store = FileEventStore::new(dir.path().join("nested"));

	store.put("last_diamond_cut", "{\"blockNumber\":1}").await.unwrap();
	store.put("last_diamond_cut", "{\"blockNumber\":2}").await.unwrap();

	let content = std::fs::read_to_string(store.path_for("last_diamond_cut")).unwrap();
	assert_eq!(content, "{\"blockNumber\":2}");
}

#[tokio::test]
async fn test_file_store_rejects_path_like_keys() {
	let dir = tempdir().unwrap();
	let store = FileEventStore::new(dir.path());

	assert!(store.put("../escape", "{}").await.is_err());
	assert!(store.put("", "{}").await.is_err());
}
