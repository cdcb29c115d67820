use alloy::primitives::{Address, Bytes, FixedBytes, B256, U256};
use mockall::predicate;
use serde_json::{json, Value};

use diamond_event_monitor::{
	models::{IndexedEvent, MonitorConfig, Severity, DEFAULT_OWNER_ADDRESS},
	services::{
		classifier::abi,
		notification::{NotificationError, WebhookNotifier, WebhookResponse},
		processor::{EventOutcome, EventProcessor, StepResult},
		storage::{InMemoryEventStore, StorageError},
	},
};

use crate::integration::mocks::{
	to_log, transaction, MockEventStore, MockWebhookClient, DIAMOND,
};

const WEBHOOK: &str = "https://hooks.example.com/diamond";

fn webhook_config() -> MonitorConfig {
	MonitorConfig::new(DIAMOND).with_webhook_url(WEBHOOK)
}

fn indexed(name: &str, block_number: u64, args: Value) -> IndexedEvent {
	IndexedEvent {
		name: name.to_string(),
		block_number,
		transaction_hash: "0xfeed".to_string(),
		from: "0xbeef".to_string(),
		args,
	}
}

#[tokio::test]
async fn test_facet_added_is_stored_without_webhook_call() {
	let mut store = MockEventStore::new();
	store
		.expect_put()
		.with(predicate::eq("facet_added_1000"), predicate::always())
		.times(1)
		.returning(|_, value| {
			let record: Value = serde_json::from_str(value).unwrap();
			assert_eq!(record["event"], "FacetAdded");
			assert_eq!(record["functionSelectorsCount"], 3);
			Ok(())
		});

	let mut client = MockWebhookClient::new();
	client.expect_post_json().never();

	let config = MonitorConfig::new(DIAMOND);
	let notifier = WebhookNotifier::new(client, &config);
	let processor = EventProcessor::new(config, store, notifier);

	let log = to_log(&abi::FacetAdded {
		facetAddress: Address::repeat_byte(0xaa),
		functionSelectors: vec![FixedBytes::from([0x01; 4]); 3],
	});
	let report = processor.process_transaction(&transaction(1000, vec![log])).await;

	assert_eq!(report.handled_count(), 1);
	assert_eq!(report.step_failure_count(), 0);
}

#[tokio::test]
async fn test_unauthorized_ownership_transfer_is_critical() {
	let mut store = MockEventStore::new();
	store
		.expect_put()
		.with(predicate::eq("ownership_change"), predicate::always())
		.times(1)
		.returning(|_, _| Ok(()));

	let mut client = MockWebhookClient::new();
	client
		.expect_post_json()
		.withf(|url, body| {
			url.to_string() == WEBHOOK
				&& body["eventType"] == "OwnershipTransferred"
				&& body["severity"] == "CRITICAL"
				&& body["data"]["authorized"] == false
				&& body["diamondAddress"] == DIAMOND
		})
		.times(1)
		.returning(|_, _| Ok(WebhookResponse::from_status(200)));

	let config = webhook_config();
	let notifier = WebhookNotifier::new(client, &config);
	let processor = EventProcessor::new(config, store, notifier);

	let log = to_log(&abi::OwnershipTransferred {
		previousOwner: DEFAULT_OWNER_ADDRESS.parse().unwrap(),
		newOwner: Address::repeat_byte(0x66),
	});
	let report = processor.process_transaction(&transaction(7, vec![log])).await;

	match &report.outcomes[0] {
		EventOutcome::Handled {
			severity,
			notification,
			..
		} => {
			assert_eq!(*severity, Severity::Critical);
			assert_eq!(*notification, StepResult::Success);
		}
		other => panic!("unexpected outcome {:?}", other),
	}
}

#[tokio::test]
async fn test_storage_failure_still_notifies() {
	let mut store = MockEventStore::new();
	store
		.expect_put()
		.times(1)
		.returning(|_, _| Err(StorageError::WriteError("read-only filesystem".to_string())));

	let mut client = MockWebhookClient::new();
	client
		.expect_post_json()
		.times(1)
		.returning(|_, _| Ok(WebhookResponse::from_status(200)));

	let config = webhook_config();
	let notifier = WebhookNotifier::new(client, &config);
	let processor = EventProcessor::new(config, store, notifier);

	let log = to_log(&abi::ExecutionSuccess {
		txHash: B256::repeat_byte(0x33),
		payment: U256::from(0),
	});
	let report = processor.process_transaction(&transaction(5, vec![log])).await;

	match &report.outcomes[0] {
		EventOutcome::Handled {
			key,
			storage,
			notification,
			..
		} => {
			assert_eq!(key, "safe_execution_success");
			assert!(storage.is_failure());
			assert!(notification.is_success());
		}
		other => panic!("unexpected outcome {:?}", other),
	}
}

#[tokio::test]
async fn test_webhook_failure_does_not_stop_batch() {
	let mut store = MockEventStore::new();
	store.expect_put().times(2).returning(|_, _| Ok(()));

	let mut client = MockWebhookClient::new();
	let mut calls = 0;
	client.expect_post_json().times(2).returning(move |_, _| {
		calls += 1;
		if calls == 1 {
			Err(NotificationError::NetworkError("connection reset".to_string()))
		} else {
			Ok(WebhookResponse::from_status(500))
		}
	});

	let config = webhook_config();
	let notifier = WebhookNotifier::new(client, &config);
	let processor = EventProcessor::new(config, store, notifier);

	let events = vec![
		indexed(
			"FacetRemoved",
			10,
			json!({ "facetAddress": "0xaaa", "functionSelectors": ["0x01020304"] }),
		),
		indexed(
			"ExecutionFailure",
			11,
			json!({ "txHash": "0x1234", "payment": "0" }),
		),
	];
	let report = processor.process_indexed_events(&events).await;

	assert_eq!(report.handled_count(), 2);
	assert_eq!(report.step_failure_count(), 2);
}

#[tokio::test]
async fn test_unknown_and_unregistered_events_touch_nothing() {
	let mut store = MockEventStore::new();
	store.expect_put().never();
	let mut client = MockWebhookClient::new();
	client.expect_post_json().never();

	let config = webhook_config();
	let notifier = WebhookNotifier::new(client, &config);
	let processor = EventProcessor::new(config, store, notifier);

	let unknown_log = diamond_event_monitor::models::TransactionLog {
		address: Address::repeat_byte(0x01),
		topics: vec![B256::repeat_byte(0x99)],
		data: Bytes::new(),
	};
	let report = processor
		.process_transaction(&transaction(1, vec![unknown_log]))
		.await;
	assert_eq!(report.unknown_count(), 1);

	let report = processor
		.process_indexed_events(&[indexed("Upgraded", 2, json!({}))])
		.await;
	assert_eq!(report.unknown_count(), 1);
}

#[tokio::test]
async fn test_last_write_wins_for_fixed_keys() {
	let config = MonitorConfig::new(DIAMOND);
	let notifier = WebhookNotifier::from_config(&config).unwrap();
	let processor = EventProcessor::new(config, InMemoryEventStore::new(), notifier);

	let first = indexed(
		"OwnershipTransferred",
		100,
		json!({ "previousOwner": "0x1", "newOwner": "0x2" }),
	);
	let second = indexed(
		"OwnershipTransferred",
		200,
		json!({ "previousOwner": "0x2", "newOwner": DEFAULT_OWNER_ADDRESS }),
	);
	processor.process_indexed_events(&[first, second]).await;

	let stored: Value =
		serde_json::from_str(&processor.store().get("ownership_change").await.unwrap()).unwrap();
	assert_eq!(stored["blockNumber"], 200);
	assert_eq!(stored["authorized"], true);
	assert_eq!(processor.store().len().await, 1);
}

#[tokio::test]
async fn test_diamond_cut_log_summarises_cuts() {
	let processor = EventProcessor::with_http_notifier(
		MonitorConfig::new(DIAMOND),
		InMemoryEventStore::new(),
	)
	.unwrap();

	let log = to_log(&abi::DiamondCut {
		_diamondCut: vec![
			abi::FacetCut {
				facetAddress: Address::repeat_byte(0x0a),
				action: 0,
				functionSelectors: vec![FixedBytes::from([0x11; 4]); 2],
			},
			abi::FacetCut {
				facetAddress: Address::ZERO,
				action: 2,
				functionSelectors: vec![FixedBytes::from([0x22; 4])],
			},
		],
		_init: Address::ZERO,
		_calldata: Bytes::new(),
	});
	let report = processor.process_transaction(&transaction(42, vec![log])).await;
	assert_eq!(report.handled_count(), 1);

	let stored: Value =
		serde_json::from_str(&processor.store().get("last_diamond_cut").await.unwrap()).unwrap();
	assert_eq!(stored["cuts"][0]["action"], "Add");
	assert_eq!(stored["cuts"][0]["functionSelectorsCount"], 2);
	assert_eq!(stored["cuts"][1]["action"], "Remove");
	assert_eq!(stored["hasCalldata"], false);
}
