use mockito::Matcher;
use serde_json::json;

use diamond_event_monitor::{
	models::{IndexedEvent, MonitorConfig, DEFAULT_SENDER},
	services::{
		notification::{sign_payload, HttpWebhookClient, WebhookClient},
		processor::{EventOutcome, EventProcessor, StepResult},
		storage::InMemoryEventStore,
	},
};

use crate::integration::mocks::DIAMOND;

fn facet_added(block_number: u64) -> IndexedEvent {
	IndexedEvent {
		name: "FacetAdded".to_string(),
		block_number,
		transaction_hash: "0xabc".to_string(),
		from: "0xdef".to_string(),
		args: json!({
			"facetAddress": "0xAAA",
			"functionSelectors": ["0x01", "0x02", "0x03"]
		}),
	}
}

fn notification_step(outcome: &EventOutcome) -> &StepResult {
	match outcome {
		EventOutcome::Handled { notification, .. } => notification,
		other => panic!("unexpected outcome {:?}", other),
	}
}

#[tokio::test]
async fn test_webhook_notification_success() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("POST", "/hook")
		.match_header("content-type", "application/json")
		.match_header("x-monitor-sender", DEFAULT_SENDER)
		.match_body(Matcher::PartialJson(json!({
			"eventType": "FacetAdded",
			"severity": "MEDIUM",
			"diamondAddress": DIAMOND,
			"sigil": "◈",
			"data": {
				"event": "FacetAdded",
				"blockNumber": 1000,
				"facetAddress": "0xAAA",
				"functionSelectorsCount": 3
			}
		})))
		.with_status(200)
		.create_async()
		.await;

	let config = MonitorConfig::new(DIAMOND).with_webhook_url(format!("{}/hook", server.url()));
	let processor = EventProcessor::with_http_notifier(config, InMemoryEventStore::new()).unwrap();

	let outcome = processor.process_indexed_event(&facet_added(1000)).await;

	assert_eq!(notification_step(&outcome), &StepResult::Success);
	assert!(processor.store().get("facet_added_1000").await.is_some());
	mock.assert();
}

#[tokio::test]
async fn test_webhook_notification_failure_status() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.with_status(500)
		.with_body("Internal Server Error")
		.create_async()
		.await;

	let config = MonitorConfig::new(DIAMOND).with_webhook_url(server.url());
	let processor = EventProcessor::with_http_notifier(config, InMemoryEventStore::new()).unwrap();

	let outcome = processor.process_indexed_event(&facet_added(1)).await;

	assert_eq!(
		notification_step(&outcome),
		&StepResult::Failed("webhook returned status 500".to_string())
	);
	assert!(processor.store().get("facet_added_1").await.is_some());
	mock.assert();
}

#[tokio::test]
async fn test_webhook_unreachable_is_reported() {
	let config = MonitorConfig::new(DIAMOND).with_webhook_url("http://127.0.0.1:1/unreachable");
	let processor = EventProcessor::with_http_notifier(config, InMemoryEventStore::new()).unwrap();

	let outcome = processor.process_indexed_event(&facet_added(2)).await;

	assert!(notification_step(&outcome).is_failure());
}

#[tokio::test]
async fn test_signed_request_headers() {
	let mut server = mockito::Server::new_async().await;
	let body = json!({ "eventType": "ExecutionFailure" });
	let mock = server
		.mock("POST", "/")
		.match_header("x-signature", Matcher::Regex("^[0-9a-f]{64}$".to_string()))
		.match_header("x-timestamp", Matcher::Regex("^[0-9]+$".to_string()))
		.match_header("x-monitor-sender", "ops-monitor")
		.with_status(204)
		.create_async()
		.await;

	let client = HttpWebhookClient::new("ops-monitor", Some("top-secret".to_string())).unwrap();
	let response = client.post_json(&server.url(), &body).await.unwrap();

	assert!(response.ok);
	assert_eq!(response.status, 204);
	mock.assert();
}

#[tokio::test]
async fn test_unsigned_request_has_no_signature_headers() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("POST", "/")
		.match_header("x-signature", Matcher::Missing)
		.match_header("x-timestamp", Matcher::Missing)
		.with_status(200)
		.create_async()
		.await;

	let client = HttpWebhookClient::new(DEFAULT_SENDER, None).unwrap();
	let response = client.post_json(&server.url(), &json!({})).await.unwrap();

	assert!(response.ok);
	mock.assert();
}

#[test]
fn test_signature_is_stable_for_same_input() {
	let first = sign_payload("secret", "{\"a\":1}", "1700000000000").unwrap();
	let second = sign_payload("secret", "{\"a\":1}", "1700000000000").unwrap();
	let other = sign_payload("secret", "{\"a\":1}", "1700000000001").unwrap();

	assert_eq!(first, second);
	assert_ne!(first, other);
}
