use alloy::{
	primitives::{Address, B256},
	sol_types::SolEvent,
};
use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;

use diamond_event_monitor::{
	models::{ChainTransaction, TransactionLog},
	services::{
		notification::{NotificationError, WebhookClient, WebhookResponse},
		storage::{EventStore, StorageError},
	},
};

pub const DIAMOND: &str = "0x1234567890abcdef1234567890abcdef12345678";

mock! {
	pub EventStore {}

	#[async_trait]
	impl EventStore for EventStore {
		async fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;
	}
}

mock! {
	pub WebhookClient {}

	#[async_trait]
	impl WebhookClient for WebhookClient {
		async fn post_json(&self, url: &str, body: &Value) -> Result<WebhookResponse, NotificationError>;
	}
}

pub fn diamond_address() -> Address {
	DIAMOND.parse().unwrap()
}

pub fn to_log<E: SolEvent>(event: &E) -> TransactionLog {
	let data = event.encode_log_data();
	TransactionLog {
		address: diamond_address(),
		topics: data.topics().to_vec(),
		data: data.data.clone(),
	}
}

pub fn transaction(block_number: u64, logs: Vec<TransactionLog>) -> ChainTransaction {
	ChainTransaction {
		hash: B256::repeat_byte(0x01),
		from: Address::repeat_byte(0x02),
		block_number,
		logs,
	}
}
