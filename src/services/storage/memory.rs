use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::services::storage::{EventStore, StorageError};

/// In-process event store, mainly for tests and dry runs
#[derive(Default)]
pub struct InMemoryEventStore {
	entries: RwLock<HashMap<String, String>>,
}

impl InMemoryEventStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub async fn get(&self, key: &str) -> Option<String> {
		self.entries.read().await.get(key).cloned()
	}

	pub async fn len(&self) -> usize {
		self.entries.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.entries.read().await.is_empty()
	}

	/// Sorted list of stored keys
	pub async fn keys(&self) -> Vec<String> {
		let mut keys: Vec<String> = self.entries.read().await.keys().cloned().collect();
		keys.sort();
		keys
	}
}

#[async_trait]
impl EventStore for InMemoryEventStore {
	async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
		if key.is_empty() {
			return Err(StorageError::invalid_key("key cannot be empty"));
		}
		self.entries
			.write()
			.await
			.insert(key.to_string(), value.to_string());
		Ok(())
	}
}
