//! Latest-state event store.
//!
//! The store is a plain key-value capability: `put` fully replaces whatever was
//! under the key. There are no reads on the processing path and no merging.

use async_trait::async_trait;

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::FileEventStore;
pub use memory::InMemoryEventStore;

/// Key-value capability used to persist the latest record per key
#[async_trait]
pub trait EventStore: Send + Sync {
	/// Writes `value` under `key`, replacing any previous value
	async fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
