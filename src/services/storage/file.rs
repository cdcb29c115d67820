use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::services::storage::{EventStore, StorageError};

/// Event store backed by one JSON file per key.
///
/// `put("ownership_change", ..)` writes `<storage_path>/ownership_change.json`,
/// truncating any previous content.
#[derive(Clone)]
pub struct FileEventStore {
	storage_path: PathBuf,
}

impl FileEventStore {
	pub fn new(storage_path: impl Into<PathBuf>) -> Self {
		FileEventStore {
			storage_path: storage_path.into(),
		}
	}

	pub fn storage_path(&self) -> &Path {
		&self.storage_path
	}

	/// Path of the file holding `key`
	pub fn path_for(&self, key: &str) -> PathBuf {
		self.storage_path.join(format!("{}.json", key))
	}

	fn validate_key(key: &str) -> Result<(), StorageError> {
		let valid = !key.is_empty()
			&& key
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
		if valid {
			Ok(())
		} else {
			Err(StorageError::invalid_key(key))
		}
	}
}

impl Default for FileEventStore {
	fn default() -> Self {
		Self::new("data")
	}
}

#[async_trait]
impl EventStore for FileEventStore {
	async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
		Self::validate_key(key)?;
		tokio::fs::create_dir_all(&self.storage_path).await?;
		tokio::fs::write(self.path_for(key), value).await?;
		Ok(())
	}
}
