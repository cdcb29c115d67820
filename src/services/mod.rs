//! Core services of the event monitor.
//!
//! - `classifier`: Identifies incoming logs and indexed events
//! - `handler`: Builds records, storage keys and severities per event
//! - `storage`: Latest-state key-value store
//! - `notification`: Webhook delivery
//! - `processor`: Runs events through all of the above

pub mod classifier;
pub mod handler;
pub mod notification;
pub mod processor;
pub mod storage;
