//! On-chain event monitor for a Diamond proxy and its Safe wallet.
//!
//! Incoming events arrive either as raw transaction logs or as structured events
//! from an indexer. Each one is classified, turned into a "latest known state"
//! record, written to a key-value store and announced to a webhook with a
//! severity tag.
//!
//! # Architecture
//! - `bootstrap`: Loading configuration and inputs for the binary
//! - `models`: Events, records, payloads and configuration
//! - `services`: Classification, handlers, storage, notification and the processor
//! - `utils`: Address helpers and logging setup

pub mod bootstrap;
pub mod models;
pub mod services;
pub mod utils;
