//! Domain models and data structures for the event monitor.
//!
//! - `event`: Monitored events and the raw inputs they are decoded from
//! - `record`: Records persisted to the event store
//! - `notification`: Webhook payloads and severities
//! - `config`: Configuration loading and validation

mod config;
mod event;
mod notification;
mod record;

pub use config::{
	ConfigError, ConfigLoader, MonitorConfig, DEFAULT_OWNER_ADDRESS, DEFAULT_SENDER,
	DEFAULT_SIGIL, ENV_ALLOWED_EMITTERS, ENV_DIAMOND_ADDRESS, ENV_MONITOR_SENDER, ENV_MONITOR_SIGIL, ENV_OWNER_ADDRESS,
	ENV_WEBHOOK_SECRET, ENV_WEBHOOK_URL,
};

pub use event::{
	ChainTransaction, EventArgs, EventKind, FacetChange, FacetCut, FacetCutAction, IndexedEvent,
	LogContext, MonitoredEvent, SafeExecution, TransactionLog,
};

pub use notification::{NotificationPayload, Severity};

pub use record::{
	CutSummary, DiamondCutDetails, FacetDetails, OwnershipDetails, RecordDetails,
	SafeExecutionDetails, StoredEventRecord,
};
