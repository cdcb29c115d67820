//! Event processing pipeline.
//!
//! Classifier, handler, store and notifier, run one event at a time. A batch is
//! processed in input order and every event is isolated from the others: whatever
//! fails is reported in that event's [`EventOutcome`] and processing moves on.

use tracing::{debug, error, info, instrument, warn};

use crate::{
	models::{ChainTransaction, IndexedEvent, LogContext, MonitorConfig, MonitoredEvent, TransactionLog},
	services::{
		classifier::{DecodeOutcome, IndexedEventClassifier, LogClassifier},
		handler::{handle_event, HandlerError},
		notification::{HttpWebhookClient, NotificationError, WebhookClient, WebhookNotifier},
		processor::{BatchReport, EventOutcome, StepResult},
		storage::EventStore,
	},
	utils::{address_to_string, b256_to_string},
};

/// Runs incoming events through classification, recording and notification
pub struct EventProcessor<S: EventStore, C: WebhookClient> {
	config: MonitorConfig,
	log_classifier: LogClassifier,
	indexed_classifier: IndexedEventClassifier,
	store: S,
	notifier: WebhookNotifier<C>,
}

impl<S: EventStore> EventProcessor<S, HttpWebhookClient> {
	/// Creates a processor that notifies over HTTP
	pub fn with_http_notifier(config: MonitorConfig, store: S) -> Result<Self, NotificationError> {
		let notifier = WebhookNotifier::from_config(&config)?;
		Ok(Self::new(config, store, notifier))
	}
}

impl<S: EventStore, C: WebhookClient> EventProcessor<S, C> {
	/// Creates a processor with the default classifiers
	pub fn new(config: MonitorConfig, store: S, notifier: WebhookNotifier<C>) -> Self {
		Self {
			config,
			log_classifier: LogClassifier::default(),
			indexed_classifier: IndexedEventClassifier::default(),
			store,
			notifier,
		}
	}

	/// Replaces the raw log classifier
	pub fn with_log_classifier(mut self, classifier: LogClassifier) -> Self {
		self.log_classifier = classifier;
		self
	}

	/// Replaces the indexed event classifier
	pub fn with_indexed_classifier(mut self, classifier: IndexedEventClassifier) -> Self {
		self.indexed_classifier = classifier;
		self
	}

	pub fn config(&self) -> &MonitorConfig {
		&self.config
	}

	pub fn store(&self) -> &S {
		&self.store
	}

	/// Processes every log of a transaction, in order
	#[instrument(skip_all, fields(tx = %b256_to_string(transaction.hash), logs = transaction.logs.len()))]
	pub async fn process_transaction(&self, transaction: &ChainTransaction) -> BatchReport {
		let context = LogContext {
			block_number: transaction.block_number,
			transaction_hash: b256_to_string(transaction.hash),
			from: address_to_string(transaction.from),
		};

		let mut report = BatchReport::default();
		for log in &transaction.logs {
			report.push(self.process_log(log, &context).await);
		}
		info!(
			handled = report.handled_count(),
			unknown = report.unknown_count(),
			failed = report.failed_count(),
			"transaction processed"
		);
		report
	}

	/// Processes a single raw log
	///
	/// Logs from contracts outside `allowed_emitters` are reported as unknown
	/// without being decoded.
	pub async fn process_log(&self, log: &TransactionLog, context: &LogContext) -> EventOutcome {
		let emitter = address_to_string(log.address);
		if !self.config.is_allowed_emitter(&emitter) {
			debug!(emitter = %emitter, "log from unmonitored contract, skipping");
			return EventOutcome::Unknown {
				reason: format!("log from {} is not from a monitored contract", emitter),
			};
		}

		match self.log_classifier.classify(log, context) {
			Ok(DecodeOutcome::Matched(event)) => self.dispatch(&event).await,
			Ok(DecodeOutcome::NoMatch) => EventOutcome::Unknown {
				reason: format!(
					"log from {} matches no known event",
					address_to_string(log.address)
				),
			},
			Err(e) => Self::handler_failure(&e),
		}
	}

	/// Processes indexer-supplied events, in order
	#[instrument(skip_all, fields(events = events.len()))]
	pub async fn process_indexed_events(&self, events: &[IndexedEvent]) -> BatchReport {
		let mut report = BatchReport::default();
		for event in events {
			report.push(self.process_indexed_event(event).await);
		}
		info!(
			handled = report.handled_count(),
			unknown = report.unknown_count(),
			failed = report.failed_count(),
			"indexed events processed"
		);
		report
	}

	/// Processes a single indexer-supplied event
	pub async fn process_indexed_event(&self, event: &IndexedEvent) -> EventOutcome {
		match self.indexed_classifier.classify(event) {
			Ok(DecodeOutcome::Matched(monitored)) => self.dispatch(&monitored).await,
			Ok(DecodeOutcome::NoMatch) => EventOutcome::Unknown {
				reason: format!("unknown event name {}", event.name),
			},
			Err(e) => Self::handler_failure(&e),
		}
	}

	/// Handles a decoded event, records it, then notifies.
	///
	/// The notification is sent even when the store write fails.
	pub async fn dispatch(&self, event: &MonitoredEvent) -> EventOutcome {
		let handled = match handle_event(event, &self.config) {
			Ok(handled) => handled,
			Err(e) => return Self::handler_failure(&e),
		};

		let storage = match handled.record_json() {
			Ok(json) => match self.store.put(&handled.key, &json).await {
				Ok(()) => StepResult::Success,
				Err(e) => {
					error!(key = %handled.key, error = %e, "failed to record event");
					StepResult::Failed(e.to_string())
				}
			},
			Err(e) => {
				error!(key = %handled.key, error = %e, "failed to serialize record");
				StepResult::Failed(e.to_string())
			}
		};

		let notification = StepResult::from(
			self.notifier
				.notify(handled.kind, handled.severity, &handled.record)
				.await,
		);

		info!(
			event = handled.kind.as_str(),
			block = event.block_number,
			key = %handled.key,
			severity = handled.severity.as_str(),
			"event handled"
		);

		EventOutcome::Handled {
			event: handled.kind.as_str().to_string(),
			key: handled.key,
			severity: handled.severity,
			storage,
			notification,
		}
	}

	fn handler_failure(e: &HandlerError) -> EventOutcome {
		warn!(error = %e, "failed to handle event");
		EventOutcome::Failed {
			reason: e.to_string(),
		}
	}
}
