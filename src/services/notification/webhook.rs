//! Webhook notification dispatch.
//!
//! Builds a [`NotificationPayload`] for a handled event and delivers it through a
//! [`WebhookClient`]. Delivery is attempted once; failures are logged and reported
//! as a [`DeliveryOutcome`], never returned as errors.

use chrono::{SecondsFormat, Utc};
use tracing::{debug, error, info, warn};

use crate::{
	models::{EventKind, MonitorConfig, NotificationPayload, Severity, StoredEventRecord},
	services::notification::{HttpWebhookClient, NotificationError, WebhookClient},
};

/// What happened to one notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
	/// Receiver answered with a 2xx status
	Delivered { status: u16 },
	/// No webhook URL configured; nothing was sent
	Disabled,
	/// Receiver answered with a non-2xx status
	Rejected { status: u16 },
	/// No response was received
	TransportFailed { reason: String },
}

/// Sends event notifications to the configured webhook
pub struct WebhookNotifier<C: WebhookClient> {
	client: C,
	url: Option<String>,
	diamond_address: String,
	sigil: String,
}

impl WebhookNotifier<HttpWebhookClient> {
	/// Creates an HTTP-backed notifier from the monitor configuration
	pub fn from_config(config: &MonitorConfig) -> Result<Self, NotificationError> {
		let client = HttpWebhookClient::new(config.sender.clone(), config.webhook_secret.clone())?;
		Ok(Self::new(client, config))
	}
}

impl<C: WebhookClient> WebhookNotifier<C> {
	/// Creates a notifier using `client` for delivery
	pub fn new(client: C, config: &MonitorConfig) -> Self {
		Self {
			client,
			url: config.webhook_url.clone(),
			diamond_address: config.diamond_address.clone(),
			sigil: config.sigil.clone(),
		}
	}

	pub fn is_enabled(&self) -> bool {
		self.url.is_some()
	}

	pub fn client(&self) -> &C {
		&self.client
	}

	/// Builds the payload for an event, stamped with the current time
	pub fn build_payload(
		&self,
		kind: EventKind,
		severity: Severity,
		record: &StoredEventRecord,
	) -> NotificationPayload {
		NotificationPayload {
			event_type: kind.as_str().to_string(),
			severity,
			diamond_address: self.diamond_address.clone(),
			sigil: self.sigil.clone(),
			data: record.clone(),
			timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
		}
	}

	/// Sends one notification for an event.
	///
	/// # Arguments
	/// * `kind` - Event type
	/// * `severity` - Severity tag; callers pass `Severity::default()` unless the event forces one
	/// * `record` - Record that was (or would have been) stored for the event
	pub async fn notify(
		&self,
		kind: EventKind,
		severity: Severity,
		record: &StoredEventRecord,
	) -> DeliveryOutcome {
		let Some(url) = &self.url else {
			debug!(event = kind.as_str(), "webhook not configured, skipping notification");
			return DeliveryOutcome::Disabled;
		};

		let payload = self.build_payload(kind, severity, record);
		let body = match serde_json::to_value(&payload) {
			Ok(body) => body,
			Err(e) => {
				error!(event = kind.as_str(), error = %e, "failed to serialize notification");
				return DeliveryOutcome::TransportFailed {
					reason: format!("failed to serialize notification: {}", e),
				};
			}
		};

		match self.client.post_json(url, &body).await {
			Ok(response) if response.ok => {
				info!(
					event = kind.as_str(),
					severity = severity.as_str(),
					status = response.status,
					"notification delivered"
				);
				DeliveryOutcome::Delivered {
					status: response.status,
				}
			}
			Ok(response) => {
				warn!(
					event = kind.as_str(),
					status = response.status,
					"webhook returned error status"
				);
				DeliveryOutcome::Rejected {
					status: response.status,
				}
			}
			Err(e) => {
				error!(event = kind.as_str(), error = %e, "webhook delivery failed");
				DeliveryOutcome::TransportFailed {
					reason: e.to_string(),
				}
			}
		}
	}
}
