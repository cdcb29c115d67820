//! Webhook notifications.
//!
//! - [`WebhookClient`]: the POST capability, with an HTTP implementation
//! - [`WebhookNotifier`]: builds payloads and reports a [`DeliveryOutcome`]

mod client;
mod error;
mod webhook;

pub use client::{
	sign_payload, HttpWebhookClient, WebhookClient, WebhookResponse, SENDER_HEADER,
	SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
pub use error::NotificationError;
pub use webhook::{DeliveryOutcome, WebhookNotifier};
