//! HTTP transport for webhook notifications.
//!
//! One POST per call with a JSON body and the sender header. When a secret is set the
//! request is also signed with HMAC-SHA256 over the body and a millisecond timestamp.

use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use sha2::Sha256;

use crate::services::notification::NotificationError;

/// HMAC SHA256 type alias
type HmacSha256 = Hmac<Sha256>;

/// Header identifying the monitor instance that sent a notification
pub const SENDER_HEADER: &str = "X-Monitor-Sender";
pub const SIGNATURE_HEADER: &str = "X-Signature";
pub const TIMESTAMP_HEADER: &str = "X-Timestamp";

/// Status of a completed webhook request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebhookResponse {
	pub ok: bool,
	pub status: u16,
}

impl WebhookResponse {
	pub fn from_status(status: u16) -> Self {
		Self {
			ok: (200..300).contains(&status),
			status,
		}
	}
}

/// Capability to POST a JSON body to a URL
#[async_trait]
pub trait WebhookClient: Send + Sync {
	/// Sends `body` to `url` once.
	///
	/// Returns `Err` only when no response was received.
	async fn post_json(&self, url: &str, body: &Value) -> Result<WebhookResponse, NotificationError>;
}

/// [`WebhookClient`] on top of reqwest, using its default timeouts
pub struct HttpWebhookClient {
	client: reqwest::Client,
	sender: String,
	secret: Option<String>,
}

impl HttpWebhookClient {
	/// Creates a new client
	///
	/// # Arguments
	/// * `sender` - Value of the sender header
	/// * `secret` - Signing secret (optional)
	pub fn new(sender: impl Into<String>, secret: Option<String>) -> Result<Self, NotificationError> {
		let client = reqwest::Client::builder()
			.build()
			.map_err(|e| NotificationError::config_error(format!("failed to build client: {}", e)))?;
		Ok(Self {
			client,
			sender: sender.into(),
			secret,
		})
	}

	/// Signs `body` with `secret`.
	///
	/// # Returns
	/// * `(signature, timestamp)` - hex HMAC and the millisecond timestamp that was signed
	pub fn sign_request(
		&self,
		secret: &str,
		body: &str,
	) -> Result<(String, String), NotificationError> {
		let timestamp = Utc::now().timestamp_millis().to_string();
		let signature = sign_payload(secret, body, &timestamp)?;
		Ok((signature, timestamp))
	}

	fn build_headers(&self, body: &str) -> Result<HeaderMap, NotificationError> {
		let mut headers = HeaderMap::new();
		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

		let sender = HeaderValue::from_str(&self.sender).map_err(|e| {
			NotificationError::config_error(format!("invalid sender header value: {}", e))
		})?;
		headers.insert(HeaderName::from_static("x-monitor-sender"), sender);

		if let Some(secret) = &self.secret {
			let (signature, timestamp) = self.sign_request(secret, body)?;
			let signature = HeaderValue::from_str(&signature).map_err(|e| {
				NotificationError::internal_error(format!("invalid signature value: {}", e))
			})?;
			let timestamp = HeaderValue::from_str(&timestamp).map_err(|e| {
				NotificationError::internal_error(format!("invalid timestamp value: {}", e))
			})?;
			headers.insert(HeaderName::from_static("x-signature"), signature);
			headers.insert(HeaderName::from_static("x-timestamp"), timestamp);
		}

		Ok(headers)
	}
}

/// Hex HMAC-SHA256 of `body` followed by `timestamp`
pub fn sign_payload(secret: &str, body: &str, timestamp: &str) -> Result<String, NotificationError> {
	let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
		.map_err(|e| NotificationError::config_error(format!("Invalid secret: {}", e)))?;
	mac.update(body.as_bytes());
	mac.update(timestamp.as_bytes());
	Ok(hex::encode(mac.finalize().into_bytes()))
}

#[async_trait]
impl WebhookClient for HttpWebhookClient {
	async fn post_json(&self, url: &str, body: &Value) -> Result<WebhookResponse, NotificationError> {
		let body = serde_json::to_string(body).map_err(|e| {
			NotificationError::internal_error(format!("failed to serialize payload: {}", e))
		})?;
		let headers = self.build_headers(&body)?;

		let response = self
			.client
			.post(url)
			.headers(headers)
			.body(body)
			.send()
			.await
			.map_err(|e| {
				NotificationError::network_error(format!(
					"Failed to send webhook notification: {}",
					e
				))
			})?;

		Ok(WebhookResponse::from_status(response.status().as_u16()))
	}
}
