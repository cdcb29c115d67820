//! Per-event handlers.
//!
//! A handler turns a [`MonitoredEvent`](crate::models::MonitoredEvent) into the
//! record to persist, the key to persist it under, and the severity to notify with.

mod error;
mod handlers;

pub use error::HandlerError;
pub use handlers::{handle_event, handle_event_at, storage_key, HandledEvent};
