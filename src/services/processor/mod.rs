//! Event processing.
//!
//! [`EventProcessor`] drives one batch of events through the pipeline and returns a
//! [`BatchReport`] with one [`EventOutcome`] per input, in input order.

mod report;
mod service;

pub use report::{BatchReport, EventOutcome, StepResult};
pub use service::EventProcessor;
