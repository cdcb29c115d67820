//! Utility modules for common functionality.
//!
//! - address: Address, hash and selector helpers for EVM values
//! - logging: Logging setup

pub mod address;
pub mod logging;

pub use address::*;
