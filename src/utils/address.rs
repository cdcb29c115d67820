//! Helper functions for EVM addresses and hashes.
//!
//! Addresses and hashes travel through the monitor as `0x`-prefixed strings. Decoded
//! values are always rendered lowercase; values supplied by an indexer are kept as
//! given, so every comparison must go through [`are_same_address`].

use alloy::primitives::{Address, FixedBytes, B256};

/// Converts an address to its lowercase hexadecimal string representation.
///
/// # Arguments
/// * `address` - The address to convert
///
/// # Returns
/// A string in the format "0x..." representing the address
pub fn address_to_string(address: Address) -> String {
	format!("0x{}", hex::encode(address.as_slice()))
}

/// Converts a B256 hash to its hexadecimal string representation.
pub fn b256_to_string(hash: B256) -> String {
	format!("0x{}", hex::encode(hash.as_slice()))
}

/// Converts a 4-byte function selector to its hexadecimal string representation.
pub fn selector_to_string(selector: FixedBytes<4>) -> String {
	format!("0x{}", hex::encode(selector.as_slice()))
}

/// Compares two addresses for equality, ignoring case and "0x" prefixes.
///
/// # Arguments
/// * `address1` - First address to compare
/// * `address2` - Second address to compare
///
/// # Returns
/// `true` if the addresses are equivalent, `false` otherwise
pub fn are_same_address(address1: &str, address2: &str) -> bool {
	normalize_address(address1) == normalize_address(address2)
}

/// Normalizes an address string by removing "0x" prefix, spaces, and converting to lowercase.
pub fn normalize_address(address: &str) -> String {
	let trimmed = address.trim();
	trimmed
		.strip_prefix("0x")
		.or_else(|| trimmed.strip_prefix("0X"))
		.unwrap_or(trimmed)
		.replace(' ', "")
		.to_lowercase()
}

/// Checks that a string is a `0x`-prefixed, 20-byte hexadecimal address.
pub fn is_valid_address(address: &str) -> bool {
	match address.strip_prefix("0x") {
		Some(hex_part) => hex_part.len() == 40 && hex_part.chars().all(|c| c.is_ascii_hexdigit()),
		None => false,
	}
}

/// Returns true when calldata carries at least one byte.
///
/// Empty strings and a bare `0x` both count as empty.
pub fn has_calldata(calldata: &str) -> bool {
	let data = calldata.trim();
	let data = data.strip_prefix("0x").unwrap_or(data);
	!data.is_empty()
}
