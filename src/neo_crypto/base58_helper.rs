//! Base58 and Base58Check helpers.
//!
//! Base58Check appends the first four bytes of a double SHA-256 over the
//! payload before encoding. The strict decoder reports checksum and alphabet
//! failures as distinct errors; `base58check_decode_lenient` keeps the
//! swallow-everything behavior of older SDKs for callers that migrated from
//! them.

use crate::neo_crypto::{error::CryptoError, hash::hash256};

/// Encodes bytes as Base58 (Bitcoin alphabet, leading zeros preserved).
pub fn base58_encode(data: &[u8]) -> String {
	bs58::encode(data).into_string()
}

/// Decodes a Base58 string, rejecting characters outside the alphabet.
pub fn base58_decode(encoded: &str) -> Result<Vec<u8>, CryptoError> {
	bs58::decode(encoded)
		.into_vec()
		.map_err(|_| CryptoError::InvalidFormat("invalid base58 character".to_string()))
}

/// Encodes `data` with a 4-byte double-SHA-256 checksum appended.
pub fn base58check_encode(data: &[u8]) -> String {
	let checksum = &hash256(data)[..4];
	let mut payload = Vec::with_capacity(data.len() + 4);
	payload.extend_from_slice(data);
	payload.extend_from_slice(checksum);
	base58_encode(&payload)
}

/// Decodes a Base58Check string, verifying and stripping the checksum.
pub fn base58check_decode(encoded: &str) -> Result<Vec<u8>, CryptoError> {
	let decoded = base58_decode(encoded)?;
	if decoded.len() < 4 {
		return Err(CryptoError::InvalidFormat("base58check payload too short".to_string()));
	}
	let (data, checksum) = decoded.split_at(decoded.len() - 4);
	if &hash256(data)[..4] != checksum {
		return Err(CryptoError::InvalidFormat("base58check checksum mismatch".to_string()));
	}
	Ok(data.to_vec())
}

/// Compatibility decode that collapses every failure into `None`, matching
/// SDKs whose Base58Check decoder returned an empty byte string on bad input.
pub fn base58check_decode_lenient(encoded: &str) -> Option<Vec<u8>> {
	base58check_decode(encoded).ok()
}
