//! Base64 helpers.
//!
//! Neo's JSON surfaces carry scripts and witnesses as standard, padded
//! Base64. Decoding is strict: wrong padding or characters outside the
//! alphabet are errors.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::neo_types::error::TypeError;

/// Postfix Base64 encoding.
pub trait ToBase64 {
	/// Encodes as standard padded Base64.
	fn to_base64(&self) -> String;
}

/// Postfix Base64 decoding.
pub trait FromBase64 {
	/// Decodes standard padded Base64.
	fn from_base64(encoded: &str) -> Result<Self, TypeError>
	where
		Self: Sized;
}

impl ToBase64 for [u8] {
	fn to_base64(&self) -> String {
		STANDARD.encode(self)
	}
}

impl ToBase64 for Vec<u8> {
	fn to_base64(&self) -> String {
		STANDARD.encode(self)
	}
}

impl FromBase64 for Vec<u8> {
	fn from_base64(encoded: &str) -> Result<Self, TypeError> {
		STANDARD
			.decode(encoded)
			.map_err(|e| TypeError::InvalidFormat(format!("invalid base64: {e}")))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_known_vector() {
		assert_eq!(b"hello world".to_base64(), "aGVsbG8gd29ybGQ=");
		assert_eq!(
			Vec::from_base64("aGVsbG8gd29ybGQ=").unwrap(),
			b"hello world".to_vec()
		);
	}

	#[test]
	fn test_round_trip() {
		for data in [vec![], vec![0u8], vec![0xFF; 33], (0u8..=255).collect::<Vec<u8>>()] {
			assert_eq!(Vec::from_base64(&data.to_base64()).unwrap(), data);
		}
	}

	#[test]
	fn test_strict_decode() {
		assert!(Vec::from_base64("aGVsbG8gd29ybGQ").is_err()); // missing padding
		assert!(Vec::from_base64("aGV$bG8=").is_err()); // bad character
	}

	#[test]
	fn test_hex_round_trip() {
		// Law check for the sibling hex codec used across the crate.
		let data = vec![0x00u8, 0x01, 0xAB, 0xFF];
		assert_eq!(hex::decode(hex::encode(&data)).unwrap(), data);
		// Mixed case tolerated, odd length and non-hex rejected.
		assert_eq!(hex::decode("AbCd").unwrap(), vec![0xAB, 0xCD]);
		assert!(hex::decode("abc").is_err());
		assert!(hex::decode("zz").is_err());
	}
}
