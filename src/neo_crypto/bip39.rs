//! BIP-39 mnemonics.
//!
//! Thin wrappers over the `bip39` crate, which ships the full 2048-word
//! English list. Entropy lengths of 128, 160, 192, 224 and 256 bits map to
//! 12–24 word phrases; the checksum is the leading `ENT/32` bits of a
//! SHA-256 over the entropy. The seed is PBKDF2-HMAC-SHA-512 over the
//! NFKD-normalized phrase with `"mnemonic" || passphrase` as salt and 2048
//! iterations, all handled inside the crate.

use bip39::{Language, Mnemonic};

use crate::neo_crypto::error::CryptoError;

/// Supported entropy strengths in bits.
pub const VALID_ENTROPY_BITS: [usize; 5] = [128, 160, 192, 224, 256];

/// Generates a random mnemonic of the given entropy strength in bits.
pub fn generate_mnemonic(strength_bits: usize) -> Result<Mnemonic, CryptoError> {
	if !VALID_ENTROPY_BITS.contains(&strength_bits) {
		return Err(CryptoError::InvalidParams(format!(
			"entropy strength must be one of {VALID_ENTROPY_BITS:?} bits"
		)));
	}
	Mnemonic::generate_in(Language::English, strength_bits / 11 + 1)
		.map_err(|e| CryptoError::InvalidParams(e.to_string()))
}

/// Converts raw entropy into its mnemonic phrase.
pub fn entropy_to_mnemonic(entropy: &[u8]) -> Result<Mnemonic, CryptoError> {
	if !VALID_ENTROPY_BITS.contains(&(entropy.len() * 8)) {
		return Err(CryptoError::InvalidParams(format!(
			"entropy must be one of {VALID_ENTROPY_BITS:?} bits"
		)));
	}
	Mnemonic::from_entropy_in(Language::English, entropy)
		.map_err(|e| CryptoError::InvalidFormat(e.to_string()))
}

/// Recovers the entropy behind a phrase, verifying its checksum.
pub fn mnemonic_to_entropy(phrase: &str) -> Result<Vec<u8>, CryptoError> {
	Ok(parse_mnemonic(phrase)?.to_entropy())
}

/// Whether a phrase is well-formed with a valid checksum.
pub fn validate_mnemonic(phrase: &str) -> bool {
	parse_mnemonic(phrase).is_ok()
}

/// Parses a phrase against the English word list.
pub fn parse_mnemonic(phrase: &str) -> Result<Mnemonic, CryptoError> {
	Mnemonic::parse_in(Language::English, phrase)
		.map_err(|e| CryptoError::InvalidFormat(e.to_string()))
}

/// Derives the 64-byte BIP-39 seed from a phrase and passphrase.
pub fn mnemonic_to_seed(phrase: &str, passphrase: &str) -> Result<[u8; 64], CryptoError> {
	Ok(parse_mnemonic(phrase)?.to_seed(passphrase))
}
