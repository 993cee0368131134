//! Wallet Import Format encoding of private keys.
//!
//! A WIF string is `Base58Check(0x80 || key || 0x01)`: 34 bytes inside the
//! checksum envelope, 52 characters outside it. The trailing `0x01` marks
//! the key as belonging to a compressed public key, the only form Neo uses.

use crate::{
	neo_config::NeoConstants,
	neo_crypto::{
		base58_helper::{base58check_decode, base58check_encode},
		error::CryptoError,
		keys::Secp256r1PrivateKey,
	},
};

/// Exports a private key as a WIF string.
pub fn wif_from_private_key(private_key: &Secp256r1PrivateKey) -> String {
	let mut data = Vec::with_capacity(34);
	data.push(NeoConstants::WIF_VERSION);
	data.extend_from_slice(&private_key.to_raw_bytes());
	data.push(NeoConstants::WIF_COMPRESSED_FLAG);
	base58check_encode(&data)
}

/// Imports a private key from a WIF string.
///
/// Rejects anything whose decoded form is not exactly 34 bytes framed by the
/// `0x80` version byte and the `0x01` compression flag.
pub fn private_key_from_wif(wif: &str) -> Result<Secp256r1PrivateKey, CryptoError> {
	let decoded = base58check_decode(wif)?;
	if decoded.len() != 34
		|| decoded[0] != NeoConstants::WIF_VERSION
		|| decoded[33] != NeoConstants::WIF_COMPRESSED_FLAG
	{
		return Err(CryptoError::InvalidFormat("incorrect WIF format".to_string()));
	}
	Secp256r1PrivateKey::from_bytes(&decoded[1..33])
}

/// Whether `wif` decodes to a well-formed WIF envelope.
pub fn is_valid_wif(wif: &str) -> bool {
	private_key_from_wif(wif).is_ok()
}
