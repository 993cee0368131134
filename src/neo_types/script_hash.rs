//! Script hashes and the address codec.
//!
//! A script hash is `RIPEMD-160(SHA-256(script))`. The hash function yields
//! the bytes in the order the wire format uses (little-endian); user-facing
//! hex strings show the reverse (big-endian). `H160` here stores the
//! big-endian view, matching its `Display`; every conversion below names the
//! endianness it works in.
//!
//! An address is `Base58Check(0x35 || little-endian script hash)` and always
//! comes out 34 characters starting with `N`.

use primitive_types::H160;

use crate::{
	neo_codec::{CodecError, Decoder, Encoder, NeoSerializable},
	neo_config::NeoConstants,
	neo_crypto::{base58check_decode, base58check_encode, sha256_ripemd160},
	neo_types::{address::Address, error::TypeError},
};

/// Identifier of an account or contract on-chain: a 20-byte hash stored
/// big-endian (display order).
pub type ScriptHash = H160;

/// Conversions between a script hash and its wire, hex and address forms.
pub trait ScriptHashExtension: Sized {
	/// Parses big-endian hex, with or without an `0x` prefix.
	fn from_hex(hex_str: &str) -> Result<Self, TypeError>;

	/// Builds from the little-endian (wire) byte order.
	fn from_le_bytes(bytes: &[u8]) -> Result<Self, TypeError>;

	/// The little-endian (wire) byte order.
	fn to_le_vec(&self) -> Vec<u8>;

	/// Big-endian hex without a prefix.
	fn to_hex_be(&self) -> String;

	/// Hashes a verification script into its script hash.
	fn from_script(script: &[u8]) -> Self;

	/// Script hash of the canonical single-sig verification script for a
	/// SEC1-encoded public key.
	fn from_public_key(public_key: &[u8]) -> Result<Self, TypeError>;

	/// Encodes as a Neo address.
	fn to_address(&self) -> Address;

	/// Decodes a Neo address, checking version byte and checksum.
	fn from_address(address: &str) -> Result<Self, TypeError>;
}

impl ScriptHashExtension for H160 {
	fn from_hex(hex_str: &str) -> Result<Self, TypeError> {
		let hex_str = hex_str.trim_start_matches("0x");
		let bytes = hex::decode(hex_str)
			.map_err(|_| TypeError::InvalidFormat("invalid hex in script hash".to_string()))?;
		if bytes.len() != NeoConstants::HASH160_SIZE as usize {
			return Err(TypeError::InvalidFormat("script hash must be 20 bytes".to_string()));
		}
		Ok(H160::from_slice(&bytes))
	}

	fn from_le_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
		if bytes.len() != NeoConstants::HASH160_SIZE as usize {
			return Err(TypeError::InvalidFormat("script hash must be 20 bytes".to_string()));
		}
		let mut reversed = bytes.to_vec();
		reversed.reverse();
		Ok(H160::from_slice(&reversed))
	}

	fn to_le_vec(&self) -> Vec<u8> {
		let mut bytes = self.as_bytes().to_vec();
		bytes.reverse();
		bytes
	}

	fn to_hex_be(&self) -> String {
		hex::encode(self.as_bytes())
	}

	fn from_script(script: &[u8]) -> Self {
		let mut hash = sha256_ripemd160(script);
		hash.reverse();
		H160::from_slice(&hash)
	}

	fn from_public_key(public_key: &[u8]) -> Result<Self, TypeError> {
		use crate::neo_builder::ScriptBuilder;
		use crate::neo_crypto::Secp256r1PublicKey;

		let key = Secp256r1PublicKey::from_bytes(public_key)
			.map_err(|_| TypeError::InvalidFormat("invalid public key".to_string()))?;
		Ok(Self::from_script(&ScriptBuilder::build_verification_script(&key)))
	}

	fn to_address(&self) -> Address {
		let mut data = Vec::with_capacity(21);
		data.push(NeoConstants::ADDRESS_VERSION);
		data.extend_from_slice(&self.to_le_vec());
		base58check_encode(&data)
	}

	fn from_address(address: &str) -> Result<Self, TypeError> {
		let data = base58check_decode(address)
			.map_err(|e| TypeError::InvalidFormat(e.to_string()))?;
		if data.len() != 21 {
			return Err(TypeError::InvalidFormat("address payload must be 21 bytes".to_string()));
		}
		if data[0] != NeoConstants::ADDRESS_VERSION {
			return Err(TypeError::InvalidFormat(format!(
				"unexpected address version 0x{:02x}",
				data[0]
			)));
		}
		Self::from_le_bytes(&data[1..])
	}
}

impl NeoSerializable for H160 {
	type Error = CodecError;

	fn size(&self) -> usize {
		NeoConstants::HASH160_SIZE as usize
	}

	fn encode(&self, writer: &mut Encoder) {
		writer.write_bytes(&self.to_le_vec());
	}

	fn decode(reader: &mut Decoder<'_>) -> Result<Self, Self::Error> {
		let bytes = reader.read_bytes(NeoConstants::HASH160_SIZE as usize)?;
		H160::from_le_bytes(&bytes)
			.map_err(|_| CodecError::InvalidEncoding("invalid script hash".to_string()))
	}
}
