//! Transaction and block hashes.
//!
//! Same dual-endianness contract as script hashes: `H256` stores the
//! big-endian (display) order, the wire uses the reverse. The transaction id
//! users see is the big-endian hex with an `0x` prefix.

use primitive_types::H256;

use crate::{
	neo_codec::{CodecError, Decoder, Encoder, NeoSerializable},
	neo_config::NeoConstants,
	neo_types::error::TypeError,
};

/// A 32-byte transaction or block hash stored big-endian (display order).
pub type TxHash = H256;

/// Conversions between a 256-bit hash and its wire and hex forms.
pub trait TxHashExtension: Sized {
	/// Parses big-endian hex, with or without an `0x` prefix.
	fn from_hex(hex_str: &str) -> Result<Self, TypeError>;

	/// Builds from the little-endian (wire) byte order.
	fn from_le_bytes(bytes: &[u8]) -> Result<Self, TypeError>;

	/// The little-endian (wire) byte order.
	fn to_le_vec(&self) -> Vec<u8>;

	/// Big-endian hex with the `0x` prefix users expect on transaction ids.
	fn to_prefixed_hex(&self) -> String;
}

impl TxHashExtension for H256 {
	fn from_hex(hex_str: &str) -> Result<Self, TypeError> {
		let hex_str = hex_str.trim_start_matches("0x");
		let bytes = hex::decode(hex_str)
			.map_err(|_| TypeError::InvalidFormat("invalid hex in hash".to_string()))?;
		if bytes.len() != NeoConstants::HASH256_SIZE as usize {
			return Err(TypeError::InvalidFormat("hash must be 32 bytes".to_string()));
		}
		Ok(H256::from_slice(&bytes))
	}

	fn from_le_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
		if bytes.len() != NeoConstants::HASH256_SIZE as usize {
			return Err(TypeError::InvalidFormat("hash must be 32 bytes".to_string()));
		}
		let mut reversed = bytes.to_vec();
		reversed.reverse();
		Ok(H256::from_slice(&reversed))
	}

	fn to_le_vec(&self) -> Vec<u8> {
		let mut bytes = self.as_bytes().to_vec();
		bytes.reverse();
		bytes
	}

	fn to_prefixed_hex(&self) -> String {
		format!("0x{}", hex::encode(self.as_bytes()))
	}
}

impl NeoSerializable for H256 {
	type Error = CodecError;

	fn size(&self) -> usize {
		NeoConstants::HASH256_SIZE as usize
	}

	fn encode(&self, writer: &mut Encoder) {
		writer.write_bytes(&self.to_le_vec());
	}

	fn decode(reader: &mut Decoder<'_>) -> Result<Self, Self::Error> {
		let bytes = reader.read_bytes(NeoConstants::HASH256_SIZE as usize)?;
		H256::from_le_bytes(&bytes)
			.map_err(|_| CodecError::InvalidEncoding("invalid 256-bit hash".to_string()))
	}
}
