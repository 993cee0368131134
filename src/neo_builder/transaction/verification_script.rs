//! Verification scripts.
//!
//! The verification half of a witness pushes the expected public key(s)
//! and ends in a `CheckSig` or `CheckMultisig` syscall. Its script hash is
//! the on-chain identity of the account it guards.

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::{
	neo_builder::{
		error::BuilderError,
		script::{InteropService, ScriptBuilder},
	},
	neo_codec::{CodecError, Decoder, Encoder, NeoSerializable, OpCode, VarSizeTrait},
	neo_crypto::Secp256r1PublicKey,
	neo_types::{Bytes, ScriptHash, ScriptHashExtension},
};

/// The key-checking half of a witness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerificationScript {
	script: Bytes,
}

impl VerificationScript {
	/// An empty verification script.
	pub fn new() -> Self {
		Self { script: Vec::new() }
	}

	/// Wraps an already-built script.
	pub fn from_bytes(script: Bytes) -> Self {
		Self { script }
	}

	/// Builds the canonical single-sig script for a public key.
	pub fn from_public_key(public_key: &Secp256r1PublicKey) -> Self {
		Self { script: ScriptBuilder::build_verification_script(public_key) }
	}

	/// Builds the sorted multi-sig script for a key set and threshold.
	pub fn from_multi_sig(
		public_keys: &[Secp256r1PublicKey],
		threshold: usize,
	) -> Result<Self, BuilderError> {
		Ok(Self { script: ScriptBuilder::build_multi_sig_script(public_keys, threshold)? })
	}

	/// The raw script bytes.
	pub fn script(&self) -> &Bytes {
		&self.script
	}

	/// Whether the script is empty.
	pub fn is_empty(&self) -> bool {
		self.script.is_empty()
	}

	/// The script hash, the account identity this script guards.
	pub fn hash(&self) -> ScriptHash {
		ScriptHash::from_script(&self.script)
	}

	/// Whether this is a canonical single-sig script.
	pub fn is_single_sig(&self) -> bool {
		self.script.len() == 39
			&& self.script[0] == 0x21
			&& self.script[34] == OpCode::Syscall.opcode()
			&& self.script[35..] == InteropService::SystemCryptoCheckSig.hash()
	}

	/// Whether this is a multi-sig script built by this SDK.
	pub fn is_multi_sig(&self) -> bool {
		self.script.len() > 5
			&& self.script[self.script.len() - 5] == OpCode::Syscall.opcode()
			&& self.script[self.script.len() - 4..]
				== InteropService::SystemCryptoCheckMultisig.hash()
	}

	/// The signing threshold of a multi-sig script.
	pub fn get_signing_threshold(&self) -> Result<usize, CodecError> {
		if !self.is_multi_sig() {
			return Err(CodecError::InvalidEncoding(
				"not a multi-sig verification script".to_string(),
			));
		}
		let mut reader = Decoder::new(&self.script);
		big_int_to_usize(&reader.read_push_int()?)
	}

	/// The number of accounts participating in this script: 1 for
	/// single-sig, the key count for multi-sig.
	pub fn get_nr_of_accounts(&self) -> Result<usize, CodecError> {
		Ok(self.get_public_keys()?.len())
	}

	/// Extracts the public keys pushed by this script, in script order.
	pub fn get_public_keys(&self) -> Result<Vec<Secp256r1PublicKey>, CodecError> {
		let parse_key = |bytes: &[u8]| {
			Secp256r1PublicKey::from_bytes(bytes).map_err(|_| {
				CodecError::InvalidEncoding(
					"verification script holds a malformed public key".to_string(),
				)
			})
		};

		if self.is_single_sig() {
			return Ok(vec![parse_key(&self.script[1..34])?]);
		}
		if !self.is_multi_sig() {
			return Err(CodecError::InvalidEncoding(
				"not a canonical verification script".to_string(),
			));
		}

		let mut reader = Decoder::new(&self.script);
		let threshold = big_int_to_usize(&reader.read_push_int()?)?;
		let mut keys = Vec::new();
		loop {
			let first = reader.read_u8()?;
			if first == 0x21 {
				keys.push(parse_key(&reader.read_bytes(33)?)?);
				continue;
			}
			// The byte after the keys is the key-count push.
			break;
		}
		if keys.len() < threshold {
			return Err(CodecError::InvalidEncoding(
				"multi-sig script holds fewer keys than its threshold".to_string(),
			));
		}
		Ok(keys)
	}
}

fn big_int_to_usize(value: &BigInt) -> Result<usize, CodecError> {
	value
		.to_usize()
		.ok_or_else(|| CodecError::InvalidEncoding("unexpected negative count".to_string()))
}

impl NeoSerializable for VerificationScript {
	type Error = CodecError;

	fn size(&self) -> usize {
		self.script.var_size()
	}

	fn encode(&self, writer: &mut Encoder) {
		writer.write_var_bytes(&self.script);
	}

	fn decode(reader: &mut Decoder<'_>) -> Result<Self, Self::Error> {
		Ok(Self { script: reader.read_var_bytes()? })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn key(n: u8) -> Secp256r1PublicKey {
		crate::neo_crypto::KeyPair::from_private_key(&[n; 32]).unwrap().public_key()
	}

	#[test]
	fn test_single_sig_recognition() {
		let script = VerificationScript::from_public_key(&key(1));
		assert!(script.is_single_sig());
		assert!(!script.is_multi_sig());
		assert_eq!(script.get_public_keys().unwrap(), vec![key(1)]);
		assert_eq!(script.get_nr_of_accounts().unwrap(), 1);
	}

	#[test]
	fn test_multi_sig_recognition() {
		let keys = vec![key(1), key(2), key(3)];
		let script = VerificationScript::from_multi_sig(&keys, 2).unwrap();
		assert!(script.is_multi_sig());
		assert!(!script.is_single_sig());
		assert_eq!(script.get_signing_threshold().unwrap(), 2);
		assert_eq!(script.get_nr_of_accounts().unwrap(), 3);

		let mut sorted = keys;
		sorted.sort();
		assert_eq!(script.get_public_keys().unwrap(), sorted);
	}

	#[test]
	fn test_hash_matches_script_hash_helper() {
		let script = VerificationScript::from_public_key(&key(7));
		assert_eq!(script.hash(), ScriptHash::from_script(script.script()));
	}

	#[test]
	fn test_wire_round_trip() {
		let script = VerificationScript::from_public_key(&key(5));
		let bytes = script.to_array();
		assert_eq!(bytes.len(), script.size());
		let decoded = VerificationScript::decode(&mut Decoder::new(&bytes)).unwrap();
		assert_eq!(decoded, script);
	}

	#[test]
	fn test_threshold_on_single_sig_is_an_error() {
		let script = VerificationScript::from_public_key(&key(1));
		assert!(script.get_signing_threshold().is_err());
	}
}
