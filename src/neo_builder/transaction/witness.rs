//! Witnesses.
//!
//! A witness pairs an invocation script (the signatures) with the
//! verification script they satisfy. Finalized transactions carry one
//! witness per signer, in signer order.

use serde::{Deserialize, Serialize};

use crate::{
	neo_builder::{
		error::BuilderError,
		transaction::{
			invocation_script::InvocationScript, verification_script::VerificationScript,
		},
	},
	neo_codec::{CodecError, Decoder, Encoder, NeoSerializable},
	neo_crypto::{KeyPair, Secp256r1Signature},
	neo_types::{Bytes, ScriptHash},
};

/// An (invocation, verification) script pair authorizing one signer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Witness {
	/// Pushes the signatures.
	pub invocation: InvocationScript,
	/// Checks them against the expected key(s).
	pub verification: VerificationScript,
}

impl Witness {
	/// An empty witness.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a witness from raw script bytes.
	pub fn from_scripts(invocation_script: Bytes, verification_script: Bytes) -> Self {
		Self {
			invocation: InvocationScript::from_bytes(invocation_script),
			verification: VerificationScript::from_bytes(verification_script),
		}
	}

	/// Signs `message_digest` with `key_pair` and builds the default
	/// single-sig witness for it.
	pub fn create(message_digest: &[u8], key_pair: &KeyPair) -> Result<Self, BuilderError> {
		Ok(Self {
			invocation: InvocationScript::from_message_and_key_pair(message_digest, key_pair)?,
			verification: VerificationScript::from_public_key(&key_pair.public_key()),
		})
	}

	/// Builds a multi-sig witness from collected signatures and the
	/// account's verification script.
	pub fn create_multi_sig_witness(
		signatures: Vec<Secp256r1Signature>,
		verification_script: VerificationScript,
	) -> Result<Self, BuilderError> {
		let threshold = verification_script.get_signing_threshold().map_err(|e| {
			BuilderError::IllegalArgument(format!("invalid multi-sig verification script: {e}"))
		})?;
		if signatures.len() < threshold {
			return Err(BuilderError::IllegalArgument(
				"not enough signatures for the multi-sig threshold".to_string(),
			));
		}
		Ok(Self {
			invocation: InvocationScript::from_signatures(&signatures[..threshold]),
			verification: verification_script,
		})
	}

	/// Script hash of the verification script; must equal the hash of the
	/// signer the witness answers for.
	pub fn script_hash(&self) -> ScriptHash {
		self.verification.hash()
	}
}

impl NeoSerializable for Witness {
	type Error = CodecError;

	fn size(&self) -> usize {
		self.invocation.size() + self.verification.size()
	}

	fn encode(&self, writer: &mut Encoder) {
		self.invocation.encode(writer);
		self.verification.encode(writer);
	}

	fn decode(reader: &mut Decoder<'_>) -> Result<Self, Self::Error> {
		Ok(Self {
			invocation: InvocationScript::decode(reader)?,
			verification: VerificationScript::decode(reader)?,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::neo_crypto::hash256;

	#[test]
	fn test_create_single_sig_witness() {
		let key_pair = KeyPair::from_private_key(&[0x21; 32]).unwrap();
		let digest = hash256(b"a transaction");
		let witness = Witness::create(&digest, &key_pair).unwrap();

		assert_eq!(witness.script_hash(), key_pair.get_script_hash());
		let signatures = witness.invocation.signatures().unwrap();
		assert_eq!(signatures.len(), 1);
		assert!(key_pair.public_key().verify_prehash(&digest, &signatures[0]).is_ok());
	}

	#[test]
	fn test_create_multi_sig_witness() {
		let pairs: Vec<KeyPair> =
			(1u8..=3).map(|n| KeyPair::from_private_key(&[n; 32]).unwrap()).collect();
		let keys: Vec<_> = pairs.iter().map(KeyPair::public_key).collect();
		let script = VerificationScript::from_multi_sig(&keys, 2).unwrap();

		let digest = hash256(b"a transaction");
		let signatures: Vec<_> =
			pairs.iter().map(|pair| pair.sign_prehash(&digest).unwrap()).collect();

		let witness =
			Witness::create_multi_sig_witness(signatures.clone(), script.clone()).unwrap();
		assert_eq!(witness.script_hash(), script.hash());
		// Only the threshold count of signatures is pushed.
		assert_eq!(witness.invocation.signatures().unwrap().len(), 2);

		assert!(Witness::create_multi_sig_witness(signatures[..1].to_vec(), script).is_err());
	}

	#[test]
	fn test_wire_round_trip() {
		let key_pair = KeyPair::from_private_key(&[0x21; 32]).unwrap();
		let witness = Witness::create(&hash256(b"tx"), &key_pair).unwrap();

		let bytes = witness.to_array();
		assert_eq!(bytes.len(), witness.size());
		let decoded = Witness::decode(&mut Decoder::new(&bytes)).unwrap();
		assert_eq!(decoded, witness);
	}
}
