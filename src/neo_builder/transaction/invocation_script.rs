//! Invocation scripts.
//!
//! The invocation half of a witness pushes signatures onto the evaluation
//! stack, one `push_data` per signature in signer order.

use serde::{Deserialize, Serialize};

use crate::{
	neo_builder::script::ScriptBuilder,
	neo_codec::{CodecError, Decoder, Encoder, NeoSerializable, VarSizeTrait},
	neo_crypto::{CryptoError, KeyPair, Secp256r1Signature},
	neo_types::Bytes,
};

/// The signature-pushing half of a witness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationScript {
	script: Bytes,
}

impl InvocationScript {
	/// An empty invocation script.
	pub fn new() -> Self {
		Self { script: Vec::new() }
	}

	/// Wraps an already-built script.
	pub fn from_bytes(script: Bytes) -> Self {
		Self { script }
	}

	/// Builds the script pushing a single signature.
	pub fn from_signature(signature: &Secp256r1Signature) -> Self {
		Self { script: ScriptBuilder::build_invocation_script(&[signature.to_bytes()]) }
	}

	/// Builds the script pushing multiple signatures in the given order.
	pub fn from_signatures(signatures: &[Secp256r1Signature]) -> Self {
		let raw: Vec<[u8; 64]> = signatures.iter().map(Secp256r1Signature::to_bytes).collect();
		Self { script: ScriptBuilder::build_invocation_script(&raw) }
	}

	/// Signs `message_digest` with `key_pair` and wraps the signature.
	pub fn from_message_and_key_pair(
		message_digest: &[u8],
		key_pair: &KeyPair,
	) -> Result<Self, CryptoError> {
		let signature = key_pair.sign_prehash(message_digest)?;
		Ok(Self::from_signature(&signature))
	}

	/// The raw script bytes.
	pub fn script(&self) -> &Bytes {
		&self.script
	}

	/// Extracts the pushed signatures back out of the script.
	pub fn signatures(&self) -> Result<Vec<Secp256r1Signature>, CodecError> {
		let mut reader = Decoder::new(&self.script);
		let mut signatures = Vec::new();
		while reader.available() > 0 {
			// A 64-byte push inside the bare-length range.
			let len = reader.read_u8()? as usize;
			let bytes = reader.read_bytes(len)?;
			let signature = Secp256r1Signature::from_bytes(&bytes).map_err(|_| {
				CodecError::InvalidEncoding("invocation script holds a malformed signature".to_string())
			})?;
			signatures.push(signature);
		}
		Ok(signatures)
	}
}

impl NeoSerializable for InvocationScript {
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
