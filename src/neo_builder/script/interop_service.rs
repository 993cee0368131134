//! Interop services callable through `SYSCALL`.
//!
//! A syscall is identified on the wire by the first four bytes of a
//! SHA-256 over its ASCII name, written little-endian after the `SYSCALL`
//! opcode.

use strum_macros::{Display, EnumString};

use crate::neo_crypto::sha256;

/// The interop services this SDK emits calls to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum InteropService {
	/// Calls a method on a deployed contract.
	#[strum(serialize = "System.Contract.Call")]
	SystemContractCall,
	/// Verifies a single signature against a public key.
	#[strum(serialize = "System.Crypto.CheckSig")]
	SystemCryptoCheckSig,
	/// Verifies a threshold of signatures against a key set.
	#[strum(serialize = "System.Crypto.CheckMultisig")]
	SystemCryptoCheckMultisig,
	/// Tests whether a script hash witnessed the current transaction.
	#[strum(serialize = "System.Runtime.CheckWitness")]
	SystemRuntimeCheckWitness,
	/// Pushes the network magic.
	#[strum(serialize = "System.Runtime.GetNetwork")]
	SystemRuntimeGetNetwork,
	/// Advances an iterator.
	#[strum(serialize = "System.Iterator.Next")]
	SystemIteratorNext,
	/// Reads the current iterator element.
	#[strum(serialize = "System.Iterator.Value")]
	SystemIteratorValue,
}

impl InteropService {
	/// The service name as hashed on the wire.
	pub fn name(&self) -> String {
		self.to_string()
	}

	/// First four bytes of `SHA-256(name)`, in hash output order. Written
	/// after `SYSCALL` they read as the little-endian form of the u32
	/// service hash.
	pub fn hash(&self) -> [u8; 4] {
		interop_hash(&self.name())
	}
}

/// Computes the 4-byte syscall hash of an arbitrary service name.
pub fn interop_hash(name: &str) -> [u8; 4] {
	let digest = sha256(name.as_bytes());
	let mut out = [0u8; 4];
	out.copy_from_slice(&digest[..4]);
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_contract_call_hash() {
		// The trailing bytes of every invocation script on the network.
		assert_eq!(InteropService::SystemContractCall.hash(), [0x62, 0x7d, 0x5b, 0x52]);
	}

	#[test]
	fn test_check_sig_hash() {
		assert_eq!(InteropService::SystemCryptoCheckSig.hash(), [0x56, 0xe7, 0xb3, 0x27]);
	}

	#[test]
	fn test_hash_is_sha256_prefix() {
		for service in [
			InteropService::SystemContractCall,
			InteropService::SystemCryptoCheckSig,
			InteropService::SystemCryptoCheckMultisig,
			InteropService::SystemRuntimeCheckWitness,
		] {
			let digest = sha256(service.name().as_bytes());
			assert_eq!(service.hash(), digest[..4]);
		}
	}

	#[test]
	fn test_names() {
		assert_eq!(InteropService::SystemContractCall.name(), "System.Contract.Call");
		assert_eq!(
			InteropService::SystemCryptoCheckMultisig.name(),
			"System.Crypto.CheckMultisig"
		);
	}
}
