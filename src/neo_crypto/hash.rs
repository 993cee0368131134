//! Hashing primitives used across the SDK.
//!
//! Everything Neo hashes is built from SHA-256 and RIPEMD-160: transaction
//! ids are double SHA-256, script hashes are RIPEMD-160 over SHA-256, and
//! BIP-32/BIP-39 lean on the HMAC variants. The free functions are the
//! primary surface; `HashableForVec` mirrors them as methods for call sites
//! that read better with postfix hashing.

use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};
use subtle::ConstantTimeEq;

/// SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
	let mut hasher = Sha256::new();
	hasher.update(data);
	hasher.finalize().into()
}

/// Double SHA-256 of `data`, the hash used for transaction ids and
/// Base58Check checksums.
pub fn hash256(data: &[u8]) -> [u8; 32] {
	sha256(&sha256(data))
}

/// RIPEMD-160 of `data`.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
	let mut hasher = Ripemd160::new();
	hasher.update(data);
	hasher.finalize().into()
}

/// RIPEMD-160 over SHA-256, the script-hash function.
pub fn sha256_ripemd160(data: &[u8]) -> [u8; 20] {
	ripemd160(&sha256(data))
}

/// HMAC-SHA-256 of `data` under `key`.
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
	let mut mac =
		Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts keys of any length");
	mac.update(data);
	mac.finalize().into_bytes().into()
}

/// HMAC-SHA-512 of `data` under `key`.
pub fn hmac_sha512(key: &[u8], data: &[u8]) -> [u8; 64] {
	let mut mac =
		Hmac::<Sha512>::new_from_slice(key).expect("HMAC accepts keys of any length");
	mac.update(data);
	mac.finalize().into_bytes().into()
}

/// Compares two byte slices without short-circuiting on the first
/// difference. Slices of unequal length compare unequal without inspecting
/// their contents.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
	if a.len() != b.len() {
		return false;
	}
	a.ct_eq(b).into()
}

/// Postfix hashing over byte slices and vectors.
pub trait HashableForVec {
	/// SHA-256.
	fn sha256(&self) -> Vec<u8>;
	/// Double SHA-256.
	fn hash256(&self) -> Vec<u8>;
	/// RIPEMD-160.
	fn ripemd160(&self) -> Vec<u8>;
	/// RIPEMD-160 over SHA-256.
	fn sha256_ripemd160(&self) -> Vec<u8>;
	/// HMAC-SHA-512 keyed with `key`.
	fn hmac_sha512(&self, key: &[u8]) -> Vec<u8>;
}

impl HashableForVec for [u8] {
	fn sha256(&self) -> Vec<u8> {
		sha256(self).to_vec()
	}

	fn hash256(&self) -> Vec<u8> {
		hash256(self).to_vec()
	}

	fn ripemd160(&self) -> Vec<u8> {
		ripemd160(self).to_vec()
	}

	fn sha256_ripemd160(&self) -> Vec<u8> {
		sha256_ripemd160(self).to_vec()
	}

	fn hmac_sha512(&self, key: &[u8]) -> Vec<u8> {
		hmac_sha512(key, self).to_vec()
	}
}

impl HashableForVec for Vec<u8> {
	fn sha256(&self) -> Vec<u8> {
		self.as_slice().sha256()
	}

	fn hash256(&self) -> Vec<u8> {
		self.as_slice().hash256()
	}

	fn ripemd160(&self) -> Vec<u8> {
		self.as_slice().ripemd160()
	}

	fn sha256_ripemd160(&self) -> Vec<u8> {
		self.as_slice().sha256_ripemd160()
	}

	fn hmac_sha512(&self, key: &[u8]) -> Vec<u8> {
		self.as_slice().hmac_sha512(key)
	}
}
