//! secp256r1 key and signature types.
//!
//! Neo N3 signs everything with ECDSA over NIST P-256. The types here wrap
//! the `p256` backend and pin down the encodings the chain cares about: a
//! 33-byte compressed point for public keys, a 32-byte scalar for private
//! keys, and a 64-byte compact `R || S` signature whose `S` is always in the
//! lower half of the group order. DER import/export is provided for interop
//! with other tooling, but the compact form is what goes on the wire.

use core::fmt;
use std::{
	cmp::Ordering,
	hash::{Hash, Hasher},
};

use p256::{
	ecdsa::{Signature, SigningKey, VerifyingKey},
	elliptic_curve::{
		scalar::IsHigh,
		sec1::{FromEncodedPoint, ToEncodedPoint},
	},
	EncodedPoint, FieldBytes, PublicKey, SecretKey,
};
use rand_core::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use signature::hazmat::{PrehashSigner, PrehashVerifier};

use crate::neo_crypto::error::CryptoError;

/// A point on secp256r1, the public half of a key pair.
#[derive(Debug, Clone)]
pub struct Secp256r1PublicKey {
	inner: PublicKey,
}

/// A scalar in `[1, n-1]`, the private half of a key pair.
///
/// The backend `SecretKey` wipes its bytes on drop; callers that copy the
/// raw scalar out are responsible for the copy.
#[derive(Clone)]
pub struct Secp256r1PrivateKey {
	inner: SecretKey,
}

/// A canonical (low-S) ECDSA signature in 64-byte compact form.
#[derive(Clone)]
pub struct Secp256r1Signature {
	inner: Signature,
}

impl fmt::Debug for Secp256r1PrivateKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		// Never print key material.
		write!(f, "Secp256r1PrivateKey")
	}
}

impl fmt::Debug for Secp256r1Signature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Secp256r1Signature({})", hex::encode(self.to_bytes()))
	}
}

impl Secp256r1PublicKey {
	/// Parses a public key from a SEC1-encoded point, either 33-byte
	/// compressed or 65-byte uncompressed.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
		let encoded_point =
			EncodedPoint::from_bytes(bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
		let public_key = Option::<PublicKey>::from(PublicKey::from_encoded_point(&encoded_point))
			.ok_or(CryptoError::InvalidPublicKey)?;
		Ok(Self { inner: public_key })
	}

	/// Parses a public key from a hex string, tolerating an `0x` prefix.
	pub fn from_encoded(encoded: &str) -> Option<Self> {
		let encoded = encoded.trim_start_matches("0x");
		let bytes = hex::decode(encoded).ok()?;
		Self::from_bytes(&bytes).ok()
	}

	/// Wraps an existing backend key.
	pub fn from_public_key(public_key: PublicKey) -> Self {
		Self { inner: public_key }
	}

	/// SEC1 encoding of the point; `compressed` selects the 33-byte form.
	pub fn get_encoded(&self, compressed: bool) -> Vec<u8> {
		self.inner.to_encoded_point(compressed).as_bytes().to_vec()
	}

	/// Compressed encoding as lower-case hex without a prefix.
	pub fn get_encoded_compressed_hex(&self) -> String {
		hex::encode(self.get_encoded(true))
	}

	/// Verifies a canonical signature over a 32-byte digest.
	///
	/// Signatures with `S` above `n/2` are rejected before the curve math
	/// runs, so a malleated twin of a valid signature does not verify.
	pub fn verify_prehash(
		&self,
		digest: &[u8],
		signature: &Secp256r1Signature,
	) -> Result<(), CryptoError> {
		if !signature.is_canonical() {
			return Err(CryptoError::SignatureVerificationError);
		}
		VerifyingKey::from(&self.inner)
			.verify_prehash(digest, &signature.inner)
			.map_err(|_| CryptoError::SignatureVerificationError)
	}
}

impl Secp256r1PrivateKey {
	/// Draws a fresh key from the operating system CSPRNG. Rejection
	/// sampling inside the backend guarantees the scalar lands in
	/// `[1, n-1]`.
	pub fn random(rng: &mut OsRng) -> Self {
		Self { inner: SecretKey::random(rng) }
	}

	/// Imports a key from its 32-byte big-endian scalar. Zero and values at
	/// or above the group order are rejected.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
		if bytes.len() != 32 {
			return Err(CryptoError::InvalidPrivateKey);
		}
		SecretKey::from_slice(bytes)
			.map(|inner| Self { inner })
			.map_err(|_| CryptoError::InvalidPrivateKey)
	}

	/// The raw 32-byte scalar.
	pub fn to_raw_bytes(&self) -> [u8; 32] {
		let mut out = [0u8; 32];
		out.copy_from_slice(self.inner.to_bytes().as_slice());
		out
	}

	/// Derives the matching public key.
	pub fn to_public_key(&self) -> Secp256r1PublicKey {
		Secp256r1PublicKey::from_public_key(self.inner.public_key())
	}

	/// Signs a 32-byte digest, returning a canonical low-S signature.
	pub fn sign_prehash(&self, digest: &[u8]) -> Result<Secp256r1Signature, CryptoError> {
		let signing_key = SigningKey::from(&self.inner);
		let signature: Signature =
			signing_key.sign_prehash(digest).map_err(|_| CryptoError::SigningError)?;
		Ok(Secp256r1Signature { inner: signature.normalize_s().unwrap_or(signature) })
	}
}

impl Secp256r1Signature {
	/// Builds a signature from its `r` and `s` scalars.
	pub fn from_scalars(r: [u8; 32], s: [u8; 32]) -> Option<Self> {
		let r: FieldBytes = r.into();
		let s: FieldBytes = s.into();
		Signature::from_scalars(r, s).ok().map(|inner| Self { inner })
	}

	/// Parses the 64-byte compact `R || S` form.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
		if bytes.len() != 64 {
			return Err(CryptoError::InvalidFormat("signature must be 64 bytes".to_string()));
		}
		Signature::from_slice(bytes)
			.map(|inner| Self { inner })
			.map_err(|_| CryptoError::InvalidFormat("invalid signature scalars".to_string()))
	}

	/// Parses an ASN.1 DER signature into compact form.
	pub fn from_der(der: &[u8]) -> Result<Self, CryptoError> {
		Signature::from_der(der)
			.map(|inner| Self { inner })
			.map_err(|_| CryptoError::InvalidFormat("invalid DER signature".to_string()))
	}

	/// ASN.1 DER encoding of the signature.
	pub fn to_der(&self) -> Vec<u8> {
		self.inner.to_der().as_bytes().to_vec()
	}

	/// The 64-byte compact `R || S` form.
	pub fn to_bytes(&self) -> [u8; 64] {
		let mut bytes = [0u8; 64];
		bytes.copy_from_slice(&self.inner.to_bytes());
		bytes
	}

	/// Whether `S` lies in the lower half of the group order.
	pub fn is_canonical(&self) -> bool {
		!bool::from(self.inner.s().is_high())
	}

	/// Returns the signature with `S` folded into the lower half of the
	/// group order, leaving canonical signatures untouched.
	pub fn make_canonical(&self) -> Self {
		match self.inner.normalize_s() {
			Some(normalized) => Self { inner: normalized },
			None => self.clone(),
		}
	}
}

impl fmt::Display for Secp256r1PublicKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.get_encoded_compressed_hex())
	}
}

impl Serialize for Secp256r1PublicKey {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.get_encoded_compressed_hex())
	}
}

impl<'de> Deserialize<'de> for Secp256r1PublicKey {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let hex_str = String::deserialize(deserializer)?;
		Secp256r1PublicKey::from_encoded(&hex_str)
			.ok_or_else(|| serde::de::Error::custom("invalid public key"))
	}
}

impl PartialEq for Secp256r1PublicKey {
	fn eq(&self, other: &Self) -> bool {
		self.get_encoded(true) == other.get_encoded(true)
	}
}

impl Eq for Secp256r1PublicKey {}

impl PartialOrd for Secp256r1PublicKey {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Secp256r1PublicKey {
	/// Keys order by their compressed encoding; multi-sig scripts depend on
	/// this to be deterministic.
	fn cmp(&self, other: &Self) -> Ordering {
		self.get_encoded(true).cmp(&other.get_encoded(true))
	}
}

impl Hash for Secp256r1PublicKey {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.get_encoded(true).hash(state);
	}
}

impl PartialEq for Secp256r1PrivateKey {
	fn eq(&self, other: &Self) -> bool {
		self.to_raw_bytes() == other.to_raw_bytes()
	}
}

impl Eq for Secp256r1PrivateKey {}

impl PartialEq for Secp256r1Signature {
	fn eq(&self, other: &Self) -> bool {
		self.to_bytes() == other.to_bytes()
	}
}

impl Eq for Secp256r1Signature {}
