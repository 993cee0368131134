//! Error types for the cryptographic modules.

use thiserror::Error;

/// Errors surfaced by key handling, signing and encoding primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
	/// A public key could not be parsed or does not lie on the curve.
	#[error("invalid public key")]
	InvalidPublicKey,

	/// A private key is out of range or has the wrong length.
	#[error("invalid private key")]
	InvalidPrivateKey,

	/// A byte string did not match the expected framing.
	#[error("invalid format: {0}")]
	InvalidFormat(String),

	/// A signature did not verify against the given key and digest.
	#[error("signature verification failed")]
	SignatureVerificationError,

	/// The signing backend failed to produce a signature.
	#[error("signing failed")]
	SigningError,

	/// The platform RNG failed to provide entropy.
	#[error("random number generator failure")]
	RngError,

	/// A key-derivation parameter is outside the accepted bounds.
	#[error("invalid key derivation parameters: {0}")]
	InvalidParams(String),
}

/// Errors surfaced by the NEP-2 envelope.
///
/// Decryption failures deliberately collapse into [`Nep2Error::InvalidPassphrase`]
/// so a caller probing ciphertexts cannot tell a wrong password from a
/// corrupted envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Nep2Error {
	/// The envelope is not 58 characters of valid Base58Check with the
	/// expected prefix bytes.
	#[error("invalid NEP-2 format: {0}")]
	InvalidFormat(String),

	/// Wrong password, or an envelope whose salt does not match the
	/// recovered key.
	#[error("invalid password or format")]
	InvalidPassphrase,

	/// The scrypt parameters are rejected before any work is done.
	#[error("invalid scrypt parameters: {0}")]
	InvalidParams(String),
}

impl From<CryptoError> for Nep2Error {
	fn from(_: CryptoError) -> Self {
		Nep2Error::InvalidPassphrase
	}
}
