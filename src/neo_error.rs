//! The unified error surface.
//!
//! Module-level errors stay precise inside the crate; at the API boundary
//! they all convert into [`NeoError`], whose variants are the error kinds a
//! caller can meaningfully branch on. Messages never carry key material,
//! passwords or ciphertext.

use thiserror::Error;

use crate::{
	neo_builder::{BuilderError, TransactionError},
	neo_codec::CodecError,
	neo_crypto::{CryptoError, Nep2Error},
	neo_protocol::ProtocolError,
	neo_types::TypeError,
	neo_wallets::WalletError,
};

/// Top-level error kind of every fallible operation in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NeoError {
	/// A well-formed value outside its documented domain: wrong length,
	/// out-of-range index, malformed path, illegal scope combination.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// Bad framing or checksum in hex, Base58, Base58Check, WIF or NEP-2.
	#[error("invalid format: {0}")]
	InvalidFormat(String),

	/// A cryptographic operation failed: RNG, key range, verification,
	/// canonicalization or a KDF/cipher backend.
	#[error("crypto: {0}")]
	Crypto(String),

	/// NEP-2 decryption failed. Deliberately indistinguishable from a
	/// format failure at this boundary.
	#[error("invalid password or format")]
	AuthenticationFailure,

	/// Reading past the end, an unknown tag or a non-canonical encoding.
	#[error("deserialization: {0}")]
	DeserializationError(String),

	/// Transaction or script assembly rejected the configuration.
	#[error("builder: {0}")]
	BuilderError(String),

	/// The operation is not supported in this configuration.
	#[error("unsupported operation: {0}")]
	UnsupportedOperation(String),
}

impl From<CryptoError> for NeoError {
	fn from(err: CryptoError) -> Self {
		match err {
			CryptoError::InvalidFormat(msg) => NeoError::InvalidFormat(msg),
			CryptoError::InvalidParams(msg) => NeoError::InvalidArgument(msg),
			other => NeoError::Crypto(other.to_string()),
		}
	}
}

impl From<Nep2Error> for NeoError {
	fn from(err: Nep2Error) -> Self {
		match err {
			Nep2Error::InvalidParams(msg) => NeoError::InvalidArgument(msg),
			// Format and passphrase failures collapse to one kind so the
			// boundary does not leak which check failed.
			Nep2Error::InvalidFormat(_) | Nep2Error::InvalidPassphrase =>
				NeoError::AuthenticationFailure,
		}
	}
}

impl From<CodecError> for NeoError {
	fn from(err: CodecError) -> Self {
		NeoError::DeserializationError(err.to_string())
	}
}

impl From<TypeError> for NeoError {
	fn from(err: TypeError) -> Self {
		match err {
			TypeError::InvalidFormat(msg) => NeoError::InvalidFormat(msg),
			TypeError::InvalidArgument(msg) => NeoError::InvalidArgument(msg),
		}
	}
}

impl From<BuilderError> for NeoError {
	fn from(err: BuilderError) -> Self {
		match err {
			BuilderError::IllegalArgument(msg) => NeoError::InvalidArgument(msg),
			BuilderError::CryptoError(inner) => inner.into(),
			other => NeoError::BuilderError(other.to_string()),
		}
	}
}

impl From<TransactionError> for NeoError {
	fn from(err: TransactionError) -> Self {
		match err {
			TransactionError::CodecError(inner) => inner.into(),
			TransactionError::BuilderError(inner) => inner.into(),
			other => NeoError::BuilderError(other.to_string()),
		}
	}
}

impl From<ProtocolError> for NeoError {
	fn from(err: ProtocolError) -> Self {
		match err {
			ProtocolError::IllegalState(msg) => NeoError::UnsupportedOperation(msg),
			ProtocolError::CryptoError(inner) => inner.into(),
			ProtocolError::Nep2Error(inner) => inner.into(),
			ProtocolError::TypeError(inner) => inner.into(),
			ProtocolError::BuilderError(inner) => inner.into(),
			ProtocolError::CodecError(inner) => inner.into(),
		}
	}
}

impl From<WalletError> for NeoError {
	fn from(err: WalletError) -> Self {
		NeoError::InvalidArgument(err.to_string())
	}
}
