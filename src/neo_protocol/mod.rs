//! Account-level protocol types.

pub use account::{Account, DEFAULT_ACCOUNT_DERIVATION_PATH};

mod account;

use thiserror::Error;

/// Errors produced by account operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
	/// The account is not in a state that supports the operation.
	#[error("illegal state: {0}")]
	IllegalState(String),

	/// A cryptographic sub-operation failed.
	#[error(transparent)]
	CryptoError(#[from] crate::neo_crypto::CryptoError),

	/// A NEP-2 envelope operation failed.
	#[error(transparent)]
	Nep2Error(#[from] crate::neo_crypto::Nep2Error),

	/// A value-level parse or validation failed.
	#[error(transparent)]
	TypeError(#[from] crate::neo_types::TypeError),

	/// A script construction failed.
	#[error(transparent)]
	BuilderError(#[from] crate::neo_builder::BuilderError),

	/// A codec-level failure.
	#[error(transparent)]
	CodecError(#[from] crate::neo_codec::CodecError),
}
