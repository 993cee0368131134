//! Error type for script construction.

use thiserror::Error;

/// Errors produced while building scripts and witnesses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
	/// A caller-supplied value violates a documented constraint.
	#[error("illegal argument: {0}")]
	IllegalArgument(String),

	/// The builder was driven through an unsupported sequence of calls.
	#[error("illegal state: {0}")]
	IllegalState(String),

	/// A cryptographic sub-operation failed.
	#[error("crypto error: {0}")]
	CryptoError(#[from] crate::neo_crypto::CryptoError),
}
