//! Error type for transaction assembly.

use thiserror::Error;

/// Errors produced while assembling, signing or decoding transactions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
	/// No script was set on the builder.
	#[error("a transaction requires a script")]
	NoScript,

	/// The script set on the builder is empty.
	#[error("the transaction script must not be empty")]
	EmptyScript,

	/// No signers were configured.
	#[error("a transaction requires at least one signer")]
	NoSigners,

	/// Two signers share a script hash.
	#[error("a transaction cannot have two signers for the same account")]
	DuplicateSigner,

	/// More signers than the protocol allows.
	#[error("too many signers: {0}")]
	TooManySigners(usize),

	/// A fee field is negative.
	#[error("fees must not be negative")]
	NegativeFee,

	/// The validity window is absent or zero.
	#[error("invalid valid-until-block value")]
	InvalidBlock,

	/// Signing requires the network magic and none was configured.
	#[error("the network magic must be set before signing")]
	NoNetworkMagic,

	/// A witness does not match the signer at its index.
	#[error("witness/signer mismatch: {0}")]
	WitnessMismatch(String),

	/// Anything the builder cannot express more precisely.
	#[error("transaction configuration: {0}")]
	TransactionConfiguration(String),

	/// A codec-level failure while serializing or parsing.
	#[error(transparent)]
	CodecError(#[from] crate::neo_codec::CodecError),

	/// A script/witness construction failure.
	#[error(transparent)]
	BuilderError(#[from] crate::neo_builder::error::BuilderError),
}

impl From<TransactionError> for crate::neo_codec::CodecError {
	fn from(err: TransactionError) -> Self {
		match err {
			TransactionError::CodecError(inner) => inner,
			other => crate::neo_codec::CodecError::InvalidEncoding(other.to_string()),
		}
	}
}
