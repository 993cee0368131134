//! Error type for binary encoding and decoding.

use thiserror::Error;

/// Errors produced while reading or writing the Neo wire format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
	/// Structurally invalid data for the type being decoded.
	#[error("invalid encoding: {0}")]
	InvalidEncoding(String),

	/// A read ran past the end of the buffer.
	#[error("read beyond end of buffer")]
	IndexOutOfBounds,

	/// An unknown or out-of-place opcode byte.
	#[error("invalid op code")]
	InvalidOpCode,

	/// A var-int that is not the shortest encoding of its value.
	#[error("non-canonical variable-length integer")]
	NonCanonicalVarInt,

	/// A value that does not fit the field it is being written into.
	#[error("value out of range: {0}")]
	ValueOutOfRange(String),
}
