//! Error type for value-level parsing and validation.

use thiserror::Error;

/// Errors produced while parsing or validating SDK value types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
	/// A string form (hex, address, URI) did not parse.
	#[error("invalid format: {0}")]
	InvalidFormat(String),

	/// A well-formed value that violates a documented constraint.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
}
