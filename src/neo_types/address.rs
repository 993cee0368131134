//! Address type.
//!
//! An address is the Base58Check string form of a script hash; see
//! [`ScriptHashExtension`](crate::neo_types::ScriptHashExtension) for the
//! codec.

/// String form of a script hash.
pub type Address = String;
