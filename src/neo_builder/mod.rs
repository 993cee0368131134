//! Building blocks for Neo N3 scripts and transactions.
//!
//! [`ScriptBuilder`] emits byte-exact invocation and verification scripts;
//! [`TransactionBuilder`] assembles them with signers, fees and a validity
//! window into a signed [`Transaction`].

pub use error::BuilderError;
pub use script::*;
pub use transaction::*;

mod error;
mod script;
mod transaction;
