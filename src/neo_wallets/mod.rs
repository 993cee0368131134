//! In-memory wallet management.

pub use wallet::{Wallet, CURRENT_VERSION, DEFAULT_WALLET_NAME};

mod wallet;

use thiserror::Error;

/// Errors produced by wallet operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
	/// An account with the same script hash is already present.
	#[error("account {0} already exists in the wallet")]
	AccountAlreadyExists(String),

	/// No account with the given script hash.
	#[error("account {0} not found in the wallet")]
	AccountNotFound(String),
}
