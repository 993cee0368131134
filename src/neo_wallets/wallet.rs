//! In-memory wallets.
//!
//! A wallet is a named, ordered set of accounts with at most one default.
//! Persisting a wallet to disk is out of scope; the only durable key form
//! this SDK produces is the per-account NEP-2 envelope.

use tracing::debug;

use crate::{
	neo_protocol::Account,
	neo_types::ScriptHash,
	neo_wallets::WalletError,
};

/// Default wallet name.
pub const DEFAULT_WALLET_NAME: &str = "NeoWallet";

/// Wallet specification version.
pub const CURRENT_VERSION: &str = "1.0";

/// A named, ordered collection of accounts.
#[derive(Debug, Clone)]
pub struct Wallet {
	name: String,
	version: String,
	accounts: Vec<Account>,
	default_account: Option<ScriptHash>,
}

impl Default for Wallet {
	fn default() -> Self {
		Self::new()
	}
}

impl Wallet {
	/// Creates an empty wallet with the default name.
	pub fn new() -> Self {
		Self {
			name: DEFAULT_WALLET_NAME.to_string(),
			version: CURRENT_VERSION.to_string(),
			accounts: Vec::new(),
			default_account: None,
		}
	}

	/// Creates an empty wallet with the given name.
	pub fn with_name(name: &str) -> Self {
		Self { name: name.to_string(), ..Self::new() }
	}

	/// The wallet name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Renames the wallet.
	pub fn set_name(&mut self, name: &str) {
		self.name = name.to_string();
	}

	/// The wallet specification version.
	pub fn version(&self) -> &str {
		&self.version
	}

	/// The accounts in insertion order.
	pub fn accounts(&self) -> &[Account] {
		&self.accounts
	}

	/// Number of accounts.
	pub fn len(&self) -> usize {
		self.accounts.len()
	}

	/// Whether the wallet holds no accounts.
	pub fn is_empty(&self) -> bool {
		self.accounts.is_empty()
	}

	/// Adds an account. The first account becomes the default. Adding an
	/// account that is already present is an error.
	pub fn add_account(&mut self, account: Account) -> Result<(), WalletError> {
		let hash = account.get_script_hash();
		if self.get_account(&hash).is_some() {
			return Err(WalletError::AccountAlreadyExists(hash.to_string()));
		}
		if self.accounts.is_empty() {
			self.default_account = Some(hash);
		}
		debug!(address = %account.get_address(), wallet = %self.name, "account added");
		self.accounts.push(account);
		Ok(())
	}

	/// Removes an account by script hash; the default moves to the first
	/// remaining account.
	pub fn remove_account(&mut self, hash: &ScriptHash) -> Result<Account, WalletError> {
		let index = self
			.accounts
			.iter()
			.position(|account| &account.get_script_hash() == hash)
			.ok_or_else(|| WalletError::AccountNotFound(hash.to_string()))?;
		let removed = self.accounts.remove(index);
		if self.default_account == Some(*hash) {
			self.default_account = self.accounts.first().map(Account::get_script_hash);
		}
		Ok(removed)
	}

	/// Looks up an account by script hash.
	pub fn get_account(&self, hash: &ScriptHash) -> Option<&Account> {
		self.accounts.iter().find(|account| &account.get_script_hash() == hash)
	}

	/// Mutable lookup by script hash.
	pub fn get_account_mut(&mut self, hash: &ScriptHash) -> Option<&mut Account> {
		self.accounts.iter_mut().find(|account| &account.get_script_hash() == hash)
	}

	/// The default account, if any.
	pub fn default_account(&self) -> Option<&Account> {
		self.default_account.as_ref().and_then(|hash| self.get_account(hash))
	}

	/// Marks an existing account as the default.
	pub fn set_default_account(&mut self, hash: &ScriptHash) -> Result<(), WalletError> {
		if self.get_account(hash).is_none() {
			return Err(WalletError::AccountNotFound(hash.to_string()));
		}
		self.default_account = Some(*hash);
		Ok(())
	}

	/// Whether the wallet holds the given account.
	pub fn holds_account(&self, hash: &ScriptHash) -> bool {
		self.get_account(hash).is_some()
	}

	/// Creates a wallet pre-populated with one fresh account.
	pub fn create() -> Result<Self, WalletError> {
		let mut wallet = Self::new();
		wallet.add_account(Account::create())?;
		Ok(wallet)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_new_wallet_is_empty() {
		let wallet = Wallet::new();
		assert_eq!(wallet.name(), DEFAULT_WALLET_NAME);
		assert_eq!(wallet.version(), CURRENT_VERSION);
		assert!(wallet.is_empty());
		assert!(wallet.default_account().is_none());
	}

	#[test]
	fn test_first_account_becomes_default() {
		let mut wallet = Wallet::with_name("test");
		let account = Account::create();
		let hash = account.get_script_hash();
		wallet.add_account(account).unwrap();

		assert_eq!(wallet.len(), 1);
		assert_eq!(wallet.default_account().unwrap().get_script_hash(), hash);
	}

	#[test]
	fn test_duplicate_account_rejected() {
		let mut wallet = Wallet::new();
		let account = Account::create();
		wallet.add_account(account.clone()).unwrap();
		assert!(matches!(
			wallet.add_account(account),
			Err(WalletError::AccountAlreadyExists(_))
		));
	}

	#[test]
	fn test_remove_account_moves_default() {
		let mut wallet = Wallet::new();
		let first = Account::create();
		let second = Account::create();
		let first_hash = first.get_script_hash();
		let second_hash = second.get_script_hash();
		wallet.add_account(first).unwrap();
		wallet.add_account(second).unwrap();

		wallet.remove_account(&first_hash).unwrap();
		assert_eq!(wallet.default_account().unwrap().get_script_hash(), second_hash);

		assert!(matches!(
			wallet.remove_account(&first_hash),
			Err(WalletError::AccountNotFound(_))
		));
	}

	#[test]
	fn test_set_default_account() {
		let mut wallet = Wallet::new();
		let first = Account::create();
		let second = Account::create();
		let second_hash = second.get_script_hash();
		wallet.add_account(first).unwrap();
		wallet.add_account(second).unwrap();

		wallet.set_default_account(&second_hash).unwrap();
		assert_eq!(wallet.default_account().unwrap().get_script_hash(), second_hash);

		assert!(wallet.set_default_account(&ScriptHash::repeat_byte(9)).is_err());
	}

	#[test]
	fn test_get_account_mut() {
		let mut wallet = Wallet::new();
		let account = Account::create();
		let hash = account.get_script_hash();
		wallet.add_account(account).unwrap();

		wallet.get_account_mut(&hash).unwrap().set_label(Some("renamed".to_string()));
		assert_eq!(wallet.get_account(&hash).unwrap().label(), Some("renamed"));
	}
}
