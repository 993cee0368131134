//! Accounts.
//!
//! An account pairs a script hash with whatever else is known about it: a
//! key pair for signing accounts, a NEP-2 envelope for locked-down key
//! storage, a verification script where available, nothing but the hash
//! for watch-only accounts. Multi-sig accounts carry their threshold and
//! participant count instead of a single key.

use tracing::debug;

use crate::{
	neo_builder::VerificationScript,
	neo_crypto::{
		private_key_from_wif, Bip32KeyPair, KeyPair, Nep2Error, ScryptParams,
		Secp256r1PublicKey, Secp256r1Signature, NEP2,
	},
	neo_protocol::ProtocolError,
	neo_types::{Address, ScriptHash, ScriptHashExtension},
};

/// Derivation path of the first Neo account under BIP-44 (coin type 888).
pub const DEFAULT_ACCOUNT_DERIVATION_PATH: &str = "m/44'/888'/0'/0/0";

/// A signing or watch-only account.
#[derive(Debug, Clone)]
pub struct Account {
	key_pair: Option<KeyPair>,
	script_hash: ScriptHash,
	label: Option<String>,
	is_locked: bool,
	encrypted_private_key: Option<String>,
	verification_script: Option<VerificationScript>,
	signing_threshold: Option<usize>,
	nr_of_participants: Option<usize>,
}

impl Account {
	/// A signing account for an existing key pair.
	pub fn from_key_pair(key_pair: KeyPair) -> Self {
		let script_hash = key_pair.get_script_hash();
		let verification_script =
			VerificationScript::from_public_key(&key_pair.public_key());
		Self {
			key_pair: Some(key_pair),
			script_hash,
			label: Some(script_hash.to_address()),
			is_locked: false,
			encrypted_private_key: None,
			verification_script: Some(verification_script),
			signing_threshold: None,
			nr_of_participants: None,
		}
	}

	/// A fresh account with a random key pair.
	pub fn create() -> Self {
		Self::from_key_pair(KeyPair::new_random())
	}

	/// Imports a signing account from WIF.
	pub fn from_wif(wif: &str) -> Result<Self, ProtocolError> {
		let private_key = private_key_from_wif(wif)?;
		Ok(Self::from_key_pair(KeyPair::from_secret_key(&private_key)))
	}

	/// Restores a signing account from a BIP-39 mnemonic, deriving the key
	/// along the default Neo path.
	pub fn from_mnemonic(phrase: &str, passphrase: &str) -> Result<Self, ProtocolError> {
		let master = Bip32KeyPair::from_mnemonic(phrase, passphrase)?;
		let node = master.derive_path(DEFAULT_ACCOUNT_DERIVATION_PATH)?;
		Ok(Self::from_key_pair(node.key_pair))
	}

	/// A watch-only account known only by address.
	pub fn from_address(address: &str) -> Result<Self, ProtocolError> {
		let script_hash = ScriptHash::from_address(address)?;
		Ok(Self::from_script_hash(script_hash))
	}

	/// A watch-only account known only by script hash.
	pub fn from_script_hash(script_hash: ScriptHash) -> Self {
		Self {
			key_pair: None,
			script_hash,
			label: Some(script_hash.to_address()),
			is_locked: false,
			encrypted_private_key: None,
			verification_script: None,
			signing_threshold: None,
			nr_of_participants: None,
		}
	}

	/// An account for an arbitrary verification script; watch-only unless
	/// a key pair is attached later.
	pub fn from_verification_script(script: VerificationScript) -> Result<Self, ProtocolError> {
		let script_hash = script.hash();
		let (threshold, participants) = if script.is_multi_sig() {
			(Some(script.get_signing_threshold()?), Some(script.get_nr_of_accounts()?))
		} else {
			(None, None)
		};
		Ok(Self {
			key_pair: None,
			script_hash,
			label: Some(script_hash.to_address()),
			is_locked: false,
			encrypted_private_key: None,
			verification_script: Some(script),
			signing_threshold: threshold,
			nr_of_participants: participants,
		})
	}

	/// A multi-sig account over the given keys and threshold.
	pub fn multi_sig_from_public_keys(
		public_keys: &[Secp256r1PublicKey],
		threshold: usize,
	) -> Result<Self, ProtocolError> {
		let script = VerificationScript::from_multi_sig(public_keys, threshold)?;
		Self::from_verification_script(script)
	}

	/// The account's script hash.
	pub fn get_script_hash(&self) -> ScriptHash {
		self.script_hash
	}

	/// The account's address.
	pub fn get_address(&self) -> Address {
		self.script_hash.to_address()
	}

	/// The key pair, present on unlocked signing accounts.
	pub fn key_pair(&self) -> Option<&KeyPair> {
		self.key_pair.as_ref()
	}

	/// The public key, where a key pair is present.
	pub fn get_public_key(&self) -> Option<Secp256r1PublicKey> {
		self.key_pair.as_ref().map(KeyPair::public_key)
	}

	/// The verification script, where known.
	pub fn get_verification_script(&self) -> Option<&VerificationScript> {
		self.verification_script.as_ref()
	}

	/// Display label, defaults to the address.
	pub fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	/// Sets the display label.
	pub fn set_label(&mut self, label: Option<String>) {
		self.label = label;
	}

	/// Whether the account is flagged locked.
	pub fn is_locked(&self) -> bool {
		self.is_locked
	}

	/// Flags the account locked or unlocked. A locked account is excluded
	/// from automatic signing by callers honoring the flag.
	pub fn set_locked(&mut self, locked: bool) {
		self.is_locked = locked;
	}

	/// The stored NEP-2 envelope, if the key was encrypted.
	pub fn encrypted_private_key(&self) -> Option<&str> {
		self.encrypted_private_key.as_deref()
	}

	/// Whether this account can sign right now.
	pub fn can_sign(&self) -> bool {
		self.key_pair.is_some() && !self.is_locked
	}

	/// Whether this is a multi-sig account.
	pub fn is_multi_sig(&self) -> bool {
		self.signing_threshold.is_some()
	}

	/// Signing threshold of a multi-sig account.
	pub fn get_signing_threshold(&self) -> Option<usize> {
		self.signing_threshold
	}

	/// Participant count of a multi-sig account.
	pub fn get_nr_of_participants(&self) -> Option<usize> {
		self.nr_of_participants
	}

	/// Signs a 32-byte digest with the account's key pair.
	pub fn sign_prehash(&self, digest: &[u8]) -> Result<Secp256r1Signature, ProtocolError> {
		let key_pair = self.key_pair.as_ref().ok_or_else(|| {
			ProtocolError::IllegalState(
				"cannot sign: the account holds no private key".to_string(),
			)
		})?;
		if self.is_locked {
			return Err(ProtocolError::IllegalState(
				"cannot sign: the account is locked".to_string(),
			));
		}
		Ok(key_pair.sign_prehash(digest)?)
	}

	/// Encrypts the key pair into a stored NEP-2 envelope and drops the
	/// plaintext key.
	pub fn encrypt_private_key(
		&mut self,
		password: &str,
		params: ScryptParams,
	) -> Result<(), ProtocolError> {
		let key_pair = self.key_pair.as_ref().ok_or_else(|| {
			ProtocolError::IllegalState(
				"the account holds no private key to encrypt".to_string(),
			)
		})?;
		let envelope = NEP2::encrypt(password, key_pair, params)?;
		self.encrypted_private_key = Some(envelope);
		self.key_pair = None;
		debug!(address = %self.get_address(), "account key encrypted");
		Ok(())
	}

	/// Decrypts the stored NEP-2 envelope back into a usable key pair.
	pub fn decrypt_private_key(
		&mut self,
		password: &str,
		params: ScryptParams,
	) -> Result<(), ProtocolError> {
		let envelope = self.encrypted_private_key.as_ref().ok_or_else(|| {
			ProtocolError::IllegalState("the account holds no encrypted key".to_string())
		})?;
		let key_pair = NEP2::decrypt(password, envelope, params)?;
		if key_pair.get_script_hash() != self.script_hash {
			// The envelope decrypts under this password but belongs to a
			// different account.
			return Err(ProtocolError::Nep2Error(Nep2Error::InvalidPassphrase));
		}
		self.verification_script
			.get_or_insert_with(|| VerificationScript::from_public_key(&key_pair.public_key()));
		self.key_pair = Some(key_pair);
		Ok(())
	}

	/// Imports an account straight from a NEP-2 envelope.
	pub fn from_nep2(
		nep2: &str,
		password: &str,
		params: ScryptParams,
	) -> Result<Self, ProtocolError> {
		let key_pair = NEP2::decrypt(password, nep2, params)?;
		let mut account = Self::from_key_pair(key_pair);
		account.encrypted_private_key = Some(nep2.to_string());
		Ok(account)
	}
}

impl PartialEq for Account {
	fn eq(&self, other: &Self) -> bool {
		self.script_hash == other.script_hash
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_from_key_pair() {
		let pair = KeyPair::from_private_key(&[0x01; 32]).unwrap();
		let account = Account::from_key_pair(pair.clone());

		assert_eq!(account.get_script_hash(), pair.get_script_hash());
		assert_eq!(account.get_address(), pair.get_address());
		assert_eq!(account.label(), Some(pair.get_address().as_str()));
		assert!(account.can_sign());
		assert!(!account.is_multi_sig());
	}

	#[test]
	fn test_wif_round_trip() {
		let pair = KeyPair::from_private_key(&[0x07; 32]).unwrap();
		let account = Account::from_wif(&pair.export_as_wif()).unwrap();
		assert_eq!(account.get_script_hash(), pair.get_script_hash());
	}

	#[test]
	fn test_watch_only_cannot_sign() {
		let account = Account::from_script_hash(ScriptHash::repeat_byte(5));
		assert!(!account.can_sign());
		assert!(account.sign_prehash(&[0u8; 32]).is_err());
	}

	#[test]
	fn test_locked_account_cannot_sign() {
		let mut account = Account::create();
		account.set_locked(true);
		assert!(!account.can_sign());
		assert!(account.sign_prehash(&[0u8; 32]).is_err());
	}

	#[test]
	fn test_multi_sig_account() {
		let keys: Vec<_> = (1u8..=3)
			.map(|n| KeyPair::from_private_key(&[n; 32]).unwrap().public_key())
			.collect();
		let account = Account::multi_sig_from_public_keys(&keys, 2).unwrap();

		assert!(account.is_multi_sig());
		assert_eq!(account.get_signing_threshold(), Some(2));
		assert_eq!(account.get_nr_of_participants(), Some(3));
		assert!(!account.can_sign());
	}

	#[test]
	fn test_encrypt_decrypt_cycle() {
		let pair = KeyPair::from_private_key(&[0x09; 32]).unwrap();
		let mut account = Account::from_key_pair(pair.clone());

		account.encrypt_private_key("pw", ScryptParams::light()).unwrap();
		assert!(account.key_pair().is_none());
		assert!(account.encrypted_private_key().is_some());
		assert!(!account.can_sign());

		assert!(account.decrypt_private_key("wrong", ScryptParams::light()).is_err());

		account.decrypt_private_key("pw", ScryptParams::light()).unwrap();
		assert_eq!(
			account.key_pair().unwrap().private_key_bytes(),
			pair.private_key_bytes()
		);
	}

	#[test]
	fn test_from_nep2() {
		let pair = KeyPair::from_private_key(&[0x0A; 32]).unwrap();
		let envelope = NEP2::encrypt("pw", &pair, ScryptParams::light()).unwrap();
		let account = Account::from_nep2(&envelope, "pw", ScryptParams::light()).unwrap();
		assert_eq!(account.get_script_hash(), pair.get_script_hash());
		assert_eq!(account.encrypted_private_key(), Some(envelope.as_str()));
	}

	#[test]
	fn test_from_mnemonic_is_deterministic() {
		let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
		let a = Account::from_mnemonic(phrase, "").unwrap();
		let b = Account::from_mnemonic(phrase, "").unwrap();
		assert_eq!(a.get_script_hash(), b.get_script_hash());

		let c = Account::from_mnemonic(phrase, "different").unwrap();
		assert_ne!(a.get_script_hash(), c.get_script_hash());
	}
}
