//! An elliptic-curve key pair and its exported forms.

use rand_core::OsRng;

use crate::{
	neo_builder::VerificationScript,
	neo_crypto::{
		error::CryptoError,
		keys::{Secp256r1PrivateKey, Secp256r1PublicKey, Secp256r1Signature},
		wif::wif_from_private_key,
	},
	neo_types::{Address, ScriptHash, ScriptHashExtension},
};

/// A private key paired with its derived public key.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPair {
	/// The private key.
	pub private_key: Secp256r1PrivateKey,
	/// The public key derived from it.
	pub public_key: Secp256r1PublicKey,
}

impl KeyPair {
	/// Pairs an existing private key with its public key.
	pub fn new(private_key: Secp256r1PrivateKey, public_key: Secp256r1PublicKey) -> Self {
		Self { private_key, public_key }
	}

	/// Derives the pair from a private key alone.
	pub fn from_secret_key(private_key: &Secp256r1PrivateKey) -> Self {
		let public_key = private_key.to_public_key();
		Self::new(private_key.clone(), public_key)
	}

	/// Generates a fresh random pair from the OS CSPRNG.
	pub fn new_random() -> Self {
		let mut rng = OsRng;
		Self::from_secret_key(&Secp256r1PrivateKey::random(&mut rng))
	}

	/// Imports a pair from a raw 32-byte private key.
	pub fn from_private_key(private_key: &[u8; 32]) -> Result<Self, CryptoError> {
		let secret = Secp256r1PrivateKey::from_bytes(private_key)?;
		Ok(Self::from_secret_key(&secret))
	}

	/// The private key.
	pub fn private_key(&self) -> Secp256r1PrivateKey {
		self.private_key.clone()
	}

	/// The public key.
	pub fn public_key(&self) -> Secp256r1PublicKey {
		self.public_key.clone()
	}

	/// The raw 32-byte private key.
	pub fn private_key_bytes(&self) -> [u8; 32] {
		self.private_key.to_raw_bytes()
	}

	/// Signs a 32-byte digest with this pair's private key.
	pub fn sign_prehash(&self, digest: &[u8]) -> Result<Secp256r1Signature, CryptoError> {
		self.private_key.sign_prehash(digest)
	}

	/// Exports the private key as WIF.
	pub fn export_as_wif(&self) -> String {
		wif_from_private_key(&self.private_key())
	}

	/// Script hash of this pair's single-sig verification script.
	pub fn get_script_hash(&self) -> ScriptHash {
		VerificationScript::from_public_key(&self.public_key()).hash()
	}

	/// Address of this pair's single-sig account.
	pub fn get_address(&self) -> Address {
		self.get_script_hash().to_address()
	}
}
