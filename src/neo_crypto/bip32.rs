//! BIP-32 hierarchical deterministic keys over secp256r1.
//!
//! The derivation scheme follows BIP-32 with the curve swapped for NIST
//! P-256, which is what Neo accounts use: master keys come from
//! HMAC-SHA-512 keyed with `"Bitcoin seed"`, children from HMAC-SHA-512
//! under the parent chain code, and child private keys are `(IL + parent)
//! mod n`. Extended keys serialize into the documented 78-byte layout with
//! the 0x0488ADE4/0x0488B21E version bytes, Base58Check encoded.

use p256::{
	elliptic_curve::ff::PrimeField,
	FieldBytes, Scalar,
};

use crate::neo_crypto::{
	base58_helper::{base58check_decode, base58check_encode},
	bip39::mnemonic_to_seed,
	error::CryptoError,
	hash::{hmac_sha512, sha256_ripemd160},
	key_pair::KeyPair,
	keys::Secp256r1PrivateKey,
};

const BITCOIN_SEED: &[u8] = b"Bitcoin seed";
const HARDENED_BIT: u32 = 0x8000_0000;
const VERSION_XPRV: u32 = 0x0488_ADE4;
const VERSION_XPUB: u32 = 0x0488_B21E;

/// A key pair with the BIP-32 derivation metadata needed to derive
/// children and serialize extended keys.
#[derive(Debug, Clone)]
pub struct Bip32KeyPair {
	/// The EC key pair at this node.
	pub key_pair: KeyPair,
	chain_code: [u8; 32],
	depth: u8,
	parent_fingerprint: u32,
	child_number: u32,
}

impl Bip32KeyPair {
	/// Master key from a BIP-39 seed of 16 to 64 bytes.
	pub fn from_seed(seed: &[u8]) -> Result<Self, CryptoError> {
		if seed.len() < 16 || seed.len() > 64 {
			return Err(CryptoError::InvalidParams(
				"seed must be between 16 and 64 bytes".to_string(),
			));
		}
		let digest = hmac_sha512(BITCOIN_SEED, seed);
		let private_key = Secp256r1PrivateKey::from_bytes(&digest[..32])?;
		let mut chain_code = [0u8; 32];
		chain_code.copy_from_slice(&digest[32..]);

		Ok(Self {
			key_pair: KeyPair::from_secret_key(&private_key),
			chain_code,
			depth: 0,
			parent_fingerprint: 0,
			child_number: 0,
		})
	}

	/// Master key from a mnemonic phrase and passphrase.
	pub fn from_mnemonic(phrase: &str, passphrase: &str) -> Result<Self, CryptoError> {
		let seed = mnemonic_to_seed(phrase, passphrase)?;
		Self::from_seed(&seed)
	}

	/// The chain code at this node.
	pub fn chain_code(&self) -> [u8; 32] {
		self.chain_code
	}

	/// Depth of this node below the master.
	pub fn depth(&self) -> u8 {
		self.depth
	}

	/// First four bytes of `sha256_ripemd160` over the parent public key.
	pub fn parent_fingerprint(&self) -> u32 {
		self.parent_fingerprint
	}

	/// Index this node was derived at, with the hardened bit set where
	/// applicable.
	pub fn child_number(&self) -> u32 {
		self.child_number
	}

	/// Derives one child. `index` must be below 2^31; `hardened` selects
	/// the hardened half of the index space.
	pub fn derive_child(&self, index: u32, hardened: bool) -> Result<Self, CryptoError> {
		if index >= HARDENED_BIT {
			return Err(CryptoError::InvalidParams(
				"child index must be below 2^31".to_string(),
			));
		}
		let index = if hardened { index | HARDENED_BIT } else { index };

		let mut data = Vec::with_capacity(37);
		if hardened {
			data.push(0x00);
			data.extend_from_slice(&self.key_pair.private_key_bytes());
		} else {
			data.extend_from_slice(&self.key_pair.public_key.get_encoded(true));
		}
		data.extend_from_slice(&index.to_be_bytes());

		let digest = hmac_sha512(&self.chain_code, &data);
		let (il, ir) = digest.split_at(32);

		// IL must parse as a scalar below n and the sum must be non-zero;
		// both have negligible probability of failing.
		let il_scalar = Option::<Scalar>::from(Scalar::from_repr(
			FieldBytes::clone_from_slice(il),
		))
		.ok_or(CryptoError::InvalidPrivateKey)?;
		let parent_scalar = Option::<Scalar>::from(Scalar::from_repr(
			FieldBytes::clone_from_slice(&self.key_pair.private_key_bytes()),
		))
		.ok_or(CryptoError::InvalidPrivateKey)?;

		let child_scalar = il_scalar + parent_scalar;
		let child_key = Secp256r1PrivateKey::from_bytes(child_scalar.to_repr().as_slice())?;

		let parent_pub = self.key_pair.public_key.get_encoded(true);
		let fingerprint_bytes = sha256_ripemd160(&parent_pub);
		let parent_fingerprint = u32::from_be_bytes(
			fingerprint_bytes[..4].try_into().expect("4-byte slice"),
		);

		let mut chain_code = [0u8; 32];
		chain_code.copy_from_slice(ir);

		Ok(Self {
			key_pair: KeyPair::from_secret_key(&child_key),
			chain_code,
			depth: self.depth + 1,
			parent_fingerprint,
			child_number: index,
		})
	}

	/// Derives along a path such as `m/44'/888'/0'/0/0`. Both `'` and `h`
	/// mark hardened segments; malformed segments are rejected.
	pub fn derive_path(&self, path: &str) -> Result<Self, CryptoError> {
		let mut segments = path.split('/');
		if segments.next() != Some("m") {
			return Err(CryptoError::InvalidFormat(
				"derivation path must start with 'm'".to_string(),
			));
		}

		let mut current = self.clone();
		for segment in segments {
			if segment.is_empty() {
				return Err(CryptoError::InvalidFormat(
					"empty derivation path segment".to_string(),
				));
			}
			let (digits, hardened) =
				match segment.strip_suffix('\'').or_else(|| segment.strip_suffix('h')) {
					Some(digits) => (digits, true),
					None => (segment, false),
				};
			let index: u32 = digits.parse().map_err(|_| {
				CryptoError::InvalidFormat(format!("invalid path segment '{segment}'"))
			})?;
			current = current.derive_child(index, hardened)?;
		}
		Ok(current)
	}

	/// Serializes the extended private key (`xprv…`).
	pub fn to_extended_private_key(&self) -> String {
		let mut data = self.extended_key_header(VERSION_XPRV);
		data.push(0x00);
		data.extend_from_slice(&self.key_pair.private_key_bytes());
		base58check_encode(&data)
	}

	/// Serializes the extended public key (`xpub…`).
	pub fn to_extended_public_key(&self) -> String {
		let mut data = self.extended_key_header(VERSION_XPUB);
		data.extend_from_slice(&self.key_pair.public_key.get_encoded(true));
		base58check_encode(&data)
	}

	/// Parses an extended private key serialized by
	/// [`to_extended_private_key`](Self::to_extended_private_key).
	pub fn from_extended_private_key(xprv: &str) -> Result<Self, CryptoError> {
		let data = base58check_decode(xprv)?;
		if data.len() != 78 {
			return Err(CryptoError::InvalidFormat(
				"extended private key must decode to 78 bytes".to_string(),
			));
		}

		let version = u32::from_be_bytes(data[..4].try_into().expect("4-byte slice"));
		if version != VERSION_XPRV {
			return Err(CryptoError::InvalidFormat(
				"unexpected extended private key version".to_string(),
			));
		}
		if data[45] != 0x00 {
			return Err(CryptoError::InvalidFormat(
				"invalid private key prefix byte".to_string(),
			));
		}

		let depth = data[4];
		let parent_fingerprint =
			u32::from_be_bytes(data[5..9].try_into().expect("4-byte slice"));
		let child_number = u32::from_be_bytes(data[9..13].try_into().expect("4-byte slice"));
		let mut chain_code = [0u8; 32];
		chain_code.copy_from_slice(&data[13..45]);
		let private_key = Secp256r1PrivateKey::from_bytes(&data[46..78])?;

		Ok(Self {
			key_pair: KeyPair::from_secret_key(&private_key),
			chain_code,
			depth,
			parent_fingerprint,
			child_number,
		})
	}

	fn extended_key_header(&self, version: u32) -> Vec<u8> {
		let mut data = Vec::with_capacity(78);
		data.extend_from_slice(&version.to_be_bytes());
		data.push(self.depth);
		data.extend_from_slice(&self.parent_fingerprint.to_be_bytes());
		data.extend_from_slice(&self.child_number.to_be_bytes());
		data.extend_from_slice(&self.chain_code);
		data
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn master() -> Bip32KeyPair {
		Bip32KeyPair::from_seed(&[0x42u8; 32]).unwrap()
	}

	#[test]
	fn test_master_from_seed_is_deterministic() {
		let a = Bip32KeyPair::from_seed(&[0x42u8; 32]).unwrap();
		let b = Bip32KeyPair::from_seed(&[0x42u8; 32]).unwrap();
		assert_eq!(a.key_pair.private_key_bytes(), b.key_pair.private_key_bytes());
		assert_eq!(a.chain_code(), b.chain_code());
		assert_eq!(a.depth(), 0);
		assert_eq!(a.parent_fingerprint(), 0);
	}

	#[test]
	fn test_seed_length_bounds() {
		assert!(Bip32KeyPair::from_seed(&[0u8; 15]).is_err());
		assert!(Bip32KeyPair::from_seed(&[1u8; 16]).is_ok());
		assert!(Bip32KeyPair::from_seed(&[1u8; 64]).is_ok());
		assert!(Bip32KeyPair::from_seed(&[1u8; 65]).is_err());
	}

	#[test]
	fn test_hardened_and_normal_children_differ() {
		let master = master();
		let hardened = master.derive_child(0, true).unwrap();
		let normal = master.derive_child(0, false).unwrap();

		assert_ne!(
			hardened.key_pair.private_key_bytes(),
			normal.key_pair.private_key_bytes()
		);
		assert_eq!(hardened.child_number(), HARDENED_BIT);
		assert_eq!(normal.child_number(), 0);
		assert_eq!(hardened.depth(), 1);
		assert_eq!(hardened.parent_fingerprint(), normal.parent_fingerprint());
	}

	#[test]
	fn test_derive_path_matches_manual_derivation() {
		let master = master();
		let by_path = master.derive_path("m/44'/888'/0'/0/0").unwrap();
		let manual = master
			.derive_child(44, true)
			.unwrap()
			.derive_child(888, true)
			.unwrap()
			.derive_child(0, true)
			.unwrap()
			.derive_child(0, false)
			.unwrap()
			.derive_child(0, false)
			.unwrap();

		assert_eq!(by_path.key_pair.private_key_bytes(), manual.key_pair.private_key_bytes());
		assert_eq!(by_path.depth(), 5);
	}

	#[test]
	fn test_derive_path_accepts_h_suffix() {
		let master = master();
		let tick = master.derive_path("m/0'").unwrap();
		let h = master.derive_path("m/0h").unwrap();
		assert_eq!(tick.key_pair.private_key_bytes(), h.key_pair.private_key_bytes());
	}

	#[test]
	fn test_derive_path_rejects_malformed() {
		let master = master();
		assert!(master.derive_path("44'/0").is_err());
		assert!(master.derive_path("m//0").is_err());
		assert!(master.derive_path("m/abc").is_err());
		assert!(master.derive_path("m/0''").is_err());
		assert!(master.derive_path("m/4294967295").is_err());
	}

	#[test]
	fn test_extended_private_key_round_trip() {
		let node = master().derive_path("m/44'/888'/0'").unwrap();
		let xprv = node.to_extended_private_key();
		assert!(xprv.starts_with("xprv"));

		let restored = Bip32KeyPair::from_extended_private_key(&xprv).unwrap();
		assert_eq!(
			restored.key_pair.private_key_bytes(),
			node.key_pair.private_key_bytes()
		);
		assert_eq!(restored.chain_code(), node.chain_code());
		assert_eq!(restored.depth(), node.depth());
		assert_eq!(restored.parent_fingerprint(), node.parent_fingerprint());
		assert_eq!(restored.child_number(), node.child_number());
	}

	#[test]
	fn test_extended_public_key_prefix() {
		let node = master();
		assert!(node.to_extended_public_key().starts_with("xpub"));
	}

	#[test]
	fn test_from_mnemonic_matches_seed() {
		let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
		let from_mnemonic = Bip32KeyPair::from_mnemonic(phrase, "TREZOR").unwrap();
		let seed = crate::neo_crypto::bip39::mnemonic_to_seed(phrase, "TREZOR").unwrap();
		let from_seed = Bip32KeyPair::from_seed(&seed).unwrap();
		assert_eq!(
			from_mnemonic.key_pair.private_key_bytes(),
			from_seed.key_pair.private_key_bytes()
		);
	}
}
