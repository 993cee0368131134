//! NEP-2 password-protected private keys.
//!
//! The envelope is `Base58Check(0x01 || 0x42 || 0xE0 || addrhash || C1 || C2)`,
//! 39 bytes inside the checksum, 58 characters outside. `addrhash` is the
//! first four bytes of a double SHA-256 over the ASCII address of the key.
//! scrypt stretches the password into a 64-byte key; the first half keys
//! AES-256-ECB, the second half is XORed over the private key halves before
//! encryption.
//!
//! Decryption recomputes the address from the recovered key and compares
//! its hash against the stored salt in constant time. Every failure mode of
//! decryption reports the same error so the envelope cannot be used as a
//! password or format oracle.

use cipher::{
	block_padding::NoPadding, BlockDecryptMut, BlockEncryptMut, KeyInit,
};
use scrypt::{scrypt, Params};
use tracing::debug;
use zeroize::Zeroize;

use crate::{
	neo_config::NeoConstants,
	neo_crypto::{
		base58_helper::{base58check_decode, base58check_encode},
		error::Nep2Error,
		hash::{constant_time_eq, hash256},
		key_pair::KeyPair,
	},
};

type Aes256EcbEnc = ecb::Encryptor<aes::Aes256>;
type Aes256EcbDec = ecb::Decryptor<aes::Aes256>;

/// scrypt cost parameters for the NEP-2 key derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScryptParams {
	/// CPU/memory cost; must be a power of two.
	pub n: u32,
	/// Block size.
	pub r: u32,
	/// Parallelism.
	pub p: u32,
	/// Derived key length in bytes.
	pub dk_len: usize,
}

impl ScryptParams {
	/// The parameters every NEP-2 implementation must support:
	/// N = 16384, r = 8, p = 8.
	pub fn default_params() -> Self {
		Self {
			n: NeoConstants::SCRYPT_N,
			r: NeoConstants::SCRYPT_R,
			p: NeoConstants::SCRYPT_P,
			dk_len: NeoConstants::SCRYPT_DK_LEN,
		}
	}

	/// Cheap parameters for interactive use and tests.
	pub fn light() -> Self {
		Self { n: 256, r: 1, p: 1, dk_len: NeoConstants::SCRYPT_DK_LEN }
	}

	/// Validates the parameter bounds: N a power of two, positive r/p/dkLen,
	/// and a memory estimate of `128 * N * r` within 1 GiB.
	pub fn validate(&self) -> Result<(), Nep2Error> {
		if self.n == 0 || !self.n.is_power_of_two() {
			return Err(Nep2Error::InvalidParams("N must be a power of two".to_string()));
		}
		if self.r == 0 || self.p == 0 || self.dk_len == 0 {
			return Err(Nep2Error::InvalidParams("r, p and dkLen must be positive".to_string()));
		}
		let memory = 128u64 * self.n as u64 * self.r as u64;
		if memory > 1 << 30 {
			return Err(Nep2Error::InvalidParams(format!(
				"scrypt memory estimate {memory} exceeds 1 GiB"
			)));
		}
		Ok(())
	}

	fn to_backend(self) -> Result<Params, Nep2Error> {
		self.validate()?;
		let log_n = self.n.trailing_zeros() as u8;
		Params::new(log_n, self.r, self.p, self.dk_len)
			.map_err(|e| Nep2Error::InvalidParams(e.to_string()))
	}
}

impl Default for ScryptParams {
	fn default() -> Self {
		Self::default_params()
	}
}

/// NEP-2 encrypt/decrypt entry points.
#[derive(Debug)]
pub struct NEP2;

impl NEP2 {
	const ENVELOPE_LEN: usize = 39;
	const ENCODED_LEN: usize = 58;

	/// Encrypts a key pair's private key under `password` with the given
	/// scrypt parameters.
	pub fn encrypt(
		password: &str,
		key_pair: &KeyPair,
		params: ScryptParams,
	) -> Result<String, Nep2Error> {
		let address = key_pair.get_address();
		let addrhash = address_hash(&address);

		let mut derived = derive_key(password, &addrhash, params)?;
		let (encrypt_key, xor_mask) = derived.split_at(32);

		let private_key = key_pair.private_key_bytes();
		let mut masked = [0u8; 32];
		for i in 0..32 {
			masked[i] = private_key[i] ^ xor_mask[i];
		}

		let key: [u8; 32] = encrypt_key.try_into().expect("split_at(32) yields 32 bytes");
		let ciphertext = Aes256EcbEnc::new((&key).into())
			.encrypt_padded_vec_mut::<NoPadding>(&masked);

		masked.zeroize();
		derived.zeroize();

		let mut envelope = Vec::with_capacity(Self::ENVELOPE_LEN);
		envelope.push(NeoConstants::NEP_HEADER_1);
		envelope.push(NeoConstants::NEP_HEADER_2);
		envelope.push(NeoConstants::NEP_FLAG);
		envelope.extend_from_slice(&addrhash);
		envelope.extend_from_slice(&ciphertext);

		Ok(base58check_encode(&envelope))
	}

	/// Decrypts a NEP-2 string back into its key pair.
	///
	/// A wrong password, a corrupted envelope and a bad checksum are all
	/// reported as the same [`Nep2Error::InvalidPassphrase`].
	pub fn decrypt(
		password: &str,
		nep2: &str,
		params: ScryptParams,
	) -> Result<KeyPair, Nep2Error> {
		if nep2.len() != Self::ENCODED_LEN {
			debug!(len = nep2.len(), "NEP-2 string has unexpected length");
			return Err(Nep2Error::InvalidPassphrase);
		}

		let envelope = base58check_decode(nep2).map_err(|_| Nep2Error::InvalidPassphrase)?;
		if envelope.len() != Self::ENVELOPE_LEN
			|| envelope[0] != NeoConstants::NEP_HEADER_1
			|| envelope[1] != NeoConstants::NEP_HEADER_2
			|| envelope[2] != NeoConstants::NEP_FLAG
		{
			return Err(Nep2Error::InvalidPassphrase);
		}

		let addrhash: [u8; 4] = envelope[3..7].try_into().expect("4-byte slice");
		let ciphertext = &envelope[7..39];

		let mut derived = derive_key(password, &addrhash, params)?;
		let (decrypt_key, xor_mask) = derived.split_at(32);

		let key: [u8; 32] = decrypt_key.try_into().expect("split_at(32) yields 32 bytes");
		let mut plaintext = Aes256EcbDec::new((&key).into())
			.decrypt_padded_vec_mut::<NoPadding>(ciphertext)
			.map_err(|_| Nep2Error::InvalidPassphrase)?;

		let mut private_key = [0u8; 32];
		for i in 0..32 {
			private_key[i] = plaintext[i] ^ xor_mask[i];
		}
		plaintext.zeroize();
		derived.zeroize();

		let key_pair = KeyPair::from_private_key(&private_key)
			.map_err(|_| Nep2Error::InvalidPassphrase)?;
		private_key.zeroize();

		let recovered_hash = address_hash(&key_pair.get_address());
		if !constant_time_eq(&recovered_hash, &addrhash) {
			return Err(Nep2Error::InvalidPassphrase);
		}

		Ok(key_pair)
	}
}

fn derive_key(
	password: &str,
	salt: &[u8; 4],
	params: ScryptParams,
) -> Result<Vec<u8>, Nep2Error> {
	let backend = params.to_backend()?;
	let mut derived = vec![0u8; params.dk_len];
	scrypt(password.as_bytes(), salt, &backend, &mut derived)
		.map_err(|e| Nep2Error::InvalidParams(e.to_string()))?;
	if derived.len() < 64 {
		return Err(Nep2Error::InvalidParams("dkLen must be at least 64".to_string()));
	}
	Ok(derived)
}

/// First four bytes of a double SHA-256 over the ASCII address.
fn address_hash(address: &str) -> [u8; 4] {
	let hash = hash256(address.as_bytes());
	let mut out = [0u8; 4];
	out.copy_from_slice(&hash[..4]);
	out
}
