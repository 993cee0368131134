//! Cryptographic primitives: secp256r1 keys and signatures, hashing,
//! Base58Check, WIF, NEP-2 envelopes and BIP-32/39 key derivation.

pub use base58_helper::{
	base58_decode, base58_encode, base58check_decode, base58check_decode_lenient,
	base58check_encode,
};
pub use bip32::Bip32KeyPair;
pub use bip39::{
	entropy_to_mnemonic, generate_mnemonic, mnemonic_to_entropy, mnemonic_to_seed,
	parse_mnemonic, validate_mnemonic,
};
pub use error::{CryptoError, Nep2Error};
pub use hash::{
	constant_time_eq, hash256, hmac_sha256, hmac_sha512, ripemd160, sha256, sha256_ripemd160,
	HashableForVec,
};
pub use key_pair::KeyPair;
pub use keys::{Secp256r1PrivateKey, Secp256r1PublicKey, Secp256r1Signature};
pub use nep2::{ScryptParams, NEP2};
pub use wif::{is_valid_wif, private_key_from_wif, wif_from_private_key};

mod base58_helper;
mod bip32;
mod bip39;
mod error;
mod hash;
mod key_pair;
mod keys;
mod nep2;
mod wif;
