//! Protocol constants shared across the SDK.

use lazy_static::lazy_static;
use primitive_types::H160;

/// Fixed sizes, limits and version bytes of the Neo N3 protocol.
#[derive(Debug, Clone, Copy)]
pub struct NeoConstants;

impl NeoConstants {
	// Accounts, addresses and keys
	/// Version byte prefixed to a script hash before Base58Check-encoding an
	/// address. Produces addresses starting with `N`.
	pub const ADDRESS_VERSION: u8 = 0x35;
	/// WIF version byte.
	pub const WIF_VERSION: u8 = 0x80;
	/// WIF suffix marking a compressed public key.
	pub const WIF_COMPRESSED_FLAG: u8 = 0x01;
	/// Byte length of a private key.
	pub const PRIVATE_KEY_SIZE: u32 = 32;
	/// Byte length of a compressed public key.
	pub const PUBLIC_KEY_SIZE_COMPRESSED: u32 = 33;
	/// Byte length of a compact ECDSA signature.
	pub const SIGNATURE_SIZE: u32 = 64;
	/// Byte length of a script hash.
	pub const HASH160_SIZE: u32 = 20;
	/// Byte length of a transaction or block hash.
	pub const HASH256_SIZE: u32 = 32;
	/// Most public keys a multi-sig verification script may carry.
	pub const MAX_PUBLIC_KEYS_PER_MULTI_SIG: u32 = 1024;

	// Transactions & contracts
	/// Current transaction version.
	pub const CURRENT_TX_VERSION: u8 = 0;
	/// Hard cap on a serialized transaction.
	pub const MAX_TRANSACTION_SIZE: u32 = 102400;
	/// Cap on signers plus attributes per transaction.
	pub const MAX_TRANSACTION_ATTRIBUTES: u32 = 16;
	/// Cap on allowed contracts, allowed groups or rules per signer.
	pub const MAX_SIGNER_SUBITEMS: u32 = 16;
	/// Maximum nesting depth of a witness-rule condition on a signer.
	pub const MAX_NESTING_DEPTH_FOR_SIGNERS: u8 = 2;
	/// Default validity window, roughly one day of blocks.
	pub const MAX_VALID_UNTIL_BLOCK_INCREMENT: u32 = 5760;

	// NEP-2 envelope
	/// First NEP-2 prefix byte.
	pub const NEP_HEADER_1: u8 = 0x01;
	/// Second NEP-2 prefix byte.
	pub const NEP_HEADER_2: u8 = 0x42;
	/// NEP-2 flag byte.
	pub const NEP_FLAG: u8 = 0xE0;

	// Default scrypt parameters (N = 2^14, r = 8, p = 8)
	/// log2 of the scrypt cost parameter.
	pub const SCRYPT_LOG_N: u8 = 14;
	/// scrypt cost parameter.
	pub const SCRYPT_N: u32 = 16384;
	/// scrypt block size.
	pub const SCRYPT_R: u32 = 8;
	/// scrypt parallelism.
	pub const SCRYPT_P: u32 = 8;
	/// scrypt derived-key length.
	pub const SCRYPT_DK_LEN: usize = 64;

	// Network magic numbers, for reference only. Nothing in this crate
	// defaults to them; the caller supplies the magic when signing.
	/// Magic number of the public main network.
	pub const MAGIC_NUMBER_MAINNET: u32 = 860833102;
	/// Magic number of the public test network.
	pub const MAGIC_NUMBER_TESTNET: u32 = 894710606;
}

lazy_static! {
	/// Script hash of the native NEO token contract (big-endian).
	pub static ref NEO_TOKEN_HASH: H160 = H160::from_slice(
		&hex::decode("ef4073a0f2b305a38ec4050e4d3d28bc40ea63f5").expect("static hex"),
	);
	/// Script hash of the native GAS token contract (big-endian).
	pub static ref GAS_TOKEN_HASH: H160 = H160::from_slice(
		&hex::decode("d2a4cff31913016155e38e474a2c06d08be276cf").expect("static hex"),
	);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_scrypt_defaults_consistent() {
		assert_eq!(1u32 << NeoConstants::SCRYPT_LOG_N, NeoConstants::SCRYPT_N);
	}

	#[test]
	fn test_native_hashes_parse() {
		assert_ne!(*NEO_TOKEN_HASH, *GAS_TOKEN_HASH);
	}
}
