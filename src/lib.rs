//! # neo3-core
//!
//! The transaction-construction and cryptography core of a Neo N3 SDK.
//!
//! ## Overview
//!
//! Everything in this crate sits on the consensus-critical path between a
//! private key and the byte stream a Neo node accepts:
//!
//! - secp256r1 key pairs, canonical ECDSA signatures, WIF and NEP-2 key
//!   encodings, BIP-39 mnemonics and BIP-32 derivation
//! - the Neo VM script builder emitting byte-exact invocation and
//!   verification scripts
//! - the binary reader/writer enforcing Neo's canonical var-int encoding
//! - the transaction builder composing signers, attributes and witnesses
//!   into a signed, serialized transaction
//!
//! Submitting transactions and reading chain state belong to an RPC layer
//! outside this crate; the values that layer normally supplies (the network
//! magic, the current block height, simulated fees) are plain inputs here.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use neo3_core::prelude::*;
//!
//! let account = Account::from_wif("L3tgppXLgdaeqSGSFw1Go3skBiy8vQAM7YMXvTHsKQtE16PBncSU")?;
//! let recipient = ScriptHash::from_address("NbTiM6h8r99kpRtb428XcsUk1TzKed2gTc")?;
//! let gas = ScriptHash::from_hex("d2a4cff31913016155e38e474a2c06d08be276cf")?;
//!
//! let mut script = ScriptBuilder::new();
//! script.contract_call(
//!     &gas,
//!     "transfer",
//!     &[
//!         ContractParameter::h160(&account.get_script_hash()),
//!         ContractParameter::h160(&recipient),
//!         ContractParameter::integer(1_0000_0000),
//!         ContractParameter::any(),
//!     ],
//!     None,
//! )?;
//!
//! let mut builder = TransactionBuilder::new();
//! builder
//!     .set_script(script.to_bytes())
//!     .network_magic(NeoConstants::MAGIC_NUMBER_MAINNET);
//! builder.valid_until_block(current_height + 5760)?;
//! builder.system_fee(simulated_gas)?;
//! builder.network_fee(calculated_fee)?;
//! builder.add_signer_with_key(
//!     Signer::called_by_entry(account.get_script_hash()),
//!     account.key_pair().unwrap().clone(),
//! )?;
//!
//! let tx = builder.sign()?;
//! let raw = tx.to_array(); // hand to the RPC layer
//! ```

#![warn(missing_docs, rust_2018_idioms)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod neo_builder;
pub mod neo_codec;
pub mod neo_config;
pub mod neo_crypto;
pub mod neo_error;
pub mod neo_protocol;
pub mod neo_types;
pub mod neo_wallets;

pub mod prelude;

// Short aliases mirroring the module layout.
#[doc(inline)]
pub use neo_builder as builder;
#[doc(inline)]
pub use neo_codec as codec;
#[doc(inline)]
pub use neo_config as config;
#[doc(inline)]
pub use neo_crypto as crypto;
#[doc(inline)]
pub use neo_protocol as protocol;
#[doc(inline)]
pub use neo_types as types;
#[doc(inline)]
pub use neo_wallets as wallets;
