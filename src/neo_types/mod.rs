//! Value types shared across the SDK: hashes, addresses, contract
//! parameters and NEP-9 URIs.

pub use address::Address;
pub use base64_utils::{FromBase64, ToBase64};
pub use contract_parameter::{
	ContractParameter, ContractParameterMap, ContractParameterType, ParameterValue,
};
pub use error::TypeError;
pub use script_hash::{ScriptHash, ScriptHashExtension};
pub use tx_hash::{TxHash, TxHashExtension};
pub use uri::NeoUri;

mod address;
mod base64_utils;
mod contract_parameter;
mod error;
mod script_hash;
mod tx_hash;
mod uri;

/// Raw byte buffer alias used across the builder APIs.
pub type Bytes = Vec<u8>;
