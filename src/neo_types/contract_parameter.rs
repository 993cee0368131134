//! Contract invocation parameters.
//!
//! A [`ContractParameter`] is the tagged value a caller hands to the script
//! builder. Construction enforces the invariants the VM would otherwise
//! reject at execution time: signatures are 64 bytes, public keys are valid
//! compressed points, and map keys are restricted to the primitive variants.
//! Maps preserve insertion order so the emitted script is deterministic.

use primitive_types::{H160, H256};
use serde::{Deserialize, Serialize};

use crate::{neo_crypto::Secp256r1PublicKey, neo_types::error::TypeError};

/// Wire-level type tag of a contract parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ContractParameterType {
	/// Absent or null value.
	Any = 0x00,
	/// Boolean.
	Boolean = 0x10,
	/// Signed integer.
	Integer = 0x11,
	/// Raw bytes.
	ByteArray = 0x12,
	/// UTF-8 string.
	String = 0x13,
	/// 160-bit hash.
	H160 = 0x14,
	/// 256-bit hash.
	H256 = 0x15,
	/// Compressed public key.
	PublicKey = 0x16,
	/// 64-byte ECDSA signature.
	Signature = 0x17,
	/// Ordered list of parameters.
	Array = 0x20,
	/// Ordered key-value pairs.
	Map = 0x22,
}

/// The value carried by a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterValue {
	/// Boolean.
	Boolean(bool),
	/// Signed 64-bit integer.
	Integer(i64),
	/// Raw bytes.
	ByteArray(Vec<u8>),
	/// UTF-8 string.
	String(String),
	/// 160-bit hash, big-endian storage.
	H160(H160),
	/// 256-bit hash, big-endian storage.
	H256(H256),
	/// Compressed SEC1 public key (33 bytes).
	PublicKey(Vec<u8>),
	/// Compact ECDSA signature (64 bytes).
	Signature(Vec<u8>),
	/// Nested parameters.
	Array(Vec<ContractParameter>),
	/// Ordered key-value pairs.
	Map(ContractParameterMap),
}

/// A tagged, immutable contract parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractParameter {
	typ: ContractParameterType,
	value: Option<ParameterValue>,
}

/// Ordered key-value pairs; keys must be primitive parameter variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractParameterMap(pub Vec<(ContractParameter, ContractParameter)>);

impl ContractParameterMap {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self(Vec::new())
	}

	/// Appends a key-value pair, rejecting non-primitive keys.
	pub fn insert(
		&mut self,
		key: ContractParameter,
		value: ContractParameter,
	) -> Result<(), TypeError> {
		if !key.is_primitive() {
			return Err(TypeError::InvalidArgument(
				"map keys must be boolean, integer, byte array or string parameters".to_string(),
			));
		}
		self.0.push((key, value));
		Ok(())
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the map has no entries.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl ContractParameter {
	/// An absent value, pushed as null.
	pub fn any() -> Self {
		Self { typ: ContractParameterType::Any, value: None }
	}

	/// A boolean parameter.
	pub fn bool(value: bool) -> Self {
		Self { typ: ContractParameterType::Boolean, value: Some(ParameterValue::Boolean(value)) }
	}

	/// An integer parameter.
	pub fn integer(value: i64) -> Self {
		Self { typ: ContractParameterType::Integer, value: Some(ParameterValue::Integer(value)) }
	}

	/// A byte-array parameter.
	pub fn byte_array(value: Vec<u8>) -> Self {
		Self { typ: ContractParameterType::ByteArray, value: Some(ParameterValue::ByteArray(value)) }
	}

	/// A string parameter.
	pub fn string(value: String) -> Self {
		Self { typ: ContractParameterType::String, value: Some(ParameterValue::String(value)) }
	}

	/// A 160-bit hash parameter.
	pub fn h160(value: &H160) -> Self {
		Self { typ: ContractParameterType::H160, value: Some(ParameterValue::H160(*value)) }
	}

	/// A 256-bit hash parameter.
	pub fn h256(value: &H256) -> Self {
		Self { typ: ContractParameterType::H256, value: Some(ParameterValue::H256(*value)) }
	}

	/// A public-key parameter from an already-validated key.
	pub fn public_key(value: &Secp256r1PublicKey) -> Self {
		Self {
			typ: ContractParameterType::PublicKey,
			value: Some(ParameterValue::PublicKey(value.get_encoded(true))),
		}
	}

	/// A public-key parameter from raw SEC1 bytes.
	pub fn public_key_from_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
		let key = Secp256r1PublicKey::from_bytes(bytes)
			.map_err(|_| TypeError::InvalidArgument("invalid public key".to_string()))?;
		Ok(Self::public_key(&key))
	}

	/// A signature parameter; the value must be exactly 64 bytes.
	pub fn signature(value: Vec<u8>) -> Result<Self, TypeError> {
		if value.len() != 64 {
			return Err(TypeError::InvalidArgument(
				"signature parameters must be 64 bytes".to_string(),
			));
		}
		Ok(Self { typ: ContractParameterType::Signature, value: Some(ParameterValue::Signature(value)) })
	}

	/// An array parameter.
	pub fn array(values: Vec<ContractParameter>) -> Self {
		Self { typ: ContractParameterType::Array, value: Some(ParameterValue::Array(values)) }
	}

	/// A map parameter; key restrictions were enforced on insert.
	pub fn map(map: ContractParameterMap) -> Self {
		Self { typ: ContractParameterType::Map, value: Some(ParameterValue::Map(map)) }
	}

	/// The type tag.
	pub fn get_type(&self) -> ContractParameterType {
		self.typ
	}

	/// The carried value, absent for `Any`.
	pub fn value(&self) -> Option<&ParameterValue> {
		self.value.as_ref()
	}

	/// Whether this parameter may be used as a map key.
	pub fn is_primitive(&self) -> bool {
		matches!(
			self.typ,
			ContractParameterType::Boolean
				| ContractParameterType::Integer
				| ContractParameterType::ByteArray
				| ContractParameterType::String
		)
	}
}

impl From<bool> for ContractParameter {
	fn from(value: bool) -> Self {
		Self::bool(value)
	}
}

impl From<i64> for ContractParameter {
	fn from(value: i64) -> Self {
		Self::integer(value)
	}
}

impl From<i32> for ContractParameter {
	fn from(value: i32) -> Self {
		Self::integer(value as i64)
	}
}

impl From<&str> for ContractParameter {
	fn from(value: &str) -> Self {
		Self::string(value.to_string())
	}
}

impl From<&H160> for ContractParameter {
	fn from(value: &H160) -> Self {
		Self::h160(value)
	}
}

impl From<&H256> for ContractParameter {
	fn from(value: &H256) -> Self {
		Self::h256(value)
	}
}

impl From<&[u8]> for ContractParameter {
	fn from(value: &[u8]) -> Self {
		Self::byte_array(value.to_vec())
	}
}
