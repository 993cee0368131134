//! Witness rules.
//!
//! Under the `WitnessRules` scope a signer attaches allow/deny rules whose
//! conditions form a small AST. The node verifies them; this crate builds
//! and serializes them, enforcing the depth limit that applies to rules
//! carried by signers.

use primitive_types::H160;
use serde::{Deserialize, Serialize};

use crate::{
	neo_codec::{CodecError, Decoder, Encoder, NeoSerializable, var_int_size},
	neo_config::NeoConstants,
	neo_crypto::Secp256r1PublicKey,
};

/// Whether a matching condition allows or denies witnessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum WitnessAction {
	/// The witness is rejected where the condition holds.
	Deny = 0,
	/// The witness is accepted where the condition holds.
	Allow = 1,
}

/// A condition over the calling context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WitnessCondition {
	/// Constant true or false.
	Boolean(bool),
	/// Negation.
	Not(Box<WitnessCondition>),
	/// Conjunction of up to 16 sub-conditions.
	And(Vec<WitnessCondition>),
	/// Disjunction of up to 16 sub-conditions.
	Or(Vec<WitnessCondition>),
	/// The executing contract has this script hash.
	ScriptHash(H160),
	/// The executing contract belongs to this group.
	Group(Secp256r1PublicKey),
	/// The calling context is the transaction entry script.
	CalledByEntry,
	/// The direct caller has this script hash.
	CalledByContract(H160),
	/// The direct caller belongs to this group.
	CalledByGroup(Secp256r1PublicKey),
}

impl WitnessCondition {
	const BOOLEAN: u8 = 0x00;
	const NOT: u8 = 0x01;
	const AND: u8 = 0x02;
	const OR: u8 = 0x03;
	const SCRIPT_HASH: u8 = 0x18;
	const GROUP: u8 = 0x19;
	const CALLED_BY_ENTRY: u8 = 0x20;
	const CALLED_BY_CONTRACT: u8 = 0x28;
	const CALLED_BY_GROUP: u8 = 0x29;

	/// Most sub-conditions an `And`/`Or` may carry.
	pub const MAX_SUBITEMS: usize = 16;

	/// The wire tag of this condition.
	pub fn tag(&self) -> u8 {
		match self {
			WitnessCondition::Boolean(_) => Self::BOOLEAN,
			WitnessCondition::Not(_) => Self::NOT,
			WitnessCondition::And(_) => Self::AND,
			WitnessCondition::Or(_) => Self::OR,
			WitnessCondition::ScriptHash(_) => Self::SCRIPT_HASH,
			WitnessCondition::Group(_) => Self::GROUP,
			WitnessCondition::CalledByEntry => Self::CALLED_BY_ENTRY,
			WitnessCondition::CalledByContract(_) => Self::CALLED_BY_CONTRACT,
			WitnessCondition::CalledByGroup(_) => Self::CALLED_BY_GROUP,
		}
	}

	/// Nesting depth of this condition; leaves have depth 0.
	pub fn depth(&self) -> u8 {
		match self {
			WitnessCondition::Not(inner) => 1 + inner.depth(),
			WitnessCondition::And(items) | WitnessCondition::Or(items) =>
				1 + items.iter().map(WitnessCondition::depth).max().unwrap_or(0),
			_ => 0,
		}
	}

	fn decode_with_depth(reader: &mut Decoder<'_>, max_depth: u8) -> Result<Self, CodecError> {
		let tag = reader.read_u8()?;
		match tag {
			Self::BOOLEAN => Ok(WitnessCondition::Boolean(reader.read_bool()?)),
			Self::NOT => {
				if max_depth == 0 {
					return Err(CodecError::InvalidEncoding(
						"witness condition exceeds the permitted nesting depth".to_string(),
					));
				}
				Ok(WitnessCondition::Not(Box::new(Self::decode_with_depth(
					reader,
					max_depth - 1,
				)?)))
			},
			Self::AND | Self::OR => {
				if max_depth == 0 {
					return Err(CodecError::InvalidEncoding(
						"witness condition exceeds the permitted nesting depth".to_string(),
					));
				}
				let count = reader.read_var_int()?;
				if count == 0 || count > Self::MAX_SUBITEMS as u64 {
					return Err(CodecError::InvalidEncoding(format!(
						"a compound condition takes 1 to {} sub-conditions",
						Self::MAX_SUBITEMS
					)));
				}
				let mut items = Vec::with_capacity(count as usize);
				for _ in 0..count {
					items.push(Self::decode_with_depth(reader, max_depth - 1)?);
				}
				Ok(if tag == Self::AND {
					WitnessCondition::And(items)
				} else {
					WitnessCondition::Or(items)
				})
			},
			Self::SCRIPT_HASH => Ok(WitnessCondition::ScriptHash(H160::decode(reader)?)),
			Self::GROUP => {
				let point = reader.read_encoded_ec_point()?;
				let key = Secp256r1PublicKey::from_bytes(&point).map_err(|_| {
					CodecError::InvalidEncoding("invalid group public key".to_string())
				})?;
				Ok(WitnessCondition::Group(key))
			},
			Self::CALLED_BY_ENTRY => Ok(WitnessCondition::CalledByEntry),
			Self::CALLED_BY_CONTRACT =>
				Ok(WitnessCondition::CalledByContract(H160::decode(reader)?)),
			Self::CALLED_BY_GROUP => {
				let point = reader.read_encoded_ec_point()?;
				let key = Secp256r1PublicKey::from_bytes(&point).map_err(|_| {
					CodecError::InvalidEncoding("invalid group public key".to_string())
				})?;
				Ok(WitnessCondition::CalledByGroup(key))
			},
			other =>
				Err(CodecError::InvalidEncoding(format!("unknown condition tag 0x{other:02x}"))),
		}
	}
}

impl NeoSerializable for WitnessCondition {
	type Error = CodecError;

	fn size(&self) -> usize {
		1 + match self {
			WitnessCondition::Boolean(_) => 1,
			WitnessCondition::Not(inner) => inner.size(),
			WitnessCondition::And(items) | WitnessCondition::Or(items) =>
				var_int_size(items.len() as u64)
					+ items.iter().map(NeoSerializable::size).sum::<usize>(),
			WitnessCondition::ScriptHash(_) | WitnessCondition::CalledByContract(_) => 20,
			WitnessCondition::Group(_) | WitnessCondition::CalledByGroup(_) => 33,
			WitnessCondition::CalledByEntry => 0,
		}
	}

	fn encode(&self, writer: &mut Encoder) {
		writer.write_u8(self.tag());
		match self {
			WitnessCondition::Boolean(value) => writer.write_bool(*value),
			WitnessCondition::Not(inner) => inner.encode(writer),
			WitnessCondition::And(items) | WitnessCondition::Or(items) => {
				writer.write_var_int(items.len() as u64);
				for item in items {
					item.encode(writer);
				}
			},
			WitnessCondition::ScriptHash(hash) | WitnessCondition::CalledByContract(hash) =>
				hash.encode(writer),
			WitnessCondition::Group(key) | WitnessCondition::CalledByGroup(key) =>
				writer.write_bytes(&key.get_encoded(true)),
			WitnessCondition::CalledByEntry => {},
		}
	}

	fn decode(reader: &mut Decoder<'_>) -> Result<Self, Self::Error> {
		Self::decode_with_depth(reader, NeoConstants::MAX_NESTING_DEPTH_FOR_SIGNERS)
	}
}

/// One allow/deny rule attached to a signer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WitnessRule {
	/// Whether a match allows or denies.
	pub action: WitnessAction,
	/// The condition to match.
	pub condition: WitnessCondition,
}

impl WitnessRule {
	/// Builds a rule.
	pub fn new(action: WitnessAction, condition: WitnessCondition) -> Self {
		Self { action, condition }
	}
}

impl NeoSerializable for WitnessRule {
	type Error = CodecError;

	fn size(&self) -> usize {
		1 + self.condition.size()
	}

	fn encode(&self, writer: &mut Encoder) {
		writer.write_u8(self.action as u8);
		self.condition.encode(writer);
	}

	fn decode(reader: &mut Decoder<'_>) -> Result<Self, Self::Error> {
		let action = match reader.read_u8()? {
			0 => WitnessAction::Deny,
			1 => WitnessAction::Allow,
			other =>
				return Err(CodecError::InvalidEncoding(format!(
					"unknown witness action 0x{other:02x}"
				))),
		};
		let condition = WitnessCondition::decode(reader)?;
		Ok(Self { action, condition })
	}
}
