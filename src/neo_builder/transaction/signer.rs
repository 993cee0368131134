//! Transaction signers.
//!
//! A signer names an account (by script hash) whose witness the transaction
//! carries, plus the scope that bounds what that witness authorizes. The
//! scope-dependent fields (allowed contracts, allowed groups, witness
//! rules) are each capped at 16 entries, and `Global` excludes everything
//! else.

use primitive_types::H160;
use serde::{Deserialize, Serialize};

use crate::{
	neo_builder::{
		error::BuilderError,
		transaction::{
			witness_rule::{WitnessCondition, WitnessRule},
			witness_scope::WitnessScope,
		},
	},
	neo_codec::{var_int_size, CodecError, Decoder, Encoder, NeoSerializable, VarSizeTrait},
	neo_config::NeoConstants,
	neo_crypto::Secp256r1PublicKey,
	neo_types::ScriptHash,
};

/// A transaction signer with its witness scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signer {
	signer_hash: ScriptHash,
	scopes: Vec<WitnessScope>,
	allowed_contracts: Vec<ScriptHash>,
	allowed_groups: Vec<Secp256r1PublicKey>,
	rules: Vec<WitnessRule>,
}

impl Signer {
	/// A fee-only signer: pays fees, authorizes nothing.
	pub fn none(signer_hash: ScriptHash) -> Self {
		Self::with_scope(signer_hash, WitnessScope::None)
	}

	/// A signer valid in the entry script's direct calls.
	pub fn called_by_entry(signer_hash: ScriptHash) -> Self {
		Self::with_scope(signer_hash, WitnessScope::CalledByEntry)
	}

	/// A signer valid everywhere.
	pub fn global(signer_hash: ScriptHash) -> Self {
		Self::with_scope(signer_hash, WitnessScope::Global)
	}

	fn with_scope(signer_hash: ScriptHash, scope: WitnessScope) -> Self {
		Self {
			signer_hash,
			scopes: vec![scope],
			allowed_contracts: Vec::new(),
			allowed_groups: Vec::new(),
			rules: Vec::new(),
		}
	}

	/// The signer's account script hash.
	pub fn signer_hash(&self) -> &ScriptHash {
		&self.signer_hash
	}

	/// The scopes in effect.
	pub fn scopes(&self) -> &[WitnessScope] {
		&self.scopes
	}

	/// Contracts the witness is valid in under `CustomContracts`.
	pub fn allowed_contracts(&self) -> &[ScriptHash] {
		&self.allowed_contracts
	}

	/// Groups the witness is valid in under `CustomGroups`.
	pub fn allowed_groups(&self) -> &[Secp256r1PublicKey] {
		&self.allowed_groups
	}

	/// The witness rules in effect under `WitnessRules`.
	pub fn rules(&self) -> &[WitnessRule] {
		&self.rules
	}

	/// Whether the signer carries the given scope.
	pub fn has_scope(&self, scope: WitnessScope) -> bool {
		self.scopes.contains(&scope)
	}

	/// Restricts the witness to the given contracts, adding the
	/// `CustomContracts` scope.
	pub fn set_allowed_contracts(
		&mut self,
		contracts: Vec<ScriptHash>,
	) -> Result<&mut Self, BuilderError> {
		if self.has_scope(WitnessScope::Global) {
			return Err(BuilderError::IllegalState(
				"a signer with global scope cannot name allowed contracts".to_string(),
			));
		}
		if self.allowed_contracts.len() + contracts.len()
			> NeoConstants::MAX_SIGNER_SUBITEMS as usize
		{
			return Err(BuilderError::IllegalArgument(format!(
				"a signer takes at most {} allowed contracts",
				NeoConstants::MAX_SIGNER_SUBITEMS
			)));
		}

		self.scopes.retain(|scope| *scope != WitnessScope::None);
		if !self.has_scope(WitnessScope::CustomContracts) {
			self.scopes.push(WitnessScope::CustomContracts);
		}
		self.allowed_contracts.extend(contracts);
		Ok(self)
	}

	/// Restricts the witness to the given contract groups, adding the
	/// `CustomGroups` scope.
	pub fn set_allowed_groups(
		&mut self,
		groups: Vec<Secp256r1PublicKey>,
	) -> Result<&mut Self, BuilderError> {
		if self.has_scope(WitnessScope::Global) {
			return Err(BuilderError::IllegalState(
				"a signer with global scope cannot name allowed groups".to_string(),
			));
		}
		if self.allowed_groups.len() + groups.len() > NeoConstants::MAX_SIGNER_SUBITEMS as usize
		{
			return Err(BuilderError::IllegalArgument(format!(
				"a signer takes at most {} allowed groups",
				NeoConstants::MAX_SIGNER_SUBITEMS
			)));
		}

		self.scopes.retain(|scope| *scope != WitnessScope::None);
		if !self.has_scope(WitnessScope::CustomGroups) {
			self.scopes.push(WitnessScope::CustomGroups);
		}
		self.allowed_groups.extend(groups);
		Ok(self)
	}

	/// Attaches witness rules, adding the `WitnessRules` scope. Rules are
	/// capped at 16 and their conditions at nesting depth 2.
	pub fn set_rules(&mut self, rules: Vec<WitnessRule>) -> Result<&mut Self, BuilderError> {
		if self.has_scope(WitnessScope::Global) {
			return Err(BuilderError::IllegalState(
				"a signer with global scope cannot carry witness rules".to_string(),
			));
		}
		if self.rules.len() + rules.len() > NeoConstants::MAX_SIGNER_SUBITEMS as usize {
			return Err(BuilderError::IllegalArgument(format!(
				"a signer takes at most {} witness rules",
				NeoConstants::MAX_SIGNER_SUBITEMS
			)));
		}
		for rule in &rules {
			check_depth(&rule.condition, NeoConstants::MAX_NESTING_DEPTH_FOR_SIGNERS)?;
		}

		self.scopes.retain(|scope| *scope != WitnessScope::None);
		if !self.has_scope(WitnessScope::WitnessRules) {
			self.scopes.push(WitnessScope::WitnessRules);
		}
		self.rules.extend(rules);
		Ok(self)
	}
}

fn check_depth(condition: &WitnessCondition, max_depth: u8) -> Result<(), BuilderError> {
	if condition.depth() > max_depth {
		return Err(BuilderError::IllegalArgument(format!(
			"witness conditions on a signer may nest at most {max_depth} levels"
		)));
	}
	Ok(())
}

impl NeoSerializable for Signer {
	type Error = CodecError;

	fn size(&self) -> usize {
		let mut size = NeoConstants::HASH160_SIZE as usize + 1;
		if self.has_scope(WitnessScope::CustomContracts) {
			size += self.allowed_contracts.var_size();
		}
		if self.has_scope(WitnessScope::CustomGroups) {
			size += var_int_size(self.allowed_groups.len() as u64)
				+ self.allowed_groups.len() * 33;
		}
		if self.has_scope(WitnessScope::WitnessRules) {
			size += self.rules.var_size();
		}
		size
	}

	fn encode(&self, writer: &mut Encoder) {
		self.signer_hash.encode(writer);
		writer.write_u8(WitnessScope::combine(&self.scopes));
		if self.has_scope(WitnessScope::CustomContracts) {
			writer.write_serializable_variable_list(&self.allowed_contracts);
		}
		if self.has_scope(WitnessScope::CustomGroups) {
			writer.write_var_int(self.allowed_groups.len() as u64);
			for group in &self.allowed_groups {
				writer.write_bytes(&group.get_encoded(true));
			}
		}
		if self.has_scope(WitnessScope::WitnessRules) {
			writer.write_serializable_variable_list(&self.rules);
		}
	}

	fn decode(reader: &mut Decoder<'_>) -> Result<Self, Self::Error> {
		let signer_hash = H160::decode(reader)?;
		let scopes = WitnessScope::split(reader.read_u8()?)
			.map_err(|e| CodecError::InvalidEncoding(e.to_string()))?;

		let mut signer = Signer {
			signer_hash,
			scopes,
			allowed_contracts: Vec::new(),
			allowed_groups: Vec::new(),
			rules: Vec::new(),
		};

		if signer.has_scope(WitnessScope::CustomContracts) {
			signer.allowed_contracts = reader.read_serializable_list::<H160>()?;
			if signer.allowed_contracts.len() > NeoConstants::MAX_SIGNER_SUBITEMS as usize {
				return Err(CodecError::InvalidEncoding(
					"too many allowed contracts on a signer".to_string(),
				));
			}
		}
		if signer.has_scope(WitnessScope::CustomGroups) {
			let count = reader.read_var_int()?;
			if count > NeoConstants::MAX_SIGNER_SUBITEMS as u64 {
				return Err(CodecError::InvalidEncoding(
					"too many allowed groups on a signer".to_string(),
				));
			}
			for _ in 0..count {
				let point = reader.read_encoded_ec_point()?;
				let key = Secp256r1PublicKey::from_bytes(&point).map_err(|_| {
					CodecError::InvalidEncoding("invalid group public key".to_string())
				})?;
				signer.allowed_groups.push(key);
			}
		}
		if signer.has_scope(WitnessScope::WitnessRules) {
			signer.rules = reader.read_serializable_list::<WitnessRule>()?;
			if signer.rules.len() > NeoConstants::MAX_SIGNER_SUBITEMS as usize {
				return Err(CodecError::InvalidEncoding(
					"too many witness rules on a signer".to_string(),
				));
			}
		}

		Ok(signer)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::neo_builder::transaction::witness_rule::WitnessAction;

	fn hash() -> ScriptHash {
		ScriptHash::repeat_byte(0x42)
	}

	#[test]
	fn test_called_by_entry_wire_form() {
		let signer = Signer::called_by_entry(hash());
		let bytes = signer.to_array();
		assert_eq!(bytes.len(), 21);
		assert_eq!(bytes[..20], hash().to_array()[..]);
		assert_eq!(bytes[20], 0x01);
	}

	#[test]
	fn test_round_trip_simple_scopes() {
		for signer in [Signer::none(hash()), Signer::called_by_entry(hash()), Signer::global(hash())]
		{
			let bytes = signer.to_array();
			assert_eq!(bytes.len(), signer.size());
			let decoded = Signer::decode(&mut Decoder::new(&bytes)).unwrap();
			assert_eq!(decoded, signer);
		}
	}

	#[test]
	fn test_round_trip_custom_contracts() {
		let mut signer = Signer::called_by_entry(hash());
		signer
			.set_allowed_contracts(vec![ScriptHash::repeat_byte(1), ScriptHash::repeat_byte(2)])
			.unwrap();

		let bytes = signer.to_array();
		assert_eq!(bytes.len(), signer.size());
		let decoded = Signer::decode(&mut Decoder::new(&bytes)).unwrap();
		assert_eq!(decoded, signer);
		assert!(decoded.has_scope(WitnessScope::CustomContracts));
		assert_eq!(decoded.allowed_contracts().len(), 2);
	}

	#[test]
	fn test_round_trip_rules() {
		let mut signer = Signer::none(hash());
		signer
			.set_rules(vec![WitnessRule::new(
				WitnessAction::Allow,
				WitnessCondition::CalledByEntry,
			)])
			.unwrap();

		let bytes = signer.to_array();
		let decoded = Signer::decode(&mut Decoder::new(&bytes)).unwrap();
		assert_eq!(decoded, signer);
		// Attaching rules replaces the fee-only scope.
		assert!(!decoded.has_scope(WitnessScope::None));
	}

	#[test]
	fn test_global_excludes_restrictions() {
		let mut signer = Signer::global(hash());
		assert!(signer.set_allowed_contracts(vec![ScriptHash::repeat_byte(1)]).is_err());
		assert!(signer.set_allowed_groups(vec![]).is_err());
		assert!(signer
			.set_rules(vec![WitnessRule::new(
				WitnessAction::Allow,
				WitnessCondition::Boolean(true)
			)])
			.is_err());
	}

	#[test]
	fn test_subitem_limits() {
		let mut signer = Signer::called_by_entry(hash());
		let contracts: Vec<_> = (0u8..17).map(ScriptHash::repeat_byte).collect();
		assert!(signer.set_allowed_contracts(contracts).is_err());

		let rules: Vec<_> = (0..17)
			.map(|_| WitnessRule::new(WitnessAction::Allow, WitnessCondition::CalledByEntry))
			.collect();
		assert!(signer.set_rules(rules).is_err());
	}

	#[test]
	fn test_rule_depth_limit() {
		let mut signer = Signer::called_by_entry(hash());
		let too_deep = WitnessCondition::And(vec![WitnessCondition::Or(vec![
			WitnessCondition::Not(Box::new(WitnessCondition::Boolean(true))),
		])]);
		assert!(signer
			.set_rules(vec![WitnessRule::new(WitnessAction::Allow, too_deep)])
			.is_err());
	}

	#[test]
	fn test_decode_rejects_global_combination() {
		let mut bytes = Signer::global(hash()).to_array();
		bytes[20] = 0x81;
		assert!(Signer::decode(&mut Decoder::new(&bytes)).is_err());
	}
}
