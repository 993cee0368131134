//! Witness scopes.
//!
//! A signer's scope bounds where its witness is valid. Scopes are bit
//! flags combined into a single byte on the wire; `Global` must stand
//! alone and `None` means fee-only.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::neo_builder::error::BuilderError;

/// Per-signer authorization scope.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[repr(u8)]
pub enum WitnessScope {
	/// Fee-only: the witness pays but authorizes nothing.
	#[strum(serialize = "None")]
	None = 0x00,
	/// Valid only in the entry script's direct calls.
	#[strum(serialize = "CalledByEntry")]
	CalledByEntry = 0x01,
	/// Valid only inside the contracts listed on the signer.
	#[strum(serialize = "CustomContracts")]
	CustomContracts = 0x10,
	/// Valid only inside contracts of the listed groups.
	#[strum(serialize = "CustomGroups")]
	CustomGroups = 0x20,
	/// Valid where the signer's witness rules allow.
	#[strum(serialize = "WitnessRules")]
	WitnessRules = 0x40,
	/// Valid everywhere. Must not be combined with any other scope.
	#[strum(serialize = "Global")]
	Global = 0x80,
}

impl WitnessScope {
	/// The scope's flag bit.
	pub fn byte(self) -> u8 {
		self as u8
	}

	/// Folds a set of scopes into the wire byte.
	pub fn combine(scopes: &[WitnessScope]) -> u8 {
		scopes.iter().fold(0, |acc, scope| acc | scope.byte())
	}

	/// Splits a wire byte into scopes, rejecting unknown bits and the
	/// combination of `Global` with anything else.
	pub fn split(byte: u8) -> Result<Vec<WitnessScope>, BuilderError> {
		const ALL: [WitnessScope; 6] = [
			WitnessScope::None,
			WitnessScope::CalledByEntry,
			WitnessScope::CustomContracts,
			WitnessScope::CustomGroups,
			WitnessScope::WitnessRules,
			WitnessScope::Global,
		];

		if byte == 0 {
			return Ok(vec![WitnessScope::None]);
		}

		let known: u8 = ALL.iter().map(|s| s.byte()).fold(0, |a, b| a | b);
		if byte & !known != 0 {
			return Err(BuilderError::IllegalArgument(format!(
				"unknown witness scope bits in 0x{byte:02x}"
			)));
		}
		if byte & WitnessScope::Global.byte() != 0 && byte != WitnessScope::Global.byte() {
			return Err(BuilderError::IllegalArgument(
				"the global scope cannot be combined with other scopes".to_string(),
			));
		}

		Ok(ALL.iter().copied().filter(|scope| byte & scope.byte() != 0).collect())
	}
}
