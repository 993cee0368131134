//! Permission flags passed to `System.Contract.Call`.

use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

/// What a called contract is allowed to do on behalf of the caller.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum CallFlags {
	/// No permissions.
	None = 0x00,
	/// May read chain state.
	ReadStates = 0x01,
	/// May write chain state.
	WriteStates = 0x02,
	/// May call other contracts.
	AllowCall = 0x04,
	/// May emit notifications.
	AllowNotify = 0x08,
	/// Read and write chain state.
	States = 0x03,
	/// Read state and call other contracts.
	ReadOnly = 0x05,
	/// Everything; the usual flag for invocations.
	All = 0x0F,
}

impl CallFlags {
	/// The flag byte.
	pub fn value(self) -> u8 {
		self as u8
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_values() {
		assert_eq!(CallFlags::All.value(), 0x0F);
		assert_eq!(CallFlags::States.value(), CallFlags::ReadStates.value() | CallFlags::WriteStates.value());
		assert_eq!(
			CallFlags::ReadOnly.value(),
			CallFlags::ReadStates.value() | CallFlags::AllowCall.value()
		);
	}
}
