//! Neo VM opcodes.
//!
//! Only the byte values matter to this crate: the script builder emits them
//! and the script reader recognizes them. The set covers the constant,
//! flow-control, stack and compound-type ranges that invocation and
//! verification scripts are made of.

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// A Neo VM opcode byte.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum OpCode {
	/// Pushes a 1-byte signed integer.
	PushInt8 = 0x00,
	/// Pushes a 2-byte signed integer.
	PushInt16 = 0x01,
	/// Pushes a 4-byte signed integer.
	PushInt32 = 0x02,
	/// Pushes an 8-byte signed integer.
	PushInt64 = 0x03,
	/// Pushes a 16-byte signed integer.
	PushInt128 = 0x04,
	/// Pushes a 32-byte signed integer.
	PushInt256 = 0x05,
	/// Pushes boolean true.
	PushTrue = 0x08,
	/// Pushes boolean false.
	PushFalse = 0x09,
	/// Pushes the address of a function.
	PushA = 0x0A,
	/// Pushes null.
	PushNull = 0x0B,
	/// Pushes data of up to 255 bytes, length in one prefix byte.
	PushData1 = 0x0C,
	/// Pushes data of up to 65535 bytes, length in two prefix bytes.
	PushData2 = 0x0D,
	/// Pushes data of up to 2^32-1 bytes, length in four prefix bytes.
	PushData4 = 0x0E,
	/// Pushes the constant -1.
	PushM1 = 0x0F,
	/// Pushes the constant 0.
	Push0 = 0x10,
	/// Pushes the constant 1.
	Push1 = 0x11,
	/// Pushes the constant 2.
	Push2 = 0x12,
	/// Pushes the constant 3.
	Push3 = 0x13,
	/// Pushes the constant 4.
	Push4 = 0x14,
	/// Pushes the constant 5.
	Push5 = 0x15,
	/// Pushes the constant 6.
	Push6 = 0x16,
	/// Pushes the constant 7.
	Push7 = 0x17,
	/// Pushes the constant 8.
	Push8 = 0x18,
	/// Pushes the constant 9.
	Push9 = 0x19,
	/// Pushes the constant 10.
	Push10 = 0x1A,
	/// Pushes the constant 11.
	Push11 = 0x1B,
	/// Pushes the constant 12.
	Push12 = 0x1C,
	/// Pushes the constant 13.
	Push13 = 0x1D,
	/// Pushes the constant 14.
	Push14 = 0x1E,
	/// Pushes the constant 15.
	Push15 = 0x1F,
	/// Pushes the constant 16.
	Push16 = 0x20,

	/// No operation.
	Nop = 0x21,
	/// Unconditional jump, 1-byte offset.
	Jmp = 0x22,
	/// Unconditional jump, 4-byte offset.
	JmpL = 0x23,
	/// Jump if true, 1-byte offset.
	JmpIf = 0x24,
	/// Jump if true, 4-byte offset.
	JmpIfL = 0x25,
	/// Jump if false, 1-byte offset.
	JmpIfNot = 0x26,
	/// Jump if false, 4-byte offset.
	JmpIfNotL = 0x27,
	/// Jump if equal, 1-byte offset.
	JmpEq = 0x28,
	/// Jump if equal, 4-byte offset.
	JmpEqL = 0x29,
	/// Jump if not equal, 1-byte offset.
	JmpNe = 0x2A,
	/// Jump if not equal, 4-byte offset.
	JmpNeL = 0x2B,
	/// Jump if greater, 1-byte offset.
	JmpGt = 0x2C,
	/// Jump if greater, 4-byte offset.
	JmpGtL = 0x2D,
	/// Jump if greater or equal, 1-byte offset.
	JmpGe = 0x2E,
	/// Jump if greater or equal, 4-byte offset.
	JmpGeL = 0x2F,
	/// Jump if less, 1-byte offset.
	JmpLt = 0x30,
	/// Jump if less, 4-byte offset.
	JmpLtL = 0x31,
	/// Jump if less or equal, 1-byte offset.
	JmpLe = 0x32,
	/// Jump if less or equal, 4-byte offset.
	JmpLeL = 0x33,
	/// Calls a function, 1-byte offset.
	Call = 0x34,
	/// Calls a function, 4-byte offset.
	CallL = 0x35,
	/// Calls the function whose address sits on the stack.
	CallA = 0x36,
	/// Calls a method token.
	CallT = 0x37,
	/// Aborts execution; cannot be caught.
	Abort = 0x38,
	/// Faults if the top of the stack is false.
	Assert = 0x39,
	/// Throws the top of the stack as an exception.
	Throw = 0x3A,
	/// Begins a try block, 1-byte offsets.
	Try = 0x3B,
	/// Begins a try block, 4-byte offsets.
	TryL = 0x3C,
	/// Ends a try block, 1-byte offset.
	EndTry = 0x3D,
	/// Ends a try block, 4-byte offset.
	EndTryL = 0x3E,
	/// Ends a finally block.
	EndFinally = 0x3F,
	/// Returns from the current context.
	Ret = 0x40,
	/// Invokes an interop service by its 4-byte hash.
	Syscall = 0x41,

	/// Pushes the stack depth.
	Depth = 0x43,
	/// Removes the top item.
	Drop = 0x45,
	/// Removes the second item.
	Nip = 0x46,
	/// Removes the item n back.
	XDrop = 0x48,
	/// Clears the stack.
	Clear = 0x49,
	/// Duplicates the top item.
	Dup = 0x4A,
	/// Copies the second item to the top.
	Over = 0x4B,
	/// Copies the item n back to the top.
	Pick = 0x4D,
	/// Copies the top item below the second.
	Tuck = 0x4E,
	/// Swaps the top two items.
	Swap = 0x50,
	/// Rotates the top three items.
	Rot = 0x51,
	/// Moves the item n back to the top.
	Roll = 0x52,
	/// Reverses the top three items.
	Reverse3 = 0x53,
	/// Reverses the top four items.
	Reverse4 = 0x54,
	/// Reverses the top n items.
	ReverseN = 0x55,

	/// Packs key-value pairs into a map.
	PackMap = 0xBE,
	/// Packs items into a struct.
	PackStruct = 0xBF,
	/// Packs items into an array.
	Pack = 0xC0,
	/// Unpacks an array or struct onto the stack.
	Unpack = 0xC1,
	/// Pushes an empty array.
	NewArray0 = 0xC2,
	/// Pushes an array of nulls.
	NewArray = 0xC3,
	/// Pushes a typed array of nulls.
	NewArrayT = 0xC4,
	/// Pushes an empty struct.
	NewStruct0 = 0xC5,
	/// Pushes a struct of nulls.
	NewStruct = 0xC6,
	/// Pushes an empty map.
	NewMap = 0xC8,
	/// Pushes the item count of a collection.
	Size = 0xCA,
	/// Tests whether a collection contains a key.
	HasKey = 0xCB,
	/// Pushes the keys of a map.
	Keys = 0xCC,
	/// Pushes the values of a collection.
	Values = 0xCD,
	/// Reads one element of a collection.
	PickItem = 0xCE,
	/// Appends to an array.
	Append = 0xCF,
	/// Writes one element of a collection.
	SetItem = 0xD0,
	/// Reverses a collection in place.
	ReverseItems = 0xD1,
	/// Removes one element of a collection.
	Remove = 0xD2,
	/// Empties a collection.
	ClearItems = 0xD3,
	/// Pops the last element of an array.
	PopItem = 0xD4,

	/// Tests the top item for null.
	IsNull = 0xD8,
	/// Tests the top item's type.
	IsType = 0xD9,
	/// Converts the top item to another type.
	Convert = 0xDB,
}

impl OpCode {
	/// The raw opcode byte.
	pub fn opcode(self) -> u8 {
		self.into()
	}

	/// Fixed operand width following the opcode, where one exists. The
	/// `PUSHDATA` widths are the length-prefix widths.
	pub fn operand_size(self) -> Option<usize> {
		match self {
			OpCode::PushInt8 | OpCode::PushData1 => Some(1),
			OpCode::PushInt16 | OpCode::PushData2 => Some(2),
			OpCode::PushInt32 | OpCode::PushData4 | OpCode::Syscall => Some(4),
			OpCode::PushInt64 => Some(8),
			OpCode::PushInt128 => Some(16),
			OpCode::PushInt256 => Some(32),
			OpCode::Jmp
			| OpCode::JmpIf
			| OpCode::JmpIfNot
			| OpCode::JmpEq
			| OpCode::JmpNe
			| OpCode::JmpGt
			| OpCode::JmpGe
			| OpCode::JmpLt
			| OpCode::JmpLe
			| OpCode::Call => Some(1),
			OpCode::JmpL
			| OpCode::JmpIfL
			| OpCode::JmpIfNotL
			| OpCode::JmpEqL
			| OpCode::JmpNeL
			| OpCode::JmpGtL
			| OpCode::JmpGeL
			| OpCode::JmpLtL
			| OpCode::JmpLeL
			| OpCode::CallL => Some(4),
			_ => None,
		}
	}
}

impl fmt::Display for OpCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{self:?}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_push_constant_range_is_contiguous() {
		assert_eq!(OpCode::Push0 as u8, 0x10);
		assert_eq!(OpCode::Push16 as u8, 0x20);
		assert_eq!(OpCode::Push16 as u8 - OpCode::Push0 as u8, 16);
		assert_eq!(OpCode::PushM1 as u8, OpCode::Push0 as u8 - 1);
	}

	#[test]
	fn test_wire_critical_values() {
		assert_eq!(OpCode::PushData1.opcode(), 0x0C);
		assert_eq!(OpCode::PushData2.opcode(), 0x0D);
		assert_eq!(OpCode::PushData4.opcode(), 0x0E);
		assert_eq!(OpCode::PushNull.opcode(), 0x0B);
		assert_eq!(OpCode::Syscall.opcode(), 0x41);
		assert_eq!(OpCode::Pack.opcode(), 0xC0);
		assert_eq!(OpCode::PackMap.opcode(), 0xBE);
		assert_eq!(OpCode::NewArray0.opcode(), 0xC2);
	}

	#[test]
	fn test_try_from_unknown_byte_fails() {
		assert!(OpCode::try_from(0x42u8).is_err());
		assert!(OpCode::try_from(0xFFu8).is_err());
	}

	#[test]
	fn test_operand_sizes() {
		assert_eq!(OpCode::PushInt8.operand_size(), Some(1));
		assert_eq!(OpCode::PushInt256.operand_size(), Some(32));
		assert_eq!(OpCode::Syscall.operand_size(), Some(4));
		assert_eq!(OpCode::Jmp.operand_size(), Some(1));
		assert_eq!(OpCode::Pack.operand_size(), None);
	}
}
