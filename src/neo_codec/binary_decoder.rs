//! Binary decoder for the Neo wire format.
//!
//! The decoder is the strict counterpart of [`Encoder`](crate::neo_codec::Encoder):
//! every read is bounds-checked and var-ints are rejected unless they are
//! the shortest encoding of their value. Decoding never panics on malformed
//! input.

use num_bigint::BigInt;

use crate::neo_codec::{encode::NeoSerializable, error::CodecError, op_code::OpCode};

/// A cursor over a byte slice with typed little-endian readers.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
	data: &'a [u8],
	pointer: usize,
	marker: usize,
}

impl<'a> Decoder<'a> {
	/// Creates a decoder over `data`.
	pub fn new(data: &'a [u8]) -> Self {
		Self { data, pointer: 0, marker: 0 }
	}

	/// Current read offset.
	pub fn pointer(&self) -> usize {
		self.pointer
	}

	/// Bytes remaining after the read pointer.
	pub fn available(&self) -> usize {
		self.data.len() - self.pointer
	}

	/// Remembers the current offset for a later [`reset`](Self::reset).
	pub fn mark(&mut self) {
		self.marker = self.pointer;
	}

	/// Rewinds to the last [`mark`](Self::mark).
	pub fn reset(&mut self) {
		self.pointer = self.marker;
	}

	/// Reads one byte.
	pub fn read_u8(&mut self) -> Result<u8, CodecError> {
		if self.pointer >= self.data.len() {
			return Err(CodecError::IndexOutOfBounds);
		}
		let value = self.data[self.pointer];
		self.pointer += 1;
		Ok(value)
	}

	/// Reads a boolean byte; only `0` and `1` are accepted.
	pub fn read_bool(&mut self) -> Result<bool, CodecError> {
		match self.read_u8()? {
			0 => Ok(false),
			1 => Ok(true),
			other =>
				Err(CodecError::InvalidEncoding(format!("invalid boolean byte 0x{other:02x}"))),
		}
	}

	/// Reads a signed byte.
	pub fn read_i8(&mut self) -> Result<i8, CodecError> {
		Ok(self.read_u8()? as i8)
	}

	/// Reads a little-endian unsigned 16-bit integer.
	pub fn read_u16(&mut self) -> Result<u16, CodecError> {
		let bytes: [u8; 2] = self
			.read_bytes(2)?
			.try_into()
			.map_err(|_| CodecError::IndexOutOfBounds)?;
		Ok(u16::from_le_bytes(bytes))
	}

	/// Reads a little-endian signed 16-bit integer.
	pub fn read_i16(&mut self) -> Result<i16, CodecError> {
		Ok(self.read_u16()? as i16)
	}

	/// Reads a little-endian unsigned 32-bit integer.
	pub fn read_u32(&mut self) -> Result<u32, CodecError> {
		let bytes: [u8; 4] = self
			.read_bytes(4)?
			.try_into()
			.map_err(|_| CodecError::IndexOutOfBounds)?;
		Ok(u32::from_le_bytes(bytes))
	}

	/// Reads a little-endian signed 32-bit integer.
	pub fn read_i32(&mut self) -> Result<i32, CodecError> {
		Ok(self.read_u32()? as i32)
	}

	/// Reads a little-endian unsigned 64-bit integer.
	pub fn read_u64(&mut self) -> Result<u64, CodecError> {
		let bytes: [u8; 8] = self
			.read_bytes(8)?
			.try_into()
			.map_err(|_| CodecError::IndexOutOfBounds)?;
		Ok(u64::from_le_bytes(bytes))
	}

	/// Reads a little-endian signed 64-bit integer.
	pub fn read_i64(&mut self) -> Result<i64, CodecError> {
		Ok(self.read_u64()? as i64)
	}

	/// Reads `length` raw bytes.
	pub fn read_bytes(&mut self, length: usize) -> Result<Vec<u8>, CodecError> {
		if length > self.available() {
			return Err(CodecError::IndexOutOfBounds);
		}
		let result = self.data[self.pointer..self.pointer + length].to_vec();
		self.pointer += length;
		Ok(result)
	}

	/// Reads a var-int, rejecting non-canonical encodings such as
	/// `FD 01 00`.
	pub fn read_var_int(&mut self) -> Result<u64, CodecError> {
		let first = self.read_u8()?;
		match first {
			0xFD => {
				let value = self.read_u16()? as u64;
				if value < 0xFD {
					return Err(CodecError::NonCanonicalVarInt);
				}
				Ok(value)
			},
			0xFE => {
				let value = self.read_u32()? as u64;
				if value <= 0xFFFF {
					return Err(CodecError::NonCanonicalVarInt);
				}
				Ok(value)
			},
			0xFF => {
				let value = self.read_u64()?;
				if value <= 0xFFFF_FFFF {
					return Err(CodecError::NonCanonicalVarInt);
				}
				Ok(value)
			},
			_ => Ok(first as u64),
		}
	}

	/// Reads a var-int length prefix followed by that many bytes.
	pub fn read_var_bytes(&mut self) -> Result<Vec<u8>, CodecError> {
		let len = self.read_var_int()?;
		if len > self.available() as u64 {
			return Err(CodecError::IndexOutOfBounds);
		}
		self.read_bytes(len as usize)
	}

	/// Reads a var-bytes value and interprets it as UTF-8.
	pub fn read_var_string(&mut self) -> Result<String, CodecError> {
		let bytes = self.read_var_bytes()?;
		String::from_utf8(bytes).map_err(|e| CodecError::InvalidEncoding(e.to_string()))
	}

	/// Reads a SEC1-prefixed compressed EC point (33 bytes).
	pub fn read_encoded_ec_point(&mut self) -> Result<Vec<u8>, CodecError> {
		let tag = self.read_u8()?;
		match tag {
			0x02 | 0x03 => {
				let mut point = vec![tag];
				point.extend(self.read_bytes(32)?);
				Ok(point)
			},
			_ => Err(CodecError::InvalidEncoding("invalid encoded EC point".to_string())),
		}
	}

	/// Reads a `PUSHDATA`-prefixed byte string from a script.
	pub fn read_push_bytes(&mut self) -> Result<Vec<u8>, CodecError> {
		let opcode_byte = self.read_u8()?;
		let opcode = OpCode::try_from(opcode_byte).map_err(|_| CodecError::InvalidOpCode)?;
		let len = match opcode {
			OpCode::PushData1 => self.read_u8()? as u64,
			OpCode::PushData2 => self.read_u16()? as u64,
			OpCode::PushData4 => self.read_u32()? as u64,
			_ => return Err(CodecError::InvalidOpCode),
		};
		if len > self.available() as u64 {
			return Err(CodecError::IndexOutOfBounds);
		}
		self.read_bytes(len as usize)
	}

	/// Reads a pushed string from a script.
	pub fn read_push_string(&mut self) -> Result<String, CodecError> {
		let bytes = self.read_push_bytes()?;
		String::from_utf8(bytes)
			.map_err(|_| CodecError::InvalidEncoding("invalid UTF-8".to_string()))
	}

	/// Reads a pushed integer from a script, covering `PUSHM1`,
	/// `PUSH0`..`PUSH16` and the sized `PUSHINT` forms.
	pub fn read_push_int(&mut self) -> Result<BigInt, CodecError> {
		let byte = self.read_u8()?;
		if (OpCode::PushM1 as u8..=OpCode::Push16 as u8).contains(&byte) {
			return Ok(BigInt::from(byte as i32 - OpCode::Push0 as i32));
		}

		let opcode = OpCode::try_from(byte).map_err(|_| CodecError::InvalidOpCode)?;
		let count = match opcode {
			OpCode::PushInt8 => 1,
			OpCode::PushInt16 => 2,
			OpCode::PushInt32 => 4,
			OpCode::PushInt64 => 8,
			OpCode::PushInt128 => 16,
			OpCode::PushInt256 => 32,
			_ =>
				return Err(CodecError::InvalidEncoding(
					"expected an integer push op code".to_string(),
				)),
		};

		let mut bytes = self.read_bytes(count)?;
		bytes.reverse();
		Ok(BigInt::from_signed_bytes_be(&bytes))
	}

	/// Reads one serializable value.
	pub fn read_serializable<T: NeoSerializable>(&mut self) -> Result<T, CodecError> {
		T::decode(self).map_err(Into::into)
	}

	/// Reads a var-int count followed by that many serializable values.
	pub fn read_serializable_list<T: NeoSerializable>(&mut self) -> Result<Vec<T>, CodecError> {
		let len = self.read_var_int()?;
		if len > self.available() as u64 {
			return Err(CodecError::IndexOutOfBounds);
		}
		let mut list = Vec::with_capacity(len as usize);
		for _ in 0..len {
			list.push(T::decode(self).map_err(Into::into)?);
		}
		Ok(list)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_read_fixed_widths() {
		let data = hex::decode("0102030405060708090a0b0c0d0e0f").unwrap();
		let mut reader = Decoder::new(&data);
		assert_eq!(reader.read_u8().unwrap(), 0x01);
		assert_eq!(reader.read_u16().unwrap(), 0x0302);
		assert_eq!(reader.read_u32().unwrap(), 0x07060504);
		assert_eq!(reader.read_i64().unwrap(), 0x0f0e0d0c0b0a0908);
		assert_eq!(reader.available(), 0);
	}

	#[test]
	fn test_read_u32_vectors() {
		assert_eq!(Decoder::new(&[0xffu8; 4]).read_u32().unwrap(), 4_294_967_295);
		assert_eq!(
			Decoder::new(&hex::decode("01000000").unwrap()).read_u32().unwrap(),
			1
		);
		assert_eq!(
			Decoder::new(&hex::decode("8cae0000ff").unwrap()).read_u32().unwrap(),
			44_684
		);
	}

	#[test]
	fn test_read_i64_vectors() {
		let min = [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80];
		assert_eq!(Decoder::new(&min).read_i64().unwrap(), i64::MIN);

		let max = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f];
		assert_eq!(Decoder::new(&max).read_i64().unwrap(), i64::MAX);

		let custom = [0x11, 0x33, 0x22, 0x8c, 0xae, 0x00, 0x00, 0x00, 0xff];
		assert_eq!(Decoder::new(&custom).read_i64().unwrap(), 749_675_361_041);
	}

	#[test]
	fn test_fixed_width_round_trips() {
		use crate::neo_codec::encode::Encoder;

		let mut writer = Encoder::new();
		writer.write_i8(-5);
		writer.write_i16(-1234);
		writer.write_i32(-123456);
		writer.write_u16(0xBEEF);
		writer.write_u64(u64::MAX - 1);
		writer.write_bool(true);

		let bytes = writer.to_bytes();
		let mut reader = Decoder::new(&bytes);
		assert_eq!(reader.read_i8().unwrap(), -5);
		assert_eq!(reader.read_i16().unwrap(), -1234);
		assert_eq!(reader.read_i32().unwrap(), -123456);
		assert_eq!(reader.read_u16().unwrap(), 0xBEEF);
		assert_eq!(reader.read_u64().unwrap(), u64::MAX - 1);
		assert!(reader.read_bool().unwrap());
		assert_eq!(reader.available(), 0);
	}

	#[test]
	fn test_var_int_round_trip() {
		use crate::neo_codec::encode::Encoder;

		for value in [0u64, 0xFC, 0xFD, 0xFFFF, 0x1_0000, 0xFFFF_FFFF, 0x1_0000_0000] {
			let mut writer = Encoder::new();
			writer.write_var_int(value);
			let bytes = writer.to_bytes();
			assert_eq!(Decoder::new(&bytes).read_var_int().unwrap(), value);
		}
	}

	#[test]
	fn test_var_int_rejects_non_canonical() {
		// 1 encoded with a two-byte tail.
		let data = hex::decode("fd0100").unwrap();
		assert_eq!(
			Decoder::new(&data).read_var_int().unwrap_err(),
			CodecError::NonCanonicalVarInt
		);

		// 0xFFFF encoded with a four-byte tail.
		let data = hex::decode("feffff0000").unwrap();
		assert_eq!(
			Decoder::new(&data).read_var_int().unwrap_err(),
			CodecError::NonCanonicalVarInt
		);

		// 1 encoded with an eight-byte tail.
		let data = hex::decode("ff0100000000000000").unwrap();
		assert_eq!(
			Decoder::new(&data).read_var_int().unwrap_err(),
			CodecError::NonCanonicalVarInt
		);
	}

	#[test]
	fn test_read_beyond_end_is_an_error() {
		let data = [0x01u8, 0x02];
		assert_eq!(Decoder::new(&data).read_u32().unwrap_err(), CodecError::IndexOutOfBounds);
		assert_eq!(
			Decoder::new(&data).read_bytes(3).unwrap_err(),
			CodecError::IndexOutOfBounds
		);
	}

	#[test]
	fn test_var_bytes_length_overrun() {
		// Claims 5 bytes but carries 2.
		let data = hex::decode("05aabb").unwrap();
		assert_eq!(
			Decoder::new(&data).read_var_bytes().unwrap_err(),
			CodecError::IndexOutOfBounds
		);
	}

	#[test]
	fn test_read_push_data_bytes() {
		let prefix_count_map = [
			(hex::decode("0c01").unwrap(), 1usize),
			(hex::decode("0cff").unwrap(), 255),
			(hex::decode("0d0001").unwrap(), 256),
			(hex::decode("0d0010").unwrap(), 4096),
			(hex::decode("0e00000100").unwrap(), 65536),
		];

		for (prefix, count) in prefix_count_map {
			let bytes = vec![1u8; count];
			let data = [prefix.as_slice(), bytes.as_slice()].concat();
			assert_eq!(Decoder::new(&data).read_push_bytes().unwrap(), bytes);
		}
	}

	#[test]
	fn test_read_push_data_string() {
		let empty = hex::decode("0c00").unwrap();
		assert_eq!(Decoder::new(&empty).read_push_string().unwrap(), "");

		let a = hex::decode("0c0161").unwrap();
		assert_eq!(Decoder::new(&a).read_push_string().unwrap(), "a");
	}

	#[test]
	fn test_read_push_int() {
		assert_eq!(
			Decoder::new(&hex::decode("10").unwrap()).read_push_int().unwrap(),
			BigInt::from(0)
		);
		assert_eq!(
			Decoder::new(&hex::decode("11").unwrap()).read_push_int().unwrap(),
			BigInt::from(1)
		);
		assert_eq!(
			Decoder::new(&hex::decode("0f").unwrap()).read_push_int().unwrap(),
			BigInt::from(-1)
		);
		assert_eq!(
			Decoder::new(&hex::decode("20").unwrap()).read_push_int().unwrap(),
			BigInt::from(16)
		);
		// PUSHINT8 17
		assert_eq!(
			Decoder::new(&hex::decode("0011").unwrap()).read_push_int().unwrap(),
			BigInt::from(17)
		);
		// PUSHINT32 -800000
		assert_eq!(
			Decoder::new(&hex::decode("0200cbf3ff").unwrap()).read_push_int().unwrap(),
			BigInt::from(-800000)
		);
	}

	#[test]
	fn test_read_bool_strict() {
		assert!(!Decoder::new(&[0]).read_bool().unwrap());
		assert!(Decoder::new(&[1]).read_bool().unwrap());
		assert!(Decoder::new(&[2]).read_bool().is_err());
	}

	#[test]
	fn test_mark_reset() {
		let data = [1u8, 2, 3, 4];
		let mut reader = Decoder::new(&data);
		reader.read_u8().unwrap();
		reader.mark();
		reader.read_u8().unwrap();
		reader.read_u8().unwrap();
		reader.reset();
		assert_eq!(reader.read_u8().unwrap(), 2);
	}
}
