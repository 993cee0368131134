//! Builder for Neo VM scripts.
//!
//! Emits the byte-exact script forms the chain verifies: invocation
//! scripts, verification scripts and contract calls. Integer and data
//! pushes pick the smallest encoding that fits; multi-sig scripts sort
//! their keys so the same key set always yields the same script hash.

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};

use crate::{
	neo_builder::{
		error::BuilderError,
		script::{call_flags::CallFlags, interop_service::InteropService},
	},
	neo_codec::{Encoder, OpCode},
	neo_config::NeoConstants,
	neo_crypto::Secp256r1PublicKey,
	neo_types::{
		Bytes, ContractParameter, ContractParameterMap, ParameterValue, ScriptHash,
		ScriptHashExtension,
	},
};

/// An append-only script under construction.
#[derive(Debug, Default, PartialEq, Eq, Hash)]
pub struct ScriptBuilder {
	script: Encoder,
}

impl ScriptBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self { script: Encoder::new() }
	}

	/// Appends opcodes in the given order.
	pub fn op_code(&mut self, op_codes: &[OpCode]) -> &mut Self {
		for opcode in op_codes {
			self.script.write_u8(opcode.opcode());
		}
		self
	}

	/// Appends one opcode followed by its raw operand bytes.
	pub fn op_code_with_arg(&mut self, opcode: OpCode, argument: Bytes) -> &mut Self {
		self.script.write_u8(opcode.opcode());
		self.script.write_bytes(&argument);
		self
	}

	/// Appends `SYSCALL` with the 4-byte hash of `service`.
	pub fn sys_call(&mut self, service: InteropService) -> &mut Self {
		self.script.write_u8(OpCode::Syscall.opcode());
		self.script.write_bytes(&service.hash());
		self
	}

	/// Pushes an integer using the smallest encoding that fits: `PUSHM1`,
	/// `PUSH0`..`PUSH16`, or a sign-extended little-endian `PUSHINT8` to
	/// `PUSHINT256`.
	pub fn push_integer(&mut self, value: &BigInt) -> Result<&mut Self, BuilderError> {
		if *value >= BigInt::from(-1) && *value <= BigInt::from(16) {
			let offset = value.to_i32().expect("range checked") + OpCode::Push0 as i32;
			self.script.write_u8(offset as u8);
			return Ok(self);
		}

		let bytes = value.to_signed_bytes_le();
		let (opcode, width) = match bytes.len() {
			1 => (OpCode::PushInt8, 1),
			2 => (OpCode::PushInt16, 2),
			len if len <= 4 => (OpCode::PushInt32, 4),
			len if len <= 8 => (OpCode::PushInt64, 8),
			len if len <= 16 => (OpCode::PushInt128, 16),
			len if len <= 32 => (OpCode::PushInt256, 32),
			_ =>
				return Err(BuilderError::IllegalArgument(
					"integer does not fit into 256 bits".to_string(),
				)),
		};

		self.script.write_u8(opcode.opcode());
		self.script.write_bytes(&pad_with_sign(&bytes, width, value.is_negative()));
		Ok(self)
	}

	/// Pushes an `i64` integer.
	pub fn push_i64(&mut self, value: i64) -> &mut Self {
		self.push_integer(&BigInt::from(value))
			.expect("i64 always fits into 256 bits")
	}

	/// Pushes a byte string. Payloads up to 75 bytes are emitted with a
	/// bare length byte; longer ones use `PUSHDATA1/2/4`.
	pub fn push_data(&mut self, data: Vec<u8>) -> Result<&mut Self, BuilderError> {
		match data.len() {
			0..=75 => {
				self.script.write_u8(data.len() as u8);
			},
			76..=0xff => {
				self.script.write_u8(OpCode::PushData1.opcode());
				self.script.write_u8(data.len() as u8);
			},
			0x100..=0xffff => {
				self.script.write_u8(OpCode::PushData2.opcode());
				self.script.write_u16(data.len() as u16);
			},
			len if len <= i32::MAX as usize => {
				self.script.write_u8(OpCode::PushData4.opcode());
				self.script.write_u32(data.len() as u32);
			},
			_ =>
				return Err(BuilderError::IllegalArgument(
					"data push exceeds 2^31 - 1 bytes".to_string(),
				)),
		}
		self.script.write_bytes(&data);
		Ok(self)
	}

	/// Pushes a UTF-8 string as a byte string.
	pub fn push_string(&mut self, value: &str) -> Result<&mut Self, BuilderError> {
		self.push_data(value.as_bytes().to_vec())
	}

	/// Pushes a boolean: `PUSH1` for true, `PUSH0` for false.
	pub fn push_bool(&mut self, value: bool) -> &mut Self {
		self.op_code(&[if value { OpCode::Push1 } else { OpCode::Push0 }])
	}

	/// Pushes null.
	pub fn push_null(&mut self) -> &mut Self {
		self.op_code(&[OpCode::PushNull])
	}

	/// Pushes an array: each element left to right, the count, then `PACK`.
	/// An empty array is `NEWARRAY0`.
	pub fn push_array(&mut self, array: &[ContractParameter]) -> Result<&mut Self, BuilderError> {
		if array.is_empty() {
			return Ok(self.op_code(&[OpCode::NewArray0]));
		}
		for param in array {
			self.push_param(param)?;
		}
		self.push_integer(&BigInt::from(array.len()))?;
		Ok(self.op_code(&[OpCode::Pack]))
	}

	/// Pushes a map: each key then value in entry order, the entry count,
	/// then `PACKMAP`.
	pub fn push_map(&mut self, map: &ContractParameterMap) -> Result<&mut Self, BuilderError> {
		for (key, value) in &map.0 {
			self.push_param(key)?;
			self.push_param(value)?;
		}
		self.push_integer(&BigInt::from(map.len()))?;
		Ok(self.op_code(&[OpCode::PackMap]))
	}

	/// Pushes a single contract parameter.
	pub fn push_param(&mut self, param: &ContractParameter) -> Result<&mut Self, BuilderError> {
		let Some(value) = param.value() else {
			return Ok(self.push_null());
		};
		match value {
			ParameterValue::Boolean(b) => Ok(self.push_bool(*b)),
			ParameterValue::Integer(i) => self.push_integer(&BigInt::from(*i)),
			ParameterValue::ByteArray(bytes)
			| ParameterValue::Signature(bytes)
			| ParameterValue::PublicKey(bytes) => self.push_data(bytes.clone()),
			ParameterValue::String(s) => self.push_string(s),
			ParameterValue::H160(hash) => self.push_data(hash.to_le_vec()),
			ParameterValue::H256(hash) => {
				use crate::neo_types::TxHashExtension;
				self.push_data(hash.to_le_vec())
			},
			ParameterValue::Array(array) => self.push_array(array),
			ParameterValue::Map(map) => self.push_map(map),
		}
	}

	/// Emits a full contract call: parameters in reverse order, the method
	/// name, the call flags, the contract's little-endian script hash, then
	/// `SYSCALL System.Contract.Call`.
	pub fn contract_call(
		&mut self,
		script_hash: &ScriptHash,
		method: &str,
		params: &[ContractParameter],
		call_flags: Option<CallFlags>,
	) -> Result<&mut Self, BuilderError> {
		if method.is_empty() {
			return Err(BuilderError::IllegalArgument(
				"the invoked method must not be empty".to_string(),
			));
		}
		for param in params.iter().rev() {
			self.push_param(param)?;
		}
		self.push_string(method)?;
		self.push_integer(&BigInt::from(call_flags.unwrap_or(CallFlags::All).value()))?;
		self.push_data(script_hash.to_le_vec())?;
		Ok(self.sys_call(InteropService::SystemContractCall))
	}

	/// The script bytes built so far.
	pub fn to_bytes(&self) -> Bytes {
		self.script.to_bytes()
	}

	/// Current script length in bytes.
	pub fn len(&self) -> usize {
		self.script.size()
	}

	/// Whether nothing has been emitted yet.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Builds the single-sig verification script for a public key:
	/// `push_data(key) || SYSCALL System.Crypto.CheckSig`.
	pub fn build_verification_script(public_key: &Secp256r1PublicKey) -> Bytes {
		let mut sb = ScriptBuilder::new();
		sb.push_data(public_key.get_encoded(true))
			.expect("a compressed key is 33 bytes")
			.sys_call(InteropService::SystemCryptoCheckSig);
		sb.to_bytes()
	}

	/// Builds a multi-sig verification script: the threshold, the public
	/// keys sorted by their compressed encoding, the key count, then
	/// `SYSCALL System.Crypto.CheckMultisig`.
	pub fn build_multi_sig_script(
		public_keys: &[Secp256r1PublicKey],
		threshold: usize,
	) -> Result<Bytes, BuilderError> {
		if public_keys.is_empty()
			|| public_keys.len() > NeoConstants::MAX_PUBLIC_KEYS_PER_MULTI_SIG as usize
		{
			return Err(BuilderError::IllegalArgument(format!(
				"a multi-sig script takes 1 to {} public keys",
				NeoConstants::MAX_PUBLIC_KEYS_PER_MULTI_SIG
			)));
		}
		if threshold == 0 || threshold > public_keys.len() {
			return Err(BuilderError::IllegalArgument(
				"signing threshold must be between 1 and the number of keys".to_string(),
			));
		}

		let mut sorted = public_keys.to_vec();
		sorted.sort();

		let mut sb = ScriptBuilder::new();
		sb.push_integer(&BigInt::from(threshold))?;
		for key in &sorted {
			sb.push_data(key.get_encoded(true))?;
		}
		sb.push_integer(&BigInt::from(sorted.len()))?;
		sb.sys_call(InteropService::SystemCryptoCheckMultisig);
		Ok(sb.to_bytes())
	}

	/// Builds an invocation script pushing each signature in signer order.
	pub fn build_invocation_script(signatures: &[[u8; 64]]) -> Bytes {
		let mut sb = ScriptBuilder::new();
		for signature in signatures {
			sb.push_data(signature.to_vec()).expect("a signature is 64 bytes");
		}
		sb.to_bytes()
	}
}

fn pad_with_sign(bytes: &[u8], width: usize, negative: bool) -> Vec<u8> {
	let fill = if negative { 0xFF } else { 0x00 };
	let mut padded = vec![fill; width];
	padded[..bytes.len()].copy_from_slice(bytes);
	padded
}

#[cfg(test)]
mod tests {
	use hex_literal::hex;

	use super::*;
	use crate::neo_types::TxHash;

	fn built<F: FnOnce(&mut ScriptBuilder)>(f: F) -> Vec<u8> {
		let mut sb = ScriptBuilder::new();
		f(&mut sb);
		sb.to_bytes()
	}

	#[test]
	fn test_push_small_integers() {
		assert_eq!(built(|sb| {
			sb.push_i64(-1);
		}), vec![OpCode::PushM1.opcode()]);
		assert_eq!(built(|sb| {
			sb.push_i64(0);
		}), vec![OpCode::Push0.opcode()]);
		assert_eq!(built(|sb| {
			sb.push_i64(16);
		}), vec![OpCode::Push16.opcode()]);
	}

	#[test]
	fn test_push_integer_boundaries() {
		// 17 leaves the PUSH0..PUSH16 range.
		assert_eq!(built(|sb| {
			sb.push_i64(17);
		}), hex!("0011").to_vec());
		assert_eq!(built(|sb| {
			sb.push_i64(127);
		}), hex!("007f").to_vec());
		assert_eq!(built(|sb| {
			sb.push_i64(-2);
		}), hex!("00fe").to_vec());

		// One past each width.
		assert_eq!(built(|sb| {
			sb.push_i64(128);
		}), hex!("018000").to_vec());
		assert_eq!(built(|sb| {
			sb.push_i64(-129);
		}), hex!("017fff").to_vec());
		assert_eq!(built(|sb| {
			sb.push_i64(-800000);
		}), hex!("0200cbf3ff").to_vec());
		assert_eq!(built(|sb| {
			sb.push_i64(2147483647);
		}), hex!("02ffffff7f").to_vec());
		assert_eq!(built(|sb| {
			sb.push_i64(2147483648);
		}), hex!("030000008000000000").to_vec());
		assert_eq!(built(|sb| {
			sb.push_i64(-2147483649);
		}), hex!("03ffffff7fffffffff").to_vec());
		assert_eq!(built(|sb| {
			sb.push_i64(i64::MAX);
		}), hex!("03ffffffffffffff7f").to_vec());
	}

	#[test]
	fn test_push_big_integers() {
		let mut sb = ScriptBuilder::new();
		sb.push_integer(&BigInt::from(10).pow(23)).unwrap();
		let bytes = sb.to_bytes();
		assert_eq!(bytes[0], OpCode::PushInt128.opcode());
		assert_eq!(bytes.len(), 17);

		let mut sb = ScriptBuilder::new();
		sb.push_integer(&BigInt::from(10).pow(40)).unwrap();
		let bytes = sb.to_bytes();
		assert_eq!(bytes[0], OpCode::PushInt256.opcode());
		assert_eq!(bytes.len(), 33);

		let mut sb = ScriptBuilder::new();
		assert!(sb.push_integer(&BigInt::from(2).pow(256)).is_err());
	}

	#[test]
	fn test_push_data_boundaries() {
		// 75 bytes: bare length byte.
		let script = built(|sb| {
			sb.push_data(vec![0x42; 75]).unwrap();
		});
		assert_eq!(script[0], 0x4B);
		assert_eq!(script[1..], vec![0x42; 75]);

		// 76 bytes: PUSHDATA1.
		let script = built(|sb| {
			sb.push_data(vec![0x42; 76]).unwrap();
		});
		assert_eq!(script[..2], [0x0C, 0x4C]);
		assert_eq!(script[2..], vec![0x42; 76]);

		// 255 bytes: still PUSHDATA1.
		let script = built(|sb| {
			sb.push_data(vec![0xAA; 255]).unwrap();
		});
		assert_eq!(script[..2], [0x0C, 0xFF]);

		// 256 bytes: PUSHDATA2.
		let script = built(|sb| {
			sb.push_data(vec![0xAA; 256]).unwrap();
		});
		assert_eq!(script[..3], hex!("0d0001"));

		// 65535 bytes: still PUSHDATA2.
		let script = built(|sb| {
			sb.push_data(vec![0xAA; 65535]).unwrap();
		});
		assert_eq!(script[..3], hex!("0dffff"));

		// 65536 bytes: PUSHDATA4.
		let script = built(|sb| {
			sb.push_data(vec![0xAA; 65536]).unwrap();
		});
		assert_eq!(script[..5], hex!("0e00000100"));
	}

	#[test]
	fn test_push_empty_data() {
		assert_eq!(built(|sb| {
			sb.push_data(vec![]).unwrap();
		}), vec![0x00]);
	}

	#[test]
	fn test_push_bool_and_null() {
		assert_eq!(built(|sb| {
			sb.push_bool(true);
		}), vec![OpCode::Push1.opcode()]);
		assert_eq!(built(|sb| {
			sb.push_bool(false);
		}), vec![OpCode::Push0.opcode()]);
		assert_eq!(built(|sb| {
			sb.push_null();
		}), vec![OpCode::PushNull.opcode()]);
	}

	#[test]
	fn test_push_empty_array() {
		assert_eq!(built(|sb| {
			sb.push_array(&[]).unwrap();
		}), vec![OpCode::NewArray0.opcode()]);
	}

	#[test]
	fn test_push_array_packs_left_to_right() {
		let script = built(|sb| {
			sb.push_array(&[ContractParameter::integer(1), ContractParameter::integer(2)])
				.unwrap();
		});
		assert_eq!(
			script,
			vec![
				OpCode::Push1.opcode(),
				OpCode::Push2.opcode(),
				OpCode::Push2.opcode(),
				OpCode::Pack.opcode(),
			]
		);
	}

	#[test]
	fn test_push_map_is_deterministic() {
		let mut map = ContractParameterMap::new();
		map.insert(ContractParameter::integer(1), ContractParameter::from("first")).unwrap();
		map.insert(ContractParameter::from("second"), ContractParameter::bool(true)).unwrap();

		let script = built(|sb| {
			sb.push_map(&map).unwrap();
		});

		let expected = built(|sb| {
			sb.push_i64(1);
			sb.push_string("first").unwrap();
			sb.push_string("second").unwrap();
			sb.push_bool(true);
			sb.push_i64(2);
			sb.op_code(&[OpCode::PackMap]);
		});
		assert_eq!(script, expected);
	}

	#[test]
	fn test_verification_script_layout() {
		let key = Secp256r1PublicKey::from_encoded(
			"03b4af8d061b6b320cce6c63bc4ec7894dce107bfc5f5ef5c68a93b4ad1e136816",
		)
		.unwrap();
		let script = ScriptBuilder::build_verification_script(&key);

		assert_eq!(script.len(), 39);
		assert_eq!(script[0], 0x21);
		assert_eq!(script[1..34], key.get_encoded(true)[..]);
		assert_eq!(script[34], OpCode::Syscall.opcode());
		assert_eq!(script[35..], hex!("56e7b327"));
	}

	#[test]
	fn test_multi_sig_script_sorts_keys() {
		let key1 = Secp256r1PublicKey::from_encoded(
			"035fdb1d1f06759547020891ae97c729327853aeb1256b6fe0473bc2e9fa42ff50",
		)
		.unwrap();
		let key2 = Secp256r1PublicKey::from_encoded(
			"03eda286d19f7ee0b472afd1163d803d620a961e1581a8f2704b52c0285f6e022d",
		)
		.unwrap();
		let key3 = Secp256r1PublicKey::from_encoded(
			"03ac81ec17f2f15fd6d193182f927c5971559c2a32b9408a06fec9e711fb7ca02e",
		)
		.unwrap();

		let script_a =
			ScriptBuilder::build_multi_sig_script(&[key1.clone(), key2.clone(), key3.clone()], 2)
				.unwrap();
		let script_b =
			ScriptBuilder::build_multi_sig_script(&[key3, key1, key2], 2).unwrap();

		assert_eq!(script_a, script_b);
		assert_eq!(script_a[0], OpCode::Push2.opcode());
		assert_eq!(script_a[script_a.len() - 6], OpCode::Push3.opcode());
		assert_eq!(script_a[script_a.len() - 5], OpCode::Syscall.opcode());
		assert_eq!(
			script_a[script_a.len() - 4..],
			InteropService::SystemCryptoCheckMultisig.hash()
		);
	}

	#[test]
	fn test_multi_sig_threshold_bounds() {
		let key = Secp256r1PublicKey::from_encoded(
			"035fdb1d1f06759547020891ae97c729327853aeb1256b6fe0473bc2e9fa42ff50",
		)
		.unwrap();
		assert!(ScriptBuilder::build_multi_sig_script(&[key.clone()], 0).is_err());
		assert!(ScriptBuilder::build_multi_sig_script(&[key.clone()], 2).is_err());
		assert!(ScriptBuilder::build_multi_sig_script(&[], 1).is_err());
		assert!(ScriptBuilder::build_multi_sig_script(&[key], 1).is_ok());
	}

	#[test]
	fn test_invocation_script_concatenates_pushes() {
		let sig1 = [0x11u8; 64];
		let sig2 = [0x22u8; 64];
		let script = ScriptBuilder::build_invocation_script(&[sig1, sig2]);

		assert_eq!(script.len(), 130);
		assert_eq!(script[0], 0x40);
		assert_eq!(script[1..65], sig1);
		assert_eq!(script[65], 0x40);
		assert_eq!(script[66..], sig2);
	}

	#[test]
	fn test_contract_call_transfer() {
		let from = ScriptHash::zero();
		let to = ScriptHash::repeat_byte(0xFF);
		let neo = ScriptHash::from_hex("ef4073a0f2b305a38ec4050e4d3d28bc40ea63f5").unwrap();

		let mut sb = ScriptBuilder::new();
		sb.contract_call(
			&neo,
			"transfer",
			&[
				ContractParameter::h160(&from),
				ContractParameter::h160(&to),
				ContractParameter::integer(100),
				ContractParameter::any(),
			],
			Some(CallFlags::All),
		)
		.unwrap();
		let script = sb.to_bytes();

		// Reversed parameter order: null, 100, to, from.
		let mut expected = ScriptBuilder::new();
		expected.push_null();
		expected.push_i64(100);
		expected.push_data(to.to_le_vec()).unwrap();
		expected.push_data(from.to_le_vec()).unwrap();
		expected.push_string("transfer").unwrap();
		expected.push_i64(0x0F);
		expected.push_data(neo.to_le_vec()).unwrap();
		expected.sys_call(InteropService::SystemContractCall);

		assert_eq!(script, expected.to_bytes());
		assert_eq!(script[script.len() - 5..], hex!("41627d5b52"));
	}

	#[test]
	fn test_contract_call_rejects_empty_method() {
		let mut sb = ScriptBuilder::new();
		assert!(sb.contract_call(&ScriptHash::zero(), "", &[], None).is_err());
	}

	#[test]
	fn test_push_param_h256_uses_wire_order() {
		let hash = TxHash::repeat_byte(0x01);
		let mut sb = ScriptBuilder::new();
		sb.push_param(&ContractParameter::h256(&hash)).unwrap();
		let script = sb.to_bytes();
		assert_eq!(script[0], 0x20);
		assert_eq!(script.len(), 33);
	}
}
