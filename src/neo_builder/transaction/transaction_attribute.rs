//! Transaction attributes.

use primitive_types::H256;
use serde::{Deserialize, Serialize};

use crate::{
	neo_codec::{CodecError, Decoder, Encoder, NeoSerializable},
	neo_types::TxHash,
};

/// Result codes an oracle node attaches to its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OracleResponseCode {
	/// The request completed.
	Success = 0x00,
	/// The requested protocol is not supported.
	ProtocolNotSupported = 0x10,
	/// Consensus on the result was not reached.
	ConsensusUnreachable = 0x12,
	/// The requested resource does not exist.
	NotFound = 0x14,
	/// The request timed out.
	Timeout = 0x16,
	/// The oracle is not allowed to access the resource.
	Forbidden = 0x18,
	/// The response was larger than permitted.
	ResponseTooLarge = 0x1A,
	/// The requester cannot pay the response fee.
	InsufficientFunds = 0x1C,
	/// The response content is malformed.
	ContentTypeNotSupported = 0x1F,
	/// Any other failure.
	Error = 0xFF,
}

impl OracleResponseCode {
	fn from_byte(byte: u8) -> Result<Self, CodecError> {
		match byte {
			0x00 => Ok(Self::Success),
			0x10 => Ok(Self::ProtocolNotSupported),
			0x12 => Ok(Self::ConsensusUnreachable),
			0x14 => Ok(Self::NotFound),
			0x16 => Ok(Self::Timeout),
			0x18 => Ok(Self::Forbidden),
			0x1A => Ok(Self::ResponseTooLarge),
			0x1C => Ok(Self::InsufficientFunds),
			0x1F => Ok(Self::ContentTypeNotSupported),
			0xFF => Ok(Self::Error),
			other =>
				Err(CodecError::InvalidEncoding(format!("unknown oracle code 0x{other:02x}"))),
		}
	}
}

/// An attribute attached to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionAttribute {
	/// Lets a committee-signed transaction jump the mempool queue.
	HighPriority,
	/// An oracle node's response to a request.
	OracleResponse {
		/// The request being answered.
		id: u64,
		/// Outcome of the request.
		response_code: OracleResponseCode,
		/// Response payload.
		result: Vec<u8>,
	},
	/// The transaction is invalid before this block height.
	NotValidBefore {
		/// First height at which the transaction may be included.
		height: u32,
	},
	/// The transaction conflicts with another; only one can be included.
	Conflicts {
		/// Hash of the conflicting transaction.
		hash: TxHash,
	},
}

impl TransactionAttribute {
	const HIGH_PRIORITY: u8 = 0x01;
	const ORACLE_RESPONSE: u8 = 0x11;
	const NOT_VALID_BEFORE: u8 = 0x20;
	const CONFLICTS: u8 = 0x21;

	/// Maximum oracle result payload.
	pub const MAX_RESULT_SIZE: usize = 0xFFFF;

	/// The attribute's wire tag.
	pub fn tag(&self) -> u8 {
		match self {
			TransactionAttribute::HighPriority => Self::HIGH_PRIORITY,
			TransactionAttribute::OracleResponse { .. } => Self::ORACLE_RESPONSE,
			TransactionAttribute::NotValidBefore { .. } => Self::NOT_VALID_BEFORE,
			TransactionAttribute::Conflicts { .. } => Self::CONFLICTS,
		}
	}
}

impl NeoSerializable for TransactionAttribute {
	type Error = CodecError;

	fn size(&self) -> usize {
		1 + match self {
			TransactionAttribute::HighPriority => 0,
			TransactionAttribute::OracleResponse { result, .. } =>
				8 + 1 + crate::neo_codec::var_int_size(result.len() as u64) + result.len(),
			TransactionAttribute::NotValidBefore { .. } => 4,
			TransactionAttribute::Conflicts { .. } => 32,
		}
	}

	fn encode(&self, writer: &mut Encoder) {
		writer.write_u8(self.tag());
		match self {
			TransactionAttribute::HighPriority => {},
			TransactionAttribute::OracleResponse { id, response_code, result } => {
				writer.write_u64(*id);
				writer.write_u8(*response_code as u8);
				writer.write_var_bytes(result);
			},
			TransactionAttribute::NotValidBefore { height } => writer.write_u32(*height),
			TransactionAttribute::Conflicts { hash } => hash.encode(writer),
		}
	}

	fn decode(reader: &mut Decoder<'_>) -> Result<Self, Self::Error> {
		match reader.read_u8()? {
			Self::HIGH_PRIORITY => Ok(TransactionAttribute::HighPriority),
			Self::ORACLE_RESPONSE => {
				let id = reader.read_u64()?;
				let response_code = OracleResponseCode::from_byte(reader.read_u8()?)?;
				let result = reader.read_var_bytes()?;
				if result.len() > Self::MAX_RESULT_SIZE {
					return Err(CodecError::InvalidEncoding(
						"oracle result exceeds the maximum size".to_string(),
					));
				}
				Ok(TransactionAttribute::OracleResponse { id, response_code, result })
			},
			Self::NOT_VALID_BEFORE =>
				Ok(TransactionAttribute::NotValidBefore { height: reader.read_u32()? }),
			Self::CONFLICTS => Ok(TransactionAttribute::Conflicts { hash: H256::decode(reader)? }),
			other =>
				Err(CodecError::InvalidEncoding(format!("unknown attribute tag 0x{other:02x}"))),
		}
	}
}
