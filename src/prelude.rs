//! Convenient imports for the common surface of the SDK.

pub use crate::{
	neo_builder::{
		BuilderError, CallFlags, InteropService, InvocationScript, OracleResponseCode,
		ScriptBuilder, Signer, Transaction, TransactionAttribute, TransactionBuilder,
		TransactionError, VerificationScript, Witness, WitnessAction, WitnessCondition,
		WitnessRule, WitnessScope,
	},
	neo_codec::{CodecError, Decoder, Encoder, NeoSerializable, OpCode, VarSizeTrait},
	neo_config::NeoConstants,
	neo_crypto::{
		base58check_decode, base58check_encode, private_key_from_wif, wif_from_private_key,
		Bip32KeyPair, CryptoError, HashableForVec, KeyPair, Nep2Error, ScryptParams,
		Secp256r1PrivateKey, Secp256r1PublicKey, Secp256r1Signature, NEP2,
	},
	neo_error::NeoError,
	neo_protocol::{Account, ProtocolError},
	neo_types::{
		Address, Bytes, ContractParameter, ContractParameterMap, ContractParameterType,
		NeoUri, ScriptHash, ScriptHashExtension, TxHash, TxHashExtension, TypeError,
	},
	neo_wallets::{Wallet, WalletError},
};
