//! Full construction-path tests driven through the public API.

use hex_literal::hex;
use neo3_core::prelude::*;

fn key_pair(n: u8) -> KeyPair {
	KeyPair::from_private_key(&[n; 32]).unwrap()
}

#[test]
fn transfer_transaction_serializes_deterministically() {
	let sender = key_pair(1);
	let recipient = ScriptHash::repeat_byte(0xFF);
	let gas = ScriptHash::from_hex("d2a4cff31913016155e38e474a2c06d08be276cf").unwrap();

	let build = || {
		let mut script = ScriptBuilder::new();
		script
			.contract_call(
				&gas,
				"transfer",
				&[
					ContractParameter::h160(&sender.get_script_hash()),
					ContractParameter::h160(&recipient),
					ContractParameter::integer(1_0000_0000),
					ContractParameter::any(),
				],
				Some(CallFlags::All),
			)
			.unwrap();

		let mut builder = TransactionBuilder::new();
		builder
			.set_script(script.to_bytes())
			.nonce(7)
			.network_magic(NeoConstants::MAGIC_NUMBER_TESTNET);
		builder.valid_until_block(5_000_000).unwrap();
		builder.system_fee(997_775).unwrap();
		builder.network_fee(123_456).unwrap();
		builder
			.add_signer_with_key(
				Signer::called_by_entry(sender.get_script_hash()),
				sender.clone(),
			)
			.unwrap();
		builder.sign().unwrap()
	};

	let tx_a = build();
	let tx_b = build();

	// Witness signatures may differ between runs; everything hashed does not.
	assert_eq!(tx_a.get_tx_id(), tx_b.get_tx_id());

	let raw = tx_a.to_array();
	assert_eq!(raw.len(), tx_a.size());
	assert!(raw.len() < NeoConstants::MAX_TRANSACTION_SIZE as usize);

	let decoded = Transaction::decode(&mut Decoder::new(&raw)).unwrap();
	assert_eq!(decoded, tx_a);
	decoded.validate_witnesses().unwrap();
}

#[test]
fn multi_sig_transaction_flow() {
	let pairs: Vec<KeyPair> = (1u8..=3).map(key_pair).collect();
	let keys: Vec<_> = pairs.iter().map(KeyPair::public_key).collect();
	let account = Account::multi_sig_from_public_keys(&keys, 2).unwrap();

	let mut builder = TransactionBuilder::new();
	builder.set_script(vec![0x51]).nonce(42).network_magic(7);
	builder.valid_until_block(1000).unwrap();
	builder.add_signer(Signer::called_by_entry(account.get_script_hash())).unwrap();

	// Collect two of three signatures over the signing digest.
	let digest = builder.get_unsigned_tx().unwrap().get_hash_data(7);
	let signatures: Vec<_> =
		pairs[..2].iter().map(|pair| pair.sign_prehash(&digest).unwrap()).collect();
	let witness = Witness::create_multi_sig_witness(
		signatures,
		account.get_verification_script().unwrap().clone(),
	)
	.unwrap();
	builder.add_witness(witness).unwrap();

	let tx = builder.sign().unwrap();
	assert_eq!(tx.witnesses().len(), 1);
	assert_eq!(tx.witnesses()[0].script_hash(), account.get_script_hash());
}

#[test]
fn signing_digest_depends_on_network_magic() {
	let pair = key_pair(9);
	let mut builder = TransactionBuilder::new();
	builder.set_script(vec![0x51]).nonce(1);
	builder.valid_until_block(100).unwrap();
	builder
		.add_signer_with_key(Signer::called_by_entry(pair.get_script_hash()), pair.clone())
		.unwrap();

	let tx = builder.get_unsigned_tx().unwrap();
	let mainnet = tx.get_hash_data(NeoConstants::MAGIC_NUMBER_MAINNET);
	let testnet = tx.get_hash_data(NeoConstants::MAGIC_NUMBER_TESTNET);
	assert_ne!(mainnet, testnet);

	// A signature over one network's digest must not verify over the other.
	let signature = pair.sign_prehash(&mainnet).unwrap();
	assert!(pair.public_key().verify_prehash(&mainnet, &signature).is_ok());
	assert!(pair.public_key().verify_prehash(&testnet, &signature).is_err());
}

#[test]
fn account_key_lifecycle_through_nep2() {
	let mut account = Account::create();
	let hash = account.get_script_hash();

	account.encrypt_private_key("passphrase", ScryptParams::light()).unwrap();
	assert!(!account.can_sign());

	account.decrypt_private_key("passphrase", ScryptParams::light()).unwrap();
	assert!(account.can_sign());
	assert_eq!(account.get_script_hash(), hash);
}

#[test]
fn wif_and_address_interop() {
	let pair = key_pair(5);
	let wif = pair.export_as_wif();
	let account = Account::from_wif(&wif).unwrap();

	assert_eq!(account.get_address(), pair.get_address());
	assert_eq!(
		ScriptHash::from_address(&account.get_address()).unwrap(),
		pair.get_script_hash()
	);
}

#[test]
fn contract_call_ends_in_contract_call_syscall() {
	let target = ScriptHash::repeat_byte(0x11);
	let mut sb = ScriptBuilder::new();
	sb.contract_call(&target, "balanceOf", &[ContractParameter::h160(&target)], None)
		.unwrap();
	let script = sb.to_bytes();
	assert_eq!(script[script.len() - 5..], hex!("41627d5b52"));
}
