//! NEP-9 payment request URIs.
//!
//! `neo:<address>[?asset=<neo|gas|hash160>][&amount=<decimal>]`. Parsing is
//! strict about the scheme and the recipient address; unknown query keys are
//! ignored so wallets can carry vendor extensions. The symbolic assets `neo`
//! and `gas` resolve to the native token script hashes.

use primitive_types::H160;

use crate::{
	neo_config::{GAS_TOKEN_HASH, NEO_TOKEN_HASH},
	neo_types::{error::TypeError, script_hash::ScriptHashExtension},
};

const NEO_SCHEME: &str = "neo";
const MIN_NEP9_URI_LENGTH: usize = 38;
const NEO_TOKEN_STRING: &str = "neo";
const GAS_TOKEN_STRING: &str = "gas";

/// A parsed or under-construction NEP-9 URI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NeoUri {
	uri: Option<String>,
	recipient: Option<H160>,
	token: Option<H160>,
	amount: Option<f64>,
}

impl NeoUri {
	/// Starts an empty URI builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a NEP-9 URI string.
	pub fn from_uri(uri_string: &str) -> Result<Self, TypeError> {
		if uri_string.len() < MIN_NEP9_URI_LENGTH
			|| !uri_string.starts_with(&format!("{NEO_SCHEME}:"))
		{
			return Err(TypeError::InvalidFormat(
				"the provided string does not conform to the NEP-9 standard".to_string(),
			));
		}

		let after_scheme = &uri_string[NEO_SCHEME.len() + 1..];
		let (address_part, query_part) = match after_scheme.split_once('?') {
			Some((address, query)) => (address, Some(query)),
			None => (after_scheme, None),
		};

		let mut uri = NeoUri::new();
		uri.set_recipient(H160::from_address(address_part)?);

		if let Some(query) = query_part {
			for pair in query.split('&') {
				let (key, value) = pair.split_once('=').ok_or_else(|| {
					TypeError::InvalidFormat("this URI contains an invalid query".to_string())
				})?;
				match key {
					"asset" if uri.token.is_none() => {
						uri.set_token_str(value)?;
					},
					"amount" if uri.amount.is_none() => {
						let amount = value.parse::<f64>().map_err(|_| {
							TypeError::InvalidFormat("invalid amount in URI".to_string())
						})?;
						uri.amount = Some(amount);
					},
					// Unknown keys and repeated known keys are ignored.
					_ => {},
				}
			}
		}

		Ok(uri)
	}

	/// Sets the payment recipient.
	pub fn set_recipient(&mut self, recipient: H160) -> &mut Self {
		self.recipient = Some(recipient);
		self
	}

	/// Sets the asset by script hash.
	pub fn set_token(&mut self, token: H160) -> &mut Self {
		self.token = Some(token);
		self
	}

	/// Sets the asset from its symbolic (`neo`/`gas`) or hex form.
	pub fn set_token_str(&mut self, token: &str) -> Result<&mut Self, TypeError> {
		let hash = match token {
			NEO_TOKEN_STRING => *NEO_TOKEN_HASH,
			GAS_TOKEN_STRING => *GAS_TOKEN_HASH,
			other => H160::from_hex(other)?,
		};
		self.token = Some(hash);
		Ok(self)
	}

	/// Sets the requested amount.
	pub fn set_amount(&mut self, amount: f64) -> &mut Self {
		self.amount = Some(amount);
		self
	}

	/// Assembles the URI string from the configured parts.
	pub fn build_uri(&mut self) -> Result<&mut Self, TypeError> {
		let recipient = self.recipient.ok_or_else(|| {
			TypeError::InvalidArgument(
				"could not create a NEP-9 URI without a recipient address".to_string(),
			)
		})?;

		let mut query = Vec::new();
		if self.token.is_some() {
			query.push(format!("asset={}", self.token_string().expect("token is set")));
		}
		if let Some(amount) = self.amount {
			query.push(format!("amount={amount}"));
		}

		let base = format!("{NEO_SCHEME}:{}", recipient.to_address());
		self.uri = Some(if query.is_empty() {
			base
		} else {
			format!("{base}?{}", query.join("&"))
		});
		Ok(self)
	}

	/// The assembled URI string, if [`build_uri`](Self::build_uri) ran.
	pub fn uri_string(&self) -> Option<String> {
		self.uri.clone()
	}

	/// The recipient script hash.
	pub fn recipient(&self) -> Option<H160> {
		self.recipient
	}

	/// The recipient as an address string.
	pub fn recipient_address(&self) -> Option<String> {
		self.recipient.map(|hash| hash.to_address())
	}

	/// The asset script hash.
	pub fn token(&self) -> Option<H160> {
		self.token
	}

	/// The asset in symbolic form where it is a native token, hex otherwise.
	pub fn token_string(&self) -> Option<String> {
		self.token.map(|token| {
			if token == *NEO_TOKEN_HASH {
				NEO_TOKEN_STRING.to_string()
			} else if token == *GAS_TOKEN_HASH {
				GAS_TOKEN_STRING.to_string()
			} else {
				token.to_hex_be()
			}
		})
	}

	/// The requested amount.
	pub fn amount(&self) -> Option<f64> {
		self.amount
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn test_address() -> String {
		H160::from_slice(&[0x42; 20]).to_address()
	}

	#[test]
	fn test_parse_minimal_uri() {
		let address = test_address();
		let uri = NeoUri::from_uri(&format!("neo:{address}")).unwrap();
		assert_eq!(uri.recipient_address().unwrap(), address);
		assert!(uri.token().is_none());
		assert!(uri.amount().is_none());
	}

	#[test]
	fn test_parse_with_asset_and_amount() {
		let address = test_address();
		let uri =
			NeoUri::from_uri(&format!("neo:{address}?asset=neo&amount=1.5")).unwrap();
		assert_eq!(uri.token().unwrap(), *NEO_TOKEN_HASH);
		assert_eq!(uri.amount().unwrap(), 1.5);
		assert_eq!(uri.token_string().unwrap(), "neo");
	}

	#[test]
	fn test_parse_with_gas_and_custom_hash() {
		let address = test_address();
		let uri = NeoUri::from_uri(&format!("neo:{address}?asset=gas")).unwrap();
		assert_eq!(uri.token().unwrap(), *GAS_TOKEN_HASH);

		let custom = "d2a4cff31913016155e38e474a2c06d08be276cf";
		let uri = NeoUri::from_uri(&format!("neo:{address}?asset={custom}")).unwrap();
		assert_eq!(uri.token_string().unwrap(), custom);
	}

	#[test]
	fn test_parse_ignores_unknown_keys() {
		let address = test_address();
		let uri =
			NeoUri::from_uri(&format!("neo:{address}?foo=bar&amount=3")).unwrap();
		assert_eq!(uri.amount().unwrap(), 3.0);
	}

	#[test]
	fn test_parse_rejects_wrong_scheme() {
		let address = test_address();
		assert!(NeoUri::from_uri(&format!("nep:{address}")).is_err());
		assert!(NeoUri::from_uri("neo:").is_err());
	}

	#[test]
	fn test_parse_rejects_malformed_query() {
		let address = test_address();
		assert!(NeoUri::from_uri(&format!("neo:{address}?asset")).is_err());
	}

	#[test]
	fn test_build_uri_round_trip() {
		let recipient = H160::from_slice(&[0x42; 20]);
		let mut uri = NeoUri::new();
		uri.set_recipient(recipient).set_token(*GAS_TOKEN_HASH).set_amount(2.0);
		uri.build_uri().unwrap();

		let built = uri.uri_string().unwrap();
		assert_eq!(built, format!("neo:{}?asset=gas&amount=2", recipient.to_address()));

		let parsed = NeoUri::from_uri(&built).unwrap();
		assert_eq!(parsed.recipient().unwrap(), recipient);
		assert_eq!(parsed.token().unwrap(), *GAS_TOKEN_HASH);
		assert_eq!(parsed.amount().unwrap(), 2.0);
	}

	#[test]
	fn test_build_uri_requires_recipient() {
		assert!(NeoUri::new().build_uri().is_err());
	}
}
