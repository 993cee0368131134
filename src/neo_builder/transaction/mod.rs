//! Transaction assembly: signers, witnesses, attributes and the builder.

pub use invocation_script::InvocationScript;
pub use signer::Signer;
pub use transaction::Transaction;
pub use transaction_attribute::{OracleResponseCode, TransactionAttribute};
pub use transaction_builder::TransactionBuilder;
pub use transaction_error::TransactionError;
pub use verification_script::VerificationScript;
pub use witness::Witness;
pub use witness_rule::{WitnessAction, WitnessCondition, WitnessRule};
pub use witness_scope::WitnessScope;

mod invocation_script;
mod signer;
mod transaction;
mod transaction_attribute;
mod transaction_builder;
mod transaction_error;
mod verification_script;
mod witness;
mod witness_rule;
mod witness_scope;
