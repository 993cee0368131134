//! Script construction: the builder, call flags and interop services.

pub use call_flags::CallFlags;
pub use interop_service::{interop_hash, InteropService};
pub use script_builder::ScriptBuilder;

mod call_flags;
mod interop_service;
mod script_builder;
