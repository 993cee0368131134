//! Binary serialization for the Neo wire format.
//!
//! The [`Encoder`] and [`Decoder`] pair implements Neo's canonical binary
//! layout: little-endian fixed-width integers, shortest-form var-ints, and
//! length-prefixed byte strings. Every wire type implements
//! [`NeoSerializable`] on top of them. Because each byte of a serialized
//! transaction is consensus-significant, the decoder rejects non-canonical
//! var-ints instead of silently accepting them.

pub use binary_decoder::Decoder;
pub use encode::{var_int_size, Encoder, NeoSerializable, VarSizeTrait};
pub use error::CodecError;
pub use op_code::OpCode;

mod binary_decoder;
mod encode;
mod error;
mod op_code;
