//! # Blackbox Serde
//! Byte-level serialization used on the simulator / black-box wire.
//!
//! Messages are MessagePack-compatible arrays. Encoders always emit string
//! elements; decoders also accept native MessagePack scalars through
//! [`Scalar`] so a black box written against a stock msgpack library can
//! reply with plain numbers.

#![deny(trivial_casts, trivial_numeric_casts, unstable_features, unused_import_braces)]

mod array;
mod byte_reader;
mod byte_writer;
mod error;
pub mod format;
mod scalar;
mod serde;
mod string;

pub use array::{read_array_len, write_array_len};
pub use byte_reader::ByteReader;
pub use byte_writer::{ByteCounter, ByteWrite, ByteWriter};
pub use error::SerdeErr;
pub use scalar::Scalar;
pub use serde::Serde;
pub use string::{read_str, write_str};
