//! RESP2 wire format for storepool: the [Data] model, a streaming parser, a serializer and an
//! optional Tokio codec.

pub use data::Data;
pub use error::{DataType, Error, ReplyError, Result};
pub use nom;
pub use ser::to_bytes;

/// Tokio codec for RESP.
#[cfg(feature = "codec")]
pub mod codec;
/// General form of RESP data.
mod data;
/// RESP errors.
mod error;
/// RESP parsing.
pub mod parser;
/// RESP serialization.
mod ser;
