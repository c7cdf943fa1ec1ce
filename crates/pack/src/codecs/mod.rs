//! Message codecs behind a common trait, and the [`Codecs`] holder.

mod binary;
mod json;
mod registry;
mod types;

pub use binary::BinaryMessageCodec;
pub use json::JsonMessageCodec;
pub use registry::Codecs;
pub use types::{CodecError, MessageCodec};
