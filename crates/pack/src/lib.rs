//! Protobuf codecs for the conformance testee.
//!
//! - [`schema`]: the compiled test schema and [`SchemaRegistry`]
//! - [`json`]: the JSON input checks layered over the serde mapping
//! - [`codecs`]: the binary and JSON formats behind [`codecs::MessageCodec`]
//!
//! Decoded messages are [`prost_reflect::DynamicMessage`]s, so one code path
//! handles every message type the descriptor pool knows about.

mod constants;

pub mod codecs;
pub mod json;
pub mod schema;

pub use constants::WireFormat;
pub use prost_reflect::{DynamicMessage, MessageDescriptor};
pub use schema::{SchemaError, SchemaRegistry};
