//! Protobuf binary codec.
//!
//! Proto3 wire semantics come from `prost`: default-valued singular fields
//! are not written, repeated numeric fields are packed, both packed and
//! unpacked input is accepted, and unknown fields are kept and re-emitted.
//! Nesting is bounded by prost's recursion limit of 100.

use prost::Message;
use prost_reflect::{DynamicMessage, MessageDescriptor};

use crate::WireFormat;

use super::types::{CodecError, MessageCodec};

#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryMessageCodec;

impl BinaryMessageCodec {
    pub fn new() -> Self {
        Self
    }
}

impl MessageCodec for BinaryMessageCodec {
    fn id(&self) -> &'static str {
        "protobuf"
    }

    fn format(&self) -> WireFormat {
        WireFormat::Protobuf
    }

    fn encode(&mut self, message: &DynamicMessage) -> Result<Vec<u8>, CodecError> {
        Ok(message.encode_to_vec())
    }

    fn decode(
        &mut self,
        descriptor: &MessageDescriptor,
        bytes: &[u8],
    ) -> Result<DynamicMessage, CodecError> {
        Ok(DynamicMessage::decode(descriptor.clone(), bytes)?)
    }
}
