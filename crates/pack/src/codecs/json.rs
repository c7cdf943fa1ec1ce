//! Protobuf JSON codec wrapper.

use prost_reflect::{DynamicMessage, MessageDescriptor};

use crate::json::{self, JsonParseOptions};
use crate::WireFormat;

use super::types::{CodecError, MessageCodec};

#[derive(Debug, Default, Clone)]
pub struct JsonMessageCodec {
    pub options: JsonParseOptions,
}

impl JsonMessageCodec {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageCodec for JsonMessageCodec {
    fn id(&self) -> &'static str {
        "json"
    }

    fn format(&self) -> WireFormat {
        WireFormat::Json
    }

    fn encode(&mut self, message: &DynamicMessage) -> Result<Vec<u8>, CodecError> {
        Ok(json::encode(message)?)
    }

    fn decode(
        &mut self,
        descriptor: &MessageDescriptor,
        bytes: &[u8],
    ) -> Result<DynamicMessage, CodecError> {
        Ok(json::decode(descriptor, bytes, self.options)?)
    }
}
