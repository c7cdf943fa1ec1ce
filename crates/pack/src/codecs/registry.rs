//! Aggregate codec holder.

use crate::WireFormat;

use super::{BinaryMessageCodec, JsonMessageCodec, MessageCodec};

#[derive(Debug, Default)]
pub struct Codecs {
    pub binary: BinaryMessageCodec,
    pub json: JsonMessageCodec,
}

impl Codecs {
    pub fn new() -> Self {
        Self {
            binary: BinaryMessageCodec::new(),
            json: JsonMessageCodec::new(),
        }
    }

    /// The codec for `format`, or `None` if this crate does not implement it.
    pub fn codec_mut(&mut self, format: WireFormat) -> Option<&mut dyn MessageCodec> {
        match format {
            WireFormat::Protobuf => Some(&mut self.binary),
            WireFormat::Json => Some(&mut self.json),
            _ => None,
        }
    }
}
