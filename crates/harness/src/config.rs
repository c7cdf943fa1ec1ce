//! Harness configuration.

use proto_conformance_pack::codecs::Codecs;
use proto_conformance_pack::schema::TEST_ALL_TYPES_PROTO3;
use proto_conformance_pack::SchemaRegistry;

use crate::HarnessError;

/// Byte order of the 4-byte frame length prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrameByteOrder {
    #[default]
    Little,
    Big,
    Native,
}

impl FrameByteOrder {
    pub fn encode_len(self, len: u32) -> [u8; 4] {
        match self {
            Self::Little => len.to_le_bytes(),
            Self::Big => len.to_be_bytes(),
            Self::Native => len.to_ne_bytes(),
        }
    }

    pub fn decode_len(self, header: [u8; 4]) -> u32 {
        match self {
            Self::Little => u32::from_le_bytes(header),
            Self::Big => u32::from_be_bytes(header),
            Self::Native => u32::from_ne_bytes(header),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub byte_order: FrameByteOrder,
    /// Message type used when a request leaves `message_type` empty.
    pub default_message_type: String,
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            byte_order: FrameByteOrder::default(),
            default_message_type: TEST_ALL_TYPES_PROTO3.to_owned(),
            log_filter: "warn".to_owned(),
        }
    }
}

impl HarnessConfig {
    /// The test-message registry with the configured default selected.
    pub fn registry(&self) -> Result<SchemaRegistry, HarnessError> {
        let mut registry = SchemaRegistry::with_test_messages()?;
        registry.set_default(&self.default_message_type)?;
        Ok(registry)
    }

    pub fn codecs(&self) -> Codecs {
        Codecs::new()
    }
}
