//! The compiled test schema and an explicit registry over it.
//!
//! `build.rs` compiles `proto/*.proto` into a `FileDescriptorSet`; it is
//! embedded here and decoded into a [`DescriptorPool`] once at startup.

use prost_reflect::{DescriptorError, DescriptorPool, MessageDescriptor};
use thiserror::Error;

/// Serialized `FileDescriptorSet` for the conformance test messages.
pub static TEST_MESSAGES_DESCRIPTOR_SET: &[u8] =
    include_bytes!(concat!(env!("OUT_DIR"), "/test_messages.bin"));

pub const TEST_ALL_TYPES_PROTO3: &str = "protobuf_test_messages.proto3.TestAllTypesProto3";
pub const FAILURE_SET: &str = "conformance.FailureSet";

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid descriptor set: {0}")]
    Descriptor(#[from] DescriptorError),
    #[error("message type `{0}` is not in the descriptor pool")]
    UnknownMessage(String),
}

/// Message types a testee can round-trip.
///
/// Built once at startup and handed to whoever needs to resolve a message
/// type name; there is no process-wide registration.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    pool: DescriptorPool,
    default: Option<MessageDescriptor>,
}

impl SchemaRegistry {
    pub fn new(pool: DescriptorPool) -> Self {
        Self {
            pool,
            default: None,
        }
    }

    /// Registry over the embedded test schema, defaulting to
    /// `TestAllTypesProto3`.
    pub fn with_test_messages() -> Result<Self, SchemaError> {
        let pool = DescriptorPool::decode(TEST_MESSAGES_DESCRIPTOR_SET)?;
        let mut registry = Self::new(pool);
        registry.set_default(TEST_ALL_TYPES_PROTO3)?;
        Ok(registry)
    }

    /// Selects the descriptor used when a request names no message type.
    pub fn set_default(&mut self, full_name: &str) -> Result<(), SchemaError> {
        let descriptor = self
            .pool
            .get_message_by_name(full_name)
            .ok_or_else(|| SchemaError::UnknownMessage(full_name.to_owned()))?;
        self.default = Some(descriptor);
        Ok(())
    }

    /// Resolves a full message name; the empty name resolves to the default.
    pub fn resolve(&self, full_name: &str) -> Option<MessageDescriptor> {
        if full_name.is_empty() {
            return self.default.clone();
        }
        self.pool.get_message_by_name(full_name)
    }

    pub fn pool(&self) -> &DescriptorPool {
        &self.pool
    }
}
