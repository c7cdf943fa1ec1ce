//! Common codec trait and error.

use prost_reflect::{DynamicMessage, MessageDescriptor};
use thiserror::Error;

use crate::WireFormat;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Binary(#[from] prost::DecodeError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// An encode/decode pair for one wire format.
pub trait MessageCodec {
    fn id(&self) -> &'static str;
    fn format(&self) -> WireFormat;
    fn encode(&mut self, message: &DynamicMessage) -> Result<Vec<u8>, CodecError>;
    fn decode(
        &mut self,
        descriptor: &MessageDescriptor,
        bytes: &[u8],
    ) -> Result<DynamicMessage, CodecError>;
}
