//! `ConformanceResponse` envelope.

use prost::Message;
use proto_conformance_pack::WireFormat;
use thiserror::Error;

use crate::engine::Outcome;
use crate::request::RequestError;

#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("malformed conformance response: {0}")]
    Decode(#[from] prost::DecodeError),
    #[error("conformance response has no result set")]
    Empty,
}

#[derive(Clone, PartialEq, Message)]
pub struct ConformanceResponse {
    /// Exactly one result per request.
    #[prost(oneof = "ResponseResult", tags = "1, 6, 2, 3, 4, 5")]
    pub result: Option<ResponseResult>,
}

#[derive(Clone, PartialEq, Eq, prost::Oneof)]
pub enum ResponseResult {
    #[prost(string, tag = "1")]
    ParseError(String),
    #[prost(string, tag = "6")]
    SerializeError(String),
    #[prost(string, tag = "2")]
    RuntimeError(String),
    #[prost(bytes, tag = "3")]
    ProtobufPayload(Vec<u8>),
    #[prost(string, tag = "4")]
    JsonPayload(String),
    #[prost(string, tag = "5")]
    Skipped(String),
}

impl ResponseResult {
    /// Maps the result of decoding and running one request.
    pub fn from_outcome(result: Result<Outcome, RequestError>) -> Self {
        match result {
            Err(err) => Self::RuntimeError(err.to_string()),
            Ok(Outcome::ParseFailure(reason)) => Self::ParseError(reason),
            Ok(Outcome::SerializeFailure(reason)) => Self::SerializeError(reason),
            Ok(Outcome::Skipped(reason)) => Self::Skipped(reason),
            Ok(Outcome::Unsupported(reason)) => Self::RuntimeError(reason),
            Ok(Outcome::Success { bytes, format }) => match format {
                WireFormat::Protobuf => Self::ProtobufPayload(bytes),
                WireFormat::Json => match String::from_utf8(bytes) {
                    Ok(text) => Self::JsonPayload(text),
                    Err(err) => Self::SerializeError(format!("Failed to serialize: {err}")),
                },
                other => Self::RuntimeError(format!("unsupported output format: {other}")),
            },
        }
    }

    /// Short name of the result field, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ParseError(_) => "parse_error",
            Self::SerializeError(_) => "serialize_error",
            Self::RuntimeError(_) => "runtime_error",
            Self::ProtobufPayload(_) => "protobuf_payload",
            Self::JsonPayload(_) => "json_payload",
            Self::Skipped(_) => "skipped",
        }
    }
}

impl From<ResponseResult> for ConformanceResponse {
    fn from(result: ResponseResult) -> Self {
        Self {
            result: Some(result),
        }
    }
}

/// Decodes a response envelope; the last result field on the wire wins.
pub fn decode_response(bytes: &[u8]) -> Result<ResponseResult, ResponseError> {
    ConformanceResponse::decode(bytes)?
        .result
        .ok_or(ResponseError::Empty)
}
