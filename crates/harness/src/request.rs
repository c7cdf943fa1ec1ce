//! `ConformanceRequest` envelope (`conformance.proto`, fields 1-5 and 7-9).

use std::fmt;

use prost::Message;
use proto_conformance_pack::WireFormat;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Failed to parse conformance request: {0}")]
pub struct RequestError(#[from] prost::DecodeError);

#[derive(Clone, PartialEq, Message)]
pub struct ConformanceRequest {
    /// The input payload; when several payload fields are present the last
    /// one on the wire wins.
    #[prost(oneof = "Payload", tags = "1, 2, 7, 8")]
    pub payload: Option<Payload>,
    /// Raw `WireFormat` number; unknown numbers are kept so they can be
    /// reported rather than read as `UNSPECIFIED`.
    #[prost(enumeration = "WireFormat", tag = "3")]
    pub requested_output_format: i32,
    /// Full protobuf name of the payload's message type. Empty selects the
    /// registry default.
    #[prost(string, tag = "4")]
    pub message_type: String,
    #[prost(enumeration = "TestCategory", tag = "5")]
    pub test_category: i32,
    /// Only meaningful for text-format output, which this testee skips.
    #[prost(bool, tag = "9")]
    pub print_unknown_fields: bool,
}

/// The input payload, tagged with its encoding.
#[derive(Clone, PartialEq, Eq, prost::Oneof)]
pub enum Payload {
    #[prost(bytes, tag = "1")]
    Protobuf(Vec<u8>),
    #[prost(string, tag = "2")]
    Json(String),
    #[prost(string, tag = "7")]
    Jspb(String),
    #[prost(string, tag = "8")]
    Text(String),
}

impl Payload {
    pub fn format(&self) -> WireFormat {
        match self {
            Payload::Protobuf(_) => WireFormat::Protobuf,
            Payload::Json(_) => WireFormat::Json,
            Payload::Jspb(_) => WireFormat::Jspb,
            Payload::Text(_) => WireFormat::TextFormat,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Protobuf(bytes) => bytes,
            Payload::Json(text) | Payload::Jspb(text) | Payload::Text(text) => text.as_bytes(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum TestCategory {
    Unspecified = 0,
    Binary = 1,
    Json = 2,
    /// JSON input whose unknown fields must be ignored rather than rejected.
    JsonIgnoreUnknownParsing = 3,
    Jspb = 4,
    TextFormat = 5,
}

impl fmt::Display for TestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unspecified => "UNSPECIFIED_TEST",
            Self::Binary => "BINARY_TEST",
            Self::Json => "JSON_TEST",
            Self::JsonIgnoreUnknownParsing => "JSON_IGNORE_UNKNOWN_PARSING_TEST",
            Self::Jspb => "JSPB_TEST",
            Self::TextFormat => "TEXT_FORMAT_TEST",
        })
    }
}

impl ConformanceRequest {
    pub fn with_payload(payload: Payload, output: WireFormat) -> Self {
        Self {
            payload: Some(payload),
            requested_output_format: output.into(),
            ..Self::default()
        }
    }

    pub fn is_ignore_unknown_test(&self) -> bool {
        self.test_category == i32::from(TestCategory::JsonIgnoreUnknownParsing)
    }
}

/// Decodes a `ConformanceRequest` envelope. Unknown fields are skipped.
pub fn decode_request(bytes: &[u8]) -> Result<ConformanceRequest, RequestError> {
    Ok(ConformanceRequest::decode(bytes)?)
}
