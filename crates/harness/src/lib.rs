//! Protobuf conformance testee.
//!
//! Reads length-prefixed `ConformanceRequest` frames, round-trips each
//! payload through the codecs of `proto-conformance-pack`, and writes one
//! `ConformanceResponse` frame back per request.
//!
//! ```text
//! Session ─► FramedChannel::read_frame ─► decode_request
//!        ─► RoundTripEngine::run ─► ResponseResult::from_outcome
//!        ─► FramedChannel::write_frame
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod frame;
pub mod logging;
pub mod request;
pub mod response;
pub mod session;

pub use config::{FrameByteOrder, HarnessConfig};
pub use engine::{Outcome, RoundTripEngine};
pub use error::HarnessError;
pub use frame::FramedChannel;
pub use request::{decode_request, ConformanceRequest, Payload, RequestError, TestCategory};
pub use response::{decode_response, ConformanceResponse, ResponseError, ResponseResult};
pub use session::{Session, SessionSummary};
