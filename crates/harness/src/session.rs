//! The request/response loop.

use std::fmt;
use std::io::{Read, Write};

use prost::Message;
use tracing::{debug, info, warn};

use crate::engine::RoundTripEngine;
use crate::frame::FramedChannel;
use crate::request::{decode_request, Payload};
use crate::response::{ConformanceResponse, ResponseResult};
use crate::{HarnessConfig, HarnessError};

/// Per-result request counts for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub requests: u64,
    pub protobuf_payloads: u64,
    pub json_payloads: u64,
    pub parse_errors: u64,
    pub serialize_errors: u64,
    pub runtime_errors: u64,
    pub skipped: u64,
}

impl SessionSummary {
    fn record(&mut self, result: &ResponseResult) {
        self.requests += 1;
        let counter = match result {
            ResponseResult::ProtobufPayload(_) => &mut self.protobuf_payloads,
            ResponseResult::JsonPayload(_) => &mut self.json_payloads,
            ResponseResult::ParseError(_) => &mut self.parse_errors,
            ResponseResult::SerializeError(_) => &mut self.serialize_errors,
            ResponseResult::RuntimeError(_) => &mut self.runtime_errors,
            ResponseResult::Skipped(_) => &mut self.skipped,
        };
        *counter += 1;
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} requests: {} protobuf, {} json, {} parse errors, {} serialize errors, \
             {} runtime errors, {} skipped",
            self.requests,
            self.protobuf_payloads,
            self.json_payloads,
            self.parse_errors,
            self.serialize_errors,
            self.runtime_errors,
            self.skipped
        )
    }
}

/// Serves requests from one channel until its input ends.
pub struct Session<R, W> {
    channel: FramedChannel<R, W>,
    engine: RoundTripEngine,
    summary: SessionSummary,
}

impl<R: Read, W: Write> Session<R, W> {
    pub fn new(channel: FramedChannel<R, W>, engine: RoundTripEngine) -> Self {
        Self {
            channel,
            engine,
            summary: SessionSummary::default(),
        }
    }

    pub fn from_config(
        reader: R,
        writer: W,
        config: &HarnessConfig,
    ) -> Result<Self, HarnessError> {
        let channel = FramedChannel::with_byte_order(reader, writer, config.byte_order);
        let engine = RoundTripEngine::new(config.registry()?, config.codecs());
        Ok(Self::new(channel, engine))
    }

    /// Produces the response for one request frame.
    pub fn handle(&mut self, frame: &[u8]) -> ResponseResult {
        let outcome = decode_request(frame).map(|request| {
            debug!(
                input = ?request.payload.as_ref().map(Payload::format),
                output = request.requested_output_format,
                category = request.test_category,
                message_type = %request.message_type,
                "request"
            );
            self.engine.run(&request)
        });
        let result = ResponseResult::from_outcome(outcome);
        if let ResponseResult::RuntimeError(reason) = &result {
            warn!(%reason, "runtime error");
        }
        debug!(result = result.kind(), "response");
        self.summary.record(&result);
        result
    }

    /// Serves one frame. Returns `false` once the input is exhausted.
    pub fn step(&mut self) -> Result<bool, HarnessError> {
        let Some(frame) = self.channel.read_frame().map_err(HarnessError::Read)? else {
            return Ok(false);
        };
        let response = ConformanceResponse::from(self.handle(&frame));
        self.channel
            .write_frame(&response.encode_to_vec())
            .map_err(HarnessError::Write)?;
        Ok(true)
    }

    pub fn run(mut self) -> Result<SessionSummary, HarnessError> {
        while self.step()? {}
        info!(summary = %self.summary, "input closed, shutting down");
        Ok(self.summary)
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }
}
