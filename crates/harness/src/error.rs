//! Fatal harness errors. Everything else is reported in a response frame.

use std::io;

use proto_conformance_pack::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to read request frame: {0}")]
    Read(#[source] io::Error),
    #[error("failed to write response frame: {0}")]
    Write(#[source] io::Error),
    #[error("failed to load the test schema: {0}")]
    Schema(#[from] SchemaError),
}
