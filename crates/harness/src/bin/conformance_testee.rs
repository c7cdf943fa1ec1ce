//! Conformance testee speaking the framed protocol on stdin/stdout.

use std::io::{self, BufWriter};

use proto_conformance::logging::init_logging;
use proto_conformance::{HarnessConfig, HarnessError, Session};

fn main() -> Result<(), HarnessError> {
    let config = HarnessConfig::default();
    init_logging(&config);
    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());
    Session::from_config(stdin, stdout, &config)?.run()?;
    Ok(())
}
