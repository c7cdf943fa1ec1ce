//! Compiles the conformance test schema into a serialized
//! `FileDescriptorSet` that the crate embeds with `include_bytes!`.

use std::env;
use std::fs;
use std::path::Path;

use prost::Message;

const PROTOS: [&str; 2] = ["proto/test_messages_proto3.proto", "proto/conformance.proto"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo::rerun-if-changed=build.rs");
    println!("cargo::rerun-if-changed=proto");

    let file_descriptors = protox::compile(PROTOS, ["proto"])?;

    let out_dir = env::var("OUT_DIR")?;
    let dest_path = Path::new(&out_dir).join("test_messages.bin");
    fs::write(dest_path, file_descriptors.encode_to_vec())?;
    Ok(())
}
