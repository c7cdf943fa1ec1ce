//! Length-prefixed framing over a byte stream pair.
//!
//! Each frame is a 4-byte unsigned length followed by exactly that many
//! payload bytes. A stream that ends anywhere inside a frame is treated as
//! the end of the session, not as an error.

use std::io::{self, Read, Write};

use crate::FrameByteOrder;

#[derive(Debug)]
pub struct FramedChannel<R, W> {
    reader: R,
    writer: W,
    byte_order: FrameByteOrder,
}

impl<R: Read, W: Write> FramedChannel<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_byte_order(reader, writer, FrameByteOrder::default())
    }

    pub fn with_byte_order(reader: R, writer: W, byte_order: FrameByteOrder) -> Self {
        Self {
            reader,
            writer,
            byte_order,
        }
    }

    /// Reads the next frame. `Ok(None)` means the stream is exhausted.
    pub fn read_frame(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut header = [0u8; 4];
        match self.reader.read_exact(&mut header) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(err) => return Err(err),
        }
        let len = u64::from(self.byte_order.decode_len(header));
        // The declared length is untrusted, so grow the buffer as bytes arrive.
        let mut payload = Vec::new();
        (&mut self.reader).take(len).read_to_end(&mut payload)?;
        if (payload.len() as u64) < len {
            tracing::debug!(declared = len, received = payload.len(), "truncated frame");
            return Ok(None);
        }
        Ok(Some(payload))
    }

    /// Writes one frame and flushes it.
    pub fn write_frame(&mut self, payload: &[u8]) -> io::Result<()> {
        let len = u32::try_from(payload.len()).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("frame of {} bytes does not fit a u32 length", payload.len()),
            )
        })?;
        self.writer.write_all(&self.byte_order.encode_len(len))?;
        self.writer.write_all(payload)?;
        self.writer.flush()
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(input: &[u8]) -> FramedChannel<&[u8], Vec<u8>> {
        FramedChannel::new(input, Vec::new())
    }

    #[test]
    fn reads_consecutive_frames() {
        let input = [2, 0, 0, 0, 0xaa, 0xbb, 0, 0, 0, 0, 1, 0, 0, 0, 0xcc];
        let mut ch = channel(&input);
        assert_eq!(ch.read_frame().unwrap(), Some(vec![0xaa, 0xbb]));
        assert_eq!(ch.read_frame().unwrap(), Some(vec![]));
        assert_eq!(ch.read_frame().unwrap(), Some(vec![0xcc]));
        assert_eq!(ch.read_frame().unwrap(), None);
    }

    #[test]
    fn short_header_or_payload_ends_the_stream() {
        assert_eq!(channel(&[]).read_frame().unwrap(), None);
        assert_eq!(channel(&[1, 0]).read_frame().unwrap(), None);
        assert_eq!(channel(&[3, 0, 0, 0, 1, 2]).read_frame().unwrap(), None);
    }

    #[test]
    fn huge_declared_length_does_not_preallocate() {
        let mut ch = channel(&[0xff, 0xff, 0xff, 0xff, 1]);
        assert_eq!(ch.read_frame().unwrap(), None);
    }

    #[test]
    fn writes_length_then_payload() {
        let mut ch = channel(&[]);
        ch.write_frame(b"hi").unwrap();
        ch.write_frame(b"").unwrap();
        let (_, out) = ch.into_inner();
        assert_eq!(out, [2, 0, 0, 0, b'h', b'i', 0, 0, 0, 0]);
    }

    #[test]
    fn big_endian_prefix() {
        let input = [0, 0, 0, 1, 7];
        let mut ch = FramedChannel::with_byte_order(&input[..], Vec::new(), FrameByteOrder::Big);
        assert_eq!(ch.read_frame().unwrap(), Some(vec![7]));
        ch.write_frame(&[7]).unwrap();
        assert_eq!(ch.into_inner().1, input);
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "closed"))
        }
    }

    #[test]
    fn non_eof_read_errors_propagate() {
        let mut ch = FramedChannel::new(Broken, Vec::new());
        let err = ch.read_frame().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
