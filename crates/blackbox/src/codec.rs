//! Compression codec for stored request logs.
//!
//! Records are deflate-compressed with a zlib wrapper, so transcripts
//! stay compact in the store and the frame is self-describing on the way
//! back out. An empty transcript compresses to a valid empty-payload
//! frame and round-trips to an empty string.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};

use crate::error::{RecorderError, Result};

/// Spare output capacity reserved per inflate step.
const INFLATE_CHUNK: usize = 16 * 1024;

/// Compresses log text into a zlib frame.
///
/// # Errors
///
/// Returns [`RecorderError::CompressionFailed`] if the encoder cannot
/// finish the frame.
pub fn compress(text: &str) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(text.as_bytes())
        .map_err(|e| RecorderError::CompressionFailed(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| RecorderError::CompressionFailed(e.to_string()))
}

/// Decompresses a stored frame back into text.
///
/// The frame must run through its stream terminator: input that ends
/// before the terminator is rejected as corrupt rather than returned as
/// partial text. Invalid UTF-8 in the decompressed bytes is replaced
/// rather than rejected, so a record written by a non-UTF-8 producer
/// still renders.
///
/// # Errors
///
/// Returns [`RecorderError::CorruptRecord`] if the bytes are not a valid
/// zlib frame or the stream never reaches its terminator.
pub fn decompress(bytes: &[u8]) -> Result<String> {
    let mut decompressor = Decompress::new(true);
    let mut decompressed = Vec::new();
    loop {
        let consumed = decompressor.total_in() as usize;
        let produced = decompressed.len();
        decompressed.reserve(INFLATE_CHUNK);
        let status = decompressor
            .decompress_vec(&bytes[consumed..], &mut decompressed, FlushDecompress::Finish)
            .map_err(|e| RecorderError::CorruptRecord(e.to_string()))?;
        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                // No terminator, no fresh input consumed, no output
                // produced: the frame is cut short.
                let stalled = decompressor.total_in() as usize == consumed
                    && decompressed.len() == produced;
                if stalled {
                    return Err(RecorderError::CorruptRecord(
                        "truncated zlib frame".to_owned(),
                    ));
                }
            }
        }
    }
    Ok(String::from_utf8_lossy(&decompressed).into_owned())
}
