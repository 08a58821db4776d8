use tracing::{debug, trace};

use super::source::PixelSource;
use crate::codec::Codec;
use crate::common::{CodecError, CodecResult};

// Scanner
// Polls successive frames, e.g. from a camera, until one decodes. Frames without a valid code are
// skipped; a frame that cannot be sampled at all ends the scan with its error. Each frame is
// decoded into its own buffer, so one scanner per source is enough.
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    pub text: String,
    // Index of the frame that decoded
    pub frame: usize,
    // Frames before it that carried no code
    pub skipped: usize,
}

pub struct Scanner<'a> {
    codec: &'a Codec,
    max_frames: Option<usize>,
}

impl<'a> Scanner<'a> {
    pub fn new(codec: &'a Codec) -> Self {
        Self { codec, max_frames: None }
    }

    pub fn max_frames(mut self, n: usize) -> Self {
        self.max_frames = Some(n);
        self
    }

    /// Returns the first decodable frame, or `NoMarkerFound` if the frames (or the frame budget)
    /// run out first.
    pub fn scan<S, I>(&self, frames: I) -> CodecResult<Scan>
    where
        S: PixelSource,
        I: IntoIterator<Item = S>,
    {
        let limit = self.max_frames.unwrap_or(usize::MAX);
        let mut skipped = 0;
        for (i, frame) in frames.into_iter().take(limit).enumerate() {
            match self.codec.decode(&frame) {
                Ok(text) => {
                    debug!("Decoded frame {i} after skipping {skipped}");
                    return Ok(Scan { text, frame: i, skipped });
                }
                Err(e) if e.is_retryable() => {
                    trace!("Frame {i}: {e}");
                    skipped += 1;
                }
                Err(e) => {
                    debug!("Frame {i} could not be sampled: {e}");
                    return Err(e);
                }
            }
        }
        debug!("No code in {skipped} frames");
        Err(CodecError::NoMarkerFound)
    }
}
