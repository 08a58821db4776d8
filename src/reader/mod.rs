mod scan;
mod source;

pub use scan::{Scan, Scanner};
pub use source::{PixelSource, RawFrame};

use std::path::Path;

use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::codec::Codec;
use crate::common::{unpack, BitStream, CodecResult, SampleFault};

// Decoder
//------------------------------------------------------------------------------

impl Codec {
    /// Recovers the text from an image of a code. Fails with `NoMarkerFound` when the sampled
    /// payload carries no end marker, which is the normal outcome for frames without a code.
    pub fn decode<S: PixelSource + ?Sized>(&self, src: &S) -> CodecResult<String> {
        let geo = self.geometry();

        debug!("Acquiring {}x{} canvas", geo.width, geo.height);
        let img = src.acquire(geo.width, geo.height)?;

        debug!("Sampling {} data cells", self.capacity());
        let bits = self.sample(&img)?;

        debug!("Unpacking {} sampled bits", bits.len());
        self.unpack(&bits)
    }

    /// Text preceding this codec's end marker in `bits`.
    pub fn unpack(&self, bits: &BitStream) -> CodecResult<String> {
        unpack(bits, self.marker())
    }

    pub fn decode_file<P: AsRef<Path>>(&self, path: P) -> CodecResult<String> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| {
            debug!("Failed to open {}: {e}", path.display());
            SampleFault::Unreadable
        })?;
        self.decode(&img)
    }

    /// Reads one bit per data cell from the pixel at the module's center.
    pub fn sample(&self, img: &RgbaImage) -> CodecResult<BitStream> {
        let geo = self.geometry();
        let mut bits = BitStream::with_capacity(self.capacity());
        for &(x, y) in self.cells() {
            let (cx, cy) = geo.center_of(x, y);
            let px = img
                .get_pixel_checked(cx, cy)
                .ok_or(SampleFault::OutOfBounds { x: cx, y: cy })?;
            bits.push(is_dark(px));
        }
        Ok(bits)
    }
}

/// Mean of the color channels below this value reads as a set bit.
pub const DARK_THRESHOLD: u16 = 150;

pub fn brightness(px: &Rgba<u8>) -> u16 {
    (px[0] as u16 + px[1] as u16 + px[2] as u16) / 3
}

pub fn is_dark(px: &Rgba<u8>) -> bool {
    brightness(px) < DARK_THRESHOLD
}
