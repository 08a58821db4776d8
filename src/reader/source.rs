use image::{imageops, imageops::FilterType, DynamicImage, GrayImage, RgbImage, RgbaImage};
use tracing::debug;

use crate::common::{CodecResult, SampleFault};

// Pixel source
// Anything the reader can sample from: decoded stills, video frames or raw RGBA buffers. Every
// source is stretched, never cropped, to the canonical canvas size before sampling.
//------------------------------------------------------------------------------

pub trait PixelSource {
    fn acquire(&self, width: u32, height: u32) -> CodecResult<RgbaImage>;
}

impl PixelSource for RgbaImage {
    fn acquire(&self, width: u32, height: u32) -> CodecResult<RgbaImage> {
        stretch(self, width, height)
    }
}

impl PixelSource for RgbImage {
    fn acquire(&self, width: u32, height: u32) -> CodecResult<RgbaImage> {
        check_dimensions(self.dimensions())?;
        stretch(&DynamicImage::ImageRgb8(self.clone()).to_rgba8(), width, height)
    }
}

impl PixelSource for GrayImage {
    fn acquire(&self, width: u32, height: u32) -> CodecResult<RgbaImage> {
        check_dimensions(self.dimensions())?;
        stretch(&DynamicImage::ImageLuma8(self.clone()).to_rgba8(), width, height)
    }
}

impl PixelSource for DynamicImage {
    fn acquire(&self, width: u32, height: u32) -> CodecResult<RgbaImage> {
        check_dimensions((self.width(), self.height()))?;
        match self.as_rgba8() {
            Some(img) => stretch(img, width, height),
            None => stretch(&self.to_rgba8(), width, height),
        }
    }
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn acquire(&self, width: u32, height: u32) -> CodecResult<RgbaImage> {
        (**self).acquire(width, height)
    }
}

// Raw frame
//------------------------------------------------------------------------------

/// Borrowed, tightly packed RGBA8 buffer, e.g. a frame grabbed from a camera.
#[derive(Debug, Clone, Copy)]
pub struct RawFrame<'a> {
    pub width: u32,
    pub height: u32,
    pub data: &'a [u8],
}

impl<'a> RawFrame<'a> {
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> Self {
        Self { width, height, data }
    }
}

impl PixelSource for RawFrame<'_> {
    fn acquire(&self, width: u32, height: u32) -> CodecResult<RgbaImage> {
        check_dimensions((self.width, self.height))?;
        let expected = self.width as usize * self.height as usize * 4;
        if self.data.len() != expected {
            return Err(SampleFault::BufferSizeMismatch { expected, actual: self.data.len() }.into());
        }

        let img = RgbaImage::from_raw(self.width, self.height, self.data.to_vec())
            .ok_or(SampleFault::Unreadable)?;
        stretch(&img, width, height)
    }
}

// Resampling
//------------------------------------------------------------------------------

fn check_dimensions((w, h): (u32, u32)) -> CodecResult<()> {
    if w == 0 || h == 0 {
        return Err(SampleFault::EmptySource.into());
    }
    Ok(())
}

fn stretch(img: &RgbaImage, width: u32, height: u32) -> CodecResult<RgbaImage> {
    check_dimensions(img.dimensions())?;
    if img.dimensions() == (width, height) {
        return Ok(img.clone());
    }

    debug!("Resampling {}x{} source to {width}x{height}", img.width(), img.height());
    Ok(imageops::resize(img, width, height, FilterType::Triangle))
}
