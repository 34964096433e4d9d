// src/handwriting.rs
//! Handwriting decoding seam
//!
//! Free-form handwriting is decoded from a rendered glyph image by an
//! external recognizer. No recognizer ships with this crate; the
//! dispatcher holds a `DisabledDecoder` until one is installed.

/// RGBA8 rendering of a handwritten glyph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl GlyphImage {
    pub const BYTES_PER_PIXEL: usize = 4;

    /// `None` when `pixels` does not hold exactly `width * height` RGBA pixels
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(Self::BYTES_PER_PIXEL)?;
        (pixels.len() == expected).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

pub trait GlyphDecoder: Send {
    fn available(&self) -> bool;

    /// Text for the glyph; empty when nothing was recognized
    fn decode(&self, glyph: &GlyphImage) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledDecoder;

impl GlyphDecoder for DisabledDecoder {
    fn available(&self) -> bool {
        false
    }

    fn decode(&self, _glyph: &GlyphImage) -> String {
        String::new()
    }
}
