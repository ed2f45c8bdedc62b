//! Frame and depth buffers the rasterizer renders into.
//!
//! Both buffers address cells row-major as `y * width + x`. They are created
//! once per target resolution and cleared, not reallocated, between frames;
//! a resolution change is modeled as drop + create.

use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA color, one byte per channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Pixel = Pixel { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Pixel = Pixel { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Pixel = Pixel { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Pixel = Pixel { r: 0, g: 0, b: 255, a: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Scale the color channels by an intensity in [0, 1]
    pub fn shade(self, intensity: f32) -> Self {
        let i = intensity.clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * i) as u8,
            g: (self.g as f32 * i) as u8,
            b: (self.b as f32 * i) as u8,
            a: self.a,
        }
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Buffer creation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// `width * height == 0`; nothing was allocated
    ZeroArea { width: usize, height: usize },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::ZeroArea { width, height } => {
                write!(f, "buffer with zero area ({}x{})", width, height)
            }
        }
    }
}

impl std::error::Error for BufferError {}

/// Flat RGBA frame buffer
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pub pixels: Vec<Pixel>,
    pub width: usize,
    pub height: usize,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Result<Self, BufferError> {
        if width * height == 0 {
            return Err(BufferError::ZeroArea { width, height });
        }
        Ok(Self {
            pixels: vec![Pixel::BLACK; width * height],
            width,
            height,
        })
    }

    pub fn size(&self) -> usize {
        self.width * self.height
    }

    /// Overwrite every cell with the fill color
    pub fn clear(&mut self, fill: Pixel) {
        self.pixels.fill(fill);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        self.pixels[y * self.width + x]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Pixel) {
        self.pixels[y * self.width + x] = color;
    }

    /// Flat `[r,g,b,a, r,g,b,a, ..]` image, row-major, for blitting or
    /// PNG encoding
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.size() * 4);
        for p in &self.pixels {
            bytes.extend_from_slice(&p.to_bytes());
        }
        bytes
    }
}

/// Flat f32 depth buffer. Each cell holds the camera-space depth of the
/// nearest fragment written so far; a write only happens when the candidate
/// is strictly nearer.
#[derive(Debug, Clone)]
pub struct DepthBuffer {
    pub data: Vec<f32>,
    pub width: usize,
    pub height: usize,
}

impl DepthBuffer {
    pub fn new(width: usize, height: usize) -> Result<Self, BufferError> {
        if width * height == 0 {
            return Err(BufferError::ZeroArea { width, height });
        }
        Ok(Self {
            data: vec![f32::MAX; width * height],
            width,
            height,
        })
    }

    pub fn size(&self) -> usize {
        self.width * self.height
    }

    /// Reset every cell, conventionally to the far clipping plane
    pub fn clear(&mut self, far_plane: f32) {
        self.data.fill(far_plane);
    }

    pub fn depth(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_area_creation_fails() {
        for (w, h) in [(0, 0), (0, 10), (10, 0)] {
            assert_eq!(
                FrameBuffer::new(w, h).unwrap_err(),
                BufferError::ZeroArea { width: w, height: h }
            );
            assert!(DepthBuffer::new(w, h).is_err());
        }
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut fb = FrameBuffer::new(4, 3).unwrap();
        fb.clear(Pixel::GREEN);
        let once = fb.pixels.clone();
        fb.clear(Pixel::GREEN);
        assert_eq!(fb.pixels, once);
        assert!(fb.pixels.iter().all(|&p| p == Pixel::GREEN));

        let mut db = DepthBuffer::new(4, 3).unwrap();
        db.clear(100.0);
        db.clear(100.0);
        assert!(db.data.iter().all(|&d| d == 100.0));
    }

    #[test]
    fn test_row_major_addressing() {
        let mut fb = FrameBuffer::new(5, 4).unwrap();
        fb.set_pixel(3, 2, Pixel::RED);
        assert_eq!(fb.pixels[2 * 5 + 3], Pixel::RED);
        assert_eq!(fb.pixel(3, 2), Pixel::RED);
    }

    #[test]
    fn test_rgba_bytes_channel_order() {
        let mut fb = FrameBuffer::new(2, 1).unwrap();
        fb.set_pixel(0, 0, Pixel::with_alpha(1, 2, 3, 4));
        fb.set_pixel(1, 0, Pixel::with_alpha(5, 6, 7, 8));
        assert_eq!(fb.to_rgba_bytes(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
