// frame.rs
//
// Copyright (c) 2025  Douglas Lau
//
//! Frame store for fill snapshots
use pix::rgb::SRgb8;
use pix::Raster;
use std::slice;
use std::vec;

/// Image being filled: 8-bit sRGB raster
pub type Image = Raster<SRgb8>;

/// Immutable snapshot of an image at one instant
pub struct Frame {
    /// Full copy of the image pixels
    raster: Raster<SRgb8>,
}

/// Ordered sequence of frames.
///
/// Insertion order is capture order, which is also playback order.
#[derive(Default)]
pub struct FrameSequence {
    frames: Vec<Frame>,
}

impl From<Raster<SRgb8>> for Frame {
    fn from(raster: Raster<SRgb8>) -> Self {
        Frame { raster }
    }
}

impl Frame {
    /// Capture a frame by copying an image
    pub fn capture(image: &Image) -> Self {
        Frame {
            raster: Raster::with_raster(image),
        }
    }

    /// Get the frame width
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    /// Get the frame height
    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    /// Get the frame raster
    pub fn raster(&self) -> &Raster<SRgb8> {
        &self.raster
    }

    /// Get one pixel
    pub fn pixel(&self, x: i32, y: i32) -> SRgb8 {
        self.raster.pixel(x, y)
    }

    /// Get all pixels, in row-major order
    pub fn pixels(&self) -> &[SRgb8] {
        self.raster.pixels()
    }

    /// Convert into the frame raster
    pub fn into_raster(self) -> Raster<SRgb8> {
        self.raster
    }
}

impl FrameSequence {
    /// Create an empty frame sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Get the number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if there are no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Get a frame by index
    pub fn get(&self, i: usize) -> Option<&Frame> {
        self.frames.get(i)
    }

    /// Get the first frame
    pub fn first(&self) -> Option<&Frame> {
        self.frames.first()
    }

    /// Get the last frame
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Get an iterator of frames
    pub fn iter(&self) -> slice::Iter<Frame> {
        self.frames.iter()
    }
}

impl From<Vec<Frame>> for FrameSequence {
    fn from(frames: Vec<Frame>) -> Self {
        FrameSequence { frames }
    }
}

impl IntoIterator for FrameSequence {
    type Item = Frame;
    type IntoIter = vec::IntoIter<Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

impl<'a> IntoIterator for &'a FrameSequence {
    type Item = &'a Frame;
    type IntoIter = slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn capture_is_a_copy() {
        let mut image = Image::with_clear(3, 2);
        let frame = Frame::capture(&image);
        *image.pixel_mut(1, 1) = SRgb8::new(255, 0, 0);
        assert_eq!(frame.width(), 3);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.pixel(1, 1), SRgb8::default());
        assert_eq!(Frame::capture(&image).pixel(1, 1), SRgb8::new(255, 0, 0));
    }

    #[test]
    fn sequence_order() {
        let mut frames = FrameSequence::new();
        assert!(frames.is_empty());
        assert!(frames.first().is_none());
        for w in 1..=3 {
            frames.push(Frame::capture(&Image::with_clear(w, 1)));
        }
        assert_eq!(frames.len(), 3);
        assert_eq!(frames.first().map(Frame::width), Some(1));
        assert_eq!(frames.last().map(Frame::width), Some(3));
        let widths: Vec<u32> = frames.iter().map(Frame::width).collect();
        assert_eq!(widths, vec![1, 2, 3]);
        assert_eq!(frames.get(1).map(Frame::width), Some(2));
        assert!(frames.get(3).is_none());
    }
}
