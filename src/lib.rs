// lib.rs      floodgif crate.
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! Animated flood fill.
//!
//! A [FloodFill] paints the 4-connected region around a seed point,
//! capturing [Frame]s of the image as it goes.  The frames can then be
//! encoded as an animated GIF with [encode] or an [Encoder].
//!
//! ## Example
//! ```
//! use floodgif::{encode, FloodFill, Image, Point, Strategy};
//! use pix::rgb::SRgb8;
//!
//! # fn main() -> Result<(), floodgif::Error> {
//! let mut image = Image::with_color(16, 16, SRgb8::new(255, 255, 255));
//! let frames = FloodFill::new(Strategy::BreadthFirst)
//!     .with_frame_interval(32)
//!     .run(&mut image, Point::new(8, 8), SRgb8::new(0, 0, 255))?;
//! let gif = encode(&frames, 100, true)?;
//! assert_eq!(&gif[..6], b"GIF89a");
//! # Ok(())
//! # }
//! ```
//!
//! [encode]: fn.encode.html
//! [Encoder]: struct.Encoder.html
//! [FloodFill]: struct.FloodFill.html
//! [Frame]: struct.Frame.html
#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

pub mod block;
mod encode;
mod error;
pub mod fill;
mod frame;
mod frontier;
mod point;

pub use crate::encode::{
    encode, encode_to, luma_index, AnimEnc, BlockEnc, Encoder,
};
pub use crate::error::{Error, Result};
pub use crate::fill::{FillStats, FloodFill, Strategy};
pub use crate::frame::{Frame, FrameSequence, Image};
pub use crate::frontier::{Frontier, Queue, Stack};
pub use crate::point::Point;
