// encode.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
//! GIF encoding of frame sequences
use crate::block::*;
use crate::error::{Error, Result};
use crate::frame::{Frame, FrameSequence};
use pix::rgb::{Rgb, SRgb8};
use std::convert::TryFrom;
use std::io::{self, BufWriter, Write};

/// LZW minimum code size for a 256 entry palette
const MIN_CODE_SIZE: u8 = 8;

/// Maximum length of a data sub-block
const SUB_BLOCK_LEN: usize = 0xFF;

/// GIF file encoder
///
/// Can be converted to one of two encoders:
/// * [into_anim_enc] for [Frame] sequences
/// * [into_block_enc] for low-level [Block]s
///
/// ## Encoding Example
/// ```
/// use floodgif::{Encoder, Frame, Image};
/// use pix::rgb::SRgb8;
/// use std::error::Error;
/// use std::io::Write;
///
/// fn encode<W: Write>(mut w: W) -> Result<(), Box<dyn Error>> {
///     let mut enc = Encoder::new(&mut w)
///         .into_anim_enc()
///         .with_delay_ms(200)
///         .with_loop_count(Some(0));
///     let mut image = Image::with_clear(4, 4);
///     enc.encode_frame(&Frame::capture(&image))?;
///     *image.pixel_mut(1, 1) = SRgb8::new(255, 255, 255);
///     enc.encode_frame(&Frame::capture(&image))?;
///     enc.finish()?;
///     Ok(())
/// }
/// ```
///
/// [Block]: block/enum.Block.html
/// [Frame]: struct.Frame.html
/// [into_anim_enc]: struct.Encoder.html#method.into_anim_enc
/// [into_block_enc]: struct.Encoder.html#method.into_block_enc
pub struct Encoder<W: Write> {
    /// Writer for output data
    writer: W,
}

/// Encoder for writing [Block]s into a GIF file.
///
/// Build with Encoder.[into_block_enc].
///
/// [Block]: block/enum.Block.html
/// [into_block_enc]: struct.Encoder.html#method.into_block_enc
pub struct BlockEnc<W: Write> {
    /// Writer for output data
    writer: W,
}

/// Encoder for writing a sequence of [Frame]s as an animated GIF.
///
/// Every frame shares one 256 entry grayscale palette, written once as the
/// global color table.  Pixels are mapped to palette indices by luminance.
///
/// Build with Encoder.[into_anim_enc].
///
/// [Frame]: struct.Frame.html
/// [into_anim_enc]: struct.Encoder.html#method.into_anim_enc
pub struct AnimEnc<W: Write> {
    /// Block encoder
    block_enc: BlockEnc<W>,
    /// Delay between frames (centiseconds)
    delay_time_cs: u16,
    /// Animation loop count (0 means forever)
    loop_count: Option<u16>,
    /// Screen size, set when the first frame is encoded
    screen_size: Option<(u16, u16)>,
}

impl<W: Write> Encoder<BufWriter<W>> {
    /// Create a new buffered GIF encoder.
    pub fn new(writer: W) -> Self {
        Self::new_unbuffered(BufWriter::new(writer))
    }
}

impl<W: Write> Encoder<W> {
    /// Create a new unbuffered GIF encoder.
    pub fn new_unbuffered(writer: W) -> Self {
        Encoder { writer }
    }

    /// Convert into a block encoder.
    pub fn into_block_enc(self) -> BlockEnc<W> {
        BlockEnc::new(self.writer)
    }

    /// Convert into an animation encoder.
    pub fn into_anim_enc(self) -> AnimEnc<W> {
        AnimEnc::new(self.into_block_enc())
    }
}

impl<W: Write> BlockEnc<W> {
    /// Create a new block encoder
    fn new(writer: W) -> Self {
        BlockEnc { writer }
    }

    /// Encode one block
    pub fn encode<B: Into<Block>>(&mut self, block: B) -> Result<()> {
        use crate::block::Block::*;
        let w = &mut self.writer;
        match block.into() {
            Header(b) => b.format(w)?,
            LogicalScreenDesc(b) => b.format(w)?,
            GlobalColorTable(b) => b.format(w)?,
            Application(b) => b.format(w)?,
            GraphicControl(b) => b.format(w)?,
            ImageDesc(b) => b.format(w)?,
            ImageData(b) => b.format(w)?,
            Trailer(b) => b.format(w)?,
        }
        Ok(())
    }

    /// Flush buffered output
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> AnimEnc<W> {
    /// Create a new animation encoder
    fn new(block_enc: BlockEnc<W>) -> Self {
        AnimEnc {
            block_enc,
            delay_time_cs: 0,
            loop_count: None,
            screen_size: None,
        }
    }

    /// Set the delay between frames, in milliseconds.
    ///
    /// GIF delays are in centiseconds, so this is rounded to the nearest
    /// 10 ms.
    pub fn with_delay_ms(mut self, delay_ms: u32) -> Self {
        self.delay_time_cs = delay_time_cs(delay_ms);
        self
    }

    /// Set the animation loop count.
    ///
    /// `Some(0)` loops forever; `None` plays the animation once.
    pub fn with_loop_count(mut self, loop_count: Option<u16>) -> Self {
        self.loop_count = loop_count;
        self
    }

    /// Get the delay between frames (centiseconds)
    pub fn delay_time_cs(&self) -> u16 {
        self.delay_time_cs
    }

    /// Encode all frames of a sequence.
    ///
    /// Frame sizes are checked before anything is written.
    pub fn encode_frames(&mut self, frames: &FrameSequence) -> Result<()> {
        let size = check_frames(frames)?;
        if let Some(screen_size) = self.screen_size {
            if screen_size != size {
                return Err(Error::FrameSizeMismatch);
            }
        }
        for frame in frames {
            self.encode_frame(frame)?;
        }
        Ok(())
    }

    /// Encode one frame.
    ///
    /// The first frame determines the screen size; the preamble and global
    /// color table are written before it.
    pub fn encode_frame(&mut self, frame: &Frame) -> Result<()> {
        let size = frame_size(frame)?;
        match self.screen_size {
            None => {
                self.encode_preamble(size)?;
                self.screen_size = Some(size);
            }
            Some(screen_size) if screen_size != size => {
                return Err(Error::FrameSizeMismatch);
            }
            Some(_) => {}
        }
        self.encode_graphic_control()?;
        let image_desc = ImageDesc::default()
            .with_width(size.0)
            .with_height(size.1);
        let mut image_data = ImageData::new(image_desc.image_sz(), MIN_CODE_SIZE);
        image_data.add_data(&palette_indices(frame));
        debug_assert!(image_data.is_complete());
        self.block_enc.encode(image_desc)?;
        self.block_enc.encode(image_data)
    }

    /// Finish encoding, writing the trailer.
    pub fn finish(mut self) -> Result<()> {
        if self.screen_size.is_none() {
            return Err(Error::NoFrames);
        }
        self.block_enc.encode(Trailer::default())?;
        self.block_enc.flush()
    }

    /// Encode the preamble blocks
    fn encode_preamble(&mut self, size: (u16, u16)) -> Result<()> {
        let tbl = ColorTableConfig::new(
            ColorTableExistence::Present,
            ColorTableOrdering::NotSorted,
            PALETTE_LEN as u16,
        );
        let desc = LogicalScreenDesc::default()
            .with_screen_width(size.0)
            .with_screen_height(size.1)
            .with_color_table_config(&tbl);
        debug!("preamble: {}x{}, loop {:?}", size.0, size.1, self.loop_count);
        self.block_enc.encode(Header::default())?;
        self.block_enc.encode(desc)?;
        self.block_enc.encode(GlobalColorTable::grayscale())?;
        if let Some(loop_count) = self.loop_count {
            self.block_enc.encode(Application::with_loop_count(loop_count))?;
        }
        Ok(())
    }

    /// Encode a graphic control extension for one frame
    fn encode_graphic_control(&mut self) -> Result<()> {
        let mut control = GraphicControl::default();
        control.set_delay_time_cs(self.delay_time_cs);
        control.set_user_input(false);
        control.set_transparent_color(None);
        self.block_enc.encode(control)
    }
}

/// Convert a delay in milliseconds to centiseconds
fn delay_time_cs(delay_ms: u32) -> u16 {
    let cs = delay_ms.saturating_add(5) / 10;
    u16::try_from(cs).unwrap_or(u16::MAX)
}

/// Check that a sequence is not empty, and all frames have the same size
fn check_frames(frames: &FrameSequence) -> Result<(u16, u16)> {
    let first = frames.first().ok_or(Error::NoFrames)?;
    let (width, height) = (first.width(), first.height());
    if frames
        .iter()
        .any(|f| f.width() != width || f.height() != height)
    {
        return Err(Error::FrameSizeMismatch);
    }
    frame_size(first)
}

/// Get the size of a frame, as GIF dimensions
fn frame_size(frame: &Frame) -> Result<(u16, u16)> {
    let width = u16::try_from(frame.width())?;
    let height = u16::try_from(frame.height())?;
    Ok((width, height))
}

/// Map a color to a grayscale palette index by luminance
pub fn luma_index(clr: SRgb8) -> u8 {
    let red = u32::from(u8::from(Rgb::red(clr)));
    let green = u32::from(u8::from(Rgb::green(clr)));
    let blue = u32::from(u8::from(Rgb::blue(clr)));
    // 0.299 R + 0.587 G + 0.114 B, rounded
    let y = (299 * red + 587 * green + 114 * blue + 500) / 1000;
    y.min(255) as u8
}

/// Get palette indices for all pixels of a frame
fn palette_indices(frame: &Frame) -> Vec<u8> {
    frame.pixels().iter().map(|p| luma_index(*p)).collect()
}

/// Encode a frame sequence into a GIF byte vector
pub fn encode(
    frames: &FrameSequence,
    delay_ms: u32,
    loop_forever: bool,
) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_to(&mut buf, frames, delay_ms, loop_forever)?;
    Ok(buf)
}

/// Encode a frame sequence as a GIF into a writer.
///
/// On an I/O error, the output is truncated and should be discarded.
pub fn encode_to<W: Write>(
    writer: W,
    frames: &FrameSequence,
    delay_ms: u32,
    loop_forever: bool,
) -> Result<()> {
    let loop_count = if loop_forever { Some(0) } else { None };
    let mut enc = Encoder::new(writer)
        .into_anim_enc()
        .with_delay_ms(delay_ms)
        .with_loop_count(loop_count);
    enc.encode_frames(frames)?;
    enc.finish()
}

impl Header {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(b"GIF")?;
        w.write_all(&self.version())
    }
}

impl LogicalScreenDesc {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let mut buf = Vec::with_capacity(7);
        buf.extend_from_slice(&self.screen_width().to_le_bytes());
        buf.extend_from_slice(&self.screen_height().to_le_bytes());
        buf.push(self.flags());
        buf.push(self.background_color_idx());
        buf.push(self.pixel_aspect_ratio());
        w.write_all(&buf)
    }
}

impl GlobalColorTable {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(self.colors())
    }
}

impl GraphicControl {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(BlockCode::Extension_.signature())?;
        let mut buf = Vec::with_capacity(7);
        buf.push(ExtensionCode::GraphicControl_.into());
        buf.push(4); // block size
        buf.push(self.flags());
        buf.extend_from_slice(&self.delay_time_cs().to_le_bytes());
        buf.push(self.transparent_color_idx());
        buf.push(0); // block size
        w.write_all(&buf)
    }
}

impl Application {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(BlockCode::Extension_.signature())?;
        w.write_all(&[ExtensionCode::Application_.into()])?;
        for c in self.app_data() {
            assert!(c.len() < 256);
            let len = c.len() as u8;
            w.write_all(&[len])?; // block size
            w.write_all(c)?;
        }
        w.write_all(&[0]) // block size
    }
}

impl ImageDesc {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(BlockCode::ImageDesc_.signature())?;
        let mut buf = Vec::with_capacity(9);
        buf.extend_from_slice(&self.left().to_le_bytes());
        buf.extend_from_slice(&self.top().to_le_bytes());
        buf.extend_from_slice(&self.width().to_le_bytes());
        buf.extend_from_slice(&self.height().to_le_bytes());
        buf.push(self.flags());
        w.write_all(&buf)
    }
}

impl ImageData {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let compressed = self.compress()?;
        w.write_all(&[self.min_code_size()])?;
        for b in compressed.chunks(SUB_BLOCK_LEN) {
            w.write_all(&[b.len() as u8])?; // block size
            w.write_all(b)?;
        }
        w.write_all(&[0]) // block size
    }

    /// Compress the palette indices with LZW
    fn compress(&self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.data().len() / 2 + 16);
        {
            let mut enc = lzw::Encoder::new(
                lzw::LsbWriter::new(&mut buf),
                self.min_code_size(),
            )?;
            enc.encode_bytes(self.data())?;
            // end code is written when the encoder is dropped
        }
        Ok(buf)
    }
}

impl Trailer {
    fn format<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(BlockCode::Trailer_.signature())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::frame::Image;

    fn two_by_two(pixels: [SRgb8; 4]) -> Frame {
        let mut image = Image::with_clear(2, 2);
        *image.pixel_mut(0, 0) = pixels[0];
        *image.pixel_mut(1, 0) = pixels[1];
        *image.pixel_mut(0, 1) = pixels[2];
        *image.pixel_mut(1, 1) = pixels[3];
        Frame::capture(&image)
    }

    fn two_frames() -> FrameSequence {
        let mut frames = FrameSequence::new();
        frames.push(two_by_two([
            SRgb8::new(0, 0, 0),
            SRgb8::new(255, 255, 255),
            SRgb8::new(255, 0, 0),
            SRgb8::new(100, 100, 100),
        ]));
        frames.push(two_by_two([
            SRgb8::new(0, 255, 0),
            SRgb8::new(0, 0, 255),
            SRgb8::new(255, 0, 0),
            SRgb8::new(1, 2, 3),
        ]));
        frames
    }

    #[test]
    fn luma() {
        assert_eq!(luma_index(SRgb8::new(0, 0, 0)), 0);
        assert_eq!(luma_index(SRgb8::new(255, 255, 255)), 255);
        assert_eq!(luma_index(SRgb8::new(255, 0, 0)), 76);
        assert_eq!(luma_index(SRgb8::new(0, 255, 0)), 150);
        assert_eq!(luma_index(SRgb8::new(0, 0, 255)), 29);
        assert_eq!(luma_index(SRgb8::new(100, 100, 100)), 100);
    }

    #[test]
    fn delay() {
        assert_eq!(delay_time_cs(0), 0);
        assert_eq!(delay_time_cs(4), 0);
        assert_eq!(delay_time_cs(5), 1);
        assert_eq!(delay_time_cs(100), 10);
        assert_eq!(delay_time_cs(254), 25);
        assert_eq!(delay_time_cs(255), 26);
        assert_eq!(delay_time_cs(u32::MAX), u16::MAX);
    }

    #[test]
    fn layout() {
        let gif = encode(&two_frames(), 250, true).unwrap();
        assert_eq!(&gif[..6], b"GIF89a");
        assert_eq!(&gif[6..13], &[2, 0, 2, 0, 0xF7, 0, 0]);
        let palette = &gif[13..13 + 768];
        for (i, rgb) in palette.chunks(3).enumerate() {
            assert_eq!(rgb, &[i as u8; 3]);
        }
        let rest = &gif[13 + 768..];
        assert_eq!(&rest[..3], &[0x21, 0xFF, 11]);
        assert_eq!(&rest[3..14], b"NETSCAPE2.0");
        assert_eq!(&rest[14..19], &[3, 1, 0, 0, 0]);
        let rest = &rest[19..];
        assert_eq!(&rest[..8], &[0x21, 0xF9, 4, 0, 25, 0, 0, 0]);
        assert_eq!(&rest[8..18], &[0x2C, 0, 0, 0, 0, 2, 0, 2, 0, 0]);
        assert_eq!(rest[18], MIN_CODE_SIZE);
        assert_eq!(gif.last(), Some(&0x3B));
    }

    #[test]
    fn no_loop_extension() {
        let gif = encode(&two_frames(), 100, false).unwrap();
        let rest = &gif[13 + 768..];
        assert_eq!(&rest[..4], &[0x21, 0xF9, 4, 0]);
        assert_eq!(&rest[4..6], &[10, 0]);
    }

    #[test]
    fn round_trip() {
        let gif = encode(&two_frames(), 250, true).unwrap();
        let mut opts = gif::DecodeOptions::new();
        opts.set_color_output(gif::ColorOutput::Indexed);
        let mut decoder = opts.read_info(&gif[..]).unwrap();
        assert_eq!(decoder.width(), 2);
        assert_eq!(decoder.height(), 2);
        assert_eq!(decoder.global_palette().map(|p| p.len()), Some(768));
        let mut decoded = vec![];
        while let Some(frame) = decoder.read_next_frame().unwrap() {
            assert_eq!(frame.delay, 25);
            assert_eq!((frame.width, frame.height), (2, 2));
            decoded.push(frame.buffer.to_vec());
        }
        assert_eq!(decoded, vec![vec![0, 255, 76, 100], vec![150, 29, 76, 2]]);
        assert_eq!(decoder.repeat(), gif::Repeat::Infinite);
    }

    #[test]
    fn round_trip_large() {
        // enough data for many sub-blocks and LZW code size growth
        let mut image = Image::with_clear(97, 61);
        for y in 0..61 {
            for x in 0..97 {
                let v = ((x * 7 + y * 13) % 256) as u8;
                *image.pixel_mut(x, y) = SRgb8::new(v, v, v);
            }
        }
        let frames = FrameSequence::from(vec![Frame::capture(&image)]);
        let gif = encode(&frames, 0, false).unwrap();
        let mut opts = gif::DecodeOptions::new();
        opts.set_color_output(gif::ColorOutput::Indexed);
        let mut decoder = opts.read_info(&gif[..]).unwrap();
        let frame = decoder.read_next_frame().unwrap().unwrap();
        let expected: Vec<u8> =
            image.pixels().iter().map(|p| luma_index(*p)).collect();
        assert_eq!(&frame.buffer[..], &expected[..]);
    }

    #[test]
    fn empty_sequence() {
        let mut out = vec![];
        let res = encode_to(&mut out, &FrameSequence::new(), 100, true);
        assert!(matches!(res, Err(Error::NoFrames)));
        assert!(out.is_empty());
    }

    #[test]
    fn size_mismatch() {
        let mut frames = two_frames();
        frames.push(Frame::capture(&Image::with_clear(3, 2)));
        let mut out = vec![];
        let res = encode_to(&mut out, &frames, 100, true);
        assert!(matches!(res, Err(Error::FrameSizeMismatch)));
        assert!(out.is_empty());
    }

    #[test]
    fn incremental_mismatch() {
        let mut out = vec![];
        let mut enc = Encoder::new_unbuffered(&mut out).into_anim_enc();
        enc.encode_frame(&Frame::capture(&Image::with_clear(2, 2)))
            .unwrap();
        let res = enc.encode_frame(&Frame::capture(&Image::with_clear(2, 3)));
        assert!(matches!(res, Err(Error::FrameSizeMismatch)));
    }

    #[test]
    fn finish_without_frames() {
        let mut out = vec![];
        let enc = Encoder::new(&mut out).into_anim_enc();
        assert!(matches!(enc.finish(), Err(Error::NoFrames)));
    }

    #[test]
    fn too_large() {
        let frames =
            FrameSequence::from(vec![Frame::capture(&Image::with_clear(70_000, 1))]);
        let res = encode(&frames, 100, true);
        assert!(matches!(res, Err(Error::TryFromInt(_))));
    }

    #[test]
    fn block_enc() {
        let mut out = vec![];
        let mut enc = Encoder::new_unbuffered(&mut out).into_block_enc();
        enc.encode(Header::default()).unwrap();
        enc.encode(Trailer::default()).unwrap();
        assert_eq!(&out[..], b"GIF89a;");
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn io_failure() {
        let res = encode_to(FailingWriter, &two_frames(), 100, true);
        assert!(matches!(res, Err(Error::Io(_))));
    }
}
