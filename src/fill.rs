// fill.rs
//
// Copyright (c) 2025  Douglas Lau
//
//! Flood fill engine
use crate::error::{Error, Result};
use crate::frame::{Frame, FrameSequence, Image};
use crate::frontier::{Frontier, Queue, Stack};
use crate::point::Point;
use pix::rgb::SRgb8;
use std::fmt;

/// Default number of painted pixels between captured frames
pub const DEFAULT_FRAME_INTERVAL: usize = 100;

/// Frontier discipline for a fill
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Queue of points; fill spreads evenly in all directions
    BreadthFirst,
    /// Stack of points; fill follows deep paths first
    DepthFirst,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::BreadthFirst
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(self.description())
    }
}

impl Strategy {
    /// Get a human-readable description
    pub fn description(self) -> &'static str {
        match self {
            Strategy::BreadthFirst => "Queue (BFS - Breadth-First Search)",
            Strategy::DepthFirst => "Stack (DFS - Depth-First Search)",
        }
    }

    /// Look up a strategy by short name (`bfs`, `queue`, `dfs`, `stack`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bfs" | "queue" => Some(Strategy::BreadthFirst),
            "dfs" | "stack" => Some(Strategy::DepthFirst),
            _ => None,
        }
    }
}

/// Statistics from one fill run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FillStats {
    /// Number of painted pixels
    pub painted: usize,
    /// Number of points removed from the frontier
    pub visits: usize,
}

/// Flood fill engine
///
/// ## Example
/// ```
/// use floodgif::{FloodFill, Image, Point, Strategy};
/// use pix::rgb::SRgb8;
///
/// # fn main() -> Result<(), floodgif::Error> {
/// let mut image = Image::with_clear(8, 8);
/// let frames = FloodFill::new(Strategy::DepthFirst)
///     .with_frame_interval(16)
///     .run(&mut image, Point::new(3, 3), SRgb8::new(255, 0, 0))?;
/// assert_eq!(frames.len(), 6);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct FloodFill {
    /// Frontier discipline
    strategy: Strategy,
    /// Painted pixels between captured frames
    frame_interval: usize,
}

impl Default for FloodFill {
    fn default() -> Self {
        FloodFill::new(Strategy::default())
    }
}

impl FloodFill {
    /// Create a new flood fill engine
    pub fn new(strategy: Strategy) -> Self {
        FloodFill {
            strategy,
            frame_interval: DEFAULT_FRAME_INTERVAL,
        }
    }

    /// Set the number of painted pixels between captured frames.
    ///
    /// Every frame is a full copy of the image, so this bounds memory use.
    /// An interval of 0 is treated as 1.
    pub fn with_frame_interval(mut self, frame_interval: usize) -> Self {
        self.frame_interval = frame_interval.max(1);
        self
    }

    /// Get the traversal strategy
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Get the frame interval
    pub fn frame_interval(&self) -> usize {
        self.frame_interval
    }

    /// Fill the region connected to `seed` with `color`.
    ///
    /// Returns the captured frames: the initial image, one frame at every
    /// interval boundary, then the final image.  If the seed pixel is
    /// already `color`, only the initial frame is captured.
    pub fn run(
        &self,
        image: &mut Image,
        seed: Point,
        color: SRgb8,
    ) -> Result<FrameSequence> {
        let (frames, _stats) = self.run_with_stats(image, seed, color)?;
        Ok(frames)
    }

    /// Fill a region, also returning run statistics.
    pub fn run_with_stats(
        &self,
        image: &mut Image,
        seed: Point,
        color: SRgb8,
    ) -> Result<(FrameSequence, FillStats)> {
        let original = pixel_at(image, seed)?;
        let mut frames = FrameSequence::new();
        frames.push(Frame::capture(image));
        if original == color {
            debug!("seed {} already filled", seed);
            return Ok((frames, FillStats::default()));
        }
        let stats = match self.strategy {
            Strategy::BreadthFirst => {
                let mut queue = Queue::new();
                queue.push_back(seed);
                self.fill(queue, image, original, color, &mut frames)?
            }
            Strategy::DepthFirst => {
                let mut stack = Stack::new();
                stack.push(seed);
                self.fill(stack, image, original, color, &mut frames)?
            }
        };
        frames.push(Frame::capture(image));
        info!(
            "{:?} fill from {}: {} pixels painted, {} frames",
            self.strategy,
            seed,
            stats.painted,
            frames.len()
        );
        Ok((frames, stats))
    }

    /// Drain a frontier, painting every reachable pixel of `original` color.
    ///
    /// There is no visited set: a painted pixel no longer matches
    /// `original`, so it is discarded each time it is removed again.
    fn fill<F: Frontier>(
        &self,
        mut frontier: F,
        image: &mut Image,
        original: SRgb8,
        color: SRgb8,
        frames: &mut FrameSequence,
    ) -> Result<FillStats> {
        let (width, height) = (image.width(), image.height());
        let mut stats = FillStats::default();
        while !frontier.is_empty() {
            let pt = frontier.remove()?;
            stats.visits += 1;
            if !pt.within(width, height) {
                continue;
            }
            let pixel = image.pixel_mut(pt.x, pt.y);
            if *pixel != original {
                continue;
            }
            *pixel = color;
            stats.painted += 1;
            if stats.painted % self.frame_interval == 0 {
                debug!("frame {} at {} pixels", frames.len(), stats.painted);
                frames.push(Frame::capture(image));
            }
            frontier.insert_neighbors(pt);
        }
        Ok(stats)
    }
}

/// Fill a region of an image, capturing frames every `frame_interval`
/// painted pixels.
pub fn run(
    image: &mut Image,
    seed: Point,
    color: SRgb8,
    strategy: Strategy,
    frame_interval: usize,
) -> Result<FrameSequence> {
    FloodFill::new(strategy)
        .with_frame_interval(frame_interval)
        .run(image, seed, color)
}

/// Get the color of one pixel, checking bounds
pub fn pixel_at(image: &Image, pt: Point) -> Result<SRgb8> {
    if pt.within(image.width(), image.height()) {
        Ok(image.pixel(pt.x, pt.y))
    } else {
        Err(Error::OutOfBounds(pt))
    }
}

/// Get the smallest frame interval recommended to bound memory use.
///
/// This keeps a full-image fill at no more than about 500 frames.
pub fn recommended_interval(width: u32, height: u32) -> usize {
    let total = width as usize * height as usize;
    (total / 500).max(50)
}
