// error.rs
//
// Copyright (c) 2019-2025  Douglas Lau
//
use crate::point::Point;
use std::fmt;
use std::io;
use std::num::TryFromIntError;

/// Errors encountered while filling or encoding
#[derive(Debug)]
pub enum Error {
    /// A wrapped I/O error.  Output written so far is truncated.
    Io(io::Error),
    /// Integer out of bounds (image dimension too large for GIF).
    TryFromInt(TryFromIntError),
    /// Point lies outside of the image.
    OutOfBounds(Point),
    /// Frontier removal attempted while empty.
    EmptyContainer,
    /// No frames to encode.
    NoFrames,
    /// Frame size differs from the first frame of the animation.
    FrameSizeMismatch,
}

/// Floodgif result type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if the error was caused by invalid encoder input.
    pub fn is_encode_error(&self) -> bool {
        matches!(
            self,
            Error::TryFromInt(_) | Error::NoFrames | Error::FrameSizeMismatch
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(fmt),
            Error::TryFromInt(err) => err.fmt(fmt),
            Error::OutOfBounds(pt) => write!(fmt, "OutOfBounds {}", pt),
            _ => fmt::Debug::fmt(self, fmt),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            Error::TryFromInt(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<TryFromIntError> for Error {
    fn from(err: TryFromIntError) -> Self {
        Error::TryFromInt(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn encode_category() {
        assert!(Error::NoFrames.is_encode_error());
        assert!(Error::FrameSizeMismatch.is_encode_error());
        let e = u16::try_from(70_000u32).unwrap_err();
        assert!(Error::from(e).is_encode_error());
        assert!(!Error::EmptyContainer.is_encode_error());
        assert!(!Error::OutOfBounds(Point::new(-1, 0)).is_encode_error());
    }

    #[test]
    fn display() {
        let e = Error::OutOfBounds(Point::new(3, -2));
        assert_eq!(e.to_string(), "OutOfBounds (3, -2)");
        assert_eq!(Error::NoFrames.to_string(), "NoFrames");
    }
}
