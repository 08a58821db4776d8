use std::fmt::{Display, Error, Formatter};

// Sample fault
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum SampleFault {
    EmptySource,
    BufferSizeMismatch { expected: usize, actual: usize },
    OutOfBounds { x: u32, y: u32 },
    Unreadable,
}

impl Display for SampleFault {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match *self {
            Self::EmptySource => f.write_str("source image has zero width or height"),
            Self::BufferSizeMismatch { expected, actual } => {
                write!(f, "raw buffer holds {actual} bytes, expected {expected}")
            }
            Self::OutOfBounds { x, y } => write!(f, "sample point ({x}, {y}) is outside the canvas"),
            Self::Unreadable => f.write_str("source image could not be read"),
        }
    }
}

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum CodecError {
    // Codec builder
    InvalidGeometry,
    EmptyMarker,
    NoDataCells,

    // Reader
    NoMarkerFound,
    SampleError(SampleFault),
}

impl CodecError {
    /// True for outcomes a live scanning loop should swallow and retry on the next frame.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NoMarkerFound)
    }
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match *self {
            // Codec builder
            Self::InvalidGeometry => f.write_str("Invalid canvas geometry"),
            Self::EmptyMarker => f.write_str("End marker is empty"),
            Self::NoDataCells => f.write_str("Layout has no data cells"),

            // Reader
            Self::NoMarkerFound => f.write_str("End marker not found"),
            Self::SampleError(fault) => write!(f, "Sampling failed: {fault}"),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<SampleFault> for CodecError {
    fn from(fault: SampleFault) -> Self {
        Self::SampleError(fault)
    }
}

pub type CodecResult<T> = Result<T, CodecError>;

#[cfg(test)]
mod error_tests {
    use super::{CodecError, SampleFault};

    #[test]
    fn test_retryable() {
        assert!(CodecError::NoMarkerFound.is_retryable());
        assert!(!CodecError::SampleError(SampleFault::EmptySource).is_retryable());
        assert!(!CodecError::InvalidGeometry.is_retryable());
    }

    #[test]
    fn test_display() {
        let err: CodecError = SampleFault::BufferSizeMismatch { expected: 16, actual: 12 }.into();
        assert_eq!(err.to_string(), "Sampling failed: raw buffer holds 12 bytes, expected 16");
        assert_eq!(CodecError::NoMarkerFound.to_string(), "End marker not found");
    }
}
