// ---------------------------------------------------------------------------
// Error taxonomy.
//
// Configuration errors describe a Screen/mode/palette combination that can
// never convert; buffer errors describe a caller buffer that is too small for
// the declared geometry. Both are raised before the first byte is written.
// ---------------------------------------------------------------------------

use core::fmt;

/// Which caller buffer a [`BufferError`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferKind {
    /// Bitplane `n` (plane 0 is the least significant index bit).
    Bitplane(u8),
    /// A chunky (one byte per pixel) index buffer.
    Chunky,
    /// An RGB(A) buffer.
    Rgb,
    /// A hardware color-spec table.
    ColorSpec,
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bitplane(n) => write!(f, "bitplane {n}"),
            Self::Chunky => f.write_str("chunky buffer"),
            Self::Rgb => f.write_str("RGB buffer"),
            Self::ColorSpec => f.write_str("color-spec table"),
        }
    }
}

/// A Screen, mode or palette combination that cannot be converted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("width and height must be non-zero, got {width}x{height}")]
    InvalidGeometry { width: usize, height: usize },
    #[error("unsupported bitplane depth {0}")]
    UnsupportedDepth(u8),
    #[error("HAM and EXTRA_HALFBRITE are mutually exclusive")]
    HamWithEhb,
    #[error("HAM needs 6 or 8 bitplanes, got {0}")]
    HamDepth(u8),
    #[error("EXTRA_HALFBRITE needs exactly 6 bitplanes, got {0}")]
    EhbDepth(u8),
    #[error("chunky output cannot represent HAM colors")]
    ChunkyWithHam,
    #[error("deep ({0}-plane) screens have no chunky index representation")]
    DeepToChunky(u8),
    #[error("palette of {len} colors exceeds the limit of {max}")]
    PaletteTooLarge { len: usize, max: usize },
    #[error("RGB4 color specs need entries of at most 4 bits per component, found {0}-bit")]
    ColorSpecDepth(u8),
    #[error("scale factor {scale} is not a multiple of resolution multiplier {multiplier}")]
    ScaleFactor { scale: u32, multiplier: u32 },
    #[error("expected {expected} bitplanes, got {got}")]
    PlaneCount { expected: usize, got: usize },
    #[error("pixel layout does not match the requested conversion")]
    LayoutMismatch,
}

/// A caller buffer too small for the geometry it was declared with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BufferError {
    #[error("{buffer} pitch {pitch} is smaller than the {required} bytes a row needs")]
    PitchTooSmall {
        buffer: BufferKind,
        pitch: usize,
        required: usize,
    },
    #[error("{buffer} holds {len} bytes, {required} needed")]
    TooSmall {
        buffer: BufferKind,
        len: usize,
        required: usize,
    },
    #[error("{buffer} is declared {got_width}x{got_height}, expected {width}x{height}")]
    Dimensions {
        buffer: BufferKind,
        width: usize,
        height: usize,
        got_width: usize,
        got_height: usize,
    },
    #[error("{buffer} geometry overflows usize")]
    Overflow { buffer: BufferKind },
}

/// Any failure reported by this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Buffer(#[from] BufferError),
}
