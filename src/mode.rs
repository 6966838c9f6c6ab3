//! Resolution classes, viewport mode bits and the geometry derived from them.
//!
//! Everything here is a pure function of `(width, height, depth, mode, scale)`.
//! The bit values of [`ViewportMode`] are the ones the Amiga display database
//! uses (and ILBM `CAMG` chunks store), so a mode word read from a host API
//! can be passed straight through.

use bitflags::bitflags;

use crate::ConfigError;

/// Deepest indexed (palette) bitplane layout: 8 planes, 256 colors.
pub const MAX_INDEXED_DEPTH: u8 = 8;

/// Deepest true-color layout: 8 planes each of R, G, B and A.
pub const MAX_PLANES: usize = 32;

/// Narrowest screen that auto-selection treats as hires.
pub const HIRES_MIN_WIDTH: usize = 640;

/// Narrowest screen that auto-selection treats as superhires.
pub const SUPERHIRES_MIN_WIDTH: usize = 1280;

bitflags! {
    /// Amiga viewport mode word.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ViewportMode: u32 {
        const GENLOCK_VIDEO = 0x0002;
        /// Interlaced: two fields, doubling the scanline count.
        const LACE = 0x0004;
        const DOUBLESCAN = 0x0008;
        /// 35ns pixels, four per lores pixel (ECS/AGA).
        const SUPERHIRES = 0x0020;
        const PFBA = 0x0040;
        /// Extra-Half-Brite: 6 planes, top plane halves colors 0..31.
        const EXTRA_HALFBRITE = 0x0080;
        const GENLOCK_AUDIO = 0x0100;
        const DUALPF = 0x0400;
        /// Hold-and-Modify: 6 (HAM6) or 8 (HAM8) planes.
        const HAM = 0x0800;
        const EXTENDED_MODE = 0x1000;
        const VP_HIDE = 0x2000;
        const SPRITES = 0x4000;
        /// 70ns pixels, two per lores pixel.
        const HIRES = 0x8000;
    }
}

/// Horizontal pixel-density tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResolutionClass {
    Lores,
    Hires,
    SuperHires,
}

impl ResolutionClass {
    /// Every class, narrowest pixels last.
    pub const ALL: [ResolutionClass; 3] = [Self::Lores, Self::Hires, Self::SuperHires];

    /// Pixels per lores pixel: 1, 2 or 4.
    #[inline]
    pub const fn multiplier(self) -> u32 {
        match self {
            Self::Lores => 1,
            Self::Hires => 2,
            Self::SuperHires => 4,
        }
    }
}

/// Selects between an indexed (chunky) surface and a true-color one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorFormat {
    /// One palette index per byte.
    Chunky,
    /// Resolved RGB(A) per pixel.
    Rgb,
}

/// Video standard, which fixes how many lines fit in one non-interlaced field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisplayStandard {
    #[default]
    Pal,
    Ntsc,
}

impl DisplayStandard {
    /// Visible lines in a single (non-interlaced) field.
    #[inline]
    pub const fn field_lines(self) -> usize {
        match self {
            Self::Pal => 256,
            Self::Ntsc => 200,
        }
    }
}

impl ViewportMode {
    /// Resolution class encoded in the mode. SUPERHIRES wins over HIRES.
    #[inline]
    pub const fn resolution_class(self) -> ResolutionClass {
        if self.contains(Self::SUPERHIRES) {
            ResolutionClass::SuperHires
        } else if self.contains(Self::HIRES) {
            ResolutionClass::Hires
        } else {
            ResolutionClass::Lores
        }
    }

    #[inline]
    pub const fn is_interlaced(self) -> bool {
        self.contains(Self::LACE)
    }

    #[inline]
    pub const fn is_ham(self) -> bool {
        self.contains(Self::HAM)
    }

    #[inline]
    pub const fn is_ehb(self) -> bool {
        self.contains(Self::EXTRA_HALFBRITE)
    }

    /// Replace the resolution bits with those of `class`.
    #[must_use]
    pub fn with_resolution(self, class: ResolutionClass) -> Self {
        let base = self - (Self::HIRES | Self::SUPERHIRES);
        match class {
            ResolutionClass::Lores => base,
            ResolutionClass::Hires => base | Self::HIRES,
            ResolutionClass::SuperHires => base | Self::SUPERHIRES,
        }
    }
}

/// Number of bitplanes a screen of `depth` bits per pixel uses.
///
/// Indexed screens use 1..=8 planes. Deep screens store 8 planes per
/// component: 24 (RGB) or 32 (RGBA).
pub const fn plane_count_for(depth: u8) -> Result<usize, ConfigError> {
    match depth {
        1..=MAX_INDEXED_DEPTH | 24 | 32 => Ok(depth as usize),
        _ => Err(ConfigError::UnsupportedDepth(depth)),
    }
}

/// Whether `depth` is a deep (true-color) layout rather than an indexed one.
#[inline]
pub const fn is_deep(depth: u8) -> bool {
    depth > MAX_INDEXED_DEPTH
}

/// Reject zero-sized geometry.
pub const fn check_geometry(width: usize, height: usize) -> Result<(), ConfigError> {
    if width == 0 || height == 0 {
        Err(ConfigError::InvalidGeometry { width, height })
    } else {
        Ok(())
    }
}

/// Block replication factors mapping native pixels to square pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Correction {
    /// Output columns per native pixel.
    pub horizontal: u32,
    /// Output rows per native scanline.
    pub vertical: u32,
}

impl Correction {
    /// No replication at all.
    pub const IDENTITY: Correction = Correction {
        horizontal: 1,
        vertical: 1,
    };

    /// Factors for `mode` at lowres-pixel scale factor `scale`.
    ///
    /// The horizontal factor is `scale / multiplier`, so `scale` must be a
    /// non-zero multiple of the mode's resolution multiplier. Non-interlaced
    /// modes double every scanline to match the line density of interlace.
    pub const fn for_mode(mode: ViewportMode, scale: u32) -> Result<Self, ConfigError> {
        let multiplier = mode.resolution_class().multiplier();
        if scale == 0 || scale % multiplier != 0 {
            return Err(ConfigError::ScaleFactor { scale, multiplier });
        }
        Ok(Correction {
            horizontal: scale / multiplier,
            vertical: if mode.is_interlaced() { 1 } else { 2 },
        })
    }

    #[inline]
    pub const fn is_identity(self) -> bool {
        self.horizontal == 1 && self.vertical == 1
    }

    /// Corrected `(width, height)` for a native `width x height`, or `None`
    /// on overflow.
    pub const fn apply(self, width: usize, height: usize) -> Option<(usize, usize)> {
        let Some(w) = width.checked_mul(self.horizontal as usize) else {
            return None;
        };
        let Some(h) = height.checked_mul(self.vertical as usize) else {
            return None;
        };
        Some((w, h))
    }
}

/// Corrected output geometry for a native screen.
pub fn corrected_dimensions(
    width: usize,
    height: usize,
    mode: ViewportMode,
    scale: u32,
) -> Result<(usize, usize), ConfigError> {
    check_geometry(width, height)?;
    Correction::for_mode(mode, scale)?
        .apply(width, height)
        .ok_or(ConfigError::InvalidGeometry { width, height })
}
