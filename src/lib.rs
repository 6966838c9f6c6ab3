//! # planar
//!
//! *Amiga bitplanes, flattened.*
//!
//! Converts pixel data between the planar bitmaps of Commodore Amiga video
//! hardware and the chunky (one index per byte) and RGB encodings modern
//! surfaces use, in both directions. Hold-and-Modify and Extra-Half-Brite
//! screens are resolved to true color, palettes move between the 12-, 24-
//! and 32-bit register formats, and lores/hires/superhires geometry is
//! block-replicated onto square pixels.
//!
//! The crate never owns pixel memory. Callers describe their buffers with
//! [`Bitplane`], [`Surface`] and friends (slice, pitch, declared geometry)
//! and every call validates them before writing anything.
//!
//! ## Core operations (always available)
//!
//! - [`bitplanes_to_chunky`] / [`chunky_to_bitplanes`]: the raw bit-level
//!   transcoder, dispatched to the best SIMD tier at run time (AVX2, NEON,
//!   WASM SIMD128, scalar).
//! - [`Screen`]: one display description (geometry, depth, [`ViewportMode`],
//!   [`Palette`], scale factor) driving RGB composition, HAM/EHB resolution
//!   and aspect correction.
//! - [`Palette`] and [`ColorEntry`]: depth conversion and hardware color
//!   specs (`LoadRGB4` / `LoadRGB32` tables).
//! - `auto_select_*`: recommended color format, scale factor and mode bits.
//!
//! ```rust
//! use planar::{Bitplane, ColorEntry, RgbLayout, Screen, SurfaceMut, ViewportMode};
//!
//! // 16 pixels, 2 planes, lores, non-interlaced.
//! let mut screen = Screen::new(16, 1, 2, ViewportMode::empty()).unwrap();
//! screen
//!     .set_bitplane_palette_colors(&[
//!         ColorEntry::from_rgb4(0x000),
//!         ColorEntry::from_rgb4(0xF00),
//!         ColorEntry::from_rgb4(0x0F0),
//!         ColorEntry::from_rgb4(0x00F),
//!     ])
//!     .unwrap();
//!
//! let p0 = [0xFF, 0x00];
//! let p1 = [0x0F, 0xF0];
//! let planes = [Bitplane::new(&p0, 2), Bitplane::new(&p1, 2)];
//!
//! let mut rgb = vec![0u8; 16 * 3];
//! screen
//!     .bitplanes_to_rgb(&planes, &mut SurfaceMut::rgb(&mut rgb, 16, 1, RgbLayout::RGB))
//!     .unwrap();
//! assert_eq!(rgb[..3], [0xFF, 0, 0]);
//! ```
//!
//! ## Feature flags
//!
//! - **`rgb`**: typed front end over [`rgb`] crate pixel types
//!   (`Rgba<u8>`, `Bgra<u8>`, `Rgb<u8>`) via bytemuck.
//! - **`imgref`**: whole-image front end over [`imgref`] types
//!   (`ImgRef`, `ImgRefMut`, `ImgVec`). Implies `rgb`.
//! - **`tracing`**: `trace`-level events on screen setup and every
//!   conversion. Off by default; the crate is silent without it.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

#[cfg(feature = "tracing")]
macro_rules! trace {
    ($($t:tt)*) => {
        tracing::trace!($($t)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($t:tt)*) => {};
}

pub(crate) use trace;

mod auto;
mod buffer;
mod compose;
mod correct;
mod error;
mod mode;
mod palette;
mod planar;
mod resolve;
mod screen;

pub use auto::*;
pub use buffer::{Bitplane, BitplaneMut, PixelLayout, RgbLayout, Surface, SurfaceMut};
pub use correct::replicate;
pub use error::{BufferError, BufferKind, ConfigError, Error};
pub use mode::*;
pub use palette::*;
pub use planar::{bitplanes_to_chunky, chunky_to_bitplanes};
pub use resolve::{ColorModel, HamStart, Resolver};
pub use screen::Screen;

#[cfg(feature = "rgb")]
pub mod typed;

#[cfg(feature = "imgref")]
pub mod img;
