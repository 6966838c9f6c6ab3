//! Typed front end over [`rgb`] crate pixel types via bytemuck.
//!
//! Buffers here are packed (no row padding): a `width x height` screen needs
//! exactly `width * height` pixels, or the corrected geometry for the
//! `*_corrected_*` variants.
//!
//! ```rust
//! use rgb::{Rgb, Rgba};
//! use planar::{Bitplane, Screen, ViewportMode, typed};
//!
//! let mut screen = Screen::new(8, 1, 1, ViewportMode::empty()).unwrap();
//! let colors = typed::palette_from_rgb(&[Rgb::new(0, 0, 0), Rgb::new(255, 128, 0)]).unwrap();
//! screen.set_bitplane_palette_colors(colors.entries()).unwrap();
//!
//! let plane = [0b1000_0001u8];
//! let mut out = vec![Rgba::new(0, 0, 0, 0); 8];
//! typed::bitplanes_to_rgba(&screen, &[Bitplane::new(&plane, 1)], &mut out).unwrap();
//! assert_eq!(out[0], Rgba::new(255, 128, 0, 255));
//! assert_eq!(out[1], Rgba::new(0, 0, 0, 255));
//! ```

use rgb::{Bgra, Rgb, Rgba};

use crate::{
    Bitplane, BitplaneMut, ColorEntry, ComponentDepth, ConfigError, Error, Palette, RgbLayout,
    Rgba8, Screen, Surface, SurfaceMut,
};

// ---------------------------------------------------------------------------
// Pixel and palette conversions
// ---------------------------------------------------------------------------

impl From<Rgba8> for Rgba<u8> {
    #[inline]
    fn from(c: Rgba8) -> Self {
        Rgba::new(c.r, c.g, c.b, c.a)
    }
}

impl From<Rgba<u8>> for Rgba8 {
    #[inline]
    fn from(c: Rgba<u8>) -> Self {
        Rgba8::new(c.r, c.g, c.b, c.a)
    }
}

impl From<Rgb<u8>> for ColorEntry {
    /// Opaque 8-bit entry.
    #[inline]
    fn from(c: Rgb<u8>) -> Self {
        ColorEntry::new(c.r, c.g, c.b, ComponentDepth::Bits8)
    }
}

impl From<Rgba<u8>> for ColorEntry {
    #[inline]
    fn from(c: Rgba<u8>) -> Self {
        ColorEntry::new(c.r, c.g, c.b, ComponentDepth::Bits8).with_alpha(c.a)
    }
}

/// 8-bit palette from `Rgb<u8>` colors.
pub fn palette_from_rgb(colors: &[Rgb<u8>]) -> Result<Palette, ConfigError> {
    let mut entries = [ColorEntry::default(); crate::MAX_COLORS];
    if colors.len() > entries.len() {
        return Err(ConfigError::PaletteTooLarge {
            len: colors.len(),
            max: entries.len(),
        });
    }
    for (dst, &c) in entries.iter_mut().zip(colors) {
        *dst = c.into();
    }
    Palette::from_entries(&entries[..colors.len()])
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

fn packed<P: bytemuck::Pod>(
    pixels: &mut [P],
    (w, h): (usize, usize),
    layout: RgbLayout,
) -> SurfaceMut<'_> {
    SurfaceMut::rgb(bytemuck::cast_slice_mut(pixels), w, h, layout)
}

/// Bitplanes → `Rgba<u8>` pixels at native geometry.
pub fn bitplanes_to_rgba(
    screen: &Screen,
    planes: &[Bitplane<'_>],
    dst: &mut [Rgba<u8>],
) -> Result<(), Error> {
    let size = (screen.width(), screen.height());
    screen.bitplanes_to_rgb(planes, &mut packed(dst, size, RgbLayout::RGBA))
}

/// Bitplanes → `Bgra<u8>` pixels at native geometry.
pub fn bitplanes_to_bgra(
    screen: &Screen,
    planes: &[Bitplane<'_>],
    dst: &mut [Bgra<u8>],
) -> Result<(), Error> {
    let size = (screen.width(), screen.height());
    screen.bitplanes_to_rgb(planes, &mut packed(dst, size, RgbLayout::BGRA))
}

/// Bitplanes → `Rgba<u8>` pixels at the screen's corrected geometry.
pub fn bitplanes_to_corrected_rgba(
    screen: &Screen,
    planes: &[Bitplane<'_>],
    dst: &mut [Rgba<u8>],
) -> Result<(), Error> {
    let size = screen.corrected_dimensions();
    screen.bitplanes_to_corrected(planes, &mut packed(dst, size, RgbLayout::RGBA))
}

/// Packed chunky indices → `Rgba<u8>` pixels.
pub fn chunky_to_rgba(screen: &Screen, src: &[u8], dst: &mut [Rgba<u8>]) -> Result<(), Error> {
    let (w, h) = (screen.width(), screen.height());
    screen.chunky_to_rgb(
        &Surface::chunky(src, w, h),
        &mut packed(dst, (w, h), RgbLayout::RGBA),
    )
}

/// Packed chunky indices → bitplanes.
pub fn chunky_to_bitplanes(
    screen: &Screen,
    src: &[u8],
    planes: &mut [BitplaneMut<'_>],
) -> Result<(), Error> {
    let surface = Surface::chunky(src, screen.width(), screen.height());
    screen.chunky_to_bitplanes(&surface, planes)
}
