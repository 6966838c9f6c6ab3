//! Borrowed buffer descriptors.
//!
//! The crate never allocates or frees pixel memory. Callers describe their
//! buffers with these types (a slice, a byte pitch, and for surfaces the
//! declared geometry and pixel layout) and hand them to each conversion.
//! Pitch is the distance in bytes between the starts of consecutive rows;
//! padding bytes between rows are never read or written.

use crate::{BufferError, BufferKind, ConfigError};

/// Byte positions of the color components inside one RGB(A) pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RgbLayout {
    bytes_per_pixel: u8,
    r: u8,
    g: u8,
    b: u8,
    a: Option<u8>,
}

impl RgbLayout {
    pub const RGB: RgbLayout = RgbLayout::packed(3, 0, 1, 2, None);
    pub const BGR: RgbLayout = RgbLayout::packed(3, 2, 1, 0, None);
    pub const RGBA: RgbLayout = RgbLayout::packed(4, 0, 1, 2, Some(3));
    pub const BGRA: RgbLayout = RgbLayout::packed(4, 2, 1, 0, Some(3));
    pub const ARGB: RgbLayout = RgbLayout::packed(4, 1, 2, 3, Some(0));
    pub const ABGR: RgbLayout = RgbLayout::packed(4, 3, 2, 1, Some(0));

    const fn packed(bytes_per_pixel: u8, r: u8, g: u8, b: u8, a: Option<u8>) -> Self {
        Self {
            bytes_per_pixel,
            r,
            g,
            b,
            a,
        }
    }

    /// Custom layout. Offsets must be distinct and inside a 3- or 4-byte
    /// pixel. Bytes not named by any offset are left untouched on write.
    pub const fn new(
        bytes_per_pixel: u8,
        r: u8,
        g: u8,
        b: u8,
        a: Option<u8>,
    ) -> Result<Self, ConfigError> {
        if bytes_per_pixel != 3 && bytes_per_pixel != 4 {
            return Err(ConfigError::LayoutMismatch);
        }
        let mut seen = 0u8;
        let offsets = [Some(r), Some(g), Some(b), a];
        let mut i = 0;
        while i < offsets.len() {
            if let Some(o) = offsets[i] {
                if o >= bytes_per_pixel || seen & (1 << o) != 0 {
                    return Err(ConfigError::LayoutMismatch);
                }
                seen |= 1 << o;
            }
            i += 1;
        }
        Ok(Self::packed(bytes_per_pixel, r, g, b, a))
    }

    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        self.bytes_per_pixel as usize
    }

    #[inline]
    pub const fn has_alpha(self) -> bool {
        self.a.is_some()
    }

    /// Store `c` into one pixel's bytes.
    #[inline(always)]
    pub(crate) fn store(self, px: &mut [u8], c: crate::Rgba8) {
        px[self.r as usize] = c.r;
        px[self.g as usize] = c.g;
        px[self.b as usize] = c.b;
        if let Some(a) = self.a {
            px[a as usize] = c.a;
        }
    }
}

/// How the pixels of a [`Surface`] are encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// One palette index per byte.
    Chunky,
    Rgb(RgbLayout),
}

impl PixelLayout {
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Chunky => 1,
            Self::Rgb(l) => l.bytes_per_pixel(),
        }
    }

    pub(crate) const fn kind(self) -> BufferKind {
        match self {
            Self::Chunky => BufferKind::Chunky,
            Self::Rgb(_) => BufferKind::Rgb,
        }
    }
}

/// One read-only bitplane.
///
/// Pixel `x` of row `y` is bit `7 - x % 8` of byte `y * pitch + x / 8`.
#[derive(Clone, Copy, Debug)]
pub struct Bitplane<'a> {
    pub(crate) data: &'a [u8],
    pub(crate) pitch: usize,
}

impl<'a> Bitplane<'a> {
    #[inline]
    pub const fn new(data: &'a [u8], pitch: usize) -> Self {
        Self { data, pitch }
    }

    #[inline]
    pub const fn pitch(&self) -> usize {
        self.pitch
    }
}

/// One writable bitplane.
#[derive(Debug)]
pub struct BitplaneMut<'a> {
    pub(crate) data: &'a mut [u8],
    pub(crate) pitch: usize,
}

impl<'a> BitplaneMut<'a> {
    #[inline]
    pub fn new(data: &'a mut [u8], pitch: usize) -> Self {
        Self { data, pitch }
    }

    #[inline]
    pub const fn pitch(&self) -> usize {
        self.pitch
    }

    /// Read-only view of the same plane.
    #[inline]
    pub fn as_plane(&self) -> Bitplane<'_> {
        Bitplane::new(&*self.data, self.pitch)
    }
}

/// A read-only chunky or RGB surface with declared geometry.
#[derive(Clone, Copy, Debug)]
pub struct Surface<'a> {
    pub(crate) data: &'a [u8],
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) pitch: usize,
    pub(crate) layout: PixelLayout,
}

impl<'a> Surface<'a> {
    #[inline]
    pub const fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        pitch: usize,
        layout: PixelLayout,
    ) -> Self {
        Self {
            data,
            width,
            height,
            pitch,
            layout,
        }
    }

    /// Chunky surface with rows packed back to back.
    #[inline]
    pub const fn chunky(data: &'a [u8], width: usize, height: usize) -> Self {
        Self::new(data, width, height, width, PixelLayout::Chunky)
    }

    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub const fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Check that this surface is declared `width x height` and holds it.
    pub(crate) fn check(&self, width: usize, height: usize) -> Result<(), BufferError> {
        let declared = (self.width, self.height);
        check_surface(self.layout, self.data.len(), declared, self.pitch, width, height)
    }
}

/// A writable chunky or RGB surface with declared geometry.
#[derive(Debug)]
pub struct SurfaceMut<'a> {
    pub(crate) data: &'a mut [u8],
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) pitch: usize,
    pub(crate) layout: PixelLayout,
}

impl<'a> SurfaceMut<'a> {
    #[inline]
    pub fn new(
        data: &'a mut [u8],
        width: usize,
        height: usize,
        pitch: usize,
        layout: PixelLayout,
    ) -> Self {
        Self {
            data,
            width,
            height,
            pitch,
            layout,
        }
    }

    /// Chunky surface with rows packed back to back.
    #[inline]
    pub fn chunky(data: &'a mut [u8], width: usize, height: usize) -> Self {
        Self::new(data, width, height, width, PixelLayout::Chunky)
    }

    /// RGB surface with rows packed back to back. A width whose row size
    /// overflows is reported by the conversion that receives the surface.
    #[inline]
    pub fn rgb(data: &'a mut [u8], width: usize, height: usize, layout: RgbLayout) -> Self {
        let pitch = width.saturating_mul(layout.bytes_per_pixel());
        Self::new(data, width, height, pitch, PixelLayout::Rgb(layout))
    }

    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub const fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Read-only view of the same surface.
    #[inline]
    pub fn as_surface(&self) -> Surface<'_> {
        Surface::new(&*self.data, self.width, self.height, self.pitch, self.layout)
    }

    pub(crate) fn check(&self, width: usize, height: usize) -> Result<(), BufferError> {
        self.as_surface().check(width, height)
    }
}

// ===========================================================================
// Validation helpers
// ===========================================================================

/// Check that `len` bytes at `pitch` hold `height` rows of `row_bytes`.
///
/// The last row needs only `row_bytes`, not a full pitch.
#[inline]
pub(crate) fn check_strided(
    buffer: BufferKind,
    len: usize,
    row_bytes: usize,
    height: usize,
    pitch: usize,
) -> Result<(), BufferError> {
    if row_bytes > pitch {
        return Err(BufferError::PitchTooSmall {
            buffer,
            pitch,
            required: row_bytes,
        });
    }
    let required = height
        .saturating_sub(1)
        .checked_mul(pitch)
        .and_then(|n| n.checked_add(row_bytes))
        .ok_or(BufferError::Overflow { buffer })?;
    if len < required {
        return Err(BufferError::TooSmall {
            buffer,
            len,
            required,
        });
    }
    Ok(())
}

/// Bytes one bitplane row of `width` pixels occupies.
#[inline]
pub(crate) const fn plane_row_bytes(width: usize) -> usize {
    width.div_ceil(8)
}

pub(crate) fn check_planes(
    planes: impl IntoIterator<Item = (usize, usize)>,
    width: usize,
    height: usize,
) -> Result<(), BufferError> {
    let row_bytes = plane_row_bytes(width);
    for (i, (len, pitch)) in planes.into_iter().enumerate() {
        check_strided(BufferKind::Bitplane(i as u8), len, row_bytes, height, pitch)?;
    }
    Ok(())
}

/// Check a surface's declared geometry against `width x height` and its
/// slice against that geometry.
pub(crate) fn check_surface(
    layout: PixelLayout,
    len: usize,
    declared: (usize, usize),
    pitch: usize,
    width: usize,
    height: usize,
) -> Result<(), BufferError> {
    let buffer = layout.kind();
    if declared != (width, height) {
        return Err(BufferError::Dimensions {
            buffer,
            width,
            height,
            got_width: declared.0,
            got_height: declared.1,
        });
    }
    let row_bytes = width
        .checked_mul(layout.bytes_per_pixel())
        .ok_or(BufferError::Overflow { buffer })?;
    check_strided(buffer, len, row_bytes, height, pitch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_layouts_validated() {
        assert_eq!(RgbLayout::new(4, 0, 1, 2, Some(3)), Ok(RgbLayout::RGBA));
        assert_eq!(RgbLayout::new(4, 1, 2, 3, Some(0)), Ok(RgbLayout::ARGB));
        assert_eq!(RgbLayout::new(3, 0, 0, 2, None), Err(ConfigError::LayoutMismatch));
        assert_eq!(RgbLayout::new(3, 0, 1, 3, None), Err(ConfigError::LayoutMismatch));
        assert_eq!(RgbLayout::new(2, 0, 1, 1, None), Err(ConfigError::LayoutMismatch));
        // XRGB: byte 0 is padding.
        assert!(RgbLayout::new(4, 1, 2, 3, None).is_ok());
    }

    #[test]
    fn store_respects_offsets() {
        let mut px = [0u8; 4];
        RgbLayout::BGRA.store(&mut px, crate::Rgba8::new(1, 2, 3, 4));
        assert_eq!(px, [3, 2, 1, 4]);
        let mut px = [9u8; 4];
        RgbLayout::new(4, 1, 2, 3, None).unwrap().store(&mut px, crate::Rgba8::new(1, 2, 3, 4));
        assert_eq!(px, [9, 1, 2, 3]);
    }

    #[test]
    fn strided_checks() {
        let k = BufferKind::Chunky;
        assert_eq!(check_strided(k, 100, 10, 10, 10), Ok(()));
        // Last row needs only row_bytes.
        assert_eq!(check_strided(k, 9 * 16 + 10, 10, 10, 16), Ok(()));
        assert_eq!(
            check_strided(k, 1000, 10, 10, 8),
            Err(BufferError::PitchTooSmall { buffer: k, pitch: 8, required: 10 })
        );
        assert_eq!(
            check_strided(k, 99, 10, 10, 10),
            Err(BufferError::TooSmall { buffer: k, len: 99, required: 100 })
        );
        assert_eq!(
            check_strided(k, 10, 10, 2, usize::MAX),
            Err(BufferError::Overflow { buffer: k })
        );
    }

    #[test]
    fn oversized_rgb_width_reports_overflow() {
        let mut buf = [0u8; 16];
        let width = usize::MAX / 2;
        let surface = SurfaceMut::rgb(&mut buf, width, 1, RgbLayout::RGBA);
        assert_eq!(
            surface.check(width, 1),
            Err(BufferError::Overflow {
                buffer: BufferKind::Rgb
            })
        );
    }

    #[test]
    fn plane_rows_round_up() {
        assert_eq!(plane_row_bytes(1), 1);
        assert_eq!(plane_row_bytes(8), 1);
        assert_eq!(plane_row_bytes(9), 2);
        assert_eq!(plane_row_bytes(320), 40);
    }

    #[test]
    fn surface_geometry_mismatch() {
        assert_eq!(
            check_surface(PixelLayout::Chunky, 64, (8, 4), 8, 8, 8),
            Err(BufferError::Dimensions {
                buffer: BufferKind::Chunky,
                width: 8,
                height: 8,
                got_width: 8,
                got_height: 4,
            })
        );
        assert_eq!(check_surface(PixelLayout::Rgb(RgbLayout::RGB), 48, (4, 4), 12, 4, 4), Ok(()));
    }
}
