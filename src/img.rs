//! Whole-image front end over [`imgref`] types.
//!
//! Strided images map straight onto [`Surface`] / [`SurfaceMut`]: the
//! image's stride becomes the pitch, so row padding is honored and never
//! written. The `*_vec` helpers allocate an [`ImgVec`] sized from the
//! screen's native or corrected geometry.
//!
//! ```rust
//! use planar::{Bitplane, ColorEntry, Screen, ViewportMode, img};
//!
//! let mut screen = Screen::new(8, 2, 1, ViewportMode::empty()).unwrap();
//! screen
//!     .set_bitplane_palette_colors(&[ColorEntry::from_rgb4(0x000), ColorEntry::from_rgb4(0xFFF)])
//!     .unwrap();
//! let plane = [0xF0u8, 0x0F];
//! let out = img::bitplanes_to_corrected_rgba_vec(&screen, &[Bitplane::new(&plane, 1)]).unwrap();
//! assert_eq!((out.width(), out.height()), (16, 4));
//! ```

use alloc::vec;

use imgref::{ImgRef, ImgRefMut, ImgVec};
use rgb::Rgba;

use crate::{Bitplane, BitplaneMut, Error, PixelLayout, RgbLayout, Screen, Surface, SurfaceMut};

const RGBA_BYTES: usize = 4;

fn rgba_surface(
    buf: &mut [Rgba<u8>],
    width: usize,
    height: usize,
    stride: usize,
) -> SurfaceMut<'_> {
    let bytes: &mut [u8] = bytemuck::cast_slice_mut(buf);
    let pitch = stride * RGBA_BYTES;
    SurfaceMut::new(bytes, width, height, pitch, PixelLayout::Rgb(RgbLayout::RGBA))
}

fn chunky_surface<'a>(src: &ImgRef<'a, u8>) -> Surface<'a> {
    let buf: &'a [u8] = src.buf();
    Surface::new(buf, src.width(), src.height(), src.stride(), PixelLayout::Chunky)
}

// ---------------------------------------------------------------------------
// Into caller images
// ---------------------------------------------------------------------------

/// Bitplanes → `ImgRefMut<Rgba<u8>>` at native geometry.
pub fn bitplanes_to_rgba(
    screen: &Screen,
    planes: &[Bitplane<'_>],
    mut dst: ImgRefMut<'_, Rgba<u8>>,
) -> Result<(), Error> {
    let (w, h, stride) = (dst.width(), dst.height(), dst.stride());
    let buf: &mut [Rgba<u8>] = dst.buf_mut();
    screen.bitplanes_to_rgb(planes, &mut rgba_surface(buf, w, h, stride))
}

/// Bitplanes → `ImgRefMut<Rgba<u8>>` at corrected geometry.
pub fn bitplanes_to_corrected_rgba(
    screen: &Screen,
    planes: &[Bitplane<'_>],
    mut dst: ImgRefMut<'_, Rgba<u8>>,
) -> Result<(), Error> {
    let (w, h, stride) = (dst.width(), dst.height(), dst.stride());
    let buf: &mut [Rgba<u8>] = dst.buf_mut();
    screen.bitplanes_to_corrected(planes, &mut rgba_surface(buf, w, h, stride))
}

/// Bitplanes → chunky `ImgRefMut<u8>` at native geometry.
pub fn bitplanes_to_chunky(
    screen: &Screen,
    planes: &[Bitplane<'_>],
    mut dst: ImgRefMut<'_, u8>,
) -> Result<(), Error> {
    let (w, h, stride) = (dst.width(), dst.height(), dst.stride());
    let buf: &mut [u8] = dst.buf_mut();
    screen.bitplanes_to_chunky(planes, &mut SurfaceMut::new(buf, w, h, stride, PixelLayout::Chunky))
}

/// Chunky `ImgRef<u8>` → bitplanes.
pub fn chunky_to_bitplanes(
    screen: &Screen,
    src: ImgRef<'_, u8>,
    planes: &mut [BitplaneMut<'_>],
) -> Result<(), Error> {
    screen.chunky_to_bitplanes(&chunky_surface(&src), planes)
}

/// Chunky `ImgRef<u8>` → `ImgRefMut<Rgba<u8>>` through the screen palette.
pub fn chunky_to_rgba(
    screen: &Screen,
    src: ImgRef<'_, u8>,
    mut dst: ImgRefMut<'_, Rgba<u8>>,
) -> Result<(), Error> {
    let (w, h, stride) = (dst.width(), dst.height(), dst.stride());
    let out: &mut [Rgba<u8>] = dst.buf_mut();
    screen.chunky_to_rgb(&chunky_surface(&src), &mut rgba_surface(out, w, h, stride))
}

// ---------------------------------------------------------------------------
// Allocating helpers
// ---------------------------------------------------------------------------

/// Bitplanes → a new native-size `ImgVec<Rgba<u8>>`.
pub fn bitplanes_to_rgba_vec(
    screen: &Screen,
    planes: &[Bitplane<'_>],
) -> Result<ImgVec<Rgba<u8>>, Error> {
    let (w, h) = (screen.width(), screen.height());
    let mut img = ImgVec::new(vec![Rgba::new(0, 0, 0, 0); w * h], w, h);
    bitplanes_to_rgba(screen, planes, img.as_mut())?;
    Ok(img)
}

/// Bitplanes → a new corrected-size `ImgVec<Rgba<u8>>`.
pub fn bitplanes_to_corrected_rgba_vec(
    screen: &Screen,
    planes: &[Bitplane<'_>],
) -> Result<ImgVec<Rgba<u8>>, Error> {
    let (w, h) = screen.corrected_dimensions();
    let mut img = ImgVec::new(vec![Rgba::new(0, 0, 0, 0); w * h], w, h);
    bitplanes_to_corrected_rgba(screen, planes, img.as_mut())?;
    Ok(img)
}

/// Bitplanes → a new native-size chunky `ImgVec<u8>`.
pub fn bitplanes_to_chunky_vec(
    screen: &Screen,
    planes: &[Bitplane<'_>],
) -> Result<ImgVec<u8>, Error> {
    let (w, h) = (screen.width(), screen.height());
    let mut img = ImgVec::new(vec![0u8; w * h], w, h);
    bitplanes_to_chunky(screen, planes, img.as_mut())?;
    Ok(img)
}

/// Block-replicate a native `ImgRef<Rgba<u8>>` into a new corrected image.
pub fn correct_rgba(screen: &Screen, src: ImgRef<'_, Rgba<u8>>) -> Result<ImgVec<Rgba<u8>>, Error> {
    let buf: &[Rgba<u8>] = src.buf();
    let surface = Surface::new(
        bytemuck::cast_slice(buf),
        src.width(),
        src.height(),
        src.stride() * RGBA_BYTES,
        PixelLayout::Rgb(RgbLayout::RGBA),
    );
    let (w, h) = screen.corrected_dimensions();
    let mut out = vec![Rgba::new(0, 0, 0, 0); w * h];
    screen.correct(&surface, &mut rgba_surface(&mut out, w, h, w))?;
    Ok(ImgVec::new(out, w, h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BufferError, BufferKind, ColorEntry, ConfigError, ViewportMode};
    use alloc::vec::Vec;

    fn two_color(width: usize, height: usize, mode: ViewportMode) -> Screen {
        let mut s = Screen::new(width, height, 1, mode).unwrap();
        s.set_bitplane_palette_colors(&[ColorEntry::from_rgb4(0x00F), ColorEntry::from_rgb4(0xF00)])
            .unwrap();
        s
    }

    #[test]
    fn strided_destination_padding_untouched() {
        let s = two_color(8, 2, ViewportMode::LACE);
        let plane = [0x80u8, 0x01];
        let sentinel = Rgba::new(1, 2, 3, 4);
        // Stride 10 px for an 8 px wide image.
        let mut buf = vec![sentinel; 10 * 2];
        let dst = ImgRefMut::new_stride(&mut buf, 8, 2, 10);
        bitplanes_to_rgba(&s, &[Bitplane::new(&plane, 1)], dst).unwrap();
        let red = Rgba::new(255, 0, 0, 255);
        let blue = Rgba::new(0, 0, 255, 255);
        assert_eq!(buf[0], red);
        assert_eq!(buf[1], blue);
        assert_eq!(buf[8..10], [sentinel; 2]);
        assert_eq!(buf[17], red);
    }

    #[test]
    fn chunky_image_round_trip() {
        let s = Screen::new(5, 3, 3, ViewportMode::empty()).unwrap();
        let chunky = ImgVec::new((0..15u8).map(|v| v % 8).collect::<Vec<_>>(), 5, 3);
        let mut data = vec![[0u8; 3]; 3];
        {
            let mut planes: Vec<_> = data.iter_mut().map(|d| BitplaneMut::new(d, 1)).collect();
            chunky_to_bitplanes(&s, chunky.as_ref(), &mut planes).unwrap();
        }
        let planes: Vec<_> = data.iter().map(|d| Bitplane::new(d, 1)).collect();
        let back = bitplanes_to_chunky_vec(&s, &planes).unwrap();
        assert_eq!(back.buf(), chunky.buf());
    }

    #[test]
    fn corrected_vec_matches_correct() {
        let s = two_color(8, 2, ViewportMode::empty());
        let plane = [0b1100_1010u8, 0b0011_0101];
        let planes = [Bitplane::new(&plane, 1)];
        let native = bitplanes_to_rgba_vec(&s, &planes).unwrap();
        let fused = bitplanes_to_corrected_rgba_vec(&s, &planes).unwrap();
        let two_step = correct_rgba(&s, native.as_ref()).unwrap();
        assert_eq!((fused.width(), fused.height()), (16, 4));
        assert_eq!(fused.buf(), two_step.buf());
    }

    #[test]
    fn wrong_image_size() {
        let s = two_color(8, 2, ViewportMode::empty());
        let plane = [0u8; 2];
        let mut buf = vec![0u8; 16];
        assert_eq!(
            bitplanes_to_chunky(&s, &[Bitplane::new(&plane, 1)], ImgRefMut::new(&mut buf, 4, 4)),
            Err(Error::Buffer(BufferError::Dimensions {
                buffer: BufferKind::Chunky,
                width: 8,
                height: 2,
                got_width: 4,
                got_height: 4,
            }))
        );
        let ham = Screen::new(8, 2, 6, ViewportMode::HAM).unwrap();
        assert_eq!(
            bitplanes_to_chunky_vec(&ham, &[Bitplane::new(&plane, 1); 6]).err(),
            Some(Error::Config(ConfigError::ChunkyWithHam))
        );
    }
}
