//! Planar and chunky sources to RGB(A) or chunky surfaces.
//!
//! These drivers assume their arguments were validated by the caller
//! ([`crate::Screen`] does this). Each scanline is processed in fixed spans
//! on the stack: gather indices, resolve colors (threading the HAM running
//! color from span to span), then store with horizontal replication. Extra
//! output rows for vertical correction are copied afterwards.

use crate::buffer::RgbLayout;
use crate::correct::{repeat_row, widen_row};
use crate::mode::Correction;
use crate::palette::Rgba8;
use crate::planar::kernel::gather_span;
use crate::resolve::Resolver;
use crate::Bitplane;

/// Pixels per stack span. A multiple of 8 so spans start on plane bytes.
const SPAN: usize = 256;

/// An output buffer with its row distance.
pub(crate) struct Target<'a> {
    pub(crate) data: &'a mut [u8],
    pub(crate) pitch: usize,
}

/// Store `colors` at pixel `x` of `row`, each one `factor` times.
#[inline(always)]
fn store_span(colors: &[Rgba8], row: &mut [u8], x: usize, layout: RgbLayout, factor: usize) {
    let bpp = layout.bytes_per_pixel();
    let out = &mut row[x * factor * bpp..][..colors.len() * factor * bpp];
    for (&c, block) in colors.iter().zip(out.chunks_exact_mut(bpp * factor)) {
        for px in block.chunks_exact_mut(bpp) {
            layout.store(px, c);
        }
    }
}

/// Indexed bitplanes to a chunky surface (direct and EHB screens).
pub(crate) fn planes_to_chunky(
    planes: &[Bitplane<'_>],
    dst: Target<'_>,
    width: usize,
    height: usize,
    c: Correction,
) {
    let (h, v) = (c.horizontal as usize, c.vertical as usize);
    let out_bytes = width * h;
    let mut idx = [0u8; SPAN];
    for y in 0..height {
        let start = y * v * dst.pitch;
        let row = &mut dst.data[start..][..out_bytes];
        let mut x = 0;
        while x < width {
            let n = SPAN.min(width - x);
            gather_span(planes, y, x / 8, &mut idx[..n]);
            widen_row(&idx[..n], &mut row[x * h..][..n * h], 1, h);
            x += n;
        }
        repeat_row(dst.data, start, dst.pitch, out_bytes, v - 1);
    }
}

/// Indexed bitplanes to an RGB surface through `resolver`.
pub(crate) fn planes_to_rgb(
    planes: &[Bitplane<'_>],
    resolver: &Resolver,
    dst: Target<'_>,
    layout: RgbLayout,
    width: usize,
    height: usize,
    c: Correction,
) {
    let (h, v) = (c.horizontal as usize, c.vertical as usize);
    let out_bytes = width * h * layout.bytes_per_pixel();
    let mut idx = [0u8; SPAN];
    let mut colors = [Rgba8::BLACK; SPAN];
    for y in 0..height {
        let start = y * v * dst.pitch;
        let row = &mut dst.data[start..][..out_bytes];
        let mut carry = resolver.row_start();
        let mut x = 0;
        while x < width {
            let n = SPAN.min(width - x);
            gather_span(planes, y, x / 8, &mut idx[..n]);
            carry = resolver.resolve_span(&idx[..n], carry, &mut colors[..n]);
            store_span(&colors[..n], row, x, layout, h);
            x += n;
        }
        repeat_row(dst.data, start, dst.pitch, out_bytes, v - 1);
    }
}

/// Chunky indices to an RGB surface through `resolver`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn chunky_to_rgb(
    src: &[u8],
    src_pitch: usize,
    resolver: &Resolver,
    dst: Target<'_>,
    layout: RgbLayout,
    width: usize,
    height: usize,
    c: Correction,
) {
    let (h, v) = (c.horizontal as usize, c.vertical as usize);
    let out_bytes = width * h * layout.bytes_per_pixel();
    let mut colors = [Rgba8::BLACK; SPAN];
    for y in 0..height {
        let start = y * v * dst.pitch;
        let row = &mut dst.data[start..][..out_bytes];
        let mut carry = resolver.row_start();
        for (i, span) in src[y * src_pitch..][..width].chunks(SPAN).enumerate() {
            carry = resolver.resolve_span(span, carry, &mut colors[..span.len()]);
            store_span(&colors[..span.len()], row, i * SPAN, layout, h);
        }
        repeat_row(dst.data, start, dst.pitch, out_bytes, v - 1);
    }
}

/// Deep (24 or 32 plane) bitplanes to an RGB surface.
///
/// Each group of 8 planes is one 8-bit component: red, green, blue, then
/// alpha when 32 planes are given. Without alpha planes pixels are opaque.
pub(crate) fn deep_to_rgb(
    planes: &[Bitplane<'_>],
    dst: Target<'_>,
    layout: RgbLayout,
    width: usize,
    height: usize,
    c: Correction,
) {
    let (h, v) = (c.horizontal as usize, c.vertical as usize);
    let out_bytes = width * h * layout.bytes_per_pixel();
    let mut comp = [[0xFFu8; SPAN]; 4];
    let mut colors = [Rgba8::BLACK; SPAN];
    for y in 0..height {
        let start = y * v * dst.pitch;
        let row = &mut dst.data[start..][..out_bytes];
        let mut x = 0;
        while x < width {
            let n = SPAN.min(width - x);
            for (group, out) in planes.chunks_exact(8).zip(comp.iter_mut()) {
                gather_span(group, y, x / 8, &mut out[..n]);
            }
            for (i, px) in colors[..n].iter_mut().enumerate() {
                *px = Rgba8::new(comp[0][i], comp[1][i], comp[2][i], comp[3][i]);
            }
            store_span(&colors[..n], row, x, layout, h);
            x += n;
        }
        repeat_row(dst.data, start, dst.pitch, out_bytes, v - 1);
    }
}
