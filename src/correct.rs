// ---------------------------------------------------------------------------
// Aspect/resolution correction by nearest-neighbor block replication.
//
// Every native pixel becomes a solid `horizontal x vertical` block. Each
// output row is widened once from its source row, and the remaining
// `vertical - 1` copies are plain row copies inside the destination.
// ---------------------------------------------------------------------------

use archmage::incant;
use archmage::prelude::*;

use crate::mode::{Correction, check_geometry};
use crate::{ConfigError, Error, Surface, SurfaceMut};

// ===========================================================================
// Row kernels
// ===========================================================================

/// Write each `bpp`-byte pixel of `src` `factor` times into `dst`.
#[inline(always)]
pub(crate) fn widen_row(src: &[u8], dst: &mut [u8], bpp: usize, factor: usize) {
    match (bpp, factor) {
        (_, 1) => dst[..src.len()].copy_from_slice(src),
        (1, _) => {
            for (&v, out) in src.iter().zip(dst.chunks_exact_mut(factor)) {
                out.fill(v);
            }
        }
        _ => {
            for (px, out) in src.chunks_exact(bpp).zip(dst.chunks_exact_mut(bpp * factor)) {
                for o in out.chunks_exact_mut(bpp) {
                    o.copy_from_slice(px);
                }
            }
        }
    }
}

/// Copy the `row_bytes` starting at `start` to the `count` rows after it.
#[inline(always)]
pub(crate) fn repeat_row(
    dst: &mut [u8],
    start: usize,
    pitch: usize,
    row_bytes: usize,
    count: usize,
) {
    for k in 1..=count {
        dst.copy_within(start..start + row_bytes, start + k * pitch);
    }
}

#[allow(clippy::too_many_arguments)]
#[inline(always)]
fn replicate_rows(
    src: &[u8],
    src_pitch: usize,
    dst: &mut [u8],
    dst_pitch: usize,
    row_bytes: usize,
    height: usize,
    bpp: usize,
    c: Correction,
) {
    let (h, v) = (c.horizontal as usize, c.vertical as usize);
    let out_bytes = row_bytes * h;
    for y in 0..height {
        let start = y * v * dst_pitch;
        widen_row(&src[y * src_pitch..][..row_bytes], &mut dst[start..][..out_bytes], bpp, h);
        repeat_row(dst, start, dst_pitch, out_bytes, v - 1);
    }
}

// ===========================================================================
// Tier wrappers (dispatch targets for incant!)
// ===========================================================================

#[allow(clippy::too_many_arguments)]
fn replicate_impl_scalar(
    _t: ScalarToken,
    src: &[u8],
    src_pitch: usize,
    dst: &mut [u8],
    dst_pitch: usize,
    row_bytes: usize,
    height: usize,
    bpp: usize,
    c: Correction,
) {
    replicate_rows(src, src_pitch, dst, dst_pitch, row_bytes, height, bpp, c);
}

#[cfg(target_arch = "x86_64")]
#[allow(clippy::too_many_arguments)]
#[arcane]
fn replicate_impl_v3(
    _t: X64V3Token,
    src: &[u8],
    src_pitch: usize,
    dst: &mut [u8],
    dst_pitch: usize,
    row_bytes: usize,
    height: usize,
    bpp: usize,
    c: Correction,
) {
    replicate_rows(src, src_pitch, dst, dst_pitch, row_bytes, height, bpp, c);
}

#[cfg(target_arch = "aarch64")]
#[allow(clippy::too_many_arguments)]
#[arcane]
fn replicate_impl_neon(
    _t: NeonToken,
    src: &[u8],
    src_pitch: usize,
    dst: &mut [u8],
    dst_pitch: usize,
    row_bytes: usize,
    height: usize,
    bpp: usize,
    c: Correction,
) {
    replicate_rows(src, src_pitch, dst, dst_pitch, row_bytes, height, bpp, c);
}

#[cfg(target_arch = "wasm32")]
#[allow(clippy::too_many_arguments)]
#[arcane]
fn replicate_impl_wasm128(
    _t: Wasm128Token,
    src: &[u8],
    src_pitch: usize,
    dst: &mut [u8],
    dst_pitch: usize,
    row_bytes: usize,
    height: usize,
    bpp: usize,
    c: Correction,
) {
    replicate_rows(src, src_pitch, dst, dst_pitch, row_bytes, height, bpp, c);
}

// ===========================================================================
// Public API
// ===========================================================================

/// Block-replicate a native surface into a corrected one.
///
/// Both surfaces must share a pixel layout, and `dst` must be declared at
/// exactly `correction.apply(src.width(), src.height())`. Everything is
/// checked before the first write.
pub fn replicate(
    src: &Surface<'_>,
    dst: &mut SurfaceMut<'_>,
    correction: Correction,
) -> Result<(), Error> {
    check_geometry(src.width, src.height)?;
    if src.layout != dst.layout {
        return Err(ConfigError::LayoutMismatch.into());
    }
    if correction.horizontal == 0 || correction.vertical == 0 {
        return Err(ConfigError::InvalidGeometry {
            width: src.width,
            height: src.height,
        }
        .into());
    }
    let (cw, ch) = correction
        .apply(src.width, src.height)
        .ok_or(ConfigError::InvalidGeometry {
            width: src.width,
            height: src.height,
        })?;
    src.check(src.width, src.height)?;
    dst.check(cw, ch)?;

    crate::trace!(
        width = src.width,
        height = src.height,
        horizontal = correction.horizontal,
        vertical = correction.vertical,
        "replicate"
    );
    let bpp = src.layout.bytes_per_pixel();
    let row_bytes = src.width * bpp;
    let (src_data, src_pitch, height) = (src.data, src.pitch, src.height);
    let (dst_data, dst_pitch) = (&mut *dst.data, dst.pitch);
    incant!(
        replicate_impl(
            src_data, src_pitch, dst_data, dst_pitch, row_bytes, height, bpp, correction
        ),
        [v3, neon, wasm128, scalar]
    );
    Ok(())
}
