// ---------------------------------------------------------------------------
// Bitplane ↔ chunky transcoding with per-tier dispatch.
//
// Architecture: the row kernels in `kernel.rs` are #[inline(always)], and each
// #[arcane] tier wrapper below inlines them under that tier's target
// features. incant! picks the best tier once per image, not per row.
// ---------------------------------------------------------------------------

use archmage::incant;
use archmage::prelude::*;

use crate::buffer::{check_planes, check_strided};
use crate::mode::{MAX_INDEXED_DEPTH, check_geometry};
use crate::{Bitplane, BitplaneMut, BufferKind, ConfigError, Error};

pub(crate) mod kernel;


// ===========================================================================
// Validation
// ===========================================================================

fn check_depth(planes: usize) -> Result<(), ConfigError> {
    if planes == 0 || planes > MAX_INDEXED_DEPTH as usize {
        return Err(ConfigError::UnsupportedDepth(planes.min(u8::MAX as usize) as u8));
    }
    Ok(())
}

// ===========================================================================
// Tier wrappers (dispatch targets for incant!)
// ===========================================================================

fn planes_to_chunky_impl_scalar(
    _t: ScalarToken,
    planes: &[Bitplane<'_>],
    dst: &mut [u8],
    dst_pitch: usize,
    w: usize,
    h: usize,
) {
    kernel::planes_to_chunky(planes, dst, dst_pitch, w, h);
}

fn chunky_to_planes_impl_scalar(
    _t: ScalarToken,
    src: &[u8],
    src_pitch: usize,
    planes: &mut [BitplaneMut<'_>],
    w: usize,
    h: usize,
) {
    kernel::chunky_to_planes(src, src_pitch, planes, w, h);
}

#[cfg(target_arch = "x86_64")]
#[arcane]
fn planes_to_chunky_impl_v3(
    _t: X64V3Token,
    planes: &[Bitplane<'_>],
    dst: &mut [u8],
    dst_pitch: usize,
    w: usize,
    h: usize,
) {
    kernel::planes_to_chunky(planes, dst, dst_pitch, w, h);
}

#[cfg(target_arch = "x86_64")]
#[arcane]
fn chunky_to_planes_impl_v3(
    _t: X64V3Token,
    src: &[u8],
    src_pitch: usize,
    planes: &mut [BitplaneMut<'_>],
    w: usize,
    h: usize,
) {
    kernel::chunky_to_planes(src, src_pitch, planes, w, h);
}

#[cfg(target_arch = "aarch64")]
#[arcane]
fn planes_to_chunky_impl_neon(
    _t: NeonToken,
    planes: &[Bitplane<'_>],
    dst: &mut [u8],
    dst_pitch: usize,
    w: usize,
    h: usize,
) {
    kernel::planes_to_chunky(planes, dst, dst_pitch, w, h);
}

#[cfg(target_arch = "aarch64")]
#[arcane]
fn chunky_to_planes_impl_neon(
    _t: NeonToken,
    src: &[u8],
    src_pitch: usize,
    planes: &mut [BitplaneMut<'_>],
    w: usize,
    h: usize,
) {
    kernel::chunky_to_planes(src, src_pitch, planes, w, h);
}

#[cfg(target_arch = "wasm32")]
#[arcane]
fn planes_to_chunky_impl_wasm128(
    _t: Wasm128Token,
    planes: &[Bitplane<'_>],
    dst: &mut [u8],
    dst_pitch: usize,
    w: usize,
    h: usize,
) {
    kernel::planes_to_chunky(planes, dst, dst_pitch, w, h);
}

#[cfg(target_arch = "wasm32")]
#[arcane]
fn chunky_to_planes_impl_wasm128(
    _t: Wasm128Token,
    src: &[u8],
    src_pitch: usize,
    planes: &mut [BitplaneMut<'_>],
    w: usize,
    h: usize,
) {
    kernel::chunky_to_planes(src, src_pitch, planes, w, h);
}

// ===========================================================================
// Public API
// ===========================================================================

/// Bitplanes → chunky indices.
///
/// Plane `i` supplies bit `i` of every index (plane 0 is the least
/// significant). `planes.len()` is the depth and must be 1..=8. Each plane
/// has its own pitch; `dst_pitch` is the chunky row distance in bytes and
/// must be ≥ `width`. Bits past `width` in the last byte of a plane row are
/// ignored, and bytes past `width` in a chunky row are never written.
pub fn bitplanes_to_chunky(
    planes: &[Bitplane<'_>],
    dst: &mut [u8],
    dst_pitch: usize,
    width: usize,
    height: usize,
) -> Result<(), Error> {
    check_geometry(width, height)?;
    check_depth(planes.len())?;
    check_planes(planes.iter().map(|p| (p.data.len(), p.pitch)), width, height)?;
    check_strided(BufferKind::Chunky, dst.len(), width, height, dst_pitch)?;
    incant!(
        planes_to_chunky_impl(planes, dst, dst_pitch, width, height),
        [v3, neon, wasm128, scalar]
    );
    Ok(())
}

/// Chunky indices → bitplanes, the exact inverse of [`bitplanes_to_chunky`].
///
/// Bit `i` of each index is written to plane `i`; index bits at or above
/// `planes.len()` are dropped. Bits past `width` in the last byte of each
/// plane row keep their previous value.
pub fn chunky_to_bitplanes(
    src: &[u8],
    src_pitch: usize,
    planes: &mut [BitplaneMut<'_>],
    width: usize,
    height: usize,
) -> Result<(), Error> {
    check_geometry(width, height)?;
    check_depth(planes.len())?;
    check_strided(BufferKind::Chunky, src.len(), width, height, src_pitch)?;
    check_planes(planes.iter().map(|p| (p.data.len(), p.pitch)), width, height)?;
    incant!(
        chunky_to_planes_impl(src, src_pitch, planes, width, height),
        [v3, neon, wasm128, scalar]
    );
    Ok(())
}
