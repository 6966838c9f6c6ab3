// ---------------------------------------------------------------------------
// Bit-level row kernels shared by every dispatch tier.
//
// A plane byte holds 8 pixels, MSB first. Eight plane bytes at the same
// column therefore hold an 8x8 bit matrix: row = plane, column = pixel.
// `spread` turns one plane byte into a u64 with one bit per byte lane, and
// `gather` does the reverse, so a column of 8 pixels moves with one multiply
// per plane instead of 8 shifts.
// ---------------------------------------------------------------------------

use crate::{Bitplane, BitplaneMut};

const LANE_BIT0: u64 = 0x0101_0101_0101_0101;

/// Place bit `7 - k` of `byte` into bit 0 of byte lane `k`.
///
/// The multiplier holds 8 copies of `byte` at offsets 9k, which never overlap,
/// so no carries occur and lane `k`'s bit 7 receives source bit `7 - k`.
#[inline(always)]
pub(super) fn spread(byte: u8) -> u64 {
    ((byte as u64).wrapping_mul(0x8040_2010_0804_0201) >> 7) & LANE_BIT0
}

/// Collect bit `plane` of each byte lane into one byte, lane 0 in bit 7.
///
/// After `swap_bytes` lane `k` sits in lane `7 - k`; the multiplier then
/// funnels lane `j`'s bit into bit `56 + j` without carries.
#[inline(always)]
pub(super) fn gather(lanes: u64, plane: u32) -> u8 {
    let bits = (lanes >> plane) & LANE_BIT0;
    (bits.swap_bytes().wrapping_mul(0x0102_0408_1020_4080) >> 56) as u8
}

#[inline(always)]
fn column(planes: &[Bitplane<'_>], y: usize, col: usize) -> u64 {
    let mut acc = 0u64;
    for (i, p) in planes.iter().enumerate() {
        acc |= spread(p.data[y * p.pitch + col]) << i;
    }
    acc
}

/// Fill `dst` with the indices of pixels `8 * byte_start ..` of row `y`.
///
/// Plane `i` supplies bit `i`. Bits of the final plane byte past
/// `dst.len()` are ignored.
#[inline(always)]
pub(crate) fn gather_span(planes: &[Bitplane<'_>], y: usize, byte_start: usize, dst: &mut [u8]) {
    let mut col = byte_start;
    let mut chunks = dst.chunks_exact_mut(8);
    for out in &mut chunks {
        out.copy_from_slice(&column(planes, y, col).to_le_bytes());
        col += 1;
    }
    let tail = chunks.into_remainder();
    if !tail.is_empty() {
        let n = tail.len();
        tail.copy_from_slice(&column(planes, y, col).to_le_bytes()[..n]);
    }
}

/// Write the indices in `src` into row `y` of every plane, starting at
/// pixel 0. Bit `i` of each index goes to plane `i`; bits of the final
/// plane byte past `src.len()` keep their previous value.
#[inline(always)]
pub(super) fn scatter_row(src: &[u8], planes: &mut [BitplaneMut<'_>], y: usize) {
    let mut col = 0;
    let mut chunks = src.chunks_exact(8);
    for px in &mut chunks {
        let mut lanes = [0u8; 8];
        lanes.copy_from_slice(px);
        let lanes = u64::from_le_bytes(lanes);
        for (i, p) in planes.iter_mut().enumerate() {
            p.data[y * p.pitch + col] = gather(lanes, i as u32);
        }
        col += 1;
    }
    let tail = chunks.remainder();
    if !tail.is_empty() {
        let mut lanes = [0u8; 8];
        lanes[..tail.len()].copy_from_slice(tail);
        let lanes = u64::from_le_bytes(lanes);
        let keep = 0xFFu8 >> tail.len();
        for (i, p) in planes.iter_mut().enumerate() {
            let d = &mut p.data[y * p.pitch + col];
            *d = (*d & keep) | (gather(lanes, i as u32) & !keep);
        }
    }
}

/// Whole-image planar → chunky.
#[inline(always)]
pub(super) fn planes_to_chunky(
    planes: &[Bitplane<'_>],
    dst: &mut [u8],
    dst_pitch: usize,
    width: usize,
    height: usize,
) {
    for y in 0..height {
        gather_span(planes, y, 0, &mut dst[y * dst_pitch..][..width]);
    }
}

/// Whole-image chunky → planar.
#[inline(always)]
pub(super) fn chunky_to_planes(
    src: &[u8],
    src_pitch: usize,
    planes: &mut [BitplaneMut<'_>],
    width: usize,
    height: usize,
) {
    for y in 0..height {
        scatter_row(&src[y * src_pitch..][..width], planes, y);
    }
}
