//! Turning palette indices into colors under the Amiga display modes.
//!
//! Direct and EHB modes are flat table lookups. HAM is the only stateful
//! rule: each pixel either loads a base color or modifies one component of
//! the pixel before it, so a scanline must be resolved left to right with
//! the running color threaded through as an explicit value.

use crate::mode::{ViewportMode, is_deep, plane_count_for};
use crate::palette::{ComponentDepth, MAX_COLORS, OCS_COLORS, Palette, Rgba8, convert_depth};
use crate::ConfigError;

/// How indices map to colors. Chosen from the mode and depth by
/// [`ColorModel::for_mode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorModel {
    /// `palette[index]`.
    Direct,
    /// 6 planes: indices 32..63 show entries 0..31 at half brightness.
    ExtraHalfBrite,
    /// 6 planes: 2 control bits + 4-bit value.
    Ham6,
    /// 8 planes: 2 control bits + 6-bit value.
    Ham8,
    /// 24 or 32 planes holding 8-bit R, G, B (and A) directly.
    Deep,
}

impl ColorModel {
    /// Validate `mode` against `depth` and pick the resolution rule.
    pub fn for_mode(mode: ViewportMode, depth: u8) -> Result<Self, ConfigError> {
        plane_count_for(depth)?;
        match (mode.is_ham(), mode.is_ehb()) {
            (true, true) => Err(ConfigError::HamWithEhb),
            (true, false) => match depth {
                6 => Ok(Self::Ham6),
                8 => Ok(Self::Ham8),
                _ => Err(ConfigError::HamDepth(depth)),
            },
            (false, true) if depth == 6 => Ok(Self::ExtraHalfBrite),
            (false, true) => Err(ConfigError::EhbDepth(depth)),
            (false, false) if is_deep(depth) => Ok(Self::Deep),
            (false, false) => Ok(Self::Direct),
        }
    }

    #[inline]
    pub const fn is_ham(self) -> bool {
        matches!(self, Self::Ham6 | Self::Ham8)
    }

    /// Precision of a HAM modify value, or `None` outside HAM.
    #[inline]
    pub const fn ham_value_depth(self) -> Option<ComponentDepth> {
        match self {
            Self::Ham6 => Some(ComponentDepth::Bits4),
            Self::Ham8 => Some(ComponentDepth::Bits6),
            _ => None,
        }
    }

    /// Most palette entries a screen of `depth` planes can load.
    ///
    /// OCS/ECS-class layouts (depth ≤ 5, EHB, HAM6) have 32 registers;
    /// AGA-class layouts have 256.
    pub const fn palette_limit(self, depth: u8) -> usize {
        match self {
            Self::ExtraHalfBrite | Self::Ham6 => OCS_COLORS,
            Self::Direct if depth <= 5 => OCS_COLORS,
            _ => MAX_COLORS,
        }
    }

    /// Whether resolved pixels fit back into a chunky index buffer.
    #[inline]
    pub const fn has_chunky_form(self) -> bool {
        matches!(self, Self::Direct | Self::ExtraHalfBrite)
    }
}

/// HAM running color at the left edge of every scanline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HamStart {
    /// Palette entry 0, the background color.
    #[default]
    Background,
    /// A fixed color.
    Color(Rgba8),
}

/// Resolves indices for one palette and color model.
///
/// Holds an 8-bit lookup table built from the palette (including the EHB
/// half-brite entries), so resolving is a table load plus, for HAM, a
/// component merge. The resolver itself is immutable; HAM state lives in the
/// caller-threaded running color.
#[derive(Clone, Debug)]
pub struct Resolver {
    model: ColorModel,
    lut: [Rgba8; MAX_COLORS],
    row_start: Rgba8,
}

impl Resolver {
    pub fn new(model: ColorModel, palette: &Palette, ham_start: HamStart) -> Self {
        let mut lut = [Rgba8::BLACK; MAX_COLORS];
        for (i, dst) in lut.iter_mut().enumerate() {
            *dst = match model {
                ColorModel::ExtraHalfBrite if i >= OCS_COLORS => {
                    palette.get(i & (OCS_COLORS - 1)).half_brite().to_rgba8()
                }
                _ => palette.get(i).to_rgba8(),
            };
        }
        let row_start = match ham_start {
            HamStart::Background => lut[0],
            HamStart::Color(c) => c,
        };
        Self {
            model,
            lut,
            row_start,
        }
    }

    #[inline]
    pub fn model(&self) -> ColorModel {
        self.model
    }

    /// Running color every scanline starts from.
    #[inline]
    pub fn row_start(&self) -> Rgba8 {
        self.row_start
    }

    /// Color of a pixel with `index`, given the color of the pixel to its
    /// left (ignored outside HAM).
    #[inline]
    pub fn resolve(&self, index: u8, prev: Rgba8) -> Rgba8 {
        match self.model {
            ColorModel::Ham6 => ham_step(&self.lut, index, prev, 4),
            ColorModel::Ham8 => ham_step(&self.lut, index, prev, 6),
            ColorModel::Direct | ColorModel::ExtraHalfBrite | ColorModel::Deep => {
                self.lut[index as usize]
            }
        }
    }

    /// Resolve consecutive pixels of one scanline.
    ///
    /// `carry` is the running color before `indices[0]`; the running color
    /// after the last pixel is returned so a row can be resolved in spans.
    pub fn resolve_span(&self, indices: &[u8], carry: Rgba8, out: &mut [Rgba8]) -> Rgba8 {
        match self.model {
            ColorModel::Ham6 => ham_span(&self.lut, indices, carry, out, 4),
            ColorModel::Ham8 => ham_span(&self.lut, indices, carry, out, 6),
            ColorModel::Direct | ColorModel::ExtraHalfBrite | ColorModel::Deep => {
                for (dst, &i) in out.iter_mut().zip(indices) {
                    *dst = self.lut[i as usize];
                }
                indices.last().map_or(carry, |&i| self.lut[i as usize])
            }
        }
    }

    /// Resolve a whole scanline, starting from [`Self::row_start`].
    pub fn resolve_row(&self, indices: &[u8], out: &mut [Rgba8]) {
        self.resolve_span(indices, self.row_start, out);
    }
}

/// One HAM pixel. `value_bits` is 4 (HAM6) or 6 (HAM8).
///
/// Control `00` loads a base color; `01`, `10`, `11` replace blue, red and
/// green with the value widened to 8 bits.
#[inline(always)]
fn ham_step(lut: &[Rgba8; MAX_COLORS], index: u8, prev: Rgba8, value_bits: u32) -> Rgba8 {
    let value = index & ((1u8 << value_bits) - 1);
    let from = if value_bits == 4 {
        ComponentDepth::Bits4
    } else {
        ComponentDepth::Bits6
    };
    let wide = convert_depth(value, from, ComponentDepth::Bits8);
    match (index >> value_bits) & 0b11 {
        0b00 => lut[value as usize],
        0b01 => Rgba8 { b: wide, ..prev },
        0b10 => Rgba8 { r: wide, ..prev },
        _ => Rgba8 { g: wide, ..prev },
    }
}

#[inline(always)]
fn ham_span(
    lut: &[Rgba8; MAX_COLORS],
    indices: &[u8],
    mut carry: Rgba8,
    out: &mut [Rgba8],
    value_bits: u32,
) -> Rgba8 {
    for (dst, &i) in out.iter_mut().zip(indices) {
        carry = ham_step(lut, i, carry, value_bits);
        *dst = carry;
    }
    carry
}
