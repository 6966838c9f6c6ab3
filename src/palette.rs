//! Palette storage and color-depth conversion.
//!
//! Amiga color registers come in three precisions: 12-bit OCS/ECS (`0x0RGB`),
//! 24-bit AGA (`0xRRGGBB`) and the left-justified 32-bit-per-component form
//! taken by `LoadRGB32`. A [`ColorEntry`] remembers the precision it was
//! written in so conversions can be bit-exact:
//!
//! - widening replicates the high bits into the new low bits
//!   (`0x8` → `0x88`), so full scale stays full scale;
//! - narrowing keeps only the top bits, with no rounding.
//!
//! The two rules are deliberately asymmetric: `narrow(widen(v)) == v` for
//! every value, which keeps hardware-original palettes intact across a round
//! trip through 8-bit surfaces.

use alloc::vec::Vec;

use crate::{BufferError, BufferKind, ConfigError};

/// Size of the largest (AGA / chunky) palette.
pub const MAX_COLORS: usize = 256;

/// Size of an OCS/ECS palette.
pub const OCS_COLORS: usize = 32;

/// Bits per color component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ComponentDepth {
    /// OCS/ECS registers and HAM6 modify values.
    Bits4 = 4,
    /// HAM8 modify values.
    Bits6 = 6,
    /// AGA registers and true-color surfaces.
    #[default]
    Bits8 = 8,
}

impl ComponentDepth {
    #[inline]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    #[inline]
    pub const fn max_value(self) -> u8 {
        ((1u32 << self.bits()) - 1) as u8
    }
}

/// Rescale one component from `from` bits to `to` bits.
///
/// Widening repeats the source bit pattern downward until the low bits are
/// filled (`v << 4 | v` for 4→8, `v << 2 | v >> 4` for 6→8). Narrowing
/// drops low bits.
#[inline]
pub const fn convert_depth(value: u8, from: ComponentDepth, to: ComponentDepth) -> u8 {
    let (from, to) = (from.bits() as i32, to.bits() as i32);
    let v = (value as u32) & ((1u32 << from) - 1);
    if to <= from {
        return (v >> (from - to)) as u8;
    }
    let mut out = 0u32;
    let mut shift = to - from;
    while shift > -from {
        if shift >= 0 {
            out |= v << shift;
        } else {
            out |= v >> -shift;
        }
        shift -= from;
    }
    out as u8
}

/// A color resolved to 8 bits per component.
///
/// This is what every output surface receives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Rgba8 = Rgba8::new(0, 0, 0, 0xFF);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xFF)
    }
}

/// One palette register: R/G/B at a native precision, plus 8-bit alpha.
///
/// Components are stored right-aligned at `depth` bits; the constructors
/// mask anything wider, so every entry stays in range. Alpha is not a
/// hardware component, so it is always full range and defaults to opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorEntry {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
    depth: ComponentDepth,
}

impl Default for ColorEntry {
    fn default() -> Self {
        Self::new(0, 0, 0, ComponentDepth::Bits8)
    }
}

impl ColorEntry {
    /// Opaque entry. Components above `depth` bits are masked off.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, depth: ComponentDepth) -> Self {
        let m = depth.max_value();
        Self {
            r: r & m,
            g: g & m,
            b: b & m,
            a: 0xFF,
            depth,
        }
    }

    #[inline]
    pub const fn r(self) -> u8 {
        self.r
    }

    #[inline]
    pub const fn g(self) -> u8 {
        self.g
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.b
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.a
    }

    /// Precision the components are stored at.
    #[inline]
    pub const fn depth(self) -> ComponentDepth {
        self.depth
    }

    #[inline]
    #[must_use]
    pub const fn with_alpha(mut self, a: u8) -> Self {
        self.a = a;
        self
    }

    /// 12-bit OCS/ECS register value `0x0RGB`.
    #[inline]
    pub const fn from_rgb4(v: u16) -> Self {
        Self::new(
            ((v >> 8) & 0xF) as u8,
            ((v >> 4) & 0xF) as u8,
            (v & 0xF) as u8,
            ComponentDepth::Bits4,
        )
    }

    /// 24-bit value `0xRRGGBB`.
    #[inline]
    pub const fn from_rgb24(v: u32) -> Self {
        Self::new((v >> 16) as u8, (v >> 8) as u8, v as u8, ComponentDepth::Bits8)
    }

    /// Left-justified 32-bit components as used by `LoadRGB32`; only the
    /// top byte of each is significant.
    #[inline]
    pub const fn from_rgb32(rgb: [u32; 3]) -> Self {
        Self::new(
            (rgb[0] >> 24) as u8,
            (rgb[1] >> 24) as u8,
            (rgb[2] >> 24) as u8,
            ComponentDepth::Bits8,
        )
    }

    /// The same color at another component precision.
    #[inline]
    #[must_use]
    pub const fn to_depth(self, to: ComponentDepth) -> Self {
        Self {
            r: convert_depth(self.r, self.depth, to),
            g: convert_depth(self.g, self.depth, to),
            b: convert_depth(self.b, self.depth, to),
            a: self.a,
            depth: to,
        }
    }

    /// 12-bit register value, narrowing wider entries.
    #[inline]
    pub const fn to_rgb4(self) -> u16 {
        let c = self.to_depth(ComponentDepth::Bits4);
        ((c.r as u16) << 8) | ((c.g as u16) << 4) | c.b as u16
    }

    /// `0xRRGGBB`, widening narrower entries.
    #[inline]
    pub const fn to_rgb24(self) -> u32 {
        let c = self.to_depth(ComponentDepth::Bits8);
        ((c.r as u32) << 16) | ((c.g as u32) << 8) | c.b as u32
    }

    /// Left-justified 32-bit components, each 8-bit value replicated through
    /// the whole word (`0xAB` → `0xABABABAB`).
    #[inline]
    pub const fn to_rgb32(self) -> [u32; 3] {
        let c = self.to_depth(ComponentDepth::Bits8);
        [
            c.r as u32 * 0x0101_0101,
            c.g as u32 * 0x0101_0101,
            c.b as u32 * 0x0101_0101,
        ]
    }

    #[inline]
    pub const fn to_rgba8(self) -> Rgba8 {
        let c = self.to_depth(ComponentDepth::Bits8);
        Rgba8::new(c.r, c.g, c.b, c.a)
    }

    /// Extra-Half-Brite variant: every component shifted right one bit at
    /// the entry's own precision.
    #[inline]
    #[must_use]
    pub const fn half_brite(self) -> Self {
        Self {
            r: self.r >> 1,
            g: self.g >> 1,
            b: self.b >> 1,
            a: self.a,
            depth: self.depth,
        }
    }
}

/// A fixed-capacity list of color registers.
///
/// Storage is inline (no allocation); `len` entries are live. Entries past
/// `len` read as opaque black.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    entries: [ColorEntry; MAX_COLORS],
    len: usize,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    /// Empty palette.
    pub const fn new() -> Self {
        Self {
            entries: [ColorEntry::new(0, 0, 0, ComponentDepth::Bits8); MAX_COLORS],
            len: 0,
        }
    }

    /// Palette holding a copy of `entries`.
    pub fn from_entries(entries: &[ColorEntry]) -> Result<Self, ConfigError> {
        let mut p = Self::new();
        p.set(entries, MAX_COLORS)?;
        Ok(p)
    }

    /// Palette from 12-bit register values.
    pub fn from_rgb4(values: &[u16]) -> Result<Self, ConfigError> {
        check_len(values.len(), MAX_COLORS)?;
        let mut p = Self::new();
        for (dst, &v) in p.entries.iter_mut().zip(values) {
            *dst = ColorEntry::from_rgb4(v);
        }
        p.len = values.len();
        Ok(p)
    }

    /// Replace every entry with `entries`, failing (and leaving the palette
    /// untouched) when more than `limit` are given.
    pub(crate) fn set(&mut self, entries: &[ColorEntry], limit: usize) -> Result<(), ConfigError> {
        check_len(entries.len(), limit.min(MAX_COLORS))?;
        self.entries[..entries.len()].copy_from_slice(entries);
        self.entries[entries.len()..].fill(ColorEntry::default());
        self.len = entries.len();
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live entries.
    #[inline]
    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries[..self.len]
    }

    /// Entry `index`; out-of-range indices read as opaque black.
    #[inline]
    pub fn get(&self, index: usize) -> ColorEntry {
        self.entries.get(index).copied().unwrap_or_default()
    }

    /// Widest component precision among the live entries.
    pub fn max_depth(&self) -> ComponentDepth {
        self.entries()
            .iter()
            .map(|e| e.depth)
            .max()
            .unwrap_or(ComponentDepth::Bits4)
    }

    fn map(&self, f: impl Fn(ColorEntry) -> ColorEntry) -> Self {
        let mut out = self.clone();
        for e in &mut out.entries[..self.len] {
            *e = f(*e);
        }
        out
    }
}

fn check_len(len: usize, max: usize) -> Result<(), ConfigError> {
    if len > max {
        Err(ConfigError::PaletteTooLarge { len, max })
    } else {
        Ok(())
    }
}

/// Every entry widened (or narrowed) to 8 bits per component, ready for an
/// indexed host surface.
pub fn to_chunky_format(palette: &Palette) -> Palette {
    palette.map(|e| e.to_depth(ComponentDepth::Bits8))
}

/// Every entry at the precision the bitplane hardware loads: 4 bits for
/// OCS/ECS or 8 bits for AGA.
pub fn to_bitplane_format(palette: &Palette, target: ComponentDepth) -> Palette {
    palette.map(|e| e.to_depth(target))
}

/// The 32 half-brite colors EHB mode shows for indices 32..63.
///
/// Entry `i` is `palette[i]` with every component halved at its own
/// precision. Computed on demand; the palette itself is never extended.
pub fn derive_ehb_extension(palette: &Palette) -> [ColorEntry; OCS_COLORS] {
    core::array::from_fn(|i| palette.get(i).half_brite())
}

/// Hardware color-register load formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorSpecFormat {
    /// One `0x0RGB` word per entry (`LoadRGB4`). Needs 4-bit entries.
    Rgb4,
    /// `LoadRGB32` table: header, three left-justified words per entry,
    /// zero terminator.
    Rgb32,
}

/// A register-ready color table, owned by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorSpec {
    Rgb4(Vec<u16>),
    Rgb32(Vec<u32>),
}

impl ColorSpec {
    pub fn format(&self) -> ColorSpecFormat {
        match self {
            Self::Rgb4(_) => ColorSpecFormat::Rgb4,
            Self::Rgb32(_) => ColorSpecFormat::Rgb32,
        }
    }
}

/// Words a `LoadRGB32` table for `colors` entries occupies.
#[inline]
pub const fn rgb32_spec_len(colors: usize) -> usize {
    colors * 3 + 2
}

/// Encode the palette as a register load table.
///
/// [`ColorSpecFormat::Rgb4`] is only exact for 4-bit entries, so it fails
/// with [`ConfigError::ColorSpecDepth`] when any entry is wider.
pub fn generate_color_spec(
    palette: &Palette,
    format: ColorSpecFormat,
) -> Result<ColorSpec, ConfigError> {
    match format {
        ColorSpecFormat::Rgb4 => rgb4_color_specs(palette).map(ColorSpec::Rgb4),
        ColorSpecFormat::Rgb32 => Ok(ColorSpec::Rgb32(rgb32_color_specs(palette))),
    }
}

/// One `0x0RGB` word per entry. Fails on entries wider than 4 bits.
pub fn rgb4_color_specs(palette: &Palette) -> Result<Vec<u16>, ConfigError> {
    check_rgb4_depth(palette)?;
    let mut out = alloc::vec![0u16; palette.len()];
    fill_rgb4(palette, &mut out);
    Ok(out)
}

/// A complete `LoadRGB32` table for every entry, starting at register 0.
pub fn rgb32_color_specs(palette: &Palette) -> Vec<u32> {
    let mut out = alloc::vec![0u32; rgb32_spec_len(palette.len())];
    fill_rgb32(palette, &mut out);
    out
}

/// [`ColorSpecFormat::Rgb4`] into a caller slice of at least `palette.len()`
/// words. Returns the number of words written.
pub fn write_rgb4_color_specs(palette: &Palette, out: &mut [u16]) -> Result<usize, crate::Error> {
    check_rgb4_depth(palette)?;
    check_spec_len(out.len(), palette.len())?;
    fill_rgb4(palette, out);
    Ok(palette.len())
}

/// [`ColorSpecFormat::Rgb32`] into a caller slice of at least
/// [`rgb32_spec_len`] words. Returns the number of words written.
pub fn write_rgb32_color_specs(palette: &Palette, out: &mut [u32]) -> Result<usize, crate::Error> {
    let needed = rgb32_spec_len(palette.len());
    check_spec_len(out.len(), needed)?;
    fill_rgb32(palette, out);
    Ok(needed)
}

fn check_rgb4_depth(palette: &Palette) -> Result<(), ConfigError> {
    let depth = palette.max_depth();
    if depth > ComponentDepth::Bits4 {
        return Err(ConfigError::ColorSpecDepth(depth as u8));
    }
    Ok(())
}

fn check_spec_len(len: usize, required: usize) -> Result<(), BufferError> {
    if len < required {
        return Err(BufferError::TooSmall {
            buffer: BufferKind::ColorSpec,
            len,
            required,
        });
    }
    Ok(())
}

fn fill_rgb4(palette: &Palette, out: &mut [u16]) {
    for (dst, e) in out.iter_mut().zip(palette.entries()) {
        *dst = e.to_rgb4();
    }
}

fn fill_rgb32(palette: &Palette, out: &mut [u32]) {
    let n = palette.len();
    // Header: count in the high word, first register (0) in the low word.
    out[0] = (n as u32) << 16;
    for (dst, e) in out[1..].chunks_exact_mut(3).zip(palette.entries()) {
        dst.copy_from_slice(&e.to_rgb32());
    }
    out[n * 3 + 1] = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ComponentDepth::*;

    #[test]
    fn widening_replicates_high_bits() {
        assert_eq!(convert_depth(0xF, Bits4, Bits8), 0xFF);
        assert_eq!(convert_depth(0x0, Bits4, Bits8), 0x00);
        assert_eq!(convert_depth(0x8, Bits4, Bits8), 0x88);
        assert_eq!(convert_depth(0x3F, Bits6, Bits8), 0xFF);
        assert_eq!(convert_depth(0x20, Bits6, Bits8), 0x82);
        assert_eq!(convert_depth(0xA, Bits4, Bits6), 0x2A);
    }

    #[test]
    fn narrowing_truncates() {
        assert_eq!(convert_depth(0x8F, Bits8, Bits4), 0x8);
        assert_eq!(convert_depth(0x7F, Bits8, Bits4), 0x7);
        assert_eq!(convert_depth(0xFF, Bits8, Bits6), 0x3F);
    }

    #[test]
    fn widen_then_narrow_is_identity() {
        for v in 0..16u8 {
            assert_eq!(convert_depth(convert_depth(v, Bits4, Bits8), Bits8, Bits4), v);
        }
        for v in 0..64u8 {
            assert_eq!(convert_depth(convert_depth(v, Bits6, Bits8), Bits8, Bits6), v);
        }
    }

    #[test]
    fn native_representations() {
        let c = ColorEntry::from_rgb4(0x0F84);
        assert_eq!((c.r, c.g, c.b, c.depth), (0xF, 0x8, 0x4, Bits4));
        assert_eq!(c.to_rgb24(), 0xFF8844);
        assert_eq!(c.to_rgb4(), 0x0F84);
        assert_eq!(c.to_rgb32(), [0xFFFF_FFFF, 0x8888_8888, 0x4444_4444]);

        let d = ColorEntry::from_rgb24(0x12AB_CD);
        assert_eq!(d.to_rgb4(), 0x01AC);
        assert_eq!(ColorEntry::from_rgb32(d.to_rgb32()), d);
    }

    #[test]
    fn ehb_halves_components() {
        let p = Palette::from_entries(&[ColorEntry::new(0xF0, 0x80, 0x40, Bits8)]).unwrap();
        let ext = derive_ehb_extension(&p);
        assert_eq!(ext[0].to_rgba8(), Rgba8::rgb(0x78, 0x40, 0x20));
        // Unset base entries halve to black.
        assert_eq!(ext[31].to_rgba8(), Rgba8::BLACK);
    }

    #[test]
    fn components_stay_within_depth() {
        let c = ColorEntry::new(0xFF, 0x10, 0x00, Bits4);
        assert_eq!((c.r(), c.g(), c.b(), c.a(), c.depth()), (0xF, 0x0, 0x0, 0xFF, Bits4));
        let p = Palette::from_entries(&[c]).unwrap();
        assert_eq!(derive_ehb_extension(&p)[0].to_rgba8(), Rgba8::rgb(0x77, 0, 0));
        assert_eq!(rgb4_color_specs(&p), Ok(alloc::vec![0x0F00]));
    }

    #[test]
    fn ehb_halves_at_native_precision() {
        let p = Palette::from_rgb4(&[0x0FFF]).unwrap();
        assert_eq!(derive_ehb_extension(&p)[0].to_rgba8(), Rgba8::rgb(0x77, 0x77, 0x77));
    }

    #[test]
    fn format_conversion() {
        let p = Palette::from_rgb4(&[0x0F00, 0x00A0]).unwrap();
        let chunky = to_chunky_format(&p);
        assert_eq!(chunky.len(), 2);
        assert_eq!(chunky.get(1), ColorEntry::new(0, 0xAA, 0, Bits8));
        let back = to_bitplane_format(&chunky, Bits4);
        assert_eq!(back, p);
    }

    #[test]
    fn palette_too_large() {
        let entries = [ColorEntry::default(); 257];
        assert_eq!(
            Palette::from_entries(&entries),
            Err(ConfigError::PaletteTooLarge { len: 257, max: 256 })
        );
        let mut p = Palette::from_rgb4(&[0x0123]).unwrap();
        assert!(p.set(&entries[..33], OCS_COLORS).is_err());
        assert_eq!(p.entries(), &[ColorEntry::from_rgb4(0x0123)]);
    }

    #[test]
    fn rgb4_spec() {
        let p = Palette::from_rgb4(&[0x0000, 0x0F84, 0x0FFF]).unwrap();
        let spec = generate_color_spec(&p, ColorSpecFormat::Rgb4).unwrap();
        assert_eq!(spec, ColorSpec::Rgb4(alloc::vec![0x0000, 0x0F84, 0x0FFF]));
    }

    #[test]
    fn rgb4_spec_rejects_wide_entries() {
        let p = Palette::from_entries(&[ColorEntry::from_rgb24(0x123456)]).unwrap();
        assert_eq!(
            generate_color_spec(&p, ColorSpecFormat::Rgb4),
            Err(ConfigError::ColorSpecDepth(8))
        );
    }

    #[test]
    fn rgb32_spec_layout() {
        let entries = [ColorEntry::from_rgb24(0xFF8000), ColorEntry::from_rgb4(0x0001)];
        let p = Palette::from_entries(&entries).unwrap();
        let spec = generate_color_spec(&p, ColorSpecFormat::Rgb32).unwrap();
        let ColorSpec::Rgb32(words) = spec else {
            panic!("wrong format");
        };
        assert_eq!(
            words,
            [
                2 << 16,
                0xFFFF_FFFF,
                0x8080_8080,
                0,
                0,
                0,
                0x1111_1111,
                0,
            ]
        );
    }

    #[test]
    fn write_specs_checks_length() {
        let p = Palette::from_rgb4(&[0x0111, 0x0222]).unwrap();
        let mut short = [0u16; 1];
        assert_eq!(
            write_rgb4_color_specs(&p, &mut short),
            Err(crate::Error::Buffer(BufferError::TooSmall {
                buffer: BufferKind::ColorSpec,
                len: 1,
                required: 2,
            }))
        );
        let mut words = [0xDEAD_BEEFu32; 9];
        assert_eq!(write_rgb32_color_specs(&p, &mut words), Ok(8));
        assert_eq!(words[7], 0);
        assert_eq!(words[8], 0xDEAD_BEEF);
    }
}
