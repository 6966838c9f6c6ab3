//! Recommendations derived from geometry and mode bits.

use crate::mode::{
    ColorFormat, DisplayStandard, HIRES_MIN_WIDTH, ResolutionClass, SUPERHIRES_MIN_WIDTH,
    ViewportMode,
};

/// RGB for HAM (its colors do not fit in 256 indices), chunky otherwise.
#[inline]
pub const fn auto_select_color_format(mode: ViewportMode) -> ColorFormat {
    if mode.is_ham() {
        ColorFormat::Rgb
    } else {
        ColorFormat::Chunky
    }
}

/// Smallest lowres-pixel scale factor that every resolution class of the
/// design divides: 4 when SUPERHIRES is present, otherwise 2.
#[inline]
pub const fn auto_select_lowres_pixel_scale_factor(mode: ViewportMode) -> u32 {
    match mode.resolution_class() {
        ResolutionClass::SuperHires => 4,
        ResolutionClass::Lores | ResolutionClass::Hires => 2,
    }
}

/// Resolution and interlace bits for a PAL screen of `width x height`.
#[inline]
pub fn auto_select_viewport_mode(width: usize, height: usize) -> ViewportMode {
    auto_select_viewport_mode_for(width, height, DisplayStandard::Pal)
}

/// Resolution and interlace bits for a screen of `width x height` on
/// `standard`.
///
/// Widths of at least [`SUPERHIRES_MIN_WIDTH`] select SUPERHIRES, widths of
/// at least [`HIRES_MIN_WIDTH`] select HIRES. Heights above one field's
/// line count select LACE.
pub fn auto_select_viewport_mode_for(
    width: usize,
    height: usize,
    standard: DisplayStandard,
) -> ViewportMode {
    let class = if width >= SUPERHIRES_MIN_WIDTH {
        ResolutionClass::SuperHires
    } else if width >= HIRES_MIN_WIDTH {
        ResolutionClass::Hires
    } else {
        ResolutionClass::Lores
    };
    let mode = ViewportMode::empty().with_resolution(class);
    if height > standard.field_lines() {
        mode | ViewportMode::LACE
    } else {
        mode
    }
}
