//! The screen adapter: one Amiga display description plus its palette.
//!
//! A [`Screen`] owns only its geometry, mode and palette. Pixel buffers are
//! borrowed per call, so the same screen can convert into as many surfaces
//! as needed. Every conversion validates the whole request (mode against
//! output format, plane count, surface geometry and sizes) before writing,
//! and either completes or leaves every buffer untouched.

use alloc::vec::Vec;

use crate::auto::{auto_select_lowres_pixel_scale_factor, auto_select_viewport_mode_for};
use crate::buffer::check_planes;
use crate::compose::{self, Target};
use crate::mode::{
    ColorFormat, Correction, DisplayStandard, ResolutionClass, ViewportMode, check_geometry,
};
use crate::palette::{ColorEntry, OCS_COLORS, Palette, rgb4_color_specs, rgb32_color_specs};
use crate::resolve::{ColorModel, HamStart, Resolver};
use crate::{Bitplane, BitplaneMut, ConfigError, Error, PixelLayout, RgbLayout, Surface, SurfaceMut};

/// An Amiga screen: native geometry, bitplane depth, viewport mode, palette
/// and the lowres-pixel scale factor used for aspect correction.
#[derive(Clone, Debug)]
pub struct Screen {
    width: usize,
    height: usize,
    depth: u8,
    mode: ViewportMode,
    model: ColorModel,
    palette: Palette,
    scale: u32,
    correction: Correction,
    ham_start: HamStart,
    standard: DisplayStandard,
}

impl Screen {
    /// A screen of `width x height` native pixels and `depth` bitplanes.
    ///
    /// Depth is 1..=8 for indexed screens or 24/32 for deep ones. The scale
    /// factor starts at [`auto_select_lowres_pixel_scale_factor`] for `mode`
    /// and the palette starts empty (every index reads as black).
    pub fn new(
        width: usize,
        height: usize,
        depth: u8,
        mode: ViewportMode,
    ) -> Result<Self, ConfigError> {
        check_geometry(width, height)?;
        let model = ColorModel::for_mode(mode, depth)?;
        let scale = auto_select_lowres_pixel_scale_factor(mode);
        let correction = checked_correction(width, height, mode, scale)?;
        crate::trace!(width, height, depth, mode = mode.bits(), scale, "new screen");
        Ok(Self {
            width,
            height,
            depth,
            mode,
            model,
            palette: Palette::new(),
            scale,
            correction,
            ham_start: HamStart::default(),
            standard: DisplayStandard::default(),
        })
    }

    /// A screen whose resolution and interlace bits are chosen from its
    /// geometry for `standard`.
    pub fn auto(
        width: usize,
        height: usize,
        depth: u8,
        standard: DisplayStandard,
    ) -> Result<Self, ConfigError> {
        let mode = auto_select_viewport_mode_for(width, height, standard);
        let mut screen = Self::new(width, height, depth, mode)?;
        screen.standard = standard;
        Ok(screen)
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Override the lowres-pixel scale factor. It must be a non-zero multiple
    /// of the mode's resolution multiplier.
    pub fn set_scale_factor(&mut self, scale: u32) -> Result<(), ConfigError> {
        self.correction = checked_correction(self.width, self.height, self.mode, scale)?;
        self.scale = scale;
        crate::trace!(scale, "scale factor changed");
        Ok(())
    }

    pub fn with_scale_factor(mut self, scale: u32) -> Result<Self, ConfigError> {
        self.set_scale_factor(scale)?;
        Ok(self)
    }

    /// Switch to another viewport mode at the same geometry and depth.
    ///
    /// Fails, leaving the screen unchanged, when the depth does not suit the
    /// mode or the current palette is larger than the new mode allows. The
    /// scale factor is kept when the new resolution class divides it and is
    /// auto-selected again otherwise.
    pub fn set_mode(&mut self, mode: ViewportMode) -> Result<(), ConfigError> {
        let model = ColorModel::for_mode(mode, self.depth)?;
        let max = model.palette_limit(self.depth);
        if self.palette.len() > max {
            return Err(ConfigError::PaletteTooLarge {
                len: self.palette.len(),
                max,
            });
        }
        let (w, h) = (self.width, self.height);
        let (scale, correction) = match checked_correction(w, h, mode, self.scale) {
            Ok(c) => (self.scale, c),
            Err(_) => {
                let scale = auto_select_lowres_pixel_scale_factor(mode);
                (scale, checked_correction(w, h, mode, scale)?)
            }
        };
        crate::trace!(mode = mode.bits(), scale, "mode changed");
        self.mode = mode;
        self.model = model;
        self.scale = scale;
        self.correction = correction;
        Ok(())
    }

    /// Running color HAM starts every scanline from.
    pub fn set_ham_start(&mut self, start: HamStart) {
        self.ham_start = start;
    }

    /// Replace the palette with at most 32 OCS/ECS-style entries.
    pub fn set_bitplane_palette_colors(
        &mut self,
        entries: &[ColorEntry],
    ) -> Result<(), ConfigError> {
        let limit = OCS_COLORS.min(self.model.palette_limit(self.depth));
        self.palette.set(entries, limit)
    }

    /// Replace the palette with up to as many entries as the mode can show
    /// (256 for AGA-class screens).
    pub fn set_chunky_palette_colors(
        &mut self,
        entries: &[ColorEntry],
    ) -> Result<(), ConfigError> {
        self.palette.set(entries, self.model.palette_limit(self.depth))
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    #[inline]
    pub fn mode(&self) -> ViewportMode {
        self.mode
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn scale_factor(&self) -> u32 {
        self.scale
    }

    #[inline]
    pub fn ham_start(&self) -> HamStart {
        self.ham_start
    }

    #[inline]
    pub fn display_standard(&self) -> DisplayStandard {
        self.standard
    }

    #[inline]
    pub fn color_model(&self) -> ColorModel {
        self.model
    }

    #[inline]
    pub fn resolution_class(&self) -> ResolutionClass {
        self.mode.resolution_class()
    }

    #[inline]
    pub fn is_interlaced(&self) -> bool {
        self.mode.is_interlaced()
    }

    /// Bitplanes every planar buffer set must hold.
    #[inline]
    pub fn plane_count(&self) -> usize {
        self.depth as usize
    }

    /// Chunky when pixels fit in palette indices, RGB for HAM and deep
    /// screens.
    pub fn color_format(&self) -> ColorFormat {
        if self.model.has_chunky_form() {
            ColorFormat::Chunky
        } else {
            ColorFormat::Rgb
        }
    }

    /// Replication factors for the current mode and scale factor.
    #[inline]
    pub fn correction(&self) -> Correction {
        self.correction
    }

    /// Geometry a corrected surface must be declared with.
    pub fn corrected_dimensions(&self) -> (usize, usize) {
        (
            self.width * self.correction.horizontal as usize,
            self.height * self.correction.vertical as usize,
        )
    }

    // -----------------------------------------------------------------------
    // Hardware color specs
    // -----------------------------------------------------------------------

    /// `LoadRGB4` words for the palette. Fails when any entry is wider than
    /// 4 bits per component.
    pub fn generate_rgb4_color_specs(&self) -> Result<Vec<u16>, ConfigError> {
        rgb4_color_specs(&self.palette)
    }

    /// `LoadRGB32` table for the palette.
    pub fn generate_rgb32_color_specs(&self) -> Vec<u32> {
        rgb32_color_specs(&self.palette)
    }

    // -----------------------------------------------------------------------
    // Conversions
    // -----------------------------------------------------------------------

    /// Bitplanes → native chunky surface. Not available for HAM or deep
    /// screens.
    pub fn bitplanes_to_chunky(
        &self,
        planes: &[Bitplane<'_>],
        dst: &mut SurfaceMut<'_>,
    ) -> Result<(), Error> {
        self.check_chunky_form()?;
        self.check_plane_count(planes.len())?;
        chunky_layout(dst.layout)?;
        self.check_planes(planes.iter().map(|p| (p.data.len(), p.pitch)))?;
        dst.check(self.width, self.height)?;
        crate::trace!(width = self.width, height = self.height, depth = self.depth, "to chunky");
        crate::planar::bitplanes_to_chunky(planes, dst.data, dst.pitch, self.width, self.height)
    }

    /// Bitplanes → native RGB surface, resolving EHB, HAM and deep pixels.
    pub fn bitplanes_to_rgb(
        &self,
        planes: &[Bitplane<'_>],
        dst: &mut SurfaceMut<'_>,
    ) -> Result<(), Error> {
        self.planes_to_rgb(planes, dst, (self.width, self.height), Correction::IDENTITY)
    }

    /// Native chunky surface → bitplanes, the inverse of
    /// [`Self::bitplanes_to_chunky`]. HAM indices are written as they are;
    /// deep screens have no chunky form.
    pub fn chunky_to_bitplanes(
        &self,
        src: &Surface<'_>,
        planes: &mut [BitplaneMut<'_>],
    ) -> Result<(), Error> {
        self.check_indexed()?;
        self.check_plane_count(planes.len())?;
        chunky_layout(src.layout)?;
        src.check(self.width, self.height)?;
        self.check_planes(planes.iter().map(|p| (p.data.len(), p.pitch)))?;
        crate::trace!(width = self.width, height = self.height, depth = self.depth, "to planes");
        crate::planar::chunky_to_bitplanes(src.data, src.pitch, planes, self.width, self.height)
    }

    /// Native chunky surface → native RGB surface through the palette,
    /// threading HAM state along each row.
    pub fn chunky_to_rgb(&self, src: &Surface<'_>, dst: &mut SurfaceMut<'_>) -> Result<(), Error> {
        self.check_indexed()?;
        chunky_layout(src.layout)?;
        let layout = rgb_layout(dst.layout)?;
        src.check(self.width, self.height)?;
        dst.check(self.width, self.height)?;
        crate::trace!(width = self.width, height = self.height, "chunky to rgb");
        let resolver = self.resolver();
        let target = Target {
            data: &mut *dst.data,
            pitch: dst.pitch,
        };
        compose::chunky_to_rgb(
            src.data,
            src.pitch,
            &resolver,
            target,
            layout,
            self.width,
            self.height,
            Correction::IDENTITY,
        );
        Ok(())
    }

    /// Bitplanes straight into a corrected surface, chunky or RGB.
    ///
    /// `dst` must be declared at [`Self::corrected_dimensions`]. A chunky
    /// `dst` follows the rules of [`Self::bitplanes_to_chunky`].
    pub fn bitplanes_to_corrected(
        &self,
        planes: &[Bitplane<'_>],
        dst: &mut SurfaceMut<'_>,
    ) -> Result<(), Error> {
        let (cw, ch) = self.corrected_dimensions();
        if let PixelLayout::Rgb(_) = dst.layout {
            return self.planes_to_rgb(planes, dst, (cw, ch), self.correction);
        }
        self.check_chunky_form()?;
        self.check_plane_count(planes.len())?;
        self.check_planes(planes.iter().map(|p| (p.data.len(), p.pitch)))?;
        dst.check(cw, ch)?;
        crate::trace!(width = cw, height = ch, "bitplanes to corrected chunky");
        let target = Target {
            data: &mut *dst.data,
            pitch: dst.pitch,
        };
        compose::planes_to_chunky(planes, target, self.width, self.height, self.correction);
        Ok(())
    }

    /// Block-replicate a native chunky or RGB surface into a corrected one
    /// of the same layout.
    pub fn correct(&self, src: &Surface<'_>, dst: &mut SurfaceMut<'_>) -> Result<(), Error> {
        src.check(self.width, self.height)?;
        crate::correct::replicate(src, dst, self.correction)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn resolver(&self) -> Resolver {
        Resolver::new(self.model, &self.palette, self.ham_start)
    }

    fn planes_to_rgb(
        &self,
        planes: &[Bitplane<'_>],
        dst: &mut SurfaceMut<'_>,
        (out_w, out_h): (usize, usize),
        correction: Correction,
    ) -> Result<(), Error> {
        self.check_plane_count(planes.len())?;
        let layout = rgb_layout(dst.layout)?;
        self.check_planes(planes.iter().map(|p| (p.data.len(), p.pitch)))?;
        dst.check(out_w, out_h)?;
        crate::trace!(width = out_w, height = out_h, depth = self.depth, "bitplanes to rgb");
        let target = Target {
            data: &mut *dst.data,
            pitch: dst.pitch,
        };
        let (w, h) = (self.width, self.height);
        if self.model == ColorModel::Deep {
            compose::deep_to_rgb(planes, target, layout, w, h, correction);
        } else {
            compose::planes_to_rgb(planes, &self.resolver(), target, layout, w, h, correction);
        }
        Ok(())
    }

    fn check_planes(&self, planes: impl IntoIterator<Item = (usize, usize)>) -> Result<(), Error> {
        Ok(check_planes(planes, self.width, self.height)?)
    }

    fn check_plane_count(&self, got: usize) -> Result<(), ConfigError> {
        let expected = self.plane_count();
        if got != expected {
            return Err(ConfigError::PlaneCount { expected, got });
        }
        Ok(())
    }

    /// Deep screens have no index representation at all.
    fn check_indexed(&self) -> Result<(), ConfigError> {
        if self.model == ColorModel::Deep {
            return Err(ConfigError::DeepToChunky(self.depth));
        }
        Ok(())
    }

    fn check_chunky_form(&self) -> Result<(), ConfigError> {
        self.check_indexed()?;
        if self.model.is_ham() {
            return Err(ConfigError::ChunkyWithHam);
        }
        Ok(())
    }
}

fn checked_correction(
    width: usize,
    height: usize,
    mode: ViewportMode,
    scale: u32,
) -> Result<Correction, ConfigError> {
    let correction = Correction::for_mode(mode, scale)?;
    correction
        .apply(width, height)
        .ok_or(ConfigError::InvalidGeometry { width, height })?;
    Ok(correction)
}

fn chunky_layout(layout: PixelLayout) -> Result<(), ConfigError> {
    match layout {
        PixelLayout::Chunky => Ok(()),
        PixelLayout::Rgb(_) => Err(ConfigError::LayoutMismatch),
    }
}

fn rgb_layout(layout: PixelLayout) -> Result<RgbLayout, ConfigError> {
    match layout {
        PixelLayout::Rgb(l) => Ok(l),
        PixelLayout::Chunky => Err(ConfigError::LayoutMismatch),
    }
}
