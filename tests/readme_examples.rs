//! Validates the code examples from README.md compile and behave correctly.

#[test]
fn readme_core_api() {
    use planar::{Bitplane, BitplaneMut, bitplanes_to_chunky, chunky_to_bitplanes};

    let chunky = [0u8, 1, 2, 3, 3, 2, 1, 0];
    let (mut p0, mut p1) = ([0u8; 1], [0u8; 1]);
    chunky_to_bitplanes(
        &chunky,
        8,
        &mut [BitplaneMut::new(&mut p0, 1), BitplaneMut::new(&mut p1, 1)],
        8,
        1,
    )
    .unwrap();
    assert_eq!((p0, p1), ([0b0101_1010], [0b0011_1100]));

    let mut back = [0u8; 8];
    bitplanes_to_chunky(&[Bitplane::new(&p0, 1), Bitplane::new(&p1, 1)], &mut back, 8, 8, 1)
        .unwrap();
    assert_eq!(back, chunky);
}

#[test]
fn readme_screen() {
    use planar::{Bitplane, ColorEntry, RgbLayout, Screen, SurfaceMut, ViewportMode};

    let mut screen = Screen::new(8, 1, 1, ViewportMode::HIRES).unwrap();
    screen
        .set_bitplane_palette_colors(&[ColorEntry::from_rgb4(0x000), ColorEntry::from_rgb4(0xFFF)])
        .unwrap();
    assert_eq!(screen.corrected_dimensions(), (8, 2));

    let plane = [0b1000_0000u8];
    let mut rgb = vec![0u8; 8 * 2 * 3];
    let mut dst = SurfaceMut::rgb(&mut rgb, 8, 2, RgbLayout::RGB);
    screen.bitplanes_to_corrected(&[Bitplane::new(&plane, 1)], &mut dst).unwrap();
    assert_eq!(rgb[..3], [0xFF, 0xFF, 0xFF]);
    assert_eq!(rgb[24..27], [0xFF, 0xFF, 0xFF]);
}

#[test]
fn readme_auto_selection() {
    use planar::{ColorFormat, DisplayStandard, Screen, ViewportMode, auto_select_viewport_mode};

    assert_eq!(
        auto_select_viewport_mode(1280, 512),
        ViewportMode::SUPERHIRES | ViewportMode::LACE
    );
    let ham = Screen::new(320, 256, 6, ViewportMode::HAM).unwrap();
    assert_eq!(ham.color_format(), ColorFormat::Rgb);
    let ntsc = Screen::auto(640, 400, 4, DisplayStandard::Ntsc).unwrap();
    assert_eq!(ntsc.mode(), ViewportMode::HIRES | ViewportMode::LACE);
}

#[test]
fn readme_color_specs() {
    use planar::{Palette, rgb32_color_specs, rgb4_color_specs};

    let palette = Palette::from_rgb4(&[0x000, 0xF80]).unwrap();
    assert_eq!(rgb4_color_specs(&palette).unwrap(), [0x000, 0xF80]);
    let specs = rgb32_color_specs(&palette);
    assert_eq!(specs.len(), 2 * 3 + 2);
    assert_eq!(specs[0], 2 << 16);
    assert_eq!(specs[4..7], [0xFFFF_FFFF, 0x8888_8888, 0]);
}

#[cfg(feature = "rgb")]
#[test]
fn readme_typed_rgb() {
    use planar::{Bitplane, Screen, ViewportMode, typed};
    use rgb::{Rgb, Rgba};

    let mut screen = Screen::new(8, 1, 1, ViewportMode::empty()).unwrap();
    let palette = typed::palette_from_rgb(&[Rgb::new(0, 0, 0), Rgb::new(255, 128, 0)]).unwrap();
    screen.set_bitplane_palette_colors(palette.entries()).unwrap();

    let mut out = vec![Rgba::new(0, 0, 0, 0); 8];
    typed::bitplanes_to_rgba(&screen, &[Bitplane::new(&[0x80], 1)], &mut out).unwrap();
    assert_eq!(out[0], Rgba::new(255, 128, 0, 255));
}

#[cfg(feature = "imgref")]
#[test]
fn readme_imgref() {
    use planar::{Bitplane, Screen, ViewportMode, img};

    let screen = Screen::new(320, 256, 1, ViewportMode::empty()).unwrap();
    let plane = vec![0u8; 40 * 256];
    let out = img::bitplanes_to_corrected_rgba_vec(&screen, &[Bitplane::new(&plane, 40)]).unwrap();
    assert_eq!((out.width(), out.height()), (640, 512));
}
