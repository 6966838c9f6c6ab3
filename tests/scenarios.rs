//! End-to-end behavior through the public API only.

use planar::{
    Bitplane, BitplaneMut, BufferError, BufferKind, ColorEntry, ColorFormat, ComponentDepth,
    ConfigError, Correction, DisplayStandard, Error, HamStart, Palette, PixelLayout, RgbLayout,
    Rgba8, Screen, Surface, SurfaceMut, ViewportMode, auto_select_color_format,
    auto_select_lowres_pixel_scale_factor, auto_select_viewport_mode, bitplanes_to_chunky,
    chunky_to_bitplanes, convert_depth, derive_ehb_extension,
};

/// Split `chunky` (packed, `width` wide) into `depth` planes of `pitch` bytes.
fn to_planes(
    chunky: &[u8],
    width: usize,
    height: usize,
    depth: usize,
    pitch: usize,
) -> Vec<Vec<u8>> {
    let mut data = vec![vec![0u8; pitch * height]; depth];
    let mut planes: Vec<BitplaneMut<'_>> =
        data.iter_mut().map(|d| BitplaneMut::new(d, pitch)).collect();
    chunky_to_bitplanes(chunky, width, &mut planes, width, height).unwrap();
    data
}

fn borrow(data: &[Vec<u8>], pitch: usize) -> Vec<Bitplane<'_>> {
    data.iter().map(|d| Bitplane::new(d, pitch)).collect()
}

// ---------------------------------------------------------------------------
// Transcoder
// ---------------------------------------------------------------------------

#[test]
fn transcoder_round_trip_every_depth() {
    let (width, height) = (37, 5);
    for depth in 1..=8usize {
        let mask = ((1u16 << depth) - 1) as u8;
        let chunky: Vec<u8> = (0..width * height)
            .map(|i| ((i * 97 + 13) as u8) & mask)
            .collect();
        // Plane rows padded one byte past the 5 the width needs.
        let data = to_planes(&chunky, width, height, depth, 6);

        let dst_pitch = 40;
        let mut back = vec![0xEEu8; dst_pitch * height];
        bitplanes_to_chunky(&borrow(&data, 6), &mut back, dst_pitch, width, height).unwrap();
        let mut packed = Vec::with_capacity(width * height);
        for y in 0..height {
            let row = &back[y * dst_pitch..][..dst_pitch];
            assert_eq!(row[..width], chunky[y * width..][..width], "depth={depth} y={y}");
            assert!(row[width..].iter().all(|&b| b == 0xEE), "depth={depth} y={y}");
            packed.extend_from_slice(&row[..width]);
        }

        // Planes → chunky → planes is byte-exact.
        assert_eq!(to_planes(&packed, width, height, depth, 6), data, "depth={depth}");
    }
}

#[test]
fn short_pitch_is_rejected_before_any_write() {
    let plane = [0xFFu8; 2];
    let mut dst = [0xAAu8; 16];
    assert_eq!(
        bitplanes_to_chunky(&[Bitplane::new(&plane, 1)], &mut dst, 7, 8, 2),
        Err(Error::Buffer(BufferError::PitchTooSmall {
            buffer: BufferKind::Chunky,
            pitch: 7,
            required: 8,
        }))
    );
    assert!(dst.iter().all(|&b| b == 0xAA));

    let screen = Screen::new(8, 2, 1, ViewportMode::empty()).unwrap();
    let mut out = [0xAAu8; 16];
    let mut surface = SurfaceMut::new(&mut out, 8, 2, 7, PixelLayout::Chunky);
    assert!(matches!(
        screen.bitplanes_to_chunky(&[Bitplane::new(&plane, 1)], &mut surface),
        Err(Error::Buffer(BufferError::PitchTooSmall { .. }))
    ));
    assert!(out.iter().all(|&b| b == 0xAA));
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

#[test]
fn widening_then_narrowing_is_lossless() {
    for v in 0..16u8 {
        let wide = convert_depth(v, ComponentDepth::Bits4, ComponentDepth::Bits8);
        assert_eq!(wide, v * 0x11);
        assert_eq!(convert_depth(wide, ComponentDepth::Bits8, ComponentDepth::Bits4), v);
    }
    for v in 0..64u8 {
        let wide = convert_depth(v, ComponentDepth::Bits6, ComponentDepth::Bits8);
        assert_eq!(convert_depth(wide, ComponentDepth::Bits8, ComponentDepth::Bits6), v);
    }
}

#[test]
fn widening_formula() {
    let widen = |v| convert_depth(v, ComponentDepth::Bits4, ComponentDepth::Bits8);
    assert_eq!(widen(0xF), 0xFF);
    assert_eq!(widen(0x0), 0x00);
    assert_eq!(widen(0x8), 0x88);
}

#[test]
fn ehb_halves_base_entries() {
    let base = ColorEntry::new(0xF0, 0x80, 0x40, ComponentDepth::Bits8);
    let palette = Palette::from_entries(&[base]).unwrap();
    let half = derive_ehb_extension(&palette)[0];
    assert_eq!((half.r(), half.g(), half.b()), (0x78, 0x40, 0x20));

    // The same color through a 6-plane EHB screen: index 32 is entry 0 halved.
    let mut screen = Screen::new(8, 1, 6, ViewportMode::EXTRA_HALFBRITE).unwrap();
    screen.set_bitplane_palette_colors(&[base]).unwrap();
    let chunky = [32u8, 0, 0, 0, 0, 0, 0, 0];
    let mut rgb = [0u8; 8 * 3];
    screen
        .chunky_to_rgb(
            &Surface::chunky(&chunky, 8, 1),
            &mut SurfaceMut::rgb(&mut rgb, 8, 1, RgbLayout::RGB),
        )
        .unwrap();
    assert_eq!(rgb[..6], [0x78, 0x40, 0x20, 0xF0, 0x80, 0x40]);
}

// ---------------------------------------------------------------------------
// HAM
// ---------------------------------------------------------------------------

#[test]
fn ham6_scanline_from_bitplanes() {
    let mut screen = Screen::new(4, 2, 6, ViewportMode::HAM).unwrap();
    screen
        .set_bitplane_palette_colors(&[ColorEntry::from_rgb4(0x000), ColorEntry::from_rgb4(0x123)])
        .unwrap();
    #[rustfmt::skip]
    let chunky = [
        // load 1, blue F, red A, green 0
        0b00_0001, 0b01_1111, 0b10_1010, 0b11_0000,
        // next row restarts from entry 0: blue 5, red 1, green 2, load 1
        0b01_0101, 0b10_0001, 0b11_0010, 0b00_0001,
    ];
    let data = to_planes(&chunky, 4, 2, 6, 1);
    let mut out = vec![Rgba8::BLACK; 8];
    screen
        .bitplanes_to_rgb(
            &borrow(&data, 1),
            &mut SurfaceMut::rgb(bytemuck::cast_slice_mut(&mut out), 4, 2, RgbLayout::RGBA),
        )
        .unwrap();
    assert_eq!(
        out,
        [
            Rgba8::rgb(0x11, 0x22, 0x33),
            Rgba8::rgb(0x11, 0x22, 0xFF),
            Rgba8::rgb(0xAA, 0x22, 0xFF),
            Rgba8::rgb(0xAA, 0x00, 0xFF),
            Rgba8::rgb(0x00, 0x00, 0x55),
            Rgba8::rgb(0x11, 0x00, 0x55),
            Rgba8::rgb(0x11, 0x22, 0x55),
            Rgba8::rgb(0x11, 0x22, 0x33),
        ]
    );
}

#[test]
fn ham8_modifies_with_six_bit_values() {
    let mut screen = Screen::new(2, 1, 8, ViewportMode::HAM).unwrap();
    screen.set_ham_start(HamStart::Color(Rgba8::rgb(1, 2, 3)));
    let chunky = [0b01_111111u8, 0b10_100000];
    let mut rgb = [0u8; 6];
    screen
        .chunky_to_rgb(
            &Surface::chunky(&chunky, 2, 1),
            &mut SurfaceMut::rgb(&mut rgb, 2, 1, RgbLayout::RGB),
        )
        .unwrap();
    assert_eq!(rgb, [1, 2, 0xFF, 0x82, 2, 0xFF]);
}

// ---------------------------------------------------------------------------
// Auto-selection and correction
// ---------------------------------------------------------------------------

#[test]
fn auto_selection() {
    assert_eq!(auto_select_color_format(ViewportMode::HAM), ColorFormat::Rgb);
    assert_eq!(auto_select_lowres_pixel_scale_factor(ViewportMode::SUPERHIRES), 4);
    assert_eq!(
        auto_select_viewport_mode(1280, 512),
        ViewportMode::SUPERHIRES | ViewportMode::LACE
    );

    let screen = Screen::auto(640, 400, 4, DisplayStandard::Ntsc).unwrap();
    assert_eq!(screen.mode(), ViewportMode::HIRES | ViewportMode::LACE);
    assert_eq!(screen.color_format(), ColorFormat::Chunky);
}

#[test]
fn correction_geometry() {
    let hires = Screen::new(640, 256, 4, ViewportMode::HIRES).unwrap();
    assert_eq!(hires.scale_factor(), 2);
    assert_eq!(
        hires.correction(),
        Correction {
            horizontal: 1,
            vertical: 2,
        }
    );
    assert_eq!(hires.corrected_dimensions(), (640, 512));

    let shires = Screen::new(1280, 512, 4, ViewportMode::SUPERHIRES | ViewportMode::LACE).unwrap();
    assert_eq!(shires.scale_factor(), 4);
    assert_eq!(shires.correction(), Correction::IDENTITY);
    assert_eq!(shires.corrected_dimensions(), (1280, 512));
}

// ---------------------------------------------------------------------------
// Configuration failures
// ---------------------------------------------------------------------------

#[test]
fn ham_needs_six_or_eight_planes() {
    assert_eq!(
        Screen::new(320, 256, 4, ViewportMode::HAM).err(),
        Some(ConfigError::HamDepth(4))
    );
}

#[test]
fn ham_has_no_chunky_output() {
    let screen = Screen::new(8, 1, 6, ViewportMode::HAM).unwrap();
    assert_eq!(screen.color_format(), ColorFormat::Rgb);
    let plane = [0u8; 1];
    let planes = [Bitplane::new(&plane, 1); 6];
    let mut out = [0xAAu8; 8];
    assert_eq!(
        screen.bitplanes_to_chunky(&planes, &mut SurfaceMut::chunky(&mut out, 8, 1)),
        Err(Error::Config(ConfigError::ChunkyWithHam))
    );
    assert!(out.iter().all(|&b| b == 0xAA));
}
