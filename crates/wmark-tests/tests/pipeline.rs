//! End-to-end scenarios: encode fixtures, decode, validate, composite, encode, decode.

use tempfile::tempdir;
use wmark_core::{Pixel, Raster, Transparency};
use wmark_ops::validate::check_color_model;
use wmark_ops::{
    blend_pixel, composite, composite_checked, BlendParams, CompositeConfig, CompositeError,
    CompositePlan, ImageRole, Placement,
};
use wmark_tests::{pattern, read_raster, write_rgb, write_rgba};

#[test]
fn test_single_placement_png_pipeline() {
    let dir = tempdir().unwrap();
    let base_path = write_rgb(dir.path(), "base.png", &Raster::filled(4, 4, Pixel::WHITE).unwrap());
    let mark_path = write_rgb(dir.path(), "mark.png", &Raster::filled(2, 2, Pixel::BLACK).unwrap());

    let base = wmark_io::read(&base_path).unwrap();
    let mark = wmark_io::read(&mark_path).unwrap();
    check_color_model(ImageRole::Base, &base.color_model).unwrap();
    check_color_model(ImageRole::Watermark, &mark.color_model).unwrap();

    let config = CompositeConfig {
        transparency: 50,
        placement: Placement::Single { x: 1, y: 1 },
        ..Default::default()
    };
    let out = composite_checked(&base.to_raster().unwrap(), &mark.to_raster().unwrap(), &config).unwrap();

    let out_path = dir.path().join("out.png");
    wmark_io::write_raster(&out_path, &out).unwrap();
    let loaded = read_raster(&out_path);

    assert_eq!(loaded.pixel(1, 1), Pixel::rgb(127, 127, 127));
    assert_eq!(loaded.pixel(2, 2), Pixel::rgb(127, 127, 127));
    assert_eq!(loaded.pixel(0, 0), Pixel::WHITE);
    assert_eq!(loaded.pixel(3, 1), Pixel::WHITE);
}

#[test]
fn test_grid_pipeline_matches_modulo_rule() {
    let dir = tempdir().unwrap();
    let base = pattern(13, 9, 3);
    let mark = pattern(4, 3, 140);
    let base = read_raster(&write_rgb(dir.path(), "base.png", &base));
    let mark = read_raster(&write_rgb(dir.path(), "mark.png", &mark));

    let config = CompositeConfig {
        transparency: 37,
        placement: Placement::Grid,
        ..Default::default()
    };
    let out = composite_checked(&base, &mark, &config).unwrap();

    let params = BlendParams::new(37);
    for (x, y, px) in out.enumerate_pixels() {
        assert_eq!(px, blend_pixel(base.pixel(x, y), mark.pixel(x % 4, y % 3), &params), "({x}, {y})");
    }
}

#[test]
fn test_translucent_watermark_with_alpha() {
    let dir = tempdir().unwrap();
    let base_path = write_rgb(dir.path(), "base.png", &pattern(6, 6, 50));
    let mut mark = Raster::filled(3, 3, Pixel::new(250, 0, 0, 255)).unwrap();
    mark.set_pixel(1, 1, Pixel::new(0, 0, 250, 0));
    let mark_path = write_rgba(dir.path(), "mark.png", &mark);

    let mark_image = wmark_io::read(&mark_path).unwrap();
    assert_eq!(mark_image.color_model.transparency, Transparency::Translucent);
    check_color_model(ImageRole::Watermark, &mark_image.color_model).unwrap();

    let base = read_raster(&base_path);
    let mark = mark_image.to_raster().unwrap();
    let config = CompositeConfig {
        transparency: 100,
        use_alpha: true,
        placement: Placement::Grid,
        ..Default::default()
    };
    let out = composite_checked(&base, &mark, &config).unwrap();

    for (x, y, px) in out.enumerate_pixels() {
        if x % 3 == 1 && y % 3 == 1 {
            assert_eq!(px, base.pixel(x, y));
        } else {
            assert_eq!(px, Pixel::rgb(250, 0, 0));
        }
    }
}

#[test]
fn test_alpha_ignored_when_not_requested() {
    let base = Raster::filled(2, 2, Pixel::BLACK).unwrap();
    let mark = Raster::filled(2, 2, Pixel::new(200, 200, 200, 0)).unwrap();
    let config = CompositeConfig {
        transparency: 100,
        placement: Placement::Overlay,
        ..Default::default()
    };
    let out = composite_checked(&base, &mark, &config).unwrap();
    assert_eq!(out.pixel(0, 0), Pixel::rgb(200, 200, 200));
}

#[test]
fn test_jpeg_output_pipeline() {
    let dir = tempdir().unwrap();
    let base = Raster::filled(32, 32, Pixel::rgb(0, 0, 200)).unwrap();
    let mark = Raster::filled(8, 8, Pixel::rgb(200, 200, 0)).unwrap();
    let config = CompositeConfig {
        transparency: 50,
        placement: Placement::Grid,
        ..Default::default()
    };
    let out = composite_checked(&base, &mark, &config).unwrap();
    assert_eq!(out.pixel(5, 5), Pixel::rgb(100, 100, 100));

    let out_path = dir.path().join("out.jpg");
    wmark_io::write_raster(&out_path, &out).unwrap();
    let loaded = wmark_io::read(&out_path).unwrap();
    assert_eq!(loaded.format, wmark_io::Format::Jpeg);
    assert_eq!((loaded.width, loaded.height), (32, 32));
    let px = loaded.to_raster().unwrap().pixel(16, 16);
    for c in [px.r, px.g, px.b] {
        assert!((c as i32 - 100).abs() <= 5, "{px}");
    }
}

#[test]
fn test_validation_rejections() {
    let base = pattern(8, 6, 0);
    let run = |mark: &Raster, config: CompositeConfig| composite_checked(&base, mark, &config);
    let mark = pattern(3, 3, 1);

    assert!(matches!(
        run(&pattern(9, 1, 0), CompositeConfig::default()),
        Err(CompositeError::WatermarkTooLarge { .. })
    ));
    assert!(matches!(
        run(&pattern(1, 7, 0), CompositeConfig { placement: Placement::Grid, ..Default::default() }),
        Err(CompositeError::WatermarkTooLarge { .. })
    ));
    for transparency in [-1, 101] {
        assert!(matches!(
            run(&mark, CompositeConfig { transparency, placement: Placement::Grid, ..Default::default() }),
            Err(CompositeError::TransparencyOutOfRange(t)) if t == transparency
        ));
    }
    assert!(matches!(
        run(
            &mark,
            CompositeConfig { chroma_key: Some([0, 256, 0]), placement: Placement::Grid, ..Default::default() }
        ),
        Err(CompositeError::InvalidColor(_))
    ));
    for (x, y) in [(6, 0), (0, 4), (-1, 0)] {
        assert!(matches!(
            run(&mark, CompositeConfig { placement: Placement::Single { x, y }, ..Default::default() }),
            Err(CompositeError::PositionOutOfRange { .. })
        ));
    }
    assert!(matches!(
        run(&mark, CompositeConfig::default()),
        Err(CompositeError::OverlayDimensionMismatch { .. })
    ));
}

#[test]
fn test_largest_single_offset_accepted() {
    let base = pattern(8, 6, 0);
    let mark = pattern(3, 3, 200);
    let config = CompositeConfig {
        transparency: 100,
        placement: Placement::Single { x: 5, y: 3 },
        ..Default::default()
    };
    let out = composite_checked(&base, &mark, &config).unwrap();
    assert_eq!(out.pixel(7, 5), mark.pixel(2, 2));
    assert_eq!(out.pixel(4, 2), base.pixel(4, 2));
}

#[test]
fn test_zero_transparency_roundtrip() {
    let dir = tempdir().unwrap();
    let base = read_raster(&write_rgb(dir.path(), "base.png", &pattern(10, 7, 77)));
    let mark = pattern(10, 7, 3);
    for placement in [Placement::Overlay, Placement::Grid, Placement::Single { x: 0, y: 0 }] {
        let plan = CompositePlan::for_rasters(
            &CompositeConfig { transparency: 0, placement, ..Default::default() },
            &base,
            &mark,
        )
        .unwrap();
        assert_eq!(composite(&base, &mark, &plan).unwrap(), base, "{placement:?}");
    }
}

#[test]
fn test_sixteen_bit_png_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deep.png");
    {
        let file = std::fs::File::create(&path).unwrap();
        let mut encoder = png::Encoder::new(file, 1, 1);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Sixteen);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[0; 6]).unwrap();
        writer.finish().unwrap();
    }
    let image = wmark_io::read(&path).unwrap();
    assert!(matches!(
        check_color_model(ImageRole::Base, &image.color_model),
        Err(CompositeError::UnsupportedBitDepth { bits: 48, .. })
    ));
}
