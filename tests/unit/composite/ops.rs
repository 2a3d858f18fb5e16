use super::*;

fn gradient(w: u32, h: u32) -> Canvas {
    let img = image::RgbaImage::from_fn(w, h, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    });
    Canvas::from_image(img)
}

fn translucent(w: u32, h: u32) -> Canvas {
    let img = image::RgbaImage::from_fn(w, h, |x, y| {
        image::Rgba([200, (x * 40 % 256) as u8, (y * 30 % 256) as u8, (60 + x * 10) as u8])
    });
    Canvas::from_image(img)
}

#[test]
fn darken_zero_is_identity() {
    let img = translucent(6, 5);
    assert_eq!(darken(&img, 0.0), img);
}

#[test]
fn darken_one_is_solid_black() {
    let img = translucent(6, 5);
    let out = darken(&img, 1.0);
    for px in out.as_bytes().chunks_exact(4) {
        assert_eq!(px, &[0, 0, 0, 255]);
    }
}

#[test]
fn darken_scales_opaque_pixels() {
    let img = Canvas::filled(2, 2, [200, 100, 50, 255]);
    let out = darken(&img, 0.25);
    // Black at alpha 64 leaves 191/255 of each channel.
    assert_eq!(out.pixel(1, 1), Some([150, 75, 37, 255]));
}

#[test]
fn blend_endpoints_return_inputs() {
    let a = gradient(8, 4);
    let b = translucent(8, 4);
    assert_eq!(blend(&a, &b, 0.0).unwrap(), a);
    assert_eq!(blend(&a, &b, 1.0).unwrap(), b);
}

#[test]
fn blend_midpoint_mixes_channels() {
    let a = Canvas::filled(1, 1, [0, 0, 0, 255]);
    let b = Canvas::filled(1, 1, [255, 255, 255, 255]);
    let mid = blend(&a, &b, 0.5).unwrap();
    let px = mid.pixel(0, 0).unwrap();
    assert_eq!(px[3], 255);
    assert!((i16::from(px[0]) - 128).abs() <= 1);
}

#[test]
fn blend_requires_equal_dimensions() {
    let err = blend(&gradient(4, 4), &gradient(4, 3), 0.5).unwrap_err();
    assert!(matches!(
        err,
        TrackArtError::DimensionMismatch {
            left_w: 4,
            left_h: 4,
            right_w: 4,
            right_h: 3
        }
    ));
}

#[test]
fn resize_and_crop_hits_exact_target() {
    let src = gradient(300, 200);
    for (w, h) in [(80, 60), (60, 80), (301, 199), (1, 1), (640, 480)] {
        let out = resize_and_crop(&src, w, h).unwrap();
        assert_eq!(out.dimensions(), (w, h));
    }
}

#[test]
fn resize_and_crop_is_idempotent() {
    let src = gradient(300, 200);
    let once = resize_and_crop(&src, 120, 90).unwrap();
    let twice = resize_and_crop(&once, 120, 90).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn wider_source_is_cropped_symmetrically_left_and_right() {
    // Already at target height, so only the crop applies.
    let src = gradient(400, 100);
    let out = resize_and_crop(&src, 100, 100).unwrap();
    assert_eq!(out.pixel(0, 0), src.pixel(150, 0));
    assert_eq!(out.pixel(99, 99), src.pixel(249, 99));
}

#[test]
fn taller_source_is_cropped_symmetrically_top_and_bottom() {
    let src = gradient(100, 400);
    let out = resize_and_crop(&src, 100, 100).unwrap();
    assert_eq!(out.pixel(0, 0), src.pixel(0, 150));
    assert_eq!(out.pixel(99, 99), src.pixel(99, 249));
}

#[test]
fn resize_and_crop_rejects_empty_inputs() {
    assert!(matches!(
        resize_and_crop(&gradient(4, 4), 0, 10).unwrap_err(),
        TrackArtError::InvalidConfig(_)
    ));
    assert!(matches!(
        resize_and_crop(&Canvas::new(0, 5), 10, 10).unwrap_err(),
        TrackArtError::InvalidConfig(_)
    ));
}
