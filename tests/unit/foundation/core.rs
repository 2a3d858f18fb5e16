use super::*;

#[test]
fn rgb8_hex_parse_and_display() {
    assert_eq!(Rgb8::parse_hex("#FF0000").unwrap(), Rgb8::RED);
    assert_eq!(Rgb8::parse_hex("00ff7f").unwrap(), Rgb8::new(0, 255, 127));
    assert_eq!(Rgb8::new(18, 52, 171).to_string(), "#1234ab");
    assert!(Rgb8::parse_hex("#fff").is_err());
    assert!(Rgb8::parse_hex("#gg0000").is_err());
}

#[test]
fn rgb8_serde_uses_hex_strings() {
    let json = serde_json::to_string(&Rgb8::new(1, 2, 3)).unwrap();
    assert_eq!(json, "\"#010203\"");
    let back: Rgb8 = serde_json::from_str("\"#A0B0C0\"").unwrap();
    assert_eq!(back, Rgb8::new(0xa0, 0xb0, 0xc0));
    assert!(serde_json::from_str::<Rgb8>("\"red\"").is_err());
}

#[test]
fn canvas_buffer_length_is_checked() {
    assert!(Canvas::from_rgba8(2, 2, vec![0; 16]).is_ok());
    assert!(Canvas::from_rgba8(2, 2, vec![0; 15]).is_err());
}

#[test]
fn canvas_pixel_access_and_bounds() {
    let mut data = vec![0u8; 3 * 2 * 4];
    data[(2 + 3) * 4..(2 + 3) * 4 + 4].copy_from_slice(&[9, 8, 7, 6]);
    let c = Canvas::from_rgba8(3, 2, data).unwrap();
    assert_eq!(c.pixel(2, 1), Some([9, 8, 7, 6]));
    assert_eq!(c.pixel(3, 0), None);
    assert_eq!(c.pixel(0, 2), None);
}

#[test]
fn canvas_image_conversion_keeps_pixels() {
    let img = image::RgbaImage::from_pixel(4, 3, image::Rgba([10, 20, 30, 40]));
    let c = Canvas::from_image(img.clone());
    assert_eq!(c.dimensions(), (4, 3));
    assert_eq!(c.to_image().unwrap(), img);
}
