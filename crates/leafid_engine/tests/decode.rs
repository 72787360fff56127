use std::io::Cursor;

use base64::Engine;
use image::{DynamicImage, ImageFormat, RgbImage};
use leafid_engine::{decode_preview, DecodeError, THUMBNAIL_EDGE};

fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb([40, 160, 60])));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), format)
        .expect("encode test image");
    bytes
}

fn thumbnail_dimensions(uri: &str) -> (u32, u32) {
    let b64 = uri
        .strip_prefix("data:image/png;base64,")
        .expect("png data uri");
    let png = base64::engine::general_purpose::STANDARD
        .decode(b64)
        .expect("valid base64");
    let thumb = image::load_from_memory_with_format(&png, ImageFormat::Png).expect("valid png");
    (thumb.width(), thumb.height())
}

#[test]
fn small_png_keeps_its_size() {
    let preview = decode_preview(&encoded(4, 3, ImageFormat::Png)).expect("decoded");
    assert_eq!((preview.width, preview.height), (4, 3));
    assert_eq!(preview.format, "png");
    assert_eq!(thumbnail_dimensions(&preview.thumbnail_uri), (4, 3));
}

#[test]
fn large_image_thumbnail_fits_edge() {
    let preview = decode_preview(&encoded(800, 400, ImageFormat::Png)).expect("decoded");
    assert_eq!((preview.width, preview.height), (800, 400));
    let (w, h) = thumbnail_dimensions(&preview.thumbnail_uri);
    assert!(w <= THUMBNAIL_EDGE && h <= THUMBNAIL_EDGE);
    assert_eq!(w, THUMBNAIL_EDGE);
}

#[test]
fn jpeg_is_detected_from_content() {
    let preview = decode_preview(&encoded(16, 16, ImageFormat::Jpeg)).expect("decoded");
    assert_eq!(preview.format, "jpeg");
}

#[test]
fn garbage_is_unrecognized() {
    let err = decode_preview(b"definitely not an image").unwrap_err();
    assert_eq!(err, DecodeError::UnrecognizedFormat);
}

#[test]
fn truncated_png_is_corrupt() {
    let mut bytes = encoded(32, 32, ImageFormat::Png);
    bytes.truncate(40);
    let err = decode_preview(&bytes).unwrap_err();
    assert!(matches!(err, DecodeError::Corrupt(_)), "got {err:?}");
}
