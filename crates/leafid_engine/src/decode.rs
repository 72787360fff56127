use std::io::Cursor;

use base64::Engine;
use image::{DynamicImage, ImageFormat, ImageReader};

use crate::DecodedPreview;

/// Longest edge of the preview thumbnail.
pub const THUMBNAIL_EDGE: u32 = 200;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unrecognized image format")]
    UnrecognizedFormat,
    #[error("failed to decode image: {0}")]
    Corrupt(String),
    #[error("failed to encode thumbnail: {0}")]
    Thumbnail(String),
}

/// Decode image bytes into a preview: dimensions, detected format and a PNG thumbnail `data:` URI.
///
/// The format is sniffed from the content, never from a declared media type.
pub fn decode_preview(bytes: &[u8]) -> Result<DecodedPreview, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::Corrupt(e.to_string()))?;
    let format = reader.format().ok_or(DecodeError::UnrecognizedFormat)?;
    let image = reader
        .decode()
        .map_err(|e| DecodeError::Corrupt(e.to_string()))?;

    let thumbnail = if image.width() > THUMBNAIL_EDGE || image.height() > THUMBNAIL_EDGE {
        image.thumbnail(THUMBNAIL_EDGE, THUMBNAIL_EDGE)
    } else {
        image.clone()
    };
    let thumbnail_uri = encode_data_uri(thumbnail)?;

    Ok(DecodedPreview {
        width: image.width(),
        height: image.height(),
        format: format_label(format),
        thumbnail_uri,
    })
}

fn encode_data_uri(image: DynamicImage) -> Result<String, DecodeError> {
    // PNG cannot hold every pixel layout (e.g. float HDR), so normalise first.
    let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
    let mut png = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| DecodeError::Thumbnail(e.to_string()))?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&png);
    Ok(format!("data:image/png;base64,{b64}"))
}

fn format_label(format: ImageFormat) -> String {
    format!("{format:?}").to_ascii_lowercase()
}
