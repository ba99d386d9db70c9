use std::io::Cursor;

use crate::error::RenderError;

/// Encode 8-bit RGB pixels as PNG.
pub fn encode_rgb8(width: u32, height: u32, pixels: &[u8]) -> Result<Vec<u8>, RenderError> {
    encode_png(width, height, png::ColorType::Rgb, pixels)
}

/// Encode 8-bit grayscale pixels as PNG.
pub fn encode_gray8(width: u32, height: u32, pixels: &[u8]) -> Result<Vec<u8>, RenderError> {
    encode_png(width, height, png::ColorType::Grayscale, pixels)
}

fn encode_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    pixels: &[u8],
) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(pixels)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
