use std::io::Cursor;
use std::path::Path;

use anyhow::Context;

use crate::foundation::core::Canvas;
use crate::foundation::error::{TrackArtError, TrackArtResult};

/// Decode PNG/JPEG (or any format `image` recognizes) into a straight-alpha canvas.
pub fn decode_image(bytes: &[u8]) -> TrackArtResult<Canvas> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let canvas = Canvas::from_image(dyn_img.to_rgba8());
    if canvas.is_empty() {
        return Err(TrackArtError::invalid_config("decoded image has no pixels"));
    }
    Ok(canvas)
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> TrackArtResult<Canvas> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
}

/// Encode `canvas` as PNG bytes.
pub fn encode_png(canvas: &Canvas) -> TrackArtResult<Vec<u8>> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(canvas.to_image()?)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Write `canvas` to `path` as PNG, creating parent directories as needed.
pub fn save_png(canvas: &Canvas, path: &Path) -> TrackArtResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let bytes = encode_png(canvas)?;
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
