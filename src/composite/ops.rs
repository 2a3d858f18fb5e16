use image::imageops::{self, FilterType};

use crate::composite::pixel::{crossfade, over};
use crate::foundation::core::Canvas;
use crate::foundation::error::{TrackArtError, TrackArtResult};
use crate::foundation::math::{
    premultiply_rgba8_in_place, unit_to_u8_weight, unpremultiply_rgba8_in_place,
};

const BLACK: [u8; 4] = [0, 0, 0, 255];

/// Composite a black layer of alpha `opacity` over `image`.
///
/// `opacity` is clamped to `[0, 1]`; 0 returns an identical copy, 1 returns solid black.
pub fn darken(image: &Canvas, opacity: f64) -> Canvas {
    let op = unit_to_u8_weight(opacity);
    let mut out = image.clone();
    if op == 0 {
        return out;
    }

    let data = out.as_bytes_mut();
    premultiply_rgba8_in_place(data);
    for px in data.chunks_exact_mut(4) {
        let res = over([px[0], px[1], px[2], px[3]], BLACK, op);
        px.copy_from_slice(&res);
    }
    unpremultiply_rgba8_in_place(data);
    out
}

/// Per-pixel `a * (1 - opacity) + b * opacity` over all four channels.
///
/// Both images must have identical dimensions.
pub fn blend(a: &Canvas, b: &Canvas, opacity: f64) -> TrackArtResult<Canvas> {
    if a.dimensions() != b.dimensions() {
        return Err(TrackArtError::dimension_mismatch(
            a.dimensions(),
            b.dimensions(),
        ));
    }

    let t = unit_to_u8_weight(opacity);
    match t {
        0 => return Ok(a.clone()),
        255 => return Ok(b.clone()),
        _ => {}
    }

    let mut out = a.clone();
    for (o, s) in out
        .as_bytes_mut()
        .chunks_exact_mut(4)
        .zip(b.as_bytes().chunks_exact(4))
    {
        let res = crossfade([o[0], o[1], o[2], o[3]], [s[0], s[1], s[2], s[3]], t);
        o.copy_from_slice(&res);
    }
    Ok(out)
}

/// Scale `image` to cover `target_width x target_height` without distortion, then center-crop.
///
/// A relatively wider source is fitted to the target height and loses equal strips on the left
/// and right; otherwise it is fitted to the target width and loses equal strips top and bottom.
/// Resampling uses Lanczos3. The result is always exactly the target size, and a source that
/// already has the target size is returned unchanged.
pub fn resize_and_crop(
    image: &Canvas,
    target_width: u32,
    target_height: u32,
) -> TrackArtResult<Canvas> {
    if target_width == 0 || target_height == 0 {
        return Err(TrackArtError::invalid_config(format!(
            "resize target must be non-empty, got {target_width}x{target_height}"
        )));
    }
    if image.is_empty() {
        return Err(TrackArtError::invalid_config(
            "cannot resize an empty image",
        ));
    }
    if image.dimensions() == (target_width, target_height) {
        return Ok(image.clone());
    }

    let (w, h) = image.dimensions();
    let aspect = f64::from(w) / f64::from(h);
    let target_aspect = f64::from(target_width) / f64::from(target_height);

    let (scaled_w, scaled_h) = if aspect > target_aspect {
        let sw = (f64::from(target_height) * aspect).round() as u32;
        (sw.max(target_width), target_height)
    } else {
        let sh = (f64::from(target_width) / aspect).round() as u32;
        (target_width, sh.max(target_height))
    };

    let src = image.to_image()?;
    let scaled = if (scaled_w, scaled_h) == (w, h) {
        src
    } else {
        imageops::resize(&src, scaled_w, scaled_h, FilterType::Lanczos3)
    };

    let left = (scaled_w - target_width) / 2;
    let top = (scaled_h - target_height) / 2;
    let cropped = imageops::crop_imm(&scaled, left, top, target_width, target_height).to_image();

    tracing::debug!(
        from_w = w,
        from_h = h,
        scaled_w,
        scaled_h,
        left,
        top,
        "resized and cropped"
    );
    Ok(Canvas::from_image(cropped))
}

#[cfg(test)]
#[path = "../../tests/unit/composite/ops.rs"]
mod tests;
