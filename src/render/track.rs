use crate::foundation::core::{Canvas, Coordinate, Rgb8};
use crate::foundation::error::TrackArtResult;
use crate::geo::bounds::BoundingBox;
use crate::geo::projector::Projector;
use crate::render::raster::{draw_layer, shape_to_cpu};
use crate::track::trim::subsample;

/// How track dots are drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotStyle {
    /// Fill color.
    pub color: Rgb8,
    /// Circle radius in pixels.
    pub radius: u32,
    /// Draw a dot for every `spacing`-th point.
    pub spacing: u32,
    /// Fractional inset on each side of the canvas.
    pub margin: f64,
}

impl Default for DotStyle {
    fn default() -> Self {
        Self {
            color: Rgb8::RED,
            radius: 3,
            spacing: 36,
            margin: 0.05,
        }
    }
}

/// Draw one filled circle per retained point of `coords` on top of `canvas`.
///
/// The bounding box comes from every point in `coords`; `spacing` only decides which of them get
/// a dot. Dots are painted in track order, so later points cover earlier ones.
#[tracing::instrument(skip(canvas, coords), fields(points = coords.len()))]
pub fn draw_track(
    canvas: &Canvas,
    coords: &[Coordinate],
    style: &DotStyle,
) -> TrackArtResult<Canvas> {
    let bbox = BoundingBox::compute(coords)?;
    let projector = Projector::new(&bbox, canvas.width(), canvas.height(), style.margin);
    let radius = f64::from(style.radius.max(1));
    let [r, g, b, a] = style.color.to_rgba8();

    let mut dots = 0usize;
    let out = draw_layer(canvas, |ctx| {
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        for c in subsample(coords, style.spacing) {
            let center = projector.project(*c);
            ctx.fill_path(&shape_to_cpu(&kurbo::Circle::new(center, radius)));
            dots += 1;
        }
    })?;

    tracing::debug!(dots, "drew track dots");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/track.rs"]
mod tests;
