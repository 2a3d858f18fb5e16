use kurbo::{Affine, Point};

use crate::foundation::core::Coordinate;
use crate::geo::bounds::BoundingBox;

/// Aspect-preserving lat/lon to pixel transform for one render call.
///
/// A single isotropic `scale` is applied to both axes. The axis that runs out of room first
/// (relative to the margin-inset region) decides the scale; the other axis is centered. Pixel `y`
/// grows downward while latitude grows upward, so latitude is flipped.
///
/// Degenerate boxes never produce NaN: zero latitude extent always fits width, zero longitude
/// extent always fits height, and a box that is a single point maps everything to the canvas
/// center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    min_lat: f64,
    min_lon: f64,
    canvas_height: f64,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Projector {
    /// Fit `bbox` into a `canvas_width x canvas_height` canvas inset by `margin` on every side.
    ///
    /// `margin` is a fraction of the canvas dimension and is clamped to `[0, 0.5]`.
    pub fn new(bbox: &BoundingBox, canvas_width: u32, canvas_height: u32, margin: f64) -> Self {
        let w = f64::from(canvas_width);
        let h = f64::from(canvas_height);
        let margin = if margin.is_finite() {
            margin.clamp(0.0, 0.5)
        } else {
            0.0
        };

        let gw = bbox.width();
        let gh = bbox.height();
        let eff_w = w * (1.0 - 2.0 * margin);
        let eff_h = h * (1.0 - 2.0 * margin);

        let (scale, offset_x, offset_y) = if gw <= 0.0 && gh <= 0.0 {
            (0.0, w / 2.0, h / 2.0)
        } else if fits_width(gw, gh, w, h) {
            let scale = eff_w / gw;
            (scale, w * margin, (h - gh * scale) / 2.0)
        } else {
            let scale = eff_h / gh;
            (scale, (w - gw * scale) / 2.0, h * margin)
        };

        Self {
            min_lat: bbox.min_lat,
            min_lon: bbox.min_lon,
            canvas_height: h,
            scale,
            offset_x,
            offset_y,
        }
    }

    /// Pixel position of `c`.
    pub fn project(&self, c: Coordinate) -> Point {
        let x = (c.lon - self.min_lon) * self.scale + self.offset_x;
        let y = self.canvas_height - (c.lat - self.min_lat) * self.scale - self.offset_y;
        Point::new(x, y)
    }

    /// Pixels per degree, shared by both axes.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The same transform as an affine map from `(lon, lat)` to `(x, y)`.
    pub fn to_affine(&self) -> Affine {
        let s = self.scale;
        Affine::new([
            s,
            0.0,
            0.0,
            -s,
            self.offset_x - self.min_lon * s,
            self.canvas_height - self.offset_y + self.min_lat * s,
        ])
    }
}

// `gw / gh > w / h`, decided without dividing by a zero extent.
fn fits_width(gw: f64, gh: f64, w: f64, h: f64) -> bool {
    if gh <= 0.0 {
        return true;
    }
    if gw <= 0.0 || h <= 0.0 {
        return false;
    }
    gw / gh > w / h
}

/// One-shot projection of `point` for a `canvas_width x canvas_height` canvas.
pub fn project(
    point: Coordinate,
    bbox: &BoundingBox,
    canvas_width: u32,
    canvas_height: u32,
    margin: f64,
) -> Point {
    Projector::new(bbox, canvas_width, canvas_height, margin).project(point)
}

#[cfg(test)]
#[path = "../../tests/unit/geo/projector.rs"]
mod tests;
