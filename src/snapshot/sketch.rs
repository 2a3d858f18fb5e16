use kurbo::{Affine, BezPath, Cap, Join, Point, Rect, Stroke, StrokeOpts};

use crate::foundation::core::{Canvas, Coordinate, Rgb8};
use crate::foundation::error::{TrackArtError, TrackArtResult};
use crate::foundation::math::unit_to_u8_weight;
use crate::geo::bounds::BoundingBox;
use crate::geo::projector::Projector;
use crate::render::raster::{bezpath_to_cpu, draw_layer, shape_to_cpu};
use crate::snapshot::provider::{MapSnapshotProvider, TrackLine};

const MAX_GRID_LINES: usize = 512;

/// Offline provider: a plain paper basemap with a lat/lon graticule and the track stroked on top.
///
/// No tiles and no network, so it always succeeds for non-empty input. Useful as a default map
/// backend and in tests.
#[derive(Clone, Debug)]
pub struct SketchMapProvider {
    /// Paper color.
    pub background: Rgb8,
    /// Graticule color.
    pub grid: Rgb8,
    /// Track line styling.
    pub line: TrackLine,
    /// Fractional inset around the track.
    pub margin: f64,
    /// Target number of graticule cells across the longer track extent.
    pub grid_cells: u32,
}

impl Default for SketchMapProvider {
    fn default() -> Self {
        Self {
            background: Rgb8::new(242, 239, 233),
            grid: Rgb8::new(214, 208, 198),
            line: TrackLine::default(),
            margin: 0.1,
            grid_cells: 8,
        }
    }
}

impl MapSnapshotProvider for SketchMapProvider {
    #[tracing::instrument(skip(self, coords), fields(points = coords.len()))]
    fn snapshot(
        &mut self,
        coords: &[Coordinate],
        width: u32,
        height: u32,
    ) -> TrackArtResult<Canvas> {
        let bbox = BoundingBox::compute(coords)
            .map_err(|e| TrackArtError::snapshot(format!("no track to render: {e}")))?;
        let projector = Projector::new(&bbox, width, height, self.margin);
        let to_px = projector.to_affine();

        let paper = Canvas::filled(width, height, self.background.to_rgba8());
        let grid = self.grid;
        let grid_cells = self.grid_cells;
        let line = self.line;

        draw_layer(&paper, |ctx| {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                grid.r, grid.g, grid.b, 255,
            ));
            for r in graticule(&bbox, to_px, width, height, grid_cells) {
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1));
            }

            let alpha = unit_to_u8_weight(line.opacity) as u8;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                line.color.r,
                line.color.g,
                line.color.b,
                alpha,
            ));
            match track_outline(coords, &projector, line.weight) {
                Some(outline) => ctx.fill_path(&bezpath_to_cpu(&outline)),
                None => {
                    let center = projector.project(coords[0]);
                    let dot = kurbo::Circle::new(center, line.weight.max(1.0));
                    ctx.fill_path(&shape_to_cpu(&dot));
                }
            }
        })
        .map_err(|e| TrackArtError::snapshot(format!("sketch rasterization failed: {e}")))
    }

    fn name(&self) -> &str {
        "sketch"
    }
}

// Stroked polyline as a fillable outline, or `None` when every point projects to one pixel spot.
fn track_outline(coords: &[Coordinate], projector: &Projector, weight: f64) -> Option<BezPath> {
    let mut path = BezPath::new();
    let mut last: Option<Point> = None;
    for c in coords {
        let p = projector.project(*c);
        match last {
            None => path.move_to(p),
            Some(prev) if prev.distance(p) < 1e-6 => continue,
            Some(_) => path.line_to(p),
        }
        last = Some(p);
    }
    if path.elements().len() < 2 {
        return None;
    }

    let style = Stroke::new(weight.max(0.5))
        .with_caps(Cap::Round)
        .with_join(Join::Round);
    Some(kurbo::stroke(path.iter(), &style, &StrokeOpts::default(), 0.1))
}

// One-pixel graticule lines at a "nice" degree step, covering the whole visible area.
fn graticule(bbox: &BoundingBox, to_px: Affine, width: u32, height: u32, cells: u32) -> Vec<Rect> {
    let extent = bbox.width().max(bbox.height());
    if extent <= 0.0 || to_px.determinant().abs() < f64::EPSILON {
        return Vec::new();
    }
    let step = nice_step(extent / f64::from(cells.max(1)));

    let (w, h) = (f64::from(width), f64::from(height));
    let to_geo = to_px.inverse();
    let top_left = to_geo * Point::new(0.0, 0.0);
    let bottom_right = to_geo * Point::new(w, h);
    let (lon0, lon1) = (top_left.x.min(bottom_right.x), top_left.x.max(bottom_right.x));
    let (lat0, lat1) = (top_left.y.min(bottom_right.y), top_left.y.max(bottom_right.y));

    let mut out = Vec::new();
    for lon in grid_values(lon0, lon1, step) {
        let x = (to_px * Point::new(lon, lat0)).x;
        out.push(Rect::new(x - 0.5, 0.0, x + 0.5, h));
    }
    for lat in grid_values(lat0, lat1, step) {
        let y = (to_px * Point::new(lon0, lat)).y;
        out.push(Rect::new(0.0, y - 0.5, w, y + 0.5));
    }
    out
}

// Multiples of `step` inside `[lo, hi]`. Empty when `step` is below the float resolution at
// `lo` (near-degenerate boxes), and never more than `MAX_GRID_LINES` values.
fn grid_values(lo: f64, hi: f64, step: f64) -> impl Iterator<Item = f64> {
    let first = (lo / step).ceil() * step;
    let count = if !first.is_finite() || first + step == first || first > hi {
        0
    } else {
        (((hi - first) / step).floor() as usize)
            .saturating_add(1)
            .min(MAX_GRID_LINES)
    };
    (0..count).map(move |i| first + i as f64 * step)
}

// Smallest 1, 2 or 5 times a power of ten that is >= `raw`.
fn nice_step(raw: f64) -> f64 {
    let mag = 10f64.powf(raw.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * mag)
        .find(|s| *s >= raw * (1.0 - 1e-9))
        .unwrap_or(10.0 * mag)
}

#[cfg(test)]
#[path = "../../tests/unit/snapshot/sketch.rs"]
mod tests;
