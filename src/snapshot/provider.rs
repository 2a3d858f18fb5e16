use crate::foundation::core::{Canvas, Coordinate, Rgb8};
use crate::foundation::error::TrackArtResult;

/// Source of basemap rasters with the track drawn on them.
///
/// Implementations must center the view on the bounding box of `coords`, draw the full track as a
/// visible line, and either return a complete raster or fail with
/// [`TrackArtError::Snapshot`](crate::TrackArtError::Snapshot). Calls may block for seconds.
pub trait MapSnapshotProvider {
    /// Render `coords` onto a basemap of roughly `width x height` pixels.
    fn snapshot(
        &mut self,
        coords: &[Coordinate],
        width: u32,
        height: u32,
    ) -> TrackArtResult<Canvas>;

    /// Short name used in logs.
    fn name(&self) -> &str {
        "map"
    }
}

impl<P: MapSnapshotProvider + ?Sized> MapSnapshotProvider for Box<P> {
    fn snapshot(
        &mut self,
        coords: &[Coordinate],
        width: u32,
        height: u32,
    ) -> TrackArtResult<Canvas> {
        (**self).snapshot(coords, width, height)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Styling of the track line inside a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrackLine {
    /// Line color.
    pub color: Rgb8,
    /// Stroke width in pixels.
    pub weight: f64,
    /// Line opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for TrackLine {
    fn default() -> Self {
        Self {
            color: Rgb8::RED,
            weight: 2.5,
            opacity: 0.8,
        }
    }
}
