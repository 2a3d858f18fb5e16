use crate::foundation::core::Coordinate;
use crate::foundation::error::{TrackArtError, TrackArtResult};

/// Axis-aligned extent of a coordinate set in degrees.
///
/// Invariant: `min_lat <= max_lat` and `min_lon <= max_lon`. Zero width or height is legal
/// (single point, or a track along one parallel/meridian).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    /// Southern edge.
    pub min_lat: f64,
    /// Northern edge.
    pub max_lat: f64,
    /// Western edge.
    pub min_lon: f64,
    /// Eastern edge.
    pub max_lon: f64,
}

impl BoundingBox {
    /// Exact extent of `coords` in a single pass.
    pub fn compute(coords: &[Coordinate]) -> TrackArtResult<Self> {
        let (first, rest) = coords
            .split_first()
            .ok_or_else(|| TrackArtError::empty_track("cannot bound an empty coordinate set"))?;

        let mut out = Self {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lon: first.lon,
            max_lon: first.lon,
        };
        for c in rest {
            out.min_lat = out.min_lat.min(c.lat);
            out.max_lat = out.max_lat.max(c.lat);
            out.min_lon = out.min_lon.min(c.lon);
            out.max_lon = out.max_lon.max(c.lon);
        }
        Ok(out)
    }

    /// Longitude extent.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Latitude extent.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Midpoint of both extents.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Inclusive containment test.
    pub fn contains(&self, c: Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&c.lat)
            && (self.min_lon..=self.max_lon).contains(&c.lon)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geo/bounds.rs"]
mod tests;
