use crate::foundation::core::Coordinate;
use crate::foundation::error::{TrackArtError, TrackArtResult};

/// Drop `percent`% of the points from each end of the track.
///
/// `start = floor(n * percent / 100)` points go from the front and the same number from the
/// back, so the kept range is `[start, n - start)`. Fails when nothing is left.
pub fn trim_track(coords: &[Coordinate], percent: u32) -> TrackArtResult<&[Coordinate]> {
    if percent > 50 {
        return Err(TrackArtError::invalid_config(format!(
            "trim percent must be in [0, 50], got {percent}"
        )));
    }

    let n = coords.len();
    let start = n * percent as usize / 100;
    let end = n - start;
    if start >= end {
        return Err(TrackArtError::empty_track(format!(
            "trimming {percent}% from each end of {n} points leaves nothing"
        )));
    }
    Ok(&coords[start..end])
}

/// Every `spacing`-th point starting with the first. A spacing of 0 behaves as 1.
pub fn subsample(coords: &[Coordinate], spacing: u32) -> impl Iterator<Item = &Coordinate> {
    coords.iter().step_by(spacing.max(1) as usize)
}

#[cfg(test)]
#[path = "../../tests/unit/track/trim.rs"]
mod tests;
