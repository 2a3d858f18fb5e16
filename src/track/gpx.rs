use std::io::Cursor;

use crate::foundation::core::Coordinate;
use crate::foundation::error::{TrackArtError, TrackArtResult};

/// Parse GPX bytes into one ordered coordinate sequence.
///
/// Every segment of every track is concatenated in document order. Routes and standalone
/// waypoints are ignored.
pub fn parse_gpx(bytes: &[u8]) -> TrackArtResult<Vec<Coordinate>> {
    let doc = gpx::read(Cursor::new(bytes))
        .map_err(|e| TrackArtError::Other(anyhow::anyhow!("parse gpx document: {e}")))?;

    let mut out = Vec::new();
    for track in &doc.tracks {
        for segment in &track.segments {
            out.extend(segment.points.iter().map(|wp| {
                let p = wp.point();
                Coordinate::new(p.y(), p.x())
            }));
        }
    }

    if out.is_empty() {
        return Err(TrackArtError::empty_track(
            "gpx document contains no track points",
        ));
    }
    tracing::debug!(
        points = out.len(),
        tracks = doc.tracks.len(),
        "parsed gpx track"
    );
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/track/gpx.rs"]
mod tests;
