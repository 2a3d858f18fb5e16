use std::time::{Duration, Instant};

use crate::composite::ops::{blend, darken, resize_and_crop};
use crate::config::RenderConfig;
use crate::foundation::core::{Canvas, Coordinate};
use crate::foundation::error::{RenderStage, TrackArtError, TrackArtResult};
use crate::render::track::draw_track;
use crate::snapshot::cache::SnapshotCache;
use crate::snapshot::provider::MapSnapshotProvider;
use crate::track::trim::trim_track;

/// Fixed internal map resolution requested from the provider.
pub const DEFAULT_SNAPSHOT_SIZE: (u32, u32) = (1600, 1200);

/// Pipeline-wide options that are not per-request user settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineOpts {
    /// Size of the snapshot requested from the provider before it is fitted to the photo.
    pub snapshot_size: (u32, u32),
}

impl Default for PipelineOpts {
    fn default() -> Self {
        Self {
            snapshot_size: DEFAULT_SNAPSHOT_SIZE,
        }
    }
}

/// Per-render timings and bookkeeping.
#[derive(Clone, Debug, Default)]
pub struct RenderStats {
    /// Points left after trimming.
    pub trimmed_points: usize,
    /// Whether the snapshot came from the cache.
    pub snapshot_cached: bool,
    /// Whether the map stage ran at all (it is skipped at zero map opacity).
    pub snapshot_used: bool,
    /// Time spent obtaining the snapshot.
    pub snapshot_time: Duration,
    /// Time spent in resize, blend and darken.
    pub composite_time: Duration,
    /// Time spent drawing dots.
    pub draw_time: Duration,
}

/// Output of one render request.
#[derive(Clone, Debug)]
pub struct Rendered {
    /// Final image, same size as the input photo.
    pub image: Canvas,
    /// What happened along the way.
    pub stats: RenderStats,
}

/// Trim, map snapshot, blend, darken, dots.
///
/// Owns the map provider and the snapshot cache, so repeated renders of the same track reuse
/// the snapshot. Each call either returns the full image or an error tagged with the failing
/// stage; nothing partial escapes.
pub struct Pipeline<P: MapSnapshotProvider> {
    provider: P,
    cache: SnapshotCache,
    opts: PipelineOpts,
}

impl<P: MapSnapshotProvider> Pipeline<P> {
    /// Pipeline with default options.
    pub fn new(provider: P) -> Self {
        Self::with_opts(provider, PipelineOpts::default())
    }

    /// Pipeline with explicit options.
    pub fn with_opts(provider: P, opts: PipelineOpts) -> Self {
        Self {
            provider,
            cache: SnapshotCache::new(),
            opts,
        }
    }

    /// The snapshot cache.
    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    /// The map provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Render `coords` over `photo` with `config`.
    pub fn render(
        &mut self,
        photo: &Canvas,
        coords: &[Coordinate],
        config: RenderConfig,
    ) -> TrackArtResult<Canvas> {
        self.render_with_stats(photo, coords, config)
            .map(|r| r.image)
    }

    /// [`Pipeline::render`] plus per-stage stats.
    #[tracing::instrument(
        skip(self, photo, coords, config),
        fields(photo_w = photo.width(), photo_h = photo.height(), points = coords.len())
    )]
    pub fn render_with_stats(
        &mut self,
        photo: &Canvas,
        coords: &[Coordinate],
        config: RenderConfig,
    ) -> TrackArtResult<Rendered> {
        let stage = |s: RenderStage| move |e: TrackArtError| e.at_stage(s);
        let mut stats = RenderStats::default();

        config.validate().map_err(stage(RenderStage::Validate))?;
        if photo.is_empty() {
            return Err(TrackArtError::invalid_config("photo has no pixels")
                .at_stage(RenderStage::Validate));
        }

        let track = trim_track(coords, config.trim_percent).map_err(stage(RenderStage::Trim))?;
        stats.trimmed_points = track.len();

        let (photo_w, photo_h) = photo.dimensions();
        let blended = if config.map_opacity > 0.0 {
            let t0 = Instant::now();
            let (snap_w, snap_h) = self.opts.snapshot_size;
            let (snap, cached) = self
                .cache
                .get_or_fetch(&mut self.provider, track, snap_w, snap_h)
                .map_err(stage(RenderStage::Snapshot))?;
            stats.snapshot_used = true;
            stats.snapshot_cached = cached;
            stats.snapshot_time = t0.elapsed();

            let t1 = Instant::now();
            let fitted =
                resize_and_crop(&snap, photo_w, photo_h).map_err(stage(RenderStage::Resize))?;
            let out = blend(photo, &fitted, config.map_opacity)
                .map_err(stage(RenderStage::Blend))?;
            stats.composite_time = t1.elapsed();
            out
        } else {
            photo.clone()
        };

        let t2 = Instant::now();
        let darkened = darken(&blended, config.background_opacity);
        stats.composite_time += t2.elapsed();

        let t3 = Instant::now();
        let image = draw_track(&darkened, track, &config.dot_style())
            .map_err(stage(RenderStage::Draw))?;
        stats.draw_time = t3.elapsed();

        tracing::debug!(
            trimmed_points = stats.trimmed_points,
            snapshot_used = stats.snapshot_used,
            snapshot_cached = stats.snapshot_cached,
            snapshot_ms = stats.snapshot_time.as_millis() as u64,
            composite_ms = stats.composite_time.as_millis() as u64,
            draw_ms = stats.draw_time.as_millis() as u64,
            "render finished"
        );
        Ok(Rendered { image, stats })
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline/pipeline.rs"]
mod tests;
