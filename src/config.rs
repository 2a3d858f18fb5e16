use std::path::Path;

use anyhow::Context;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{TrackArtError, TrackArtResult};
use crate::render::track::DotStyle;

/// User settings for one render request.
///
/// Missing JSON fields fall back to [`RenderConfig::default`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Dot fill color.
    pub circle_color: Rgb8,
    /// Dot radius in pixels, at least 1.
    pub circle_size: u32,
    /// Draw a dot for every `dot_spacing`-th point, at least 1.
    pub dot_spacing: u32,
    /// Fractional inset on each side of the photo, in `[0, 0.25]`.
    pub margin: f64,
    /// Strength of the black overlay, in `[0, 1]`.
    pub background_opacity: f64,
    /// Weight of the map snapshot against the photo, in `[0, 1]`.
    pub map_opacity: f64,
    /// Percentage of points hidden at each end of the track, in `[0, 50]`.
    pub trim_percent: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            circle_color: Rgb8::RED,
            circle_size: 3,
            dot_spacing: 36,
            margin: 0.05,
            background_opacity: 0.25,
            map_opacity: 0.23,
            trim_percent: 10,
        }
    }
}

impl RenderConfig {
    /// Check every field against its declared range.
    pub fn validate(&self) -> TrackArtResult<()> {
        if self.circle_size < 1 {
            return Err(TrackArtError::invalid_config("circle_size must be >= 1"));
        }
        if self.dot_spacing < 1 {
            return Err(TrackArtError::invalid_config("dot_spacing must be >= 1"));
        }
        check_unit_range("margin", self.margin, 0.25)?;
        check_unit_range("background_opacity", self.background_opacity, 1.0)?;
        check_unit_range("map_opacity", self.map_opacity, 1.0)?;
        if self.trim_percent > 50 {
            return Err(TrackArtError::invalid_config(format!(
                "trim_percent must be in [0, 50], got {}",
                self.trim_percent
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> TrackArtResult<Self> {
        let cfg: Self = serde_json::from_str(s).context("parse render config JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: &Path) -> TrackArtResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read render config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Dot drawing settings.
    pub fn dot_style(&self) -> DotStyle {
        DotStyle {
            color: self.circle_color,
            radius: self.circle_size,
            spacing: self.dot_spacing,
            margin: self.margin,
        }
    }
}

fn check_unit_range(name: &str, v: f64, max: f64) -> TrackArtResult<()> {
    if !(0.0..=max).contains(&v) {
        return Err(TrackArtError::invalid_config(format!(
            "{name} must be in [0, {max}], got {v}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/config/render_config.rs"]
mod tests;
