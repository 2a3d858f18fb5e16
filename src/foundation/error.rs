use std::fmt;

/// Convenience result type used across trackart.
pub type TrackArtResult<T> = Result<T, TrackArtError>;

/// Pipeline stage a failure is attributed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderStage {
    /// Config validation and input checks before any work starts.
    Validate,
    /// Dropping the configured percentage from both ends of the track.
    Trim,
    /// Fetching the map snapshot (provider or cache).
    Snapshot,
    /// Fitting the snapshot to the photo dimensions.
    Resize,
    /// Mixing the photo with the snapshot.
    Blend,
    /// Drawing the track dots.
    Draw,
}

impl fmt::Display for RenderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validate => "validate",
            Self::Trim => "trim",
            Self::Snapshot => "snapshot",
            Self::Resize => "resize",
            Self::Blend => "blend",
            Self::Draw => "draw",
        };
        f.write_str(name)
    }
}

/// Top-level error taxonomy used by trackart APIs.
#[derive(thiserror::Error, Debug)]
pub enum TrackArtError {
    /// No coordinates left to work with (nothing parsed, or everything trimmed away).
    #[error("empty track: {0}")]
    EmptyTrack(String),

    /// A setting or argument outside its declared range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The map rendering backend was unavailable, failed or timed out.
    #[error("map snapshot error: {0}")]
    Snapshot(String),

    /// Two images that must share dimensions do not.
    #[error("dimension mismatch: {left_w}x{left_h} vs {right_w}x{right_h}")]
    DimensionMismatch {
        /// Width of the first image.
        left_w: u32,
        /// Height of the first image.
        left_h: u32,
        /// Width of the second image.
        right_w: u32,
        /// Height of the second image.
        right_h: u32,
    },

    /// Failure attributed to a pipeline stage.
    #[error("{stage} stage failed: {source}")]
    Stage {
        /// Stage that failed.
        stage: RenderStage,
        /// Underlying failure.
        #[source]
        source: Box<TrackArtError>,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrackArtError {
    /// Build a [`TrackArtError::EmptyTrack`] value.
    pub fn empty_track(msg: impl Into<String>) -> Self {
        Self::EmptyTrack(msg.into())
    }

    /// Build a [`TrackArtError::InvalidConfig`] value.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Build a [`TrackArtError::Snapshot`] value.
    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self::Snapshot(msg.into())
    }

    /// Build a [`TrackArtError::DimensionMismatch`] value from two `(width, height)` pairs.
    pub fn dimension_mismatch(left: (u32, u32), right: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            left_w: left.0,
            left_h: left.1,
            right_w: right.0,
            right_h: right.1,
        }
    }

    /// Attribute this error to `stage`. Already-attributed errors are left alone.
    pub fn at_stage(self, stage: RenderStage) -> Self {
        match self {
            Self::Stage { .. } => self,
            other => Self::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// Stage this error was attributed to, if any.
    pub fn stage(&self) -> Option<RenderStage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Underlying error with any stage attribution peeled off.
    pub fn root(&self) -> &TrackArtError {
        match self {
            Self::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
