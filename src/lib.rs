//! trackart turns a GPS track and a photo into a poster-style image.
//!
//! The photo is mixed with a map snapshot of the track, darkened, and overlaid with evenly spaced
//! dots that trace the route. The public surface is small:
//!
//! - Load inputs with [`parse_gpx`] and [`load_image`] (or build [`Coordinate`]s and a
//!   [`Canvas`] directly)
//! - Pick a [`MapSnapshotProvider`] such as [`SketchMapProvider`] or [`CommandMapProvider`]
//! - Create a [`Pipeline`] and call [`Pipeline::render`] with a [`RenderConfig`]
//!
//! The compositing and projection building blocks are exported as well, for callers that want to
//! run individual stages.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod composite;
mod config;
mod foundation;
mod geo;
mod pipeline;
mod render;
mod snapshot;
mod track;

pub use crate::foundation::core::{Canvas, Coordinate, Rgb8};
pub use crate::foundation::error::{RenderStage, TrackArtError, TrackArtResult};

pub use crate::assets::decode::{decode_image, encode_png, load_image, save_png};
pub use crate::composite::ops::{blend, darken, resize_and_crop};
pub use crate::config::RenderConfig;
pub use crate::geo::bounds::BoundingBox;
pub use crate::geo::projector::{Projector, project};
pub use crate::pipeline::{DEFAULT_SNAPSHOT_SIZE, Pipeline, PipelineOpts, RenderStats, Rendered};
pub use crate::render::track::{DotStyle, draw_track};
pub use crate::snapshot::cache::{SnapshotCache, SnapshotKey};
pub use crate::snapshot::command::{CommandMapProvider, SnapshotRequest};
pub use crate::snapshot::provider::{MapSnapshotProvider, TrackLine};
pub use crate::snapshot::sketch::SketchMapProvider;
pub use crate::track::gpx::parse_gpx;
pub use crate::track::trim::{subsample, trim_track};
