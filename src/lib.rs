//! Morph between two vector path shapes.
//!
//! Both paths are resampled into the same number of points, evenly spaced by arc length.
//! Corresponding points are interpolated by an eased progress value and the result is drawn as
//! a closed polyline on a 2D surface.
#![forbid(unsafe_code)]

pub mod animation;
pub mod assets;
pub mod encode;
pub mod foundation;
pub mod geometry;
pub mod morph;
pub mod render;

pub use animation::clock::{Clock, ManualClock, SystemClock};
pub use animation::ease::Ease;
pub use animation::tween::Tween;
pub use assets::color::Color;
pub use assets::document::Document;
pub use encode::png::{PngSequenceSink, write_png};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{BezPath, Canvas, Fps, FrameIndex, Point, PointSequence};
pub use foundation::error::{MorphError, MorphResult};
pub use geometry::interpolate::{Lerp, interpolate};
pub use geometry::outline::{PathGeometry, PathOutline};
pub use geometry::sampler::sample_path;
pub use morph::config::MorphConfig;
pub use morph::controller::{FrameOutcome, MorphController, MorphState};
pub use morph::frame::FrameHandle;
pub use morph::player::{PlaybackStats, Player};
pub use render::cpu::CpuSurface;
pub use render::polyline::{PaintStyle, polyline_path, render_points};
pub use render::recording::{DrawCall, RecordingSurface};
pub use render::surface::{DrawSurface, FrameRGBA};
