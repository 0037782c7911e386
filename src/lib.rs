#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! Snowtrail turns a contribution heatmap into a short looping animation.
//!
//! A character walks every cell of the grid in column-major zig-zag order. Cells with activity
//! hold a block that bursts into coins the first time it is reached, visited cells stay tinted,
//! and scenery plus drifting snow decorate the scene. Frames stream into a [`FrameSink`] (GIF,
//! MP4 via `ffmpeg`, or memory).
//!
//! Pipeline:
//!
//! 1. [`ActivitySource`] yields an [`ActivityGrid`]
//! 2. [`SceneAssets::load`] decodes every sprite up front
//! 3. [`run`] sets up an [`Animation`], then per step: advance, compose, push
//!
//! Compositing never mutates animation state, so [`FrameCompositor::compose`] can be called any
//! number of times for the same step.

pub(crate) mod assets;
pub(crate) mod encode;
pub(crate) mod foundation;
pub(crate) mod grid;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod session;
pub(crate) mod source;

pub use assets::color::Color;
pub use assets::decode::decode_image;
pub use assets::store::{
    AssetSource, DirAssetSource, MemoryAssetSource, PreparedImage, SceneAssets, names,
    normalize_rel_path,
};
pub use encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, is_ffmpeg_on_path};
pub use encode::gif::{GifSink, GifSinkOpts};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{Canvas, Cell, Point, Rect, Rgba8Premul, StepIndex, Vec2};
pub use foundation::error::{SnowError, SnowResult};
pub use grid::activity::ActivityGrid;
pub use grid::path::zigzag_path;
pub use render::compositor::{
    CHARACTER_SHEET_COLUMNS, CHARACTER_SHEET_ROWS, FrameCompositor, FrameState,
};
pub use render::sprite::SpriteSheet;
pub use render::surface::FrameRGBA;
pub use render::text::{TextAnchor, TextRun};
pub use scene::config::{Palette, SceneConfig};
pub use scene::decor::{DecorKind, Decoration, DecorationLayout};
pub use scene::particle::{BURST_SIZE, FADE_PER_STEP, GRAVITY, Particle};
pub use scene::snow::{Snowflake, scatter_snow};
pub use scene::trail::Trail;
pub use scene::trigger::{Trigger, TriggerRegistry};
pub use session::animation::Animation;
pub use session::runner::{RunStats, render_single_frame, run};
pub use source::{ActivityQuery, ActivitySource, JsonFileSource, parse_activity_json};
