//! Frame sinks.
//!
//! Sinks consume composed frames in step order and persist the animation.

/// `ffmpeg`-based sink (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Animated GIF sink.
pub mod gif;
/// Sink trait and the in-memory sink.
pub mod sink;
