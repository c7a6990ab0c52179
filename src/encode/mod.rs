//! Encoding sinks.
//!
//! Sinks consume rendered frames in animation order; see [`sink::FrameSink`].

/// Animated GIF output.
pub mod gif;
/// Single-frame PNG export.
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
