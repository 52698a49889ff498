//! Configuration structures and constants for the vidframes-core library.
//!
//! A [`ConverterConfig`] is passed explicitly into every conversion call
//! instead of living as mutable state on the converter, so two conversions
//! driven from the same tooling never see each other's settings.

mod builder;

use crate::error::{CoreError, CoreResult};
use crate::processing::sampling::FrameCountMode;
use std::path::PathBuf;

pub use builder::ConverterConfigBuilder;

// Default constants

/// Default `-q:v` value handed to the image encoder. 1 is the best quality.
pub const DEFAULT_QUALITY: u8 = 1;

/// Lowest accepted `-q:v` value.
pub const MIN_QUALITY: u8 = 1;

/// Highest accepted `-q:v` value.
pub const MAX_QUALITY: u8 = 31;

/// Default output directory used by the CLI when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "frames";

/// Video file extensions picked up by batch discovery when none are configured.
pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "wmv"];

/// Environment variable naming an explicit ffmpeg binary.
pub const FFMPEG_PATH_ENV: &str = "VIDFRAMES_FFMPEG";

/// Environment variable naming an explicit ffprobe binary.
pub const FFPROBE_PATH_ENV: &str = "VIDFRAMES_FFPROBE";

/// Main configuration structure for the vidframes-core library.
///
/// All fields have sensible defaults. The builder provides a fluent way to
/// create instances.
///
/// # Examples
///
/// ```rust
/// use vidframes_core::config::ConverterConfigBuilder;
/// use vidframes_core::FrameCountMode;
///
/// let config = ConverterConfigBuilder::new()
///     .frame_count(FrameCountMode::Manual { count: 120 })
///     .quality(2)
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterConfig {
    /// Frame count used when a conversion call does not specify one.
    /// `Auto` applies the one-frame-per-second heuristic.
    pub frame_count: FrameCountMode,

    /// Frame rate reported as effective when a conversion call does not
    /// specify one. Advisory only, never used in sampling.
    pub frame_rate_override: Option<f64>,

    /// `-q:v` value for the image encoder (1-31, lower is better)
    pub quality: u8,

    /// Explicit ffmpeg binary; takes precedence over every other lookup
    pub ffmpeg_path: Option<PathBuf>,

    /// Explicit ffprobe binary; takes precedence over every other lookup
    pub ffprobe_path: Option<PathBuf>,

    /// Extensions (without dot, case-insensitive) considered by batch discovery
    pub video_extensions: Vec<String>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            frame_count: FrameCountMode::Auto,
            frame_rate_override: None,
            quality: DEFAULT_QUALITY,
            ffmpeg_path: None,
            ffprobe_path: None,
            video_extensions: DEFAULT_VIDEO_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
        }
    }
}

impl ConverterConfig {
    /// Checks every field for values the engine or the sampler would reject.
    pub fn validate(&self) -> CoreResult<()> {
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&self.quality) {
            return Err(CoreError::Config(format!(
                "Quality must be between {MIN_QUALITY} and {MAX_QUALITY} (got {})",
                self.quality
            )));
        }

        if let FrameCountMode::Manual { count: 0 } = self.frame_count {
            return Err(CoreError::InvalidFrameCount(0));
        }

        if let Some(fps) = self.frame_rate_override {
            validate_frame_rate(fps)?;
        }

        if self.video_extensions.is_empty() {
            return Err(CoreError::Config(
                "At least one video file extension is required".to_string(),
            ));
        }

        Ok(())
    }
}

/// Rejects frame rates that are zero, negative or not finite.
pub(crate) fn validate_frame_rate(fps: f64) -> CoreResult<()> {
    if fps.is_finite() && fps > 0.0 {
        Ok(())
    } else {
        Err(CoreError::Config(format!(
            "Frame rate must be a positive number (got {fps})"
        )))
    }
}
