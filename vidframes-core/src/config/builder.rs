// ============================================================================
// vidframes-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for ConverterConfig
//
// Fluent construction of ConverterConfig instances starting from the library
// defaults. Validation stays on ConverterConfig::validate so that configs
// built by hand and configs built here go through the same checks.

use super::ConverterConfig;
use crate::processing::sampling::FrameCountMode;
use std::path::PathBuf;

/// Builder for creating [`ConverterConfig`] instances.
///
/// # Examples
///
/// ```rust
/// use vidframes_core::config::ConverterConfigBuilder;
///
/// let config = ConverterConfigBuilder::new()
///     .frame_rate_override(12.0)
///     .video_extensions(["mp4", "webm"])
///     .build();
/// assert_eq!(config.video_extensions, vec!["mp4", "webm"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConverterConfigBuilder {
    config: ConverterConfig,
}

impl ConverterConfigBuilder {
    /// Creates a new builder holding the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the frame count applied when a call does not specify one.
    #[must_use]
    pub fn frame_count(mut self, mode: FrameCountMode) -> Self {
        self.config.frame_count = mode;
        self
    }

    /// Sets the advisory frame rate override.
    #[must_use]
    pub fn frame_rate_override(mut self, fps: f64) -> Self {
        self.config.frame_rate_override = Some(fps);
        self
    }

    /// Sets the image encoder quality (1-31, lower is better).
    #[must_use]
    pub fn quality(mut self, quality: u8) -> Self {
        self.config.quality = quality;
        self
    }

    /// Sets an explicit ffmpeg binary.
    #[must_use]
    pub fn ffmpeg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.ffmpeg_path = Some(path.into());
        self
    }

    /// Sets an explicit ffprobe binary.
    #[must_use]
    pub fn ffprobe_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.ffprobe_path = Some(path.into());
        self
    }

    /// Replaces the extensions considered by batch discovery.
    #[must_use]
    pub fn video_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.video_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> ConverterConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_match_config_default() {
        assert_eq!(ConverterConfigBuilder::new().build(), ConverterConfig::default());
    }

    #[test]
    fn test_builder_sets_every_field() {
        let config = ConverterConfigBuilder::new()
            .frame_count(FrameCountMode::Manual { count: 10 })
            .frame_rate_override(5.0)
            .quality(3)
            .ffmpeg_path("/opt/ffmpeg/bin/ffmpeg")
            .ffprobe_path("/opt/ffmpeg/bin/ffprobe")
            .video_extensions(["mkv"])
            .build();

        assert_eq!(config.frame_count, FrameCountMode::Manual { count: 10 });
        assert_eq!(config.frame_rate_override, Some(5.0));
        assert_eq!(config.quality, 3);
        assert_eq!(config.ffmpeg_path, Some(PathBuf::from("/opt/ffmpeg/bin/ffmpeg")));
        assert_eq!(config.ffprobe_path, Some(PathBuf::from("/opt/ffmpeg/bin/ffprobe")));
        assert_eq!(config.video_extensions, vec!["mkv".to_string()]);
        assert!(config.validate().is_ok());
    }
}
