// ============================================================================
// vidframes-core/src/processing/conversion.rs
// ============================================================================
//
// CONVERSION ORCHESTRATOR: Video -> Numbered Still Frames
//
// Sequence for one video:
//   validate input -> create output dir -> probe metadata -> resolve frame
//   count -> resolve effective frame rate -> sample timestamps -> extract each
//   frame in order
//
// Extraction is strictly sequential. The first failing frame aborts the
// conversion; frames already written stay on disk.

use crate::config::{ConverterConfig, validate_frame_rate};
use crate::error::{CoreError, CoreResult};
use crate::events::{Event, EventDispatcher, EventHandler};
use crate::external::{
    CrateFfprobeExecutor, EncoderQuery, EnginePaths, FfmpegEncoderQuery, FfmpegSpawner,
    FfprobeExecutor, SidecarSpawner,
};
use crate::processing::capabilities::{CapabilityProber, EncoderCapabilities};
use crate::processing::extractor::{
    ExtractedFrame, FrameRequest, ImageEncoder, extract_frame, select_encoder,
};
use crate::processing::metadata::{VideoMetadata, read_video_metadata};
use crate::processing::sampling::{FrameCountMode, resolve_frame_count, sample_timestamps};
use crate::utils::frame_file_name;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Per-call extraction settings. `None` defers to the [`ConverterConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExtractionOptions {
    pub frame_count: Option<FrameCountMode>,
    /// Reported as the effective rate; never used for sampling.
    pub frame_rate: Option<f64>,
}

impl ExtractionOptions {
    pub fn manual(count: usize) -> Self {
        Self {
            frame_count: Some(FrameCountMode::Manual { count }),
            ..Self::default()
        }
    }

    pub fn auto() -> Self {
        Self {
            frame_count: Some(FrameCountMode::Auto),
            ..Self::default()
        }
    }

    /// Rejects a manual count of 0 and non-positive frame rates.
    pub fn validate(&self) -> CoreResult<()> {
        if let Some(FrameCountMode::Manual { count: 0 }) = self.frame_count {
            return Err(CoreError::InvalidFrameCount(0));
        }
        if let Some(fps) = self.frame_rate {
            validate_frame_rate(fps)?;
        }
        Ok(())
    }
}

/// Summary of a successful conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    pub success: bool,
    pub total_frames: usize,
    /// Absolute path of the directory holding the frames
    pub output_directory: PathBuf,
    pub original_video_info: VideoMetadata,
    pub effective_frame_rate: f64,
    /// Mode the frame count was resolved from
    pub extraction_mode: FrameCountMode,
    pub frames: Vec<ExtractedFrame>,
}

impl ConversionResult {
    /// Frames whose `.png` name hides JPEG content.
    pub fn mislabeled_frames(&self) -> usize {
        self.frames.iter().filter(|f| f.is_mislabeled()).count()
    }
}

/// Drives conversions through injectable engine collaborators.
///
/// Each converter owns its own capability cache and event handlers. Use one
/// converter per independently tracked conversion.
pub struct Converter<S, P, Q> {
    spawner: S,
    ffprobe: P,
    prober: CapabilityProber<Q>,
    dispatcher: EventDispatcher,
}

impl Converter<SidecarSpawner, CrateFfprobeExecutor, FfmpegEncoderQuery> {
    /// Converter running the real ffmpeg/ffprobe binaries at `paths`.
    pub fn with_system_engine(paths: &EnginePaths) -> Self {
        Self::new(
            SidecarSpawner::new(&paths.ffmpeg),
            CrateFfprobeExecutor::new(&paths.ffprobe),
            FfmpegEncoderQuery::new(&paths.ffmpeg),
        )
    }
}

impl<S, P, Q> Converter<S, P, Q>
where
    S: FfmpegSpawner,
    P: FfprobeExecutor,
    Q: EncoderQuery,
{
    pub fn new(spawner: S, ffprobe: P, encoder_query: Q) -> Self {
        Self {
            spawner,
            ffprobe,
            prober: CapabilityProber::new(encoder_query),
            dispatcher: EventDispatcher::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.dispatcher.add_handler(handler);
    }

    pub(crate) fn emit(&self, event: Event) {
        self.dispatcher.emit(event);
    }

    /// Cached engine capabilities, probing on first call.
    pub fn capabilities(&self) -> &EncoderCapabilities {
        self.prober.probe()
    }

    /// Probes `video` without extracting anything.
    pub fn get_video_info(&self, video: &Path) -> CoreResult<VideoMetadata> {
        if !video.is_file() {
            return Err(CoreError::InputNotFound(video.to_path_buf()));
        }
        read_video_metadata(&self.ffprobe, video)
    }

    /// Extracts evenly spaced frames of `video` into `output_dir`.
    ///
    /// Writes `frame_001.png`, `frame_002.png`, ... and emits one
    /// `Event::FrameExtracted` per written frame.
    ///
    /// # Errors
    ///
    /// * `CoreError::Config` / `InvalidFrameCount` for bad settings, before any work
    /// * `CoreError::InputNotFound` if `video` does not exist
    /// * `CoreError::Probe` / `NoVideoStream` / `InvalidMetadata` from inspection
    /// * `CoreError::Extraction` for the first frame that could not be written
    pub fn convert_video(
        &self,
        video: &Path,
        output_dir: &Path,
        options: &ExtractionOptions,
        config: &ConverterConfig,
    ) -> CoreResult<ConversionResult> {
        config.validate()?;
        options.validate()?;

        if !video.is_file() {
            return Err(CoreError::InputNotFound(video.to_path_buf()));
        }

        fs::create_dir_all(output_dir)?;
        let output_directory = std::path::absolute(output_dir)?;

        log::info!("Reading metadata: {}", video.display());
        let metadata = read_video_metadata(&self.ffprobe, video)?;

        let extraction_mode = options.frame_count.unwrap_or(config.frame_count);
        let frame_count = resolve_frame_count(options.frame_count, config.frame_count, &metadata)?;
        let effective_frame_rate = options
            .frame_rate
            .or(config.frame_rate_override)
            .unwrap_or(metadata.frame_rate);

        let timestamps = sample_timestamps(metadata.total_frames, metadata.duration, frame_count)?;

        let capabilities = self.prober.probe();
        if select_encoder(capabilities) == ImageEncoder::LossyFallback {
            let message =
                "PNG encoder unavailable; frames are JPEG data saved under .png names".to_string();
            log::warn!("{}", message);
            self.emit(Event::Warning { message });
        }

        log::info!(
            "Extracting {} frames from {} into {}",
            frame_count,
            video.display(),
            output_directory.display()
        );
        self.emit(Event::ConversionStarted {
            input_file: video.display().to_string(),
            output_dir: output_directory.display().to_string(),
            duration: metadata.duration,
            total_frames: frame_count,
        });

        let mut frames = Vec::with_capacity(frame_count);
        for (index, timestamp) in timestamps.into_iter().enumerate() {
            let ordinal = index + 1;
            let output_path = output_directory.join(frame_file_name(ordinal));
            let request = FrameRequest {
                ordinal,
                video,
                timestamp,
                output_path: &output_path,
                metadata: &metadata,
                quality: config.quality,
            };

            match extract_frame(&self.spawner, capabilities, &request) {
                Ok(frame) => {
                    log::debug!("Wrote {} ({:.3}s)", frame.path.display(), frame.timestamp);
                    frames.push(frame);
                    self.emit(Event::frame_extracted(ordinal, frame_count));
                }
                Err(e) => {
                    log::error!("{}", e);
                    self.emit(Event::Error {
                        title: format!("Extraction failed for {}", video.display()),
                        message: e.to_string(),
                    });
                    return Err(e);
                }
            }
        }

        self.emit(Event::ConversionComplete {
            input_file: video.display().to_string(),
            output_dir: output_directory.display().to_string(),
            frames_written: frames.len(),
        });
        log::info!("Extracted {} frames from {}", frames.len(), video.display());

        Ok(ConversionResult {
            success: true,
            total_frames: frames.len(),
            output_directory,
            original_video_info: metadata,
            effective_frame_rate,
            extraction_mode,
            frames,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::{
        MockEncoderQuery, MockFfmpegSpawner, MockFfprobeExecutor, sample_report,
    };
    use crate::events::RecordingHandler;
    use tempfile::tempdir;

    type MockConverter = Converter<MockFfmpegSpawner, MockFfprobeExecutor, MockEncoderQuery>;

    fn converter() -> (MockConverter, MockFfmpegSpawner, MockFfprobeExecutor) {
        let spawner = MockFfmpegSpawner::new();
        let ffprobe = MockFfprobeExecutor::new();
        let converter = Converter::new(spawner.clone(), ffprobe.clone(), MockEncoderQuery::default());
        (converter, spawner, ffprobe)
    }

    #[test]
    fn test_effective_frame_rate_precedence() -> CoreResult<()> {
        let dir = tempdir()?;
        let video = dir.path().join("clip.mp4");
        fs::write(&video, b"")?;

        let (converter, spawner, ffprobe) = converter();
        ffprobe.expect_report(&video, sample_report(10.0, "25/1", 320, 240));
        spawner.add_success_expectations(6);

        let out = dir.path().join("frames");
        let native = converter.convert_video(&video, &out, &ExtractionOptions::manual(2), &ConverterConfig::default())?;
        assert_eq!(native.effective_frame_rate, 25.0);

        let config = ConverterConfig {
            frame_rate_override: Some(12.0),
            ..Default::default()
        };
        let configured = converter.convert_video(&video, &out, &ExtractionOptions::manual(2), &config)?;
        assert_eq!(configured.effective_frame_rate, 12.0);

        let options = ExtractionOptions {
            frame_count: Some(FrameCountMode::Manual { count: 2 }),
            frame_rate: Some(5.0),
        };
        let explicit = converter.convert_video(&video, &out, &options, &config)?;
        assert_eq!(explicit.effective_frame_rate, 5.0);
        // Sampling ignores the reported rate
        assert_eq!(explicit.frames[1].timestamp, native.frames[1].timestamp);
        Ok(())
    }

    #[test]
    fn test_invalid_options_rejected_before_work() -> CoreResult<()> {
        let dir = tempdir()?;
        let (converter, spawner, _) = converter();
        let out = dir.path().join("never");

        let result = converter.convert_video(
            Path::new("does-not-matter.mp4"),
            &out,
            &ExtractionOptions::manual(0),
            &ConverterConfig::default(),
        );
        assert!(matches!(result, Err(CoreError::InvalidFrameCount(0))));

        let options = ExtractionOptions {
            frame_rate: Some(-1.0),
            ..Default::default()
        };
        let result = converter.convert_video(
            Path::new("does-not-matter.mp4"),
            &out,
            &options,
            &ConverterConfig::default(),
        );
        assert!(matches!(result, Err(CoreError::Config(_))));

        assert!(!out.exists());
        assert!(spawner.get_received_calls().is_empty());
        Ok(())
    }

    #[test]
    fn test_progress_events_per_frame() -> CoreResult<()> {
        let dir = tempdir()?;
        let video = dir.path().join("clip.mp4");
        fs::write(&video, b"")?;

        let (mut converter, spawner, ffprobe) = converter();
        let recorder = Arc::new(RecordingHandler::new());
        converter.add_handler(recorder.clone());

        ffprobe.expect_report(&video, sample_report(4.0, "24/1", 320, 240));
        spawner.add_success_expectations(4);

        let result = converter.convert_video(
            &video,
            &dir.path().join("out"),
            &ExtractionOptions::auto(),
            &ConverterConfig::default(),
        )?;
        assert_eq!(result.total_frames, 4);
        assert_eq!(result.extraction_mode, FrameCountMode::Auto);

        let ticks: Vec<(usize, usize)> = recorder
            .events()
            .iter()
            .filter_map(|e| match e {
                Event::FrameExtracted { current, total, .. } => Some((*current, *total)),
                _ => None,
            })
            .collect();
        assert_eq!(ticks, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
        Ok(())
    }
}
