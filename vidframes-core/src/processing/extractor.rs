// ============================================================================
// vidframes-core/src/processing/extractor.rs
// ============================================================================
//
// FRAME EXTRACTOR: One Timestamp, One Image
//
// Runs ffmpeg once per sampled timestamp: seek on the input, decode a single
// frame at the source resolution and encode it as a still image.
//
// ENCODER POLICY (first available wins):
// 1. png: written straight to the requested path
// 2. mjpeg: written to a sibling .jpg and renamed to the requested .png
//    name. The bytes stay JPEG; `ExtractedFrame::actual_format` records it.
// 3. neither: no codec is forced and ffmpeg picks from the extension

use crate::error::{CoreError, CoreResult};
use crate::external::{FfmpegProcess, FfmpegSpawner};
use crate::processing::capabilities::EncoderCapabilities;
use crate::processing::metadata::VideoMetadata;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Encoder chosen for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoder {
    Lossless,
    LossyFallback,
    EngineDefault,
}

impl ImageEncoder {
    /// ffmpeg codec name, if one is forced.
    pub fn codec(self) -> Option<&'static str> {
        match self {
            ImageEncoder::Lossless => Some("png"),
            ImageEncoder::LossyFallback => Some("mjpeg"),
            ImageEncoder::EngineDefault => None,
        }
    }

    /// Format of the bytes this encoder writes.
    pub fn actual_format(self) -> FrameFormat {
        match self {
            ImageEncoder::Lossless => FrameFormat::Png,
            ImageEncoder::LossyFallback => FrameFormat::Jpeg,
            ImageEncoder::EngineDefault => FrameFormat::EngineDefault,
        }
    }
}

/// Content format of a written frame file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameFormat {
    Png,
    Jpeg,
    /// Whatever ffmpeg chose for the output extension
    EngineDefault,
}

/// Picks the encoder for the given capabilities.
pub fn select_encoder(capabilities: &EncoderCapabilities) -> ImageEncoder {
    if capabilities.has_lossless_encoder {
        ImageEncoder::Lossless
    } else if capabilities.has_lossy_fallback_encoder {
        ImageEncoder::LossyFallback
    } else {
        ImageEncoder::EngineDefault
    }
}

/// A frame written to disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedFrame {
    /// 1-based position in the output sequence
    pub ordinal: usize,
    /// Seek position in seconds
    pub timestamp: f64,
    /// Final file location
    pub path: PathBuf,
    pub actual_format: FrameFormat,
}

impl ExtractedFrame {
    /// True when the file extension claims PNG but the bytes are JPEG.
    pub fn is_mislabeled(&self) -> bool {
        self.actual_format == FrameFormat::Jpeg
    }
}

/// Everything needed to extract one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameRequest<'a> {
    pub ordinal: usize,
    pub video: &'a Path,
    pub timestamp: f64,
    pub output_path: &'a Path,
    pub metadata: &'a VideoMetadata,
    /// `-q:v` value
    pub quality: u8,
}

/// Where the encoder actually writes before any rename.
pub fn encoder_output_path(output_path: &Path, encoder: ImageEncoder) -> PathBuf {
    match encoder {
        ImageEncoder::LossyFallback => output_path.with_extension("jpg"),
        ImageEncoder::Lossless | ImageEncoder::EngineDefault => output_path.to_path_buf(),
    }
}

/// Adds the single-frame extraction arguments to `cmd`.
///
/// Produces `-hide_banner -ss <ts> -i <video> -frames:v 1 -s <W>x<H>
/// [-f image2 -c:v <codec>] -q:v <quality> -y <output>`.
pub fn build_extract_command(
    mut cmd: FfmpegCommand,
    request: &FrameRequest<'_>,
    encoder: ImageEncoder,
    encoder_output: &Path,
) -> FfmpegCommand {
    let size = format!("{}x{}", request.metadata.width, request.metadata.height);

    cmd.arg("-hide_banner")
        .args(["-ss", &format!("{:.3}", request.timestamp)])
        .input(request.video.to_string_lossy().as_ref())
        .args(["-frames:v", "1"])
        .args(["-s", &size]);

    if let Some(codec) = encoder.codec() {
        cmd.args(["-f", "image2", "-c:v", codec]);
    }

    cmd.args(["-q:v", &request.quality.to_string()])
        .arg("-y")
        .output(encoder_output.to_string_lossy().as_ref());

    cmd
}

/// Extracts one frame with the encoder chosen for `capabilities`.
///
/// Succeeds only when ffmpeg's event stream ends without a fatal signal, the
/// process exits successfully and the image exists on disk.
pub fn extract_frame<S: FfmpegSpawner>(
    spawner: &S,
    capabilities: &EncoderCapabilities,
    request: &FrameRequest<'_>,
) -> CoreResult<ExtractedFrame> {
    let encoder = select_encoder(capabilities);
    let encoder_output = encoder_output_path(request.output_path, encoder);
    let extraction_error = |message: String| CoreError::Extraction {
        frame: request.ordinal,
        timestamp: request.timestamp,
        message,
    };

    let cmd = build_extract_command(spawner.command(), request, encoder, &encoder_output);
    log::debug!("FFmpeg command: {:?}", cmd.get_args().collect::<Vec<_>>());

    let mut process = spawner.spawn(cmd)?;

    let mut errors: Vec<String> = Vec::new();
    let mut fatal = false;
    process.handle_events(|event| {
        match event {
            FfmpegEvent::Log(LogLevel::Fatal, line) => {
                fatal = true;
                errors.push(line);
            }
            FfmpegEvent::Log(LogLevel::Error, line) => errors.push(line),
            FfmpegEvent::Error(message) => {
                fatal = true;
                errors.push(message);
            }
            FfmpegEvent::Log(LogLevel::Warning, line) => log::debug!("ffmpeg: {}", line),
            _ => {}
        }
        Ok(())
    })?;

    let status = process.wait()?;

    if !status.success() || fatal {
        let detail = if errors.is_empty() {
            format!("ffmpeg exited with {status}")
        } else {
            errors.join("; ")
        };
        return Err(extraction_error(detail));
    }

    for line in &errors {
        log::warn!("ffmpeg reported an error for frame {:03}: {}", request.ordinal, line);
    }

    if !encoder_output.is_file() {
        return Err(extraction_error(format!(
            "ffmpeg finished but {} was not written",
            encoder_output.display()
        )));
    }

    if encoder_output != request.output_path {
        fs::rename(&encoder_output, request.output_path).map_err(|e| {
            extraction_error(format!(
                "could not rename {} to {}: {}",
                encoder_output.display(),
                request.output_path.display(),
                e
            ))
        })?;
    }

    Ok(ExtractedFrame {
        ordinal: request.ordinal,
        timestamp: request.timestamp,
        path: request.output_path.to_path_buf(),
        actual_format: encoder.actual_format(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::{MockFfmpegSpawner, error_events};
    use tempfile::tempdir;

    fn metadata() -> VideoMetadata {
        VideoMetadata {
            duration: 10.0,
            frame_rate: 25.0,
            total_frames: 250,
            width: 1280,
            height: 720,
            codec: "h264".to_string(),
        }
    }

    fn args_of(cmd: &FfmpegCommand) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    fn contains_pair(args: &[String], flag: &str, value: &str) -> bool {
        args.windows(2).any(|w| w[0] == flag && w[1] == value)
    }

    #[test]
    fn test_select_encoder_priority() {
        let both = EncoderCapabilities::from_encoders(["png", "mjpeg"]);
        let lossy = EncoderCapabilities::from_encoders(["mjpeg"]);
        let none = EncoderCapabilities::from_encoders(["libx264"]);

        assert_eq!(select_encoder(&both), ImageEncoder::Lossless);
        assert_eq!(select_encoder(&lossy), ImageEncoder::LossyFallback);
        assert_eq!(select_encoder(&none), ImageEncoder::EngineDefault);
    }

    #[test]
    fn test_build_extract_command_args() {
        let meta = metadata();
        let request = FrameRequest {
            ordinal: 3,
            video: Path::new("/videos/clip.mp4"),
            timestamp: 4.4,
            output_path: Path::new("/out/frame_003.png"),
            metadata: &meta,
            quality: 2,
        };

        let cmd = build_extract_command(
            FfmpegCommand::new(),
            &request,
            ImageEncoder::Lossless,
            request.output_path,
        );
        let args = args_of(&cmd);

        assert!(contains_pair(&args, "-ss", "4.400"));
        assert!(contains_pair(&args, "-i", "/videos/clip.mp4"));
        assert!(contains_pair(&args, "-frames:v", "1"));
        assert!(contains_pair(&args, "-s", "1280x720"));
        assert!(contains_pair(&args, "-c:v", "png"));
        assert!(contains_pair(&args, "-q:v", "2"));
        assert_eq!(args.last().map(String::as_str), Some("/out/frame_003.png"));

        // Seeking happens on the input side
        let ss = args.iter().position(|a| a == "-ss");
        let input = args.iter().position(|a| a == "-i");
        assert!(ss < input);
    }

    #[test]
    fn test_engine_default_forces_no_codec() {
        let meta = metadata();
        let request = FrameRequest {
            ordinal: 1,
            video: Path::new("in.mp4"),
            timestamp: 0.0,
            output_path: Path::new("frame_001.png"),
            metadata: &meta,
            quality: 1,
        };
        let cmd = build_extract_command(
            FfmpegCommand::new(),
            &request,
            ImageEncoder::EngineDefault,
            request.output_path,
        );
        let args = args_of(&cmd);
        assert!(!args.iter().any(|a| a == "-c:v"));
        assert!(!args.iter().any(|a| a == "image2"));
    }

    #[test]
    fn test_lossy_fallback_renames_to_png() -> CoreResult<()> {
        let dir = tempdir()?;
        let output = dir.path().join("frame_001.png");
        let meta = metadata();
        let request = FrameRequest {
            ordinal: 1,
            video: Path::new("in.mp4"),
            timestamp: 0.0,
            output_path: &output,
            metadata: &meta,
            quality: 1,
        };

        let spawner = MockFfmpegSpawner::new();
        spawner.add_success_expectation("frame_001.jpg");

        let caps = EncoderCapabilities::from_encoders(["mjpeg"]);
        let frame = extract_frame(&spawner, &caps, &request)?;

        assert!(output.is_file());
        assert!(!dir.path().join("frame_001.jpg").exists());
        assert_eq!(frame.actual_format, FrameFormat::Jpeg);
        assert!(frame.is_mislabeled());

        let calls = spawner.get_received_calls();
        assert!(calls[0].iter().any(|a| a == "mjpeg"));
        Ok(())
    }

    #[test]
    fn test_failed_extraction_carries_engine_message() -> CoreResult<()> {
        let dir = tempdir()?;
        let output = dir.path().join("frame_002.png");
        let meta = metadata();
        let request = FrameRequest {
            ordinal: 2,
            video: Path::new("in.mp4"),
            timestamp: 5.0,
            output_path: &output,
            metadata: &meta,
            quality: 1,
        };

        let spawner = MockFfmpegSpawner::new();
        spawner.add_exit_error_expectation(
            "frame_002",
            error_events("Invalid data found when processing input"),
            1,
        );

        let caps = EncoderCapabilities::from_encoders(["png"]);
        match extract_frame(&spawner, &caps, &request) {
            Err(CoreError::Extraction { frame, message, .. }) => {
                assert_eq!(frame, 2);
                assert!(message.contains("Invalid data found"));
            }
            other => panic!("Unexpected result: {:?}", other),
        }
        assert!(!output.exists());
        Ok(())
    }

    #[test]
    fn test_missing_output_is_an_error() -> CoreResult<()> {
        let dir = tempdir()?;
        let output = dir.path().join("frame_001.png");
        let meta = metadata();
        let request = FrameRequest {
            ordinal: 1,
            video: Path::new("in.mp4"),
            timestamp: 0.0,
            output_path: &output,
            metadata: &meta,
            quality: 1,
        };

        let spawner = MockFfmpegSpawner::new();
        spawner.add_exit_error_expectation("frame_001", Vec::new(), 0);

        let caps = EncoderCapabilities::from_encoders(["png"]);
        assert!(matches!(
            extract_frame(&spawner, &caps, &request),
            Err(CoreError::Extraction { .. })
        ));
        Ok(())
    }
}
