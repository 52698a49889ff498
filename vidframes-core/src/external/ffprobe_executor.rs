//! FFprobe integration for media inspection.
//!
//! The executor trait returns a narrow [`ProbeReport`] holding only what the
//! metadata reader consumes, so test doubles can fabricate reports without
//! building full ffprobe output.
use crate::error::{CoreError, CoreResult};
use ffprobe::FfProbeError;
use std::path::{Path, PathBuf};

/// Raw fields of the first video stream, as ffprobe reported them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoStreamInfo {
    /// Codec identifier (e.g., "h264")
    pub codec_name: Option<String>,
    /// Width in pixels
    pub width: Option<i64>,
    /// Height in pixels
    pub height: Option<i64>,
    /// Real base frame rate as a rational string (e.g., "30000/1001")
    pub r_frame_rate: String,
    /// Average frame rate as a rational string
    pub avg_frame_rate: String,
    /// Stream-level duration in seconds, as text
    pub duration: Option<String>,
}

/// What ffprobe said about a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeReport {
    /// Container-level duration in seconds, as text
    pub format_duration: Option<String>,
    /// First video stream, if the container has one
    pub video_stream: Option<VideoStreamInfo>,
}

/// Trait for inspecting media files.
pub trait FfprobeExecutor {
    /// Probes the file's container and streams.
    fn probe(&self, input_path: &Path) -> CoreResult<ProbeReport>;
}

/// Production `FfprobeExecutor` backed by the `ffprobe` crate.
#[derive(Debug, Clone)]
pub struct CrateFfprobeExecutor {
    ffprobe_bin: PathBuf,
}

impl CrateFfprobeExecutor {
    /// Creates an executor that runs the given ffprobe binary.
    pub fn new(ffprobe_bin: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_bin: ffprobe_bin.into(),
        }
    }
}

impl Default for CrateFfprobeExecutor {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl FfprobeExecutor for CrateFfprobeExecutor {
    fn probe(&self, input_path: &Path) -> CoreResult<ProbeReport> {
        log::debug!(
            "Running ffprobe ({}) for metadata on: {}",
            self.ffprobe_bin.display(),
            input_path.display()
        );

        let config = ffprobe::Config::builder()
            .ffprobe_bin(&self.ffprobe_bin)
            .build();

        match ffprobe::ffprobe_config(config, input_path) {
            Ok(metadata) => {
                let video_stream = metadata
                    .streams
                    .iter()
                    .find(|s| s.codec_type.as_deref() == Some("video"))
                    .map(|s| VideoStreamInfo {
                        codec_name: s.codec_name.clone(),
                        width: s.width,
                        height: s.height,
                        r_frame_rate: s.r_frame_rate.clone(),
                        avg_frame_rate: s.avg_frame_rate.clone(),
                        duration: s.duration.clone(),
                    });

                Ok(ProbeReport {
                    format_duration: metadata.format.duration.clone(),
                    video_stream,
                })
            }
            Err(err) => {
                log::error!("ffprobe failed on {}: {:?}", input_path.display(), err);
                Err(map_ffprobe_error(err, input_path))
            }
        }
    }
}

fn map_ffprobe_error(err: FfProbeError, input_path: &Path) -> CoreError {
    let reason = match err {
        FfProbeError::Io(io_err) => format!("could not run ffprobe: {io_err}"),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            if stderr.is_empty() {
                format!("ffprobe exited with {}", output.status)
            } else {
                stderr.to_string()
            }
        }
        FfProbeError::Deserialize(err) => format!("unreadable ffprobe output: {err}"),
        #[allow(unreachable_patterns)]
        other => format!("unknown ffprobe error: {other:?}"),
    };

    CoreError::Probe {
        path: input_path.to_path_buf(),
        reason,
    }
}
