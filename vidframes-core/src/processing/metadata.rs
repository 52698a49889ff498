// ============================================================================
// vidframes-core/src/processing/metadata.rs
// ============================================================================
//
// METADATA READER: Video Properties from ffprobe
//
// Turns a raw `ProbeReport` into validated `VideoMetadata`. Frame rates come
// from ffprobe as rational strings ("30000/1001") and are evaluated with an
// explicit integer parser. Metadata is read fresh for every file and never
// cached.

use crate::error::{CoreError, CoreResult};
use crate::external::{FfprobeExecutor, ProbeReport, VideoStreamInfo};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Properties of the first video stream of a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Duration in seconds (> 0)
    pub duration: f64,
    /// Native frame rate in frames per second (> 0)
    pub frame_rate: f64,
    /// `floor(duration * frame_rate)`
    pub total_frames: u64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Codec identifier, "unknown" when ffprobe did not name one
    pub codec: String,
}

/// Probes `path` and validates what ffprobe reported.
///
/// # Errors
///
/// * `CoreError::Probe` if ffprobe could not parse the file
/// * `CoreError::NoVideoStream` if the file has no video stream
/// * `CoreError::InvalidMetadata` if duration, rate or dimensions are unusable
pub fn read_video_metadata<P>(executor: &P, path: &Path) -> CoreResult<VideoMetadata>
where
    P: FfprobeExecutor + ?Sized,
{
    let report = executor.probe(path)?;
    let metadata = metadata_from_report(&report, path)?;

    log::debug!(
        "Metadata for {}: {:.3}s @ {:.3} fps ({} frames), {}x{}, codec {}",
        path.display(),
        metadata.duration,
        metadata.frame_rate,
        metadata.total_frames,
        metadata.width,
        metadata.height,
        metadata.codec
    );

    Ok(metadata)
}

/// Builds `VideoMetadata` from an already obtained report.
pub fn metadata_from_report(report: &ProbeReport, path: &Path) -> CoreResult<VideoMetadata> {
    let stream = report
        .video_stream
        .as_ref()
        .ok_or_else(|| CoreError::NoVideoStream(path.to_path_buf()))?;

    let frame_rate = stream_frame_rate(stream)?;
    let duration = stream_duration(stream, report.format_duration.as_deref())?;
    let width = dimension(stream.width, "width")?;
    let height = dimension(stream.height, "height")?;

    Ok(VideoMetadata {
        duration,
        frame_rate,
        total_frames: (duration * frame_rate).floor() as u64,
        width,
        height,
        codec: stream
            .codec_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "unknown".to_string()),
    })
}

/// Parses a frame rate such as "30000/1001", "25/1" or "23.976".
///
/// Numerator and denominator of a rational are integers; text without a `/`
/// is read as a plain decimal. Zero, negative and non-finite rates are errors.
pub fn parse_frame_rate(text: &str) -> CoreResult<f64> {
    let invalid = || CoreError::InvalidFrameRate(text.to_string());
    let trimmed = text.trim();

    let rate = match trimmed.split_once('/') {
        Some((num, den)) => {
            let num: i64 = num.trim().parse().map_err(|_| invalid())?;
            let den: i64 = den.trim().parse().map_err(|_| invalid())?;
            if den == 0 {
                return Err(invalid());
            }
            num as f64 / den as f64
        }
        None => trimmed.parse::<f64>().map_err(|_| invalid())?,
    };

    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(invalid())
    }
}

// ffprobe reports "0/0" for r_frame_rate on some containers
fn stream_frame_rate(stream: &VideoStreamInfo) -> CoreResult<f64> {
    parse_frame_rate(&stream.r_frame_rate).or_else(|primary| {
        log::debug!(
            "r_frame_rate unusable ({}), trying avg_frame_rate '{}'",
            primary,
            stream.avg_frame_rate
        );
        parse_frame_rate(&stream.avg_frame_rate).map_err(|_| {
            CoreError::InvalidMetadata(format!(
                "no usable frame rate (r_frame_rate '{}', avg_frame_rate '{}')",
                stream.r_frame_rate, stream.avg_frame_rate
            ))
        })
    })
}

fn stream_duration(stream: &VideoStreamInfo, format_duration: Option<&str>) -> CoreResult<f64> {
    [stream.duration.as_deref(), format_duration]
        .into_iter()
        .flatten()
        .filter_map(|text| text.trim().parse::<f64>().ok())
        .find(|d| d.is_finite() && *d > 0.0)
        .ok_or_else(|| CoreError::InvalidMetadata("no positive duration reported".to_string()))
}

fn dimension(value: Option<i64>, name: &str) -> CoreResult<u32> {
    value
        .filter(|v| *v > 0)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| CoreError::InvalidMetadata(format!("missing or invalid {name}")))
}
