//! Timestamp sampling.
//!
//! Frames are spaced evenly by source frame index, then converted back to
//! seconds. Sampling is pure arithmetic on the probed metadata; it never looks
//! at frame content.

use crate::error::{CoreError, CoreResult};
use crate::processing::metadata::VideoMetadata;
use serde::{Deserialize, Serialize};

/// How many frames a conversion should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FrameCountMode {
    /// One frame per second of video, capped at the frames available.
    #[default]
    Auto,
    /// Exactly `count` frames.
    Manual { count: usize },
}

/// Computes `target_count` timestamps spread evenly over the video.
///
/// `interval = total_frames / target_count`; sample `i` lands on source frame
/// `floor(i * interval)` and is returned as `(index / total_frames) * duration`.
///
/// Asking for more samples than there are frames is allowed. Adjacent samples
/// then share a source frame, so the sequence is non-decreasing but may
/// repeat values.
///
/// # Errors
///
/// * `CoreError::ZeroFrames` if `total_frames` is 0
/// * `CoreError::InvalidFrameCount` if `target_count` is 0
pub fn sample_timestamps(
    total_frames: u64,
    duration: f64,
    target_count: usize,
) -> CoreResult<Vec<f64>> {
    if total_frames == 0 {
        return Err(CoreError::ZeroFrames);
    }
    if target_count == 0 {
        return Err(CoreError::InvalidFrameCount(0));
    }

    let total = total_frames as f64;
    let interval = total / target_count as f64;

    Ok((0..target_count)
        .map(|i| {
            let frame_index = (i as f64 * interval).floor();
            (frame_index / total) * duration
        })
        .collect())
}

/// One frame per whole second of video, capped at the frames available.
pub fn auto_frame_count(metadata: &VideoMetadata) -> usize {
    let per_second = metadata.duration.floor() as u64;
    per_second.min(metadata.total_frames) as usize
}

/// Picks the frame count for a conversion.
///
/// An explicit per-call mode beats the configured mode; `Auto` falls through
/// to [`auto_frame_count`]. Videos shorter than a second still get one frame.
pub fn resolve_frame_count(
    explicit: Option<FrameCountMode>,
    configured: FrameCountMode,
    metadata: &VideoMetadata,
) -> CoreResult<usize> {
    match explicit.unwrap_or(configured) {
        FrameCountMode::Manual { count: 0 } => Err(CoreError::InvalidFrameCount(0)),
        FrameCountMode::Manual { count } => Ok(count),
        FrameCountMode::Auto => {
            let count = auto_frame_count(metadata);
            if count == 0 {
                log::warn!(
                    "Video is shorter than one second ({:.3}s); extracting a single frame",
                    metadata.duration
                );
                Ok(1)
            } else {
                Ok(count)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(duration: f64, total_frames: u64) -> VideoMetadata {
        VideoMetadata {
            duration,
            frame_rate: total_frames as f64 / duration,
            total_frames,
            width: 1920,
            height: 1080,
            codec: "h264".to_string(),
        }
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "expected {e}, got {a}");
        }
    }

    #[test]
    fn test_sample_every_frame() {
        let timestamps = sample_timestamps(300, 30.0, 300).unwrap();
        let expected: Vec<f64> = (0..300).map(|i| i as f64 * 0.1).collect();
        assert_close(&timestamps, &expected);
    }

    #[test]
    fn test_sample_five_of_hundred() {
        let timestamps = sample_timestamps(100, 10.0, 5).unwrap();
        assert_close(&timestamps, &[0.0, 2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_sample_bounds_and_length() {
        for &(total, duration, target) in &[
            (1_u64, 0.04, 1_usize),
            (1, 0.04, 7),
            (250, 10.0, 3),
            (3000, 125.7, 125),
            (24, 1.0, 100),
            (172_800, 7200.0, 999),
        ] {
            let timestamps = sample_timestamps(total, duration, target).unwrap();
            assert_eq!(timestamps.len(), target);
            for ts in &timestamps {
                assert!(*ts >= 0.0 && *ts < duration, "{ts} outside [0, {duration})");
            }
            assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_oversampling_repeats_frames() {
        // 3 frames, 6 samples: every source frame is hit twice
        let timestamps = sample_timestamps(3, 3.0, 6).unwrap();
        assert_close(&timestamps, &[0.0, 0.0, 1.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn test_zero_frames_fails_fast() {
        assert!(matches!(
            sample_timestamps(0, 10.0, 5),
            Err(CoreError::ZeroFrames)
        ));
        assert!(matches!(
            sample_timestamps(10, 10.0, 0),
            Err(CoreError::InvalidFrameCount(0))
        ));
    }

    #[test]
    fn test_auto_frame_count() {
        assert_eq!(auto_frame_count(&metadata(125.7, 3000)), 125);
        // Capped by the frames actually available
        assert_eq!(auto_frame_count(&metadata(100.0, 50)), 50);
    }

    #[test]
    fn test_resolve_frame_count_precedence() {
        let meta = metadata(125.7, 3000);
        let manual = FrameCountMode::Manual { count: 10 };

        assert_eq!(resolve_frame_count(None, FrameCountMode::Auto, &meta).unwrap(), 125);
        assert_eq!(resolve_frame_count(None, manual, &meta).unwrap(), 10);
        assert_eq!(
            resolve_frame_count(Some(FrameCountMode::Manual { count: 3 }), manual, &meta).unwrap(),
            3
        );
        assert_eq!(
            resolve_frame_count(Some(FrameCountMode::Auto), manual, &meta).unwrap(),
            125
        );
    }

    #[test]
    fn test_resolve_frame_count_rejects_zero_and_clamps_short_video() {
        let meta = metadata(0.5, 12);
        assert!(matches!(
            resolve_frame_count(Some(FrameCountMode::Manual { count: 0 }), FrameCountMode::Auto, &meta),
            Err(CoreError::InvalidFrameCount(0))
        ));
        assert_eq!(resolve_frame_count(None, FrameCountMode::Auto, &meta).unwrap(), 1);
    }
}
