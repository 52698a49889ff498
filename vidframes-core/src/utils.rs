//! Utility functions for formatting and file naming.
//!
//! General-purpose helpers used throughout the vidframes-core library:
//! output frame naming, duration formatting and safe path component access.

use crate::error::{CoreError, CoreResult};
use std::path::Path;

/// Extension every output frame is written with, regardless of the encoder used.
pub const FRAME_FILE_EXTENSION: &str = "png";

/// Builds the output file name for a 1-based frame ordinal (e.g., 1 -> "frame_001.png").
#[must_use]
pub fn frame_file_name(ordinal: usize) -> String {
    format!("frame_{ordinal:03}.{FRAME_FILE_EXTENSION}")
}

/// Formats seconds as HH:MM:SS (e.g., 3725.0 -> "01:02:05"). Returns "??:??:??" for invalid inputs.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    if seconds < 0.0 || !seconds.is_finite() {
        return "??:??:??".to_string();
    }

    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Safely extracts the filename from a path.
pub fn get_filename_safe(path: &Path) -> CoreResult<String> {
    Ok(path
        .file_name()
        .ok_or_else(|| {
            CoreError::PathError(format!("Failed to get filename for {}", path.display()))
        })?
        .to_string_lossy()
        .to_string())
}

/// Safely extracts the filename without its extension.
pub fn get_file_stem_safe(path: &Path) -> CoreResult<String> {
    Ok(path
        .file_stem()
        .ok_or_else(|| {
            CoreError::PathError(format!(
                "Failed to get filename stem for {}",
                path.display()
            ))
        })?
        .to_string_lossy()
        .to_string())
}
