// ============================================================================
// vidframes-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the vidframes Core Library
//
// This module defines the error taxonomy shared by every component of the
// library, from engine probing down to single-frame extraction. Errors that
// come from external processes carry the command name and, where available,
// the engine's own message so callers can surface it unchanged.
//
// KEY COMPONENTS:
// - CoreError: The unified error enum
// - CoreResult: Result alias used throughout the crate
// - Helper constructors for subprocess lifecycle failures

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Custom error types for vidframes.
#[derive(Error, Debug)]
pub enum CoreError {
    // ---- Input validation ----
    #[error("Video file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Frame count must be greater than zero (got {0})")]
    InvalidFrameCount(usize),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("No video files found in {}", .0.display())]
    NoFilesFound(PathBuf),

    // ---- Metadata inspection ----
    #[error("Failed to probe video {}: {reason}", path.display())]
    Probe { path: PathBuf, reason: String },

    #[error("No video stream found in the file {}", .0.display())]
    NoVideoStream(PathBuf),

    #[error("Invalid video metadata: {0}")]
    InvalidMetadata(String),

    #[error("Invalid frame rate '{0}'")]
    InvalidFrameRate(String),

    #[error("Video reports zero frames, nothing to sample")]
    ZeroFrames,

    // ---- Engine capabilities ----
    #[error("Could not query available encoders: {0}")]
    EncoderProbe(String),

    // ---- Frame extraction ----
    #[error("Failed to extract frame {frame:03} at {timestamp:.3}s: {message}")]
    Extraction {
        frame: usize,
        timestamp: f64,
        message: String,
    },

    // ---- External commands ----
    #[error("Required dependency '{0}' not found. Please ensure it is installed and in your PATH.")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, std::io::Error),

    #[error("Failed to wait for command '{0}': {1}")]
    CommandWait(String, std::io::Error),

    #[error("Command '{command}' failed with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    // ---- Wrapped errors ----
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result type for vidframes operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a [`CoreError::CommandStart`] for a process that could not be spawned.
pub fn command_start_error(command: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(command.into(), err)
}

/// Builds a [`CoreError::CommandWait`] for a process whose exit could not be collected.
pub fn command_wait_error(command: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandWait(command.into(), err)
}

/// Builds a [`CoreError::CommandFailed`] for a process that exited unsuccessfully.
pub fn command_failed_error(
    command: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        command: command.into(),
        status,
        stderr: stderr.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_error_message_pads_frame_ordinal() {
        let err = CoreError::Extraction {
            frame: 5,
            timestamp: 2.5,
            message: "Invalid data found when processing input".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to extract frame 005 at 2.500s: Invalid data found when processing input"
        );
    }

    #[test]
    fn test_input_not_found_message_names_path() {
        let err = CoreError::InputNotFound(PathBuf::from("missing.mp4"));
        assert_eq!(err.to_string(), "Video file not found: missing.mp4");
    }
}
