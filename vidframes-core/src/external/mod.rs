// ============================================================================
// vidframes-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the ffmpeg/ffprobe Engine
//
// This module encapsulates every interaction with the external multimedia
// engine. Each kind of interaction sits behind a trait so the orchestration
// code can be exercised with the test doubles in `mocks`.
//
// KEY COMPONENTS:
// - FfmpegSpawner/FfmpegProcess: running ffmpeg and consuming its events
// - FfprobeExecutor: stream/format inspection
// - EncoderQuery: listing the engine's encoders
// - EnginePaths: locating the engine binaries
// - check_dependency: verifying a binary can be started

use crate::error::{CoreError, CoreResult};

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Encoder listing via `ffmpeg -encoders`
pub mod encoders;

/// Traits and implementations for spawning ffmpeg processes
pub mod ffmpeg_executor;

/// Traits and implementations for executing ffprobe
pub mod ffprobe_executor;

/// Test doubles for every engine trait
pub mod mocks;

/// Engine binary lookup
pub mod paths;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use encoders::{EncoderQuery, FfmpegEncoderQuery, parse_encoder_listing};
pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner};
pub use ffprobe_executor::{CrateFfprobeExecutor, FfprobeExecutor, ProbeReport, VideoStreamInfo};
pub use paths::EnginePaths;

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks if a required external command is available and executable.
///
/// Runs the binary with `-version` and discards its output. Only the ability
/// to start the process matters; the exit status is not inspected.
///
/// # Arguments
///
/// * `binary` - Path or bare name of the command (e.g., "ffmpeg")
///
/// # Returns
///
/// * `Ok(())` - If the command could be started
/// * `Err(CoreError::DependencyNotFound)` - If the command is not found
/// * `Err(CoreError::CommandStart)` - If the command exists but fails to start
pub fn check_dependency(binary: &Path) -> CoreResult<()> {
    let name = binary.display().to_string();

    let result = Command::new(binary)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", name);
            Err(CoreError::DependencyNotFound(name))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", name, e);
            Err(CoreError::CommandStart(name, e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dependency_reports_missing_binary() {
        let result = check_dependency(Path::new("vidframes-surely-not-a-real-binary-42"));
        match result {
            Err(CoreError::DependencyNotFound(name)) => {
                assert_eq!(name, "vidframes-surely-not-a-real-binary-42");
            }
            other => panic!("Unexpected result: {:?}", other),
        }
    }
}
