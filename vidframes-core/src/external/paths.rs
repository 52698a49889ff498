//! Engine binary lookup.
//!
//! Resolution order for each binary:
//!
//! 1. An explicit path from [`ConverterConfig`]
//! 2. The `VIDFRAMES_FFMPEG` / `VIDFRAMES_FFPROBE` environment variable
//! 3. A bundled copy (ffmpeg-sidecar's directory next to the executable, or
//!    an ffprobe sitting next to the resolved ffmpeg)
//! 4. The bare command name, resolved on `PATH` when spawned
//!
//! A missing bundled copy is never an error; lookup just moves on.

use crate::config::{ConverterConfig, FFMPEG_PATH_ENV, FFPROBE_PATH_ENV};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Resolved locations of the engine binaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnginePaths {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

impl Default for EnginePaths {
    fn default() -> Self {
        Self {
            ffmpeg: bare_command("ffmpeg"),
            ffprobe: bare_command("ffprobe"),
        }
    }
}

impl EnginePaths {
    /// Resolves both binaries from the configuration, the environment and
    /// the bundled sidecar location.
    pub fn resolve(config: &ConverterConfig) -> Self {
        let ffmpeg = resolve_binary(
            config.ffmpeg_path.as_deref(),
            env::var_os(FFMPEG_PATH_ENV),
            &[ffmpeg_sidecar::paths::ffmpeg_path()],
            "ffmpeg",
        );

        let ffprobe = resolve_binary(
            config.ffprobe_path.as_deref(),
            env::var_os(FFPROBE_PATH_ENV),
            &[sibling_binary(&ffmpeg, "ffprobe")],
            "ffprobe",
        );

        log::debug!(
            "Engine paths resolved: ffmpeg={}, ffprobe={}",
            ffmpeg.display(),
            ffprobe.display()
        );

        Self { ffmpeg, ffprobe }
    }
}

/// Picks the first usable location for a binary.
///
/// Explicit and environment paths are taken as given; bundled candidates are
/// only used when they exist on disk.
pub fn resolve_binary(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    bundled: &[PathBuf],
    command_name: &str,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        return PathBuf::from(value);
    }

    bundled
        .iter()
        .find(|candidate| candidate.is_file())
        .cloned()
        .unwrap_or_else(|| bare_command(command_name))
}

/// Path of `name` in the same directory as `binary`.
fn sibling_binary(binary: &Path, name: &str) -> PathBuf {
    binary.with_file_name(bare_command(name))
}

fn bare_command(name: &str) -> PathBuf {
    Path::new(name).with_extension(env::consts::EXE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_explicit_path_wins() {
        let resolved = resolve_binary(
            Some(Path::new("/custom/ffmpeg")),
            Some(OsString::from("/env/ffmpeg")),
            &[],
            "ffmpeg",
        );
        assert_eq!(resolved, PathBuf::from("/custom/ffmpeg"));
    }

    #[test]
    fn test_env_value_used_when_no_explicit_path() {
        let resolved = resolve_binary(None, Some(OsString::from("/env/ffprobe")), &[], "ffprobe");
        assert_eq!(resolved, PathBuf::from("/env/ffprobe"));

        // An empty variable is ignored
        let resolved = resolve_binary(None, Some(OsString::new()), &[], "ffprobe");
        assert_eq!(resolved, bare_command("ffprobe"));
    }

    #[test]
    fn test_bundled_candidate_used_only_if_present() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let missing = dir.path().join("missing-ffmpeg");
        let present = dir.path().join("bundled-ffmpeg");
        File::create(&present)?;

        let resolved = resolve_binary(None, None, &[missing.clone(), present.clone()], "ffmpeg");
        assert_eq!(resolved, present);

        let resolved = resolve_binary(None, None, &[missing], "ffmpeg");
        assert_eq!(resolved, bare_command("ffmpeg"));
        Ok(())
    }

    #[test]
    fn test_sibling_binary_keeps_directory() {
        let sibling = sibling_binary(Path::new("/opt/media/bin/ffmpeg"), "ffprobe");
        assert_eq!(sibling.parent(), Some(Path::new("/opt/media/bin")));
        assert!(sibling.to_string_lossy().contains("ffprobe"));
    }
}
