//! Encoder listing via `ffmpeg -encoders`.

use crate::error::{CoreError, CoreResult, command_start_error};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Trait for asking the engine which encoders it was built with.
pub trait EncoderQuery {
    /// Returns the names of all available encoders.
    fn list_encoders(&self) -> CoreResult<Vec<String>>;
}

/// Production `EncoderQuery` that runs `ffmpeg -hide_banner -encoders`.
#[derive(Debug, Clone)]
pub struct FfmpegEncoderQuery {
    ffmpeg: PathBuf,
}

impl FfmpegEncoderQuery {
    pub fn new(ffmpeg: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
        }
    }
}

impl EncoderQuery for FfmpegEncoderQuery {
    fn list_encoders(&self) -> CoreResult<Vec<String>> {
        let output = Command::new(&self.ffmpeg)
            .args(["-hide_banner", "-encoders"])
            .stdin(Stdio::null())
            .output()
            .map_err(|e| command_start_error(self.ffmpeg.display().to_string(), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CoreError::EncoderProbe(format!(
                "ffmpeg -encoders exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let encoders = parse_encoder_listing(&stdout);
        if encoders.is_empty() {
            return Err(CoreError::EncoderProbe(
                "ffmpeg -encoders produced no encoder table".to_string(),
            ));
        }
        Ok(encoders)
    }
}

/// Extracts encoder names from `ffmpeg -encoders` output.
///
/// The table starts after a line consisting of dashes. Each row is a six
/// character capability column followed by the encoder name:
///
/// ```text
///  V....D png                  PNG (Portable Network Graphics) image
/// ```
pub fn parse_encoder_listing(output: &str) -> Vec<String> {
    output
        .lines()
        .skip_while(|line| !is_separator(line))
        .skip(1)
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let _capabilities = fields.next()?;
            fields.next().map(str::to_string)
        })
        .collect()
}

fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c == '-')
}
