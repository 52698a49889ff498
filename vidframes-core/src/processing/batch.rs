//! Batch conversion over several videos.
//!
//! Each input gets its own subdirectory, named after the file stem, under the
//! base output directory. A failing input is recorded and the batch moves on.

use crate::config::ConverterConfig;
use crate::events::Event;
use crate::external::{EncoderQuery, FfmpegSpawner, FfprobeExecutor};
use crate::processing::conversion::{ConversionResult, Converter, ExtractionOptions};
use crate::utils::{get_file_stem_safe, get_filename_safe};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Outcome of one batch input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Converted(ConversionResult),
    Failed { error: String },
}

/// One record per batch input, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchItem {
    pub video_path: PathBuf,
    pub outcome: BatchOutcome,
}

impl BatchItem {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, BatchOutcome::Converted(_))
    }

    pub fn result(&self) -> Option<&ConversionResult> {
        match &self.outcome {
            BatchOutcome::Converted(result) => Some(result),
            BatchOutcome::Failed { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            BatchOutcome::Converted(_) => None,
            BatchOutcome::Failed { error } => Some(error),
        }
    }
}

impl<S, P, Q> Converter<S, P, Q>
where
    S: FfmpegSpawner,
    P: FfprobeExecutor,
    Q: EncoderQuery,
{
    /// Converts every video in `videos`, one after another.
    ///
    /// Never fails as a whole; per-file errors end up in the returned items.
    pub fn batch_convert(
        &self,
        videos: &[PathBuf],
        base_output_dir: &Path,
        options: &ExtractionOptions,
        config: &ConverterConfig,
    ) -> Vec<BatchItem> {
        let total_files = videos.len();
        self.emit(Event::BatchStarted {
            total_files,
            file_list: videos
                .iter()
                .map(|v| get_filename_safe(v).unwrap_or_else(|_| v.display().to_string()))
                .collect(),
            output_dir: base_output_dir.display().to_string(),
        });

        let mut items = Vec::with_capacity(total_files);
        for (index, video) in videos.iter().enumerate() {
            self.emit(Event::BatchFileStarted {
                current_file: index + 1,
                total_files,
                input_file: video.display().to_string(),
            });
            log::info!("[{}/{}] {}", index + 1, total_files, video.display());

            let outcome = get_file_stem_safe(video)
                .and_then(|stem| {
                    self.convert_video(video, &base_output_dir.join(stem), options, config)
                })
                .map_or_else(
                    |e| {
                        log::error!("Failed to convert {}: {}", video.display(), e);
                        BatchOutcome::Failed {
                            error: e.to_string(),
                        }
                    },
                    BatchOutcome::Converted,
                );

            items.push(BatchItem {
                video_path: video.clone(),
                outcome,
            });
        }

        let successful_count = items.iter().filter(|item| item.is_success()).count();
        log::info!(
            "Batch finished: {}/{} videos converted",
            successful_count,
            total_files
        );
        self.emit(Event::BatchComplete {
            successful_count,
            total_files,
        });

        items
    }
}
