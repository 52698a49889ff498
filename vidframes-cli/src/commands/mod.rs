//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command. The
//! helpers here are shared by all of them.

/// `convert`: frames from a single video.
pub mod convert;

/// `batch`: frames from every video in a directory.
pub mod batch;

/// `info`: video properties and extraction plan.
pub mod info;

use crate::cli::{FrameCountArgs, GlobalArgs};
use crate::error::{CliErrorContext, CliResult};
use crate::progress::ProgressBarHandler;
use std::sync::Arc;
use vidframes_core::external::{EncoderQuery, FfmpegSpawner, FfprobeExecutor};
use vidframes_core::{
    Converter, ConverterConfig, ConverterConfigBuilder, EnginePaths, ExtractionOptions,
    FrameCountMode, JsonProgressHandler, check_dependency,
};

/// Builds and validates the configuration from global flags and a quality.
pub(crate) fn build_config(global: &GlobalArgs, quality: u8) -> CliResult<ConverterConfig> {
    let mut builder = ConverterConfigBuilder::new().quality(quality);
    if let Some(ffmpeg) = &global.ffmpeg {
        builder = builder.ffmpeg_path(ffmpeg.clone());
    }
    if let Some(ffprobe) = &global.ffprobe {
        builder = builder.ffprobe_path(ffprobe.clone());
    }
    let config = builder.build();
    config.validate()?;
    Ok(config)
}

/// Maps the frame count flags onto extraction options and validates them.
pub(crate) fn extraction_options(
    count: &FrameCountArgs,
    fps: Option<f64>,
) -> CliResult<ExtractionOptions> {
    let frame_count = match (count.frames, count.auto) {
        (Some(n), _) => Some(FrameCountMode::Manual { count: n }),
        (None, true) => Some(FrameCountMode::Auto),
        (None, false) => None,
    };
    let options = ExtractionOptions {
        frame_count,
        frame_rate: fps,
    };
    options.validate()?;
    Ok(options)
}

/// Resolves the engine binaries and checks that the requested ones start.
pub(crate) fn prepare_engine(
    config: &ConverterConfig,
    need_ffmpeg: bool,
) -> CliResult<EnginePaths> {
    let paths = EnginePaths::resolve(config);
    if need_ffmpeg {
        check_dependency(&paths.ffmpeg).cli_context("ffmpeg is required to extract frames")?;
    }
    check_dependency(&paths.ffprobe).cli_context("ffprobe is required to read video metadata")?;
    Ok(paths)
}

/// Registers either the JSON line handler or a terminal progress bar.
pub(crate) fn attach_progress<S, P, Q>(converter: &mut Converter<S, P, Q>, json_progress: bool)
where
    S: FfmpegSpawner,
    P: FfprobeExecutor,
    Q: EncoderQuery,
{
    if json_progress {
        converter.add_handler(Arc::new(JsonProgressHandler::new()));
    } else if console::Term::stderr().is_term() {
        converter.add_handler(Arc::new(ProgressBarHandler::new()));
    }
}
