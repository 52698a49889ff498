// vidframes-cli/src/commands/info.rs
//
// `info`: prints the probed properties of a video and the extraction plan
// a conversion with the same frame count would follow.

use super::{build_config, prepare_engine};
use crate::cli::{GlobalArgs, InfoArgs};
use crate::error::CliResult;
use crate::output::{print_heading, print_info, print_section};
use serde::Serialize;
use vidframes_core::config::DEFAULT_QUALITY;
use vidframes_core::processing::resolve_frame_count;
use vidframes_core::{Converter, CoreError, FrameCountMode, VideoMetadata, format_duration};

/// Frames a conversion would extract and how far apart they are.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionPlan {
    pub frame_count: usize,
    /// Source frames between two samples
    pub frame_interval: f64,
    /// Seconds between two samples
    pub time_interval: f64,
}

impl ExtractionPlan {
    pub fn new(metadata: &VideoMetadata, frames: Option<usize>) -> CliResult<Self> {
        let frame_count = resolve_frame_count(
            frames.map(|count| FrameCountMode::Manual { count }),
            FrameCountMode::Auto,
            metadata,
        )?;
        Ok(Self {
            frame_count,
            frame_interval: metadata.total_frames as f64 / frame_count as f64,
            time_interval: metadata.duration / frame_count as f64,
        })
    }
}

#[derive(Serialize)]
struct InfoReport<'a> {
    file: String,
    metadata: &'a VideoMetadata,
    plan: &'a ExtractionPlan,
}

/// Runs the `info` command.
pub fn run_info(args: InfoArgs, global: &GlobalArgs) -> CliResult<()> {
    let config = build_config(global, DEFAULT_QUALITY)?;
    if args.frames == Some(0) {
        return Err(CoreError::InvalidFrameCount(0));
    }
    if !args.video.is_file() {
        return Err(CoreError::InputNotFound(args.video));
    }

    let paths = prepare_engine(&config, false)?;
    let converter = Converter::with_system_engine(&paths);

    log::info!("Analyzing {}", args.video.display());
    let metadata = converter.get_video_info(&args.video)?;
    let plan = ExtractionPlan::new(&metadata, args.frames)?;

    if args.json {
        let report = InfoReport {
            file: args.video.display().to_string(),
            metadata: &metadata,
            plan: &plan,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_heading("Video Information");
    print_info("File", args.video.display());
    print_info(
        "Duration",
        format!("{:.2} seconds ({})", metadata.duration, format_duration(metadata.duration)),
    );
    print_info("Frame Rate", format!("{:.2} fps", metadata.frame_rate));
    print_info("Total Frames", metadata.total_frames);
    print_info("Resolution", format!("{}x{}", metadata.width, metadata.height));
    print_info("Codec", &metadata.codec);

    print_section(&format!("Would extract {} frames", plan.frame_count));
    print_info(
        "Frame interval",
        format!("every {:.1} frames", plan.frame_interval),
    );
    print_info(
        "Time interval",
        format!("every {:.2} seconds", plan.time_interval),
    );
    Ok(())
}
