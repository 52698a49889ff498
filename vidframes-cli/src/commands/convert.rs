// ============================================================================
// vidframes-cli/src/commands/convert.rs
// ============================================================================
//
// CONVERT COMMAND: Frames from a Single Video
//
// Validates the arguments, checks the engine, runs one conversion and prints
// a summary. Argument problems are reported before ffmpeg is looked up.

use super::{attach_progress, build_config, extraction_options, prepare_engine};
use crate::cli::{ConvertArgs, GlobalArgs};
use crate::error::CliResult;
use crate::output::{print_info, print_section, print_success, print_warning};
use vidframes_core::{ConversionResult, Converter, CoreError, format_duration};

/// Runs the `convert` command.
pub fn run_convert(args: ConvertArgs, global: &GlobalArgs) -> CliResult<()> {
    let config = build_config(global, args.quality)?;
    let options = extraction_options(&args.count, args.fps)?;

    if !args.video.is_file() {
        return Err(CoreError::InputNotFound(args.video));
    }

    let paths = prepare_engine(&config, true)?;
    let mut converter = Converter::with_system_engine(&paths);
    attach_progress(&mut converter, args.json_progress);

    log::info!(
        "Converting {} into {}",
        args.video.display(),
        args.output_dir.display()
    );
    let result = converter.convert_video(&args.video, &args.output_dir, &options, &config)?;

    if !args.json_progress {
        print_conversion_summary(&result);
    }
    Ok(())
}

/// Prints the human-readable result of one conversion.
pub fn print_conversion_summary(result: &ConversionResult) {
    let video = &result.original_video_info;

    print_section("Conversion Complete");
    print_info(
        "Duration",
        format!("{} ({:.2}s)", format_duration(video.duration), video.duration),
    );
    print_info("Resolution", format!("{}x{}", video.width, video.height));
    print_info("Frame rate", format!("{:.2} fps", result.effective_frame_rate));
    print_info("Frames written", result.total_frames);
    print_info("Output", result.output_directory.display());

    let mislabeled = result.mislabeled_frames();
    if mislabeled > 0 {
        print_warning(&format!(
            "{mislabeled} frames contain JPEG data because no PNG encoder is available"
        ));
    }
    print_success(&format!("Extracted {} frames", result.total_frames));
}
