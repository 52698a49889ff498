// ============================================================================
// vidframes-cli/src/commands/batch.rs
// ============================================================================
//
// BATCH COMMAND: Frames from Many Videos
//
// Every discovered video is attempted even after failures. The command exits
// with an error afterwards if any of them failed.

use super::{attach_progress, build_config, extraction_options, prepare_engine};
use crate::cli::{BatchArgs, GlobalArgs};
use crate::error::CliResult;
use crate::output::{print_failure, print_heading, print_list_item, print_section, print_success};
use vidframes_core::{BatchItem, Converter, CoreError, collect_batch_inputs};

/// Runs the `batch` command.
pub fn run_batch(args: BatchArgs, global: &GlobalArgs) -> CliResult<()> {
    let mut config = build_config(global, args.quality)?;
    config.video_extensions = args.extensions.clone();
    config.validate()?;
    let options = extraction_options(&args.count, args.fps)?;

    let videos = collect_batch_inputs(&args.input, &config.video_extensions)?;

    if !args.json_progress {
        print_heading(&format!("Found {} video(s) to process", videos.len()));
        for (index, video) in videos.iter().enumerate() {
            print_list_item(index + 1, video.display());
        }
    }

    let paths = prepare_engine(&config, true)?;
    let mut converter = Converter::with_system_engine(&paths);
    attach_progress(&mut converter, args.json_progress);

    let items = converter.batch_convert(&videos, &args.output_dir, &options, &config);

    if !args.json_progress {
        print_batch_summary(&items);
    }

    let failed = items.iter().filter(|item| !item.is_success()).count();
    if failed > 0 {
        return Err(CoreError::OperationFailed(format!(
            "{} of {} videos failed to convert",
            failed,
            items.len()
        )));
    }
    Ok(())
}

/// Prints one line per batch item and the success tally.
pub fn print_batch_summary(items: &[BatchItem]) {
    print_section("Batch Summary");
    for item in items {
        let name = item.video_path.display();
        match (item.result(), item.error_message()) {
            (Some(result), _) => print_success(&format!(
                "{}: {} frames in {}",
                name,
                result.total_frames,
                result.output_directory.display()
            )),
            (None, Some(error)) => print_failure(&format!("{name}: {error}")),
            (None, None) => {}
        }
    }

    let successful = items.iter().filter(|item| item.is_success()).count();
    println!("\n  {}/{} videos converted", successful, items.len());
}
