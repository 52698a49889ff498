// vidframes-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vidframes_core::config::{
    DEFAULT_OUTPUT_DIR, DEFAULT_QUALITY, DEFAULT_VIDEO_EXTENSIONS, FFMPEG_PATH_ENV,
    FFPROBE_PATH_ENV,
};

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    name = "vidframes",
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "vidframes: Extract evenly spaced still frames from videos",
    long_about = "Samples frames at evenly spaced positions of a video and writes them as numbered PNG files using ffmpeg."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write logs to a timestamped file in this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// ffmpeg binary to use
    #[arg(long, global = true, value_name = "PATH", env = FFMPEG_PATH_ENV)]
    pub ffmpeg: Option<PathBuf>,

    /// ffprobe binary to use
    #[arg(long, global = true, value_name = "PATH", env = FFPROBE_PATH_ENV)]
    pub ffprobe: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extracts evenly spaced frames from a single video
    Convert(ConvertArgs),
    /// Extracts frames from every video in a directory
    Batch(BatchArgs),
    /// Shows video properties and the frames that would be extracted
    Info(InfoArgs),
}

/// How many frames to extract.
#[derive(Args, Debug, Clone, Default)]
pub struct FrameCountArgs {
    /// Number of frames to extract
    #[arg(short = 'n', long = "frames", value_name = "COUNT", conflicts_with = "auto")]
    pub frames: Option<usize>,

    /// One frame per second of video (the default)
    #[arg(long)]
    pub auto: bool,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the video file
    #[arg(value_name = "VIDEO")]
    pub video: PathBuf,

    /// Output directory for frames
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Image quality (1-31, lower is better)
    #[arg(short = 'q', long, value_name = "NUMBER", default_value_t = DEFAULT_QUALITY)]
    pub quality: u8,

    #[command(flatten)]
    pub count: FrameCountArgs,

    /// Frame rate to report in the result (does not affect sampling)
    #[arg(long, value_name = "RATE")]
    pub fps: Option<f64>,

    /// Print progress as JSON lines on stdout instead of a progress bar
    #[arg(long)]
    pub json_progress: bool,
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory containing videos, or a single video file
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    /// Base output directory; each video gets a subdirectory named after it
    #[arg(short = 'o', long = "output", value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Video file extensions to process
    #[arg(
        short = 'e',
        long = "extensions",
        value_name = "EXT",
        num_args = 1..,
        default_values_t = DEFAULT_VIDEO_EXTENSIONS.iter().map(|e| e.to_string())
    )]
    pub extensions: Vec<String>,

    /// Image quality (1-31, lower is better)
    #[arg(short = 'q', long, value_name = "NUMBER", default_value_t = DEFAULT_QUALITY)]
    pub quality: u8,

    #[command(flatten)]
    pub count: FrameCountArgs,

    /// Frame rate to report in the results (does not affect sampling)
    #[arg(long, value_name = "RATE")]
    pub fps: Option<f64>,

    /// Print progress as JSON lines on stdout instead of a progress bar
    #[arg(long)]
    pub json_progress: bool,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the video file
    #[arg(value_name = "VIDEO")]
    pub video: PathBuf,

    /// Plan for this many frames instead of one per second
    #[arg(short = 'n', long = "frames", value_name = "COUNT")]
    pub frames: Option<usize>,

    /// Print the information as JSON
    #[arg(long)]
    pub json: bool,
}
