//! Core library for extracting evenly spaced still frames from video files
//! using ffmpeg and ffprobe.
//!
//! The crate computes which timestamps to sample, asks ffmpeg for one frame
//! per timestamp and reports progress through events. Decoding and encoding
//! happen entirely in the external engine.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vidframes_core::{Converter, ConverterConfig, EnginePaths, ExtractionOptions};
//! use std::path::Path;
//!
//! let config = ConverterConfig::default();
//! let converter = Converter::with_system_engine(&EnginePaths::resolve(&config));
//!
//! let result = converter
//!     .convert_video(
//!         Path::new("/path/to/video.mp4"),
//!         Path::new("frames"),
//!         &ExtractionOptions::manual(24),
//!         &config,
//!     )
//!     .unwrap();
//! println!("Wrote {} frames to {}", result.total_frames, result.output_directory.display());
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod events;
pub mod external;
pub mod processing;
pub mod utils;

// Re-exports for public API
pub use config::{ConverterConfig, ConverterConfigBuilder};
pub use discovery::{collect_batch_inputs, find_video_files};
pub use error::{CoreError, CoreResult};
pub use events::{Event, EventDispatcher, EventHandler, JsonProgressHandler};
pub use external::{EnginePaths, check_dependency};
pub use processing::{
    BatchItem, BatchOutcome, ConversionResult, Converter, EncoderCapabilities, ExtractedFrame,
    ExtractionOptions, FrameCountMode, FrameFormat, VideoMetadata, auto_frame_count,
    parse_frame_rate, sample_timestamps,
};
pub use utils::{format_duration, frame_file_name};
