//! Frame sampling and extraction logic.
//!
//! Leaf-first: capabilities and metadata feed the sampler and extractor,
//! which the conversion and batch orchestrators sequence.

/// Encoder capability probing with a per-instance cache
pub mod capabilities;

/// Video metadata inspection
pub mod metadata;

/// Timestamp sampling and frame count resolution
pub mod sampling;

/// Single-frame extraction
pub mod extractor;

/// Per-video conversion orchestration
pub mod conversion;

/// Multi-video batch orchestration
pub mod batch;

pub use batch::{BatchItem, BatchOutcome};
pub use capabilities::{CapabilityProber, EncoderCapabilities};
pub use conversion::{ConversionResult, Converter, ExtractionOptions};
pub use extractor::{ExtractedFrame, FrameFormat, ImageEncoder, select_encoder};
pub use metadata::{VideoMetadata, parse_frame_rate, read_video_metadata};
pub use sampling::{FrameCountMode, auto_frame_count, resolve_frame_count, sample_timestamps};
