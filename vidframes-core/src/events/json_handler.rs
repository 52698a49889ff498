//! JSON progress handler for structured progress output
//!
//! Writes one JSON object per line so a GUI or other front end can follow a
//! conversion from a child process's stdout.

use super::{Event, EventHandler};
use serde_json::json;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Event handler that outputs progress events as structured JSON to stdout
pub struct JsonProgressHandler {
    output: Mutex<Box<dyn Write + Send>>,
}

impl JsonProgressHandler {
    /// Create a new JSON progress handler that writes to stdout
    pub fn new() -> Self {
        Self {
            output: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a new JSON progress handler with a custom writer
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            output: Mutex::new(writer),
        }
    }

    fn get_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    fn write_json(&self, value: serde_json::Value) {
        if let Ok(mut output) = self.output.lock() {
            if let Ok(json_str) = serde_json::to_string(&value) {
                let _ = writeln!(output, "{}", json_str);
                let _ = output.flush();
            }
        }
    }
}

/// The JSON line written for `event`.
pub fn event_to_json(event: &Event, timestamp: u64) -> serde_json::Value {
    match event {
        Event::ConversionStarted {
            input_file,
            output_dir,
            duration,
            total_frames,
        } => json!({
            "type": "conversion_started",
            "input_file": input_file,
            "output_dir": output_dir,
            "duration_seconds": duration,
            "total_frames": total_frames,
            "timestamp": timestamp
        }),

        Event::FrameExtracted {
            current,
            total,
            percent,
        } => json!({
            "type": "frame_progress",
            "current": current,
            "total": total,
            "percent": percent,
            "timestamp": timestamp
        }),

        Event::ConversionComplete {
            input_file,
            output_dir,
            frames_written,
        } => json!({
            "type": "conversion_complete",
            "input_file": input_file,
            "output_dir": output_dir,
            "frames_written": frames_written,
            "timestamp": timestamp
        }),

        Event::Error { title, message } => json!({
            "type": "error",
            "title": title,
            "message": message,
            "timestamp": timestamp
        }),

        Event::Warning { message } => json!({
            "type": "warning",
            "message": message,
            "timestamp": timestamp
        }),

        Event::BatchStarted {
            total_files,
            file_list,
            output_dir,
        } => json!({
            "type": "batch_started",
            "total_files": total_files,
            "files": file_list,
            "output_dir": output_dir,
            "timestamp": timestamp
        }),

        Event::BatchFileStarted {
            current_file,
            total_files,
            input_file,
        } => json!({
            "type": "batch_file_started",
            "current_file": current_file,
            "total_files": total_files,
            "input_file": input_file,
            "timestamp": timestamp
        }),

        Event::BatchComplete {
            successful_count,
            total_files,
        } => json!({
            "type": "batch_complete",
            "successful_count": successful_count,
            "total_files": total_files,
            "timestamp": timestamp
        }),
    }
}

impl EventHandler for JsonProgressHandler {
    fn handle(&self, event: &Event) {
        self.write_json(event_to_json(event, Self::get_timestamp()));
    }
}

impl Default for JsonProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
