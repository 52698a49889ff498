//! Progress and status events.
//!
//! The converter reports what it is doing through [`Event`]s delivered
//! synchronously, on the extraction thread, to every registered
//! [`EventHandler`]. Handlers must return quickly.

use std::sync::Arc;

pub mod json_handler;

pub use json_handler::JsonProgressHandler;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // Conversion events
    ConversionStarted {
        input_file: String,
        output_dir: String,
        duration: f64,
        total_frames: usize,
    },

    FrameExtracted {
        current: usize,
        total: usize,
        percent: f32,
    },

    ConversionComplete {
        input_file: String,
        output_dir: String,
        frames_written: usize,
    },

    // Error events
    Error {
        title: String,
        message: String,
    },

    Warning {
        message: String,
    },

    // Batch processing events
    BatchStarted {
        total_files: usize,
        file_list: Vec<String>,
        output_dir: String,
    },

    BatchFileStarted {
        current_file: usize,
        total_files: usize,
        input_file: String,
    },

    BatchComplete {
        successful_count: usize,
        total_files: usize,
    },
}

impl Event {
    /// Progress tick for frame `current` of `total`.
    pub fn frame_extracted(current: usize, total: usize) -> Self {
        let percent = if total == 0 {
            100.0
        } else {
            (current as f32 / total as f32) * 100.0
        };
        Event::FrameExtracted {
            current,
            total,
            percent,
        }
    }
}

pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &Event);
}

pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    pub fn emit(&self, event: Event) {
        for handler in &self.handlers {
            handler.handle(&event);
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Handler that keeps every event it sees.
#[derive(Default)]
pub struct RecordingHandler {
    events: std::sync::Mutex<Vec<Event>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the events received so far.
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl EventHandler for RecordingHandler {
    fn handle(&self, event: &Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_extracted_percent() {
        assert_eq!(
            Event::frame_extracted(1, 4),
            Event::FrameExtracted {
                current: 1,
                total: 4,
                percent: 25.0
            }
        );
    }

    #[test]
    fn test_dispatcher_fans_out() {
        let first = Arc::new(RecordingHandler::new());
        let second = Arc::new(RecordingHandler::new());

        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_handler(first.clone());
        dispatcher.add_handler(second.clone());
        dispatcher.emit(Event::Warning {
            message: "lossy".to_string(),
        });

        assert_eq!(first.events().len(), 1);
        assert_eq!(second.events(), first.events());
    }
}
