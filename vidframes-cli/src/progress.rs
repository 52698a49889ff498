// ============================================================================
// vidframes-cli/src/progress.rs
// ============================================================================
//
// PROGRESS REPORTING: Terminal progress bar driven by core events
//
// `ProgressBarHandler` turns the converter's `ConversionStarted` /
// `FrameExtracted` / `ConversionComplete` events into an indicatif bar. A new
// bar is created for every conversion, so batch runs show one bar per video.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Mutex;
use vidframes_core::{Event, EventHandler};

const BAR_TEMPLATE: &str = "{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len} frames ({eta})";

/// Event handler drawing one progress bar per conversion on stderr.
pub struct ProgressBarHandler {
    bar: Mutex<Option<ProgressBar>>,
    draw_target: fn() -> ProgressDrawTarget,
}

impl ProgressBarHandler {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
            draw_target: ProgressDrawTarget::stderr,
        }
    }

    /// A handler whose bars are never drawn.
    pub fn hidden() -> Self {
        Self {
            bar: Mutex::new(None),
            draw_target: ProgressDrawTarget::hidden,
        }
    }

    fn create_bar(&self, total: u64, message: String) -> ProgressBar {
        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ ");
        let bar = ProgressBar::with_draw_target(Some(total), (self.draw_target)());
        bar.set_style(style);
        bar.set_message(message);
        bar
    }

    /// Position of the active bar, if any.
    pub fn position(&self) -> Option<u64> {
        self.bar
            .lock()
            .ok()
            .and_then(|bar| bar.as_ref().map(ProgressBar::position))
    }
}

impl Default for ProgressBarHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for ProgressBarHandler {
    fn handle(&self, event: &Event) {
        let Ok(mut slot) = self.bar.lock() else {
            return;
        };

        match event {
            Event::ConversionStarted {
                input_file,
                total_frames,
                ..
            } => {
                if let Some(previous) = slot.take() {
                    previous.finish_and_clear();
                }
                let name = std::path::Path::new(input_file)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| input_file.clone());
                *slot = Some(self.create_bar(*total_frames as u64, name));
            }
            Event::FrameExtracted { current, .. } => {
                if let Some(bar) = slot.as_ref() {
                    bar.set_position(*current as u64);
                }
            }
            Event::ConversionComplete { .. } => {
                if let Some(bar) = slot.as_ref() {
                    bar.finish();
                }
            }
            Event::Error { .. } => {
                if let Some(bar) = slot.take() {
                    bar.abandon();
                }
            }
            Event::Warning { message } => match slot.as_ref() {
                Some(bar) => bar.println(message),
                None => log::debug!("{}", message),
            },
            _ => {}
        }
    }
}
