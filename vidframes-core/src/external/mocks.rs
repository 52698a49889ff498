// vidframes-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---
//
// Test doubles for every engine trait. They are compiled into the library so
// integration tests and downstream crates can drive a `Converter` without an
// ffmpeg installation.

use super::{EncoderQuery, FfmpegProcess, FfmpegSpawner, FfprobeExecutor, ProbeReport, VideoStreamInfo};
use crate::error::{CoreError, CoreResult};
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::rc::Rc;

/// Builds an `ExitStatus` carrying the given process exit code.
pub fn exit_status(code: i32) -> ExitStatus {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(code << 8)
    }
    #[cfg(windows)]
    {
        use std::os::windows::process::ExitStatusExt;
        ExitStatus::from_raw(code as u32)
    }
}

/// Event sequence of an ffmpeg run that failed with `message`.
pub fn error_events(message: &str) -> Vec<FfmpegEvent> {
    vec![
        FfmpegEvent::Log(LogLevel::Error, message.to_string()),
        FfmpegEvent::LogEOF,
    ]
}

/// Mock implementation of FfmpegProcess.
#[derive(Clone)]
pub struct MockFfmpegProcess {
    /// Events to emit when handle_events is called.
    pub events_to_emit: Rc<RefCell<Vec<FfmpegEvent>>>,
    /// Exit status to return when wait is called.
    pub exit_status: ExitStatus,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let events = self.events_to_emit.borrow().clone();
        for event in events {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

/// Represents an expected ffmpeg command call and its mock result.
pub struct MockFfmpegExpectation {
    pub arg_pattern: String,
    pub result: CoreResult<MockFfmpegProcess>,
    pub create_dummy_output: bool,
}

/// Mock implementation of FfmpegSpawner supporting multiple expectations.
///
/// Each spawn consumes the first expectation whose pattern is contained in
/// any argument. An empty pattern matches every call.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    expectations: Rc<RefCell<Vec<MockFfmpegExpectation>>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_expectation(
        &self,
        arg_pattern: &str,
        result: CoreResult<MockFfmpegProcess>,
        create_dummy_output: bool,
    ) {
        self.expectations.borrow_mut().push(MockFfmpegExpectation {
            arg_pattern: arg_pattern.to_string(),
            result,
            create_dummy_output,
        });
    }

    /// Expects a run that writes its output file and exits with status 0.
    pub fn add_success_expectation(&self, arg_pattern: &str) {
        let process = MockFfmpegProcess {
            events_to_emit: Rc::new(RefCell::new(vec![FfmpegEvent::LogEOF, FfmpegEvent::Done])),
            exit_status: exit_status(0),
        };
        self.add_expectation(arg_pattern, Ok(process), true);
    }

    /// Adds `count` catch-all success expectations.
    pub fn add_success_expectations(&self, count: usize) {
        for _ in 0..count {
            self.add_success_expectation("");
        }
    }

    pub fn add_spawn_error_expectation(&self, arg_pattern: &str, error: CoreError) {
        self.add_expectation(arg_pattern, Err(error), false);
    }

    pub fn add_exit_error_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        exit_code: i32,
    ) {
        let process = MockFfmpegProcess {
            events_to_emit: Rc::new(RefCell::new(events)),
            exit_status: exit_status(exit_code),
        };
        self.add_expectation(arg_pattern, Ok(process), false);
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }

    /// Number of expectations that were never matched.
    pub fn pending_expectations(&self) -> usize {
        self.expectations.borrow().len()
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn command(&self) -> FfmpegCommand {
        FfmpegCommand::new()
    }

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        self.received_calls.borrow_mut().push(args.clone());

        let expectation = {
            let mut expectations = self.expectations.borrow_mut();
            let found_index = expectations
                .iter()
                .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)));
            match found_index {
                Some(index) => expectations.remove(index),
                None => {
                    log::error!("MockFfmpegSpawner: No expectation found for command args: {:?}", args);
                    return Err(CoreError::OperationFailed(format!(
                        "MockFfmpegSpawner: no expectation for {args:?}"
                    )));
                }
            }
        };

        log::debug!(
            "MockFfmpegSpawner: Matched expectation with pattern '{}'",
            expectation.arg_pattern
        );

        let process = expectation.result?;
        if expectation.create_dummy_output {
            match args.last() {
                Some(output) => create_dummy_file(Path::new(output)),
                None => log::warn!("MockFfmpegSpawner couldn't find output path in args."),
            }
        }
        Ok(process)
    }
}

fn create_dummy_file(output_path: &Path) {
    if let Some(parent) = output_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            log::error!("MockFfmpegSpawner failed to create parent dir {:?}: {}", parent, e);
        }
    }
    if let Err(e) = std::fs::write(output_path, b"mock frame") {
        log::error!(
            "MockFfmpegSpawner failed to create dummy output file {:?}: {}",
            output_path,
            e
        );
    }
}

/// Builds a report for a single-stream video with the given properties.
pub fn sample_report(duration: f64, frame_rate: &str, width: i64, height: i64) -> ProbeReport {
    ProbeReport {
        format_duration: Some(format!("{duration:.6}")),
        video_stream: Some(VideoStreamInfo {
            codec_name: Some("h264".to_string()),
            width: Some(width),
            height: Some(height),
            r_frame_rate: frame_rate.to_string(),
            avg_frame_rate: frame_rate.to_string(),
            duration: Some(format!("{duration:.6}")),
        }),
    }
}

/// Mock implementation of FfprobeExecutor with per-path answers.
#[derive(Clone, Default)]
pub struct MockFfprobeExecutor {
    // Errors are not Clone, so failures are stored as reasons.
    results: Rc<RefCell<HashMap<PathBuf, Result<ProbeReport, String>>>>,
}

impl MockFfprobeExecutor {
    pub fn new() -> Self {
        Default::default()
    }

    /// Answers probes of `input_path` with `report`.
    pub fn expect_report(&self, input_path: &Path, report: ProbeReport) {
        self.results
            .borrow_mut()
            .insert(input_path.to_path_buf(), Ok(report));
    }

    /// Makes probes of `input_path` fail as if ffprobe could not parse it.
    pub fn expect_failure(&self, input_path: &Path, reason: &str) {
        self.results
            .borrow_mut()
            .insert(input_path.to_path_buf(), Err(reason.to_string()));
    }
}

impl FfprobeExecutor for MockFfprobeExecutor {
    fn probe(&self, input_path: &Path) -> CoreResult<ProbeReport> {
        log::debug!("MockFfprobeExecutor::probe called for: {}", input_path.display());
        match self.results.borrow().get(input_path) {
            Some(Ok(report)) => Ok(report.clone()),
            Some(Err(reason)) => Err(CoreError::Probe {
                path: input_path.to_path_buf(),
                reason: reason.clone(),
            }),
            None => Err(CoreError::Probe {
                path: input_path.to_path_buf(),
                reason: "MockFfprobeExecutor: no expectation set for this path".to_string(),
            }),
        }
    }
}

/// Mock implementation of EncoderQuery that counts its invocations.
#[derive(Clone)]
pub struct MockEncoderQuery {
    result: Result<Vec<String>, String>,
    calls: Rc<Cell<usize>>,
}

impl MockEncoderQuery {
    /// A query answering with the given encoder names.
    pub fn with_encoders(encoders: &[&str]) -> Self {
        Self {
            result: Ok(encoders.iter().map(|e| (*e).to_string()).collect()),
            calls: Rc::new(Cell::new(0)),
        }
    }

    /// A query that always fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: Rc::new(Cell::new(0)),
        }
    }

    /// How many times `list_encoders` ran. Clones share the counter.
    pub fn call_count(&self) -> usize {
        self.calls.get()
    }
}

impl Default for MockEncoderQuery {
    fn default() -> Self {
        Self::with_encoders(&["png", "mjpeg", "bmp"])
    }
}

impl EncoderQuery for MockEncoderQuery {
    fn list_encoders(&self) -> CoreResult<Vec<String>> {
        self.calls.set(self.calls.get() + 1);
        self.result.clone().map_err(CoreError::EncoderProbe)
    }
}
