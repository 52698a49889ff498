// vidframes-core/tests/batch_tests.rs

use vidframes_core::external::mocks::{
    MockEncoderQuery, MockFfmpegSpawner, MockFfprobeExecutor, sample_report,
};
use vidframes_core::{
    BatchOutcome, Converter, ConverterConfig, ExtractionOptions, collect_batch_inputs,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_batch_isolates_failures() -> Result<(), Box<dyn std::error::Error>> {
    let input_dir = tempdir()?;
    let good = input_dir.path().join("good.mp4");
    fs::write(&good, b"dummy content")?;
    let missing = input_dir.path().join("missing.mp4");
    let base_output = input_dir.path().join("frames");

    let spawner = MockFfmpegSpawner::new();
    let ffprobe = MockFfprobeExecutor::new();
    ffprobe.expect_report(&good, sample_report(3.0, "24/1", 320, 240));
    spawner.add_success_expectations(3);

    let query = MockEncoderQuery::default();
    let converter = Converter::new(spawner.clone(), ffprobe, query.clone());
    let items = converter.batch_convert(
        &[good.clone(), missing.clone()],
        &base_output,
        &ExtractionOptions::default(),
        &ConverterConfig::default(),
    );

    assert_eq!(items.len(), 2);

    assert_eq!(items[0].video_path, good);
    assert!(items[0].is_success());
    let result = items[0].result().expect("good.mp4 should convert");
    assert_eq!(result.total_frames, 3);
    assert!(base_output.join("good").join("frame_003.png").is_file());

    assert_eq!(items[1].video_path, missing);
    assert!(!items[1].is_success());
    let error = items[1].error_message().expect("missing.mp4 should fail");
    assert!(error.contains("missing.mp4"));
    assert!(!base_output.join("missing").exists());

    assert_eq!(spawner.get_received_calls().len(), 3);
    assert_eq!(query.call_count(), 1);
    Ok(())
}

#[test]
fn test_batch_continues_after_failure() -> Result<(), Box<dyn std::error::Error>> {
    let input_dir = tempdir()?;
    let broken = input_dir.path().join("a_broken.mp4");
    let fine = input_dir.path().join("b_fine.mp4");
    fs::write(&broken, b"garbage")?;
    fs::write(&fine, b"dummy content")?;

    let spawner = MockFfmpegSpawner::new();
    let ffprobe = MockFfprobeExecutor::new();
    ffprobe.expect_failure(&broken, "Invalid data found when processing input");
    ffprobe.expect_report(&fine, sample_report(2.5, "25/1", 320, 240));
    spawner.add_success_expectations(2);

    let config = ConverterConfig::default();
    let inputs = collect_batch_inputs(input_dir.path(), &config.video_extensions)?;
    assert_eq!(inputs, vec![broken.clone(), fine.clone()]);

    let converter = Converter::new(spawner, ffprobe, MockEncoderQuery::default());
    let items = converter.batch_convert(
        &inputs,
        &input_dir.path().join("frames"),
        &ExtractionOptions::default(),
        &config,
    );

    assert!(matches!(items[0].outcome, BatchOutcome::Failed { .. }));
    assert!(items[1].is_success());
    Ok(())
}
