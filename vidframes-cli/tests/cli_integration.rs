// Integration tests for the `vidframes` binary.
//
// All of these fail before ffmpeg is started, so they run on machines
// without the engine installed.

use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use tempfile::tempdir;

// Helper function to get the path to the compiled binary
fn vidframes_cmd() -> Command {
    let mut cmd = Command::cargo_bin("vidframes").expect("Failed to find vidframes binary");
    cmd.env_remove("VIDFRAMES_FFMPEG").env_remove("VIDFRAMES_FFPROBE");
    cmd
}

#[test]
fn test_help_lists_commands() {
    vidframes_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("convert"))
        .stdout(contains("batch"))
        .stdout(contains("info"));
}

#[test]
fn test_convert_missing_video() -> Result<(), Box<dyn Error>> {
    let output_dir = tempdir()?;

    vidframes_cmd()
        .arg("convert")
        .arg("surely/this/does/not/exist/clip.mp4")
        .arg("-o")
        .arg(output_dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Video file not found"));

    Ok(())
}

#[test]
fn test_convert_rejects_out_of_range_quality() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let video = dir.path().join("clip.mp4");
    std::fs::write(&video, "not really a video")?;

    vidframes_cmd()
        .arg("convert")
        .arg(&video)
        .args(["-q", "40"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Quality must be between"));

    Ok(())
}

#[test]
fn test_convert_rejects_zero_frames() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let video = dir.path().join("clip.mp4");
    std::fs::write(&video, "not really a video")?;

    vidframes_cmd()
        .arg("convert")
        .arg(&video)
        .args(["-n", "0"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Frame count must be greater than zero"));

    Ok(())
}

#[test]
fn test_frames_and_auto_conflict() {
    vidframes_cmd()
        .args(["convert", "clip.mp4", "-n", "3", "--auto"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_batch_empty_directory() -> Result<(), Box<dyn Error>> {
    let input_dir = tempdir()?;
    std::fs::write(input_dir.path().join("notes.txt"), "text")?;

    vidframes_cmd()
        .arg("batch")
        .arg(input_dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(contains("No video files found"));

    Ok(())
}

#[test]
fn test_info_missing_video() {
    vidframes_cmd()
        .args(["info", "surely/this/does/not/exist/clip.mp4"])
        .assert()
        .failure()
        .stderr(contains("Video file not found"));
}

#[test]
fn test_missing_engine_binary() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let video = dir.path().join("clip.mp4");
    std::fs::write(&video, "not really a video")?;

    vidframes_cmd()
        .arg("--ffmpeg")
        .arg(dir.path().join("no-such-ffmpeg"))
        .arg("convert")
        .arg(&video)
        .assert()
        .failure()
        .code(1)
        .stderr(contains("ffmpeg is required"));

    Ok(())
}
