//! File discovery module for finding video files to process.
//!
//! Only the top level of a directory is searched; subdirectories are ignored.

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

/// Finds video files in `input_dir` whose extension is in `extensions`.
///
/// Matching is case-insensitive and the result is sorted by path.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - The matching files
/// * `Err(CoreError::Io)` - If the directory cannot be read
/// * `Err(CoreError::NoFilesFound)` - If nothing matched
///
/// # Examples
///
/// ```rust,no_run
/// use vidframes_core::find_video_files;
/// use std::path::Path;
///
/// let extensions = vec!["mp4".to_string(), "mkv".to_string()];
/// match find_video_files(Path::new("/path/to/videos"), &extensions) {
///     Ok(files) => println!("Found {} video files", files.len()),
///     Err(e) => println!("Error finding video files: {}", e),
/// }
/// ```
pub fn find_video_files(input_dir: &Path, extensions: &[String]) -> CoreResult<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(input_dir)?;
    let mut files: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();

            if !path.is_file() {
                return None;
            }

            path.extension()
                .and_then(|ext| ext.to_str())
                .filter(|ext_str| has_video_extension(ext_str, extensions))
                .map(|_| path.clone())
        })
        .collect();

    if files.is_empty() {
        return Err(CoreError::NoFilesFound(input_dir.to_path_buf()));
    }

    files.sort();
    Ok(files)
}

/// Expands a batch argument into the videos to convert.
///
/// A directory is searched with [`find_video_files`]; an existing file is
/// taken as-is regardless of its extension.
pub fn collect_batch_inputs(path: &Path, extensions: &[String]) -> CoreResult<Vec<PathBuf>> {
    if path.is_dir() {
        find_video_files(path, extensions)
    } else if path.is_file() {
        Ok(vec![path.to_path_buf()])
    } else {
        Err(CoreError::InputNotFound(path.to_path_buf()))
    }
}

fn has_video_extension(ext: &str, extensions: &[String]) -> bool {
    extensions
        .iter()
        .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
}
