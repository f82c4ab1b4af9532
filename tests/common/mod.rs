/*!
 * Common test utilities for the srtconv test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;
use srtconv::{Config, Controller, ScriptCapability};


pub use mock_converter::MockConverter;

/// Three plain cues
pub const THREE_CUES: &str = "1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains multiple entries.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
";

/// Simplified Chinese cues with markup, one markup-only cue and a two-line cue
pub const SIMPLIFIED_CUES: &str = "1
00:00:01,000 --> 00:00:02,000
<i>简体</i>

2
00:00:02,500 --> 00:00:03,000
{\\an8}

3
00:00:03,500 --> 00:00:05,000
这个汉语
说话
";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample subtitle file with three cues
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, THREE_CUES)
}

/// Lists the file names in a directory, sorted
pub fn list_files(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().to_string());
    }
    names.sort();
    Ok(names)
}

/// Controller with default config and the mock converter
pub fn controller_with_mock() -> Controller {
    Controller::with_config(
        Config::default(),
        ScriptCapability::with_converter(Box::new(MockConverter::new())),
    )
}

/// Controller with default config and no conversion
pub fn controller_without_conversion() -> Controller {
    Controller::with_config(Config::default(), ScriptCapability::unavailable())
}
