use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

// @module: File and path utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    /// Read a whole file as raw bytes
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    /// Directory holding `path`, `.` when it has no parent component
    pub fn parent_dir<P: AsRef<Path>>(path: P) -> PathBuf {
        match path.as_ref().parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    // @generates: Input path with its extension replaced (movie.srt -> movie.txt)
    pub fn replace_extension<P: AsRef<Path>>(input_file: P, extension: &str) -> PathBuf {
        input_file.as_ref().with_extension(extension.trim_start_matches('.'))
    }

    // @generates: Named output inside the input's directory, extension forced
    pub fn named_output_path<P: AsRef<Path>>(input_file: P, output_name: &str, extension: &str) -> PathBuf {
        let output_dir = Self::parent_dir(input_file);
        output_dir.join(Self::replace_extension(output_name, extension))
    }

    // @generates: Sibling path with a marker before the extension (movie.srt -> movie_T.srt)
    pub fn suffixed_sibling_path<P: AsRef<Path>>(input_file: P, suffix: &str) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_os_string();
        output_filename.push(suffix);
        if let Some(ext) = input_file.extension() {
            output_filename.push(".");
            output_filename.push(ext);
        }

        input_file.with_file_name(output_filename)
    }

    /// Write `content` to `path` all at once.
    ///
    /// The content goes to a temporary file next to the destination which is
    /// then renamed over it, so a failed write leaves no partial file behind.
    pub fn write_atomic<P: AsRef<Path>>(path: P, content: &[u8]) -> io::Result<()> {
        let path = path.as_ref();
        let dir = Self::parent_dir(path);

        let mut temp = NamedTempFile::new_in(&dir)?;
        temp.write_all(content)?;
        temp.flush()?;
        temp.persist(path).map_err(|e| e.error)?;

        Ok(())
    }
}
