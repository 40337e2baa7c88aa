use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::errors::TranscriptError;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Read every line of a UTF-8 text file
    pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>, TranscriptError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => Ok(content.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(TranscriptError::InputNotFound(path.to_path_buf())),
            Err(e) => Err(TranscriptError::Unreadable {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }
}
