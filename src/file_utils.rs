use anyhow::{Result, Context};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::InputError;
use crate::extraction::AnalyzeSource;
use crate::subtitle_processor::{strip_bom, SubtitleParser};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Recursively find `.txt` and `.srt` files below `dir`, sorted by path
    pub fn collect_input_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && SourceKind::from_path(path).is_some() {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file into an analysis source.
    ///
    /// `.srt` files are parsed into cues, `.txt` files are taken as plain text.
    /// The source is named after the file's base name.
    pub fn load_source<P: AsRef<Path>>(path: P, max_bytes: u64) -> Result<AnalyzeSource, InputError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let kind = SourceKind::from_path(path).ok_or_else(|| InputError::UnsupportedFile(name.clone()))?;

        let size = fs::metadata(path)
            .map_err(|source| InputError::Unreadable { name: name.clone(), source })?
            .len();
        if size > max_bytes {
            return Err(InputError::FileTooLarge { name, size, limit: max_bytes });
        }

        let bytes = fs::read(path).map_err(|source| InputError::Unreadable { name: name.clone(), source })?;
        let decoded = String::from_utf8_lossy(&bytes);
        let content = strip_bom(&decoded);

        let source = match kind {
            SourceKind::Subtitle => {
                let cues = SubtitleParser::parse(content);
                debug!("Loaded '{}' with {} cues", name, cues.len());
                AnalyzeSource::subtitle(name, cues)
            }
            SourceKind::Text => {
                debug!("Loaded '{}' ({} bytes)", name, size);
                AnalyzeSource::plain_file(name, content)
            }
        };

        Ok(source)
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir(parent)?;
            }
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }
}

/// Accepted input file kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Plain text file (TXT)
    Text,
    /// Subtitle file (SRT)
    Subtitle,
}

impl SourceKind {
    /// Kind for `path` by its lower-cased extension, `None` if unsupported
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "txt" => Some(Self::Text),
            "srt" => Some(Self::Subtitle),
            _ => None,
        }
    }
}
