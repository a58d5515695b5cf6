/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use brandspot::errors::InputError;
use brandspot::extraction::AnalyzeSource;
use brandspot::file_utils::{FileManager, SourceKind};
use crate::common;

const LIMIT: u64 = 5 * 1024 * 1024;

/// Test that .srt files are parsed into cues named after the file
#[test]
fn test_load_source_withSrtFile_shouldParseCues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "episode.srt")?;

    let source = FileManager::load_source(&path, LIMIT)?;

    match source {
        AnalyzeSource::Subtitle { filename, cues } => {
            assert_eq!(filename, "episode.srt");
            assert_eq!(cues.len(), 2);
            assert_eq!(cues[0].start.as_deref(), Some("00:00:01,000"));
        }
        other => panic!("expected subtitle source, got {:?}", other),
    }
    Ok(())
}

/// Test that .txt files become plain sources with a filename
#[test]
fn test_load_source_withTxtFile_shouldReadPlainText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "notes.TXT", "I took an Uber.")?;

    let source = FileManager::load_source(&path, LIMIT)?;
    assert_eq!(source, AnalyzeSource::plain_file("notes.TXT", "I took an Uber."));
    Ok(())
}

/// Test that other extensions are rejected
#[test]
fn test_load_source_withUnsupportedExtension_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "page.html", "<p>Uber</p>")?;

    let result = FileManager::load_source(&path, LIMIT);
    assert!(matches!(result, Err(InputError::UnsupportedFile(ref name)) if name == "page.html"));
    Ok(())
}

/// Test that files over the limit are rejected
#[test]
fn test_load_source_withTooLargeFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "big.txt", "0123456789")?;

    let result = FileManager::load_source(&path, 5);
    assert!(matches!(result, Err(InputError::FileTooLarge { size: 10, limit: 5, .. })));
    Ok(())
}

/// Test that a missing file is reported as unreadable
#[test]
fn test_load_source_withMissingFile_shouldFail() {
    let result = FileManager::load_source("definitely_missing_12345.txt", LIMIT);
    assert!(matches!(result, Err(InputError::Unreadable { .. })));
}

/// Test that invalid UTF-8 is read lossily
#[test]
fn test_load_source_withInvalidUtf8_shouldReplaceBytes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("latin1.txt");
    std::fs::write(&path, b"Caf\xe9 Uber")?;

    match FileManager::load_source(&path, LIMIT)? {
        AnalyzeSource::Plain { text, .. } => {
            assert!(text.ends_with("Uber"));
            assert!(text.contains('\u{FFFD}'));
        }
        other => panic!("expected plain source, got {:?}", other),
    }
    Ok(())
}

/// Test that a leading byte order mark is dropped from plain text
#[test]
fn test_load_source_withByteOrderMark_shouldStripIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "bom.txt", "\u{feff}Uber rocks")?;

    let source = FileManager::load_source(&path, LIMIT)?;
    assert_eq!(source, AnalyzeSource::plain_file("bom.txt", "Uber rocks"));
    Ok(())
}

/// Test that directory walks keep only supported files, sorted
#[test]
fn test_collect_input_files_shouldFilterAndSort() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "b.txt", "b")?;
    common::create_test_file(root, "a.srt", "1\nA\n")?;
    common::create_test_file(root, "nested/c.txt", "c")?;
    common::create_test_file(root, "ignored.md", "x")?;

    let files = FileManager::collect_input_files(root)?;
    let names: Vec<String> = files
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();

    assert_eq!(names, vec!["a.srt", "b.txt", "nested/c.txt"]);
    Ok(())
}

/// Test extension detection
#[test]
fn test_source_kind_fromPath_shouldIgnoreCase() {
    assert_eq!(SourceKind::from_path("a.SRT"), Some(SourceKind::Subtitle));
    assert_eq!(SourceKind::from_path("a.txt"), Some(SourceKind::Text));
    assert_eq!(SourceKind::from_path("a.vtt"), None);
    assert_eq!(SourceKind::from_path("README"), None);
}

/// Test that writing creates missing parent directories
#[test]
fn test_write_to_file_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("out/deep/hits.json");

    FileManager::write_to_file(&path, "[]")?;

    assert_eq!(std::fs::read_to_string(&path)?, "[]");
    assert!(FileManager::dir_exists(temp_dir.path().join("out/deep")));
    Ok(())
}
