/*!
 * Integration tests for subtitle extraction workflow
 */

use anyhow::Result;

use brandspot::extraction::{AnalyzeSource, RuleConfig, RuleExtractor};
use brandspot::file_utils::FileManager;
use brandspot::subtitle_processor::SubtitleParser;
use crate::common;

const TWO_CUES: &str = "1
00:00:01,000 --> 00:00:02,000
I love my iPhone.

2
00:00:03,000 --> 00:00:04,000
Netflix and chill.
";

/// Test that a two-cue file parses and yields one hit per cue
#[test]
fn test_srt_workflow_withTwoCues_shouldReportPerCueHits() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "show.srt", TWO_CUES)?;

    let source = FileManager::load_source(&path, 1024)?;
    let AnalyzeSource::Subtitle { cues, .. } = &source else {
        panic!("expected subtitle source");
    };
    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0].index, 1);
    assert_eq!(cues[0].start.as_deref(), Some("00:00:01,000"));
    assert_eq!(cues[0].end.as_deref(), Some("00:00:02,000"));
    assert_eq!(cues[0].text, "I love my iPhone.");
    assert_eq!(cues[1].index, 2);
    assert_eq!(cues[1].text, "Netflix and chill.");

    let hits = RuleExtractor::default().extract(std::slice::from_ref(&source));

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].brand, "Apple");
    assert_eq!(hits[0].alias_used.as_deref(), Some("iPhone"));
    assert_eq!(hits[0].source_id.as_deref(), Some("show.srt:1"));
    assert_eq!(hits[0].timestamp_start.as_deref(), Some("00:00:01,000"));
    assert_eq!(hits[0].timestamp_end.as_deref(), Some("00:00:02,000"));
    assert_eq!(hits[0].input, "I love my iPhone.");
    assert_eq!(hits[0].context, "I love my iPhone. Netflix and chill.");

    assert_eq!(hits[1].brand, "Netflix");
    assert_eq!(hits[1].source_id.as_deref(), Some("show.srt:2"));
    assert_eq!(hits[1].timestamp_start.as_deref(), Some("00:00:03,000"));
    Ok(())
}

/// Test that Windows line endings and multi-line cues are handled
#[test]
fn test_srt_workflow_withCrlfAndMultilineCue_shouldJoinLines() {
    let content = "1\r\n00:00:01,000 --> 00:00:02,000\r\nGrab a Coke\r\nand a KFC bucket.\r\n\r\n";
    let cues = SubtitleParser::parse(content);

    assert_eq!(cues.len(), 1);
    let hits = RuleExtractor::default().extract(&[AnalyzeSource::subtitle("a.srt", cues)]);

    let brands: Vec<&str> = hits.iter().map(|h| h.brand.as_str()).collect();
    assert_eq!(brands, vec!["Coca-Cola", "KFC"]);
    assert!(hits.iter().all(|h| h.source_id.as_deref() == Some("a.srt:1")));
}

/// Test that cues without a timestamp line still produce hits without timings
#[test]
fn test_srt_workflow_withMissingTimestamp_shouldOmitTimings() {
    let cues = SubtitleParser::parse("7\nWatch it on YouTube.\n");
    let hits = RuleExtractor::default().extract(&[AnalyzeSource::subtitle("raw.srt", cues)]);

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].brand, "YouTube");
    assert_eq!(hits[0].source_id.as_deref(), Some("raw.srt:7"));
    assert!(hits[0].timestamp_start.is_none());
    assert!(hits[0].timestamp_end.is_none());
}

/// Test that dedup is per cue, not per file
#[test]
fn test_srt_workflow_sameBrandInTwoCues_shouldReportBoth() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nUber, Uber, Uber.\n\n2\n00:00:03,000 --> 00:00:04,000\nAnother Uber.\n";
    let hits = RuleExtractor::default().extract(&[AnalyzeSource::subtitle("u.srt", SubtitleParser::parse(content))]);

    let ids: Vec<&str> = hits.iter().filter_map(|h| h.source_id.as_deref()).collect();
    assert_eq!(ids, vec!["u.srt:1", "u.srt:2"]);
}

/// Test the context window over subtitle cues
#[test]
fn test_srt_workflow_withWiderWindow_shouldSpanCues() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nOne.\n\n2\n00:00:02,000 --> 00:00:03,000\nTwo.\n\n3\n00:00:03,000 --> 00:00:04,000\nBuy a Tesla.\n";
    let mut config = RuleConfig::default();
    config.context_window.prev = 2;
    config.context_window.next = 0;

    let hits = RuleExtractor::new(config).extract(&[AnalyzeSource::subtitle("t.srt", SubtitleParser::parse(content))]);

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].context, "One. Two. Buy a Tesla.");
}

/// Test that a byte order mark in front of the first index does not cost a cue
#[test]
fn test_srt_workflow_withByteOrderMarkAndCrlf_shouldReportBothCues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = format!("\u{feff}{}", TWO_CUES.replace('\n', "\r\n"));
    let path = common::create_test_file(temp_dir.path(), "show.srt", &content)?;

    let source = FileManager::load_source(&path, 1024)?;
    let hits = RuleExtractor::default().extract(std::slice::from_ref(&source));

    let found: Vec<(&str, Option<&str>)> = hits.iter().map(|h| (h.brand.as_str(), h.source_id.as_deref())).collect();
    assert_eq!(found, vec![("Apple", Some("show.srt:1")), ("Netflix", Some("show.srt:2"))]);
    assert_eq!(hits[0].alias_used.as_deref(), Some("iPhone"));
    Ok(())
}
