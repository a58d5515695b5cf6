use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use log::{debug, trace};

// @module: SRT subtitle parsing into cues

// @const: SRT timestamp line, anchored at line start
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}:\d{2}:\d{2},\d{3})\s*-->\s*(\d{2}:\d{2}:\d{2},\d{3})")
        .expect("timestamp pattern is valid")
});

// @struct: Single subtitle cue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrtCue {
    // @field: Index as written in the source (1-based)
    pub index: usize,

    // @field: Start timestamp, HH:MM:SS,mmm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    // @field: End timestamp, HH:MM:SS,mmm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,

    // @field: Whitespace-normalized cue text
    pub text: String,
}

impl SrtCue {
    /// Creates a cue with timestamps
    pub fn new(index: usize, start: impl Into<String>, end: impl Into<String>, text: impl Into<String>) -> Self {
        SrtCue {
            index,
            start: Some(start.into()),
            end: Some(end.into()),
            text: text.into(),
        }
    }

    /// Creates a cue that had no timestamp line
    pub fn untimed(index: usize, text: impl Into<String>) -> Self {
        SrtCue {
            index,
            start: None,
            end: None,
            text: text.into(),
        }
    }
}

impl fmt::Display for SrtCue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        if let (Some(start), Some(end)) = (&self.start, &self.end) {
            writeln!(f, "{} --> {}", start, end)?;
        }
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Position of the parser within a cue block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    ExpectIndex,
    ExpectTimestamp,
    ExpectTextLines,
    ExpectBlank,
}

/// Cue under construction
#[derive(Debug)]
struct PendingCue {
    index: usize,
    start: Option<String>,
    end: Option<String>,
    lines: Vec<String>,
}

impl PendingCue {
    fn new(index: usize) -> Self {
        Self { index, start: None, end: None, lines: Vec::new() }
    }

    fn finish(self) -> SrtCue {
        SrtCue {
            index: self.index,
            start: self.start,
            end: self.end,
            text: normalize_whitespace(&self.lines.join(" ")),
        }
    }
}

/// Drop a leading UTF-8 byte order mark
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Collapse every whitespace run to one space and trim both ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// SRT parser producing cues in source order.
///
/// The parser never fails: lines it cannot place are skipped, a block without
/// a timestamp line yields a cue with unset `start`/`end`, and a block without
/// text yields a cue with empty text.
pub struct SubtitleParser;

impl SubtitleParser {
    /// Parse SRT content into cues
    pub fn parse(content: &str) -> Vec<SrtCue> {
        let content = strip_bom(content);
        let normalized = content.replace("\r\n", "\n").replace('\r', "\n");

        let mut cues = Vec::new();
        let mut state = ParserState::ExpectIndex;
        let mut pending: Option<PendingCue> = None;
        let mut skipped = 0usize;

        for (line_no, line) in normalized.split('\n').enumerate() {
            let trimmed = line.trim();
            let is_blank = trimmed.is_empty();

            // A failed timestamp match hands the same line to the text state
            let mut reprocess = true;
            while reprocess {
                reprocess = false;
                match state {
                    ParserState::ExpectIndex => {
                        if is_blank {
                            continue;
                        }
                        match trimmed.parse::<usize>() {
                            Ok(index) => {
                                pending = Some(PendingCue::new(index));
                                state = ParserState::ExpectTimestamp;
                            }
                            Err(_) => {
                                skipped += 1;
                                trace!("Skipping line {} while expecting a cue index: {}", line_no + 1, trimmed);
                            }
                        }
                    }
                    ParserState::ExpectTimestamp => {
                        if let Some(caps) = TIMESTAMP_REGEX.captures(line) {
                            if let Some(cue) = pending.as_mut() {
                                cue.start = caps.get(1).map(|m| m.as_str().to_string());
                                cue.end = caps.get(2).map(|m| m.as_str().to_string());
                            }
                            state = ParserState::ExpectTextLines;
                        } else {
                            state = ParserState::ExpectTextLines;
                            reprocess = true;
                        }
                    }
                    ParserState::ExpectTextLines => {
                        if is_blank {
                            if let Some(cue) = pending.take() {
                                cues.push(cue.finish());
                            }
                            state = ParserState::ExpectBlank;
                        } else if let Some(cue) = pending.as_mut() {
                            cue.lines.push(line.to_string());
                        }
                    }
                    ParserState::ExpectBlank => {
                        if !is_blank {
                            state = ParserState::ExpectIndex;
                            reprocess = true;
                        }
                    }
                }
            }
        }

        // End of input closes whatever cue is still open
        if let Some(cue) = pending.take() {
            cues.push(cue.finish());
        }

        debug!("Parsed {} subtitle cue(s), skipped {} stray line(s)", cues.len(), skipped);
        cues
    }
}
