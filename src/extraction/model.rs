/*!
 * Input and output records of the extraction engine.
 */

use serde::{Deserialize, Serialize};

use crate::subtitle_processor::SrtCue;

/// One document handed to the extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnalyzeSource {
    /// Free text, segmented into sentences
    Plain {
        /// Optional origin name, informational only
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filename: Option<String>,
        /// Raw document text
        text: String,
    },
    /// Subtitle transcript, one unit per cue
    #[serde(rename = "srt")]
    Subtitle {
        /// Name used to build each hit's `source_id`
        filename: String,
        /// Cues in source order
        cues: Vec<SrtCue>,
    },
}

impl AnalyzeSource {
    /// Plain source without a file name
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain { filename: None, text: text.into() }
    }

    /// Plain source read from a named file
    pub fn plain_file(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Plain { filename: Some(filename.into()), text: text.into() }
    }

    /// Subtitle source
    pub fn subtitle(filename: impl Into<String>, cues: Vec<SrtCue>) -> Self {
        Self::Subtitle { filename: filename.into(), cues }
    }

    /// File name, if any
    pub fn filename(&self) -> Option<&str> {
        match self {
            Self::Plain { filename, .. } => filename.as_deref(),
            Self::Subtitle { filename, .. } => Some(filename),
        }
    }
}

/// A brand mention found in a source.
///
/// Serialized fields follow declaration order; unset optional fields are
/// omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandHit {
    /// Canonical brand name
    pub brand: String,

    /// Heuristic confidence in `[0, 1]`
    pub certainty: f64,

    /// The unit the mention was found in
    pub input: String,

    /// Neighbouring units around the mention
    pub context: String,

    /// Exact surface text that matched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_used: Option<String>,

    /// Cue start time, subtitle sources only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_start: Option<String>,

    /// Cue end time, subtitle sources only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_end: Option<String>,

    /// `{filename}:{cueIndex}`, subtitle sources only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,

    /// Character offset of the mention within `input`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_char: Option<usize>,

    /// Character offset one past the mention within `input`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_char: Option<usize>,
}

impl BrandHit {
    /// Hit with only the mandatory fields set
    pub fn new(brand: impl Into<String>, certainty: f64, input: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            certainty,
            input: input.into(),
            context: context.into(),
            alias_used: None,
            timestamp_start: None,
            timestamp_end: None,
            source_id: None,
            start_char: None,
            end_char: None,
        }
    }
}
