/*!
 * Prompt construction for language-model brand extraction.
 *
 * A prompt has three sections: a pretty-printed JSON CONFIG block, fixed
 * INSTRUCTIONS and a fenced INPUT block rendered from the sources.
 */

use serde::{Deserialize, Serialize};

use crate::extraction::aliases::AMBIGUOUS_TOKENS;
use crate::extraction::context::ContextWindowConfig;
use crate::extraction::model::AnalyzeSource;

/// System message sent with every extraction prompt
pub const SYSTEM_PROMPT: &str = "You extract brand entities and return strict JSON arrays only.";

/// Fixed instruction text of the prompt
pub const INSTRUCTIONS: &str = r#"You are a brand-entity extractor.

Goal
From the provided INPUT (plain text or SRT), extract every occurrence of a real-world brand/company/product line/streaming service.

Output
Return a strict JSON array of objects. Include only the fields listed in output_fields from CONFIG, in that exact field order if possible. If none found and return_empty_array_when_none is true, return [].

Detection
- Accept proper nouns and brand-verbs (e.g., “Googled”, “Zillowed”).
- Accept proprietary product/feature names (e.g., “Zestimate”, “PageRank”) and map to parent brand.
- Include media outlets and entertainment titles as brands.
- Support co-branding: if a parent and child brand appear, return both.

Scoring
- Assign certainty in [0,1] and enforce min_certainty and detection_mode.

Canonicalization
- Normalize aliases using canonicalization.examples and alias_map_override.add when present.
- Exclude any alias listed in alias_map_override.remove.
- If prefer_parent_for_product_lines is true, map well-known product lines to the parent brand.

Input Handling
- SRT: ignore index/timestamp markup; use each cue as a unit; include timestamps and source_id where available.
- Plain text: treat sentences as units; context may include neighboring sentences.

Ambiguity
- Use ambiguity_rules. Boost certainty with boost_cues, reduce for idioms/metaphors.
- case_sensitivity=smart means prefer proper-noun casing but allow lowercase with strong cues.

Context
- For context_mode=adjacent_cues, compose context from previous, current, next within limits, capped by max_chars.

Deduplication
- Apply deduplication settings.

Validation
- Enforce max_results. Produce valid JSON."#;

/// Boost cues listed in the prompt's ambiguity rules, in prompt order
pub const PROMPT_BOOST_CUES: &[&str] = &[
    "operating system",
    "OS",
    "streaming",
    "app",
    "login",
    "App Store",
    "subscription",
    "brand",
    "poster",
    "advert",
    "commercial",
    "series",
    "movie",
    "newspaper",
    "magazine",
];

/// Output fields requested from the model, in order
pub const OUTPUT_FIELDS: &[&str] = &[
    "brand",
    "certainty",
    "input",
    "context",
    "alias_used",
    "timestamp_start",
    "timestamp_end",
    "source_id",
    "start_char",
    "end_char",
];

/// How eagerly the model should report borderline mentions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    #[default]
    Strict,
    Normal,
    Lenient,
}

/// Settings forwarded to the model inside the CONFIG block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    // @field: Detection strictness
    #[serde(default)]
    pub detection_mode: DetectionMode,

    // @field: Minimum certainty the model should report
    #[serde(default = "default_min_certainty")]
    pub min_certainty: f64,

    // @field: Upper bound on returned items
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    // @field: Context neighbourhood
    #[serde(default)]
    pub context_window: ContextWindowConfig,
}

fn default_min_certainty() -> f64 {
    0.8
}

fn default_max_results() -> usize {
    5000
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            detection_mode: DetectionMode::default(),
            min_certainty: default_min_certainty(),
            max_results: default_max_results(),
            context_window: ContextWindowConfig::default(),
        }
    }
}

#[derive(Serialize)]
struct Deduplication {
    per_cue: bool,
    merge_same_brand_same_cue: bool,
    preserve_multiple_spans: bool,
}

#[derive(Serialize)]
struct Canonicalization {
    prefer_parent_for_product_lines: bool,
    examples: serde_json::Map<String, serde_json::Value>,
}

#[derive(Serialize)]
struct AliasMapOverride {
    add: serde_json::Map<String, serde_json::Value>,
    remove: Vec<String>,
}

#[derive(Serialize)]
struct AmbiguityRules {
    ambiguous_terms: Vec<&'static str>,
    boost_cues: Vec<&'static str>,
    lower_cues: Vec<&'static str>,
    case_prefers_brand: bool,
}

/// CONFIG block as serialized into the prompt; field order is kept
#[derive(Serialize)]
struct PromptConfig {
    detection_mode: DetectionMode,
    min_certainty: f64,
    max_results: usize,
    case_sensitivity: &'static str,
    accept_lowercase_brand_tokens: bool,
    context_mode: &'static str,
    context_window: ContextWindowConfig,
    deduplication: Deduplication,
    output_fields: Vec<&'static str>,
    include_fictional_if_real_brand_exists: bool,
    language: &'static str,
    return_empty_array_when_none: bool,
    canonicalization: Canonicalization,
    alias_map_override: AliasMapOverride,
    brand_whitelist: Vec<String>,
    brand_blacklist: Vec<String>,
    ambiguity_rules: AmbiguityRules,
}

impl PromptConfig {
    fn from_config(config: &LlmConfig) -> Self {
        Self {
            detection_mode: config.detection_mode,
            min_certainty: config.min_certainty,
            max_results: config.max_results,
            case_sensitivity: "smart",
            accept_lowercase_brand_tokens: false,
            context_mode: "adjacent_cues",
            context_window: config.context_window,
            deduplication: Deduplication {
                per_cue: true,
                merge_same_brand_same_cue: true,
                preserve_multiple_spans: false,
            },
            output_fields: OUTPUT_FIELDS.to_vec(),
            include_fictional_if_real_brand_exists: false,
            language: "auto",
            return_empty_array_when_none: true,
            canonicalization: Canonicalization {
                prefer_parent_for_product_lines: true,
                examples: serde_json::Map::new(),
            },
            alias_map_override: AliasMapOverride {
                add: serde_json::Map::new(),
                remove: Vec::new(),
            },
            brand_whitelist: Vec::new(),
            brand_blacklist: Vec::new(),
            ambiguity_rules: AmbiguityRules {
                ambiguous_terms: AMBIGUOUS_TOKENS.to_vec(),
                boost_cues: PROMPT_BOOST_CUES.to_vec(),
                lower_cues: vec!["idiom", "metaphor"],
                case_prefers_brand: true,
            },
        }
    }
}

/// Render sources as the prompt's INPUT text.
///
/// Plain sources contribute their text; every subtitle cue contributes
/// `[{filename}:{index}] {start} --> {end}` and its text on the next line.
/// Parts are separated by a blank line.
pub fn sources_to_input_block(sources: &[AnalyzeSource]) -> String {
    let mut parts: Vec<String> = Vec::new();

    for source in sources {
        match source {
            AnalyzeSource::Plain { text, .. } => parts.push(text.clone()),
            AnalyzeSource::Subtitle { filename, cues } => {
                for cue in cues {
                    let header = [cue.start.as_deref(), cue.end.as_deref()]
                        .into_iter()
                        .flatten()
                        .filter(|t| !t.is_empty())
                        .collect::<Vec<_>>()
                        .join(" --> ");
                    parts.push(format!("[{}:{}] {}\n{}", filename, cue.index, header, cue.text));
                }
            }
        }
    }

    parts.join("\n\n")
}

/// Build the full user prompt for `sources`
pub fn build_prompt(config: &LlmConfig, sources: &[AnalyzeSource]) -> String {
    let config_block = serde_json::to_string_pretty(&PromptConfig::from_config(config))
        .unwrap_or_else(|_| "{}".to_string());
    let input_block = sources_to_input_block(sources);

    format!(
        "## CONFIG\n\n{}\n\n## INSTRUCTIONS\n\n{}\n\n## INPUT\n\n\n```\n{}\n```",
        config_block, INSTRUCTIONS, input_block
    )
}
