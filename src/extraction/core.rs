/*!
 * Rule-based brand extraction.
 *
 * `RuleExtractor` ties the pieces together: sources are cut into units, each
 * unit is scanned by every alias pattern, matches go through suppression,
 * per-unit deduplication, scoring and the certainty threshold, and surviving
 * matches become hits in unit order, scan order within a unit.
 *
 * The extractor is immutable once built and holds no I/O, so one instance can
 * serve any number of threads.
 */

use std::collections::HashSet;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::aliases::{default_suppressed_tokens, AliasAdditions, AliasTable};
use super::context::{build_context, ContextWindowConfig};
use super::matcher::AliasMatcher;
use super::model::{AnalyzeSource, BrandHit};
use super::scoring::score_hit;
use super::segmenter::split_into_sentences;

/// Caller-tunable extraction settings.
///
/// Field names follow the JSON configuration surface (`aliasMapAdd`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfig {
    /// Extra aliases in the order given; a key equal to a built-in alias replaces it
    #[serde(default)]
    pub alias_map_add: AliasAdditions,

    /// Suppression tokens; replaces the built-in list when given
    #[serde(default = "default_suppressed_tokens")]
    pub alias_remove_lower: Vec<String>,

    /// Neighbourhood used for `context`
    #[serde(default)]
    pub context_window: ContextWindowConfig,

    /// Keep only the first hit per brand within a unit
    #[serde(default = "default_true")]
    pub dedup_per_cue: bool,

    /// Hits scoring below this are dropped
    #[serde(default)]
    pub min_certainty: f64,
}

fn default_true() -> bool {
    true
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            alias_map_add: AliasAdditions::new(),
            alias_remove_lower: default_suppressed_tokens(),
            context_window: ContextWindowConfig::default(),
            dedup_per_cue: true,
            min_certainty: 0.0,
        }
    }
}

/// Source metadata stamped onto hits from one unit
struct UnitMeta<'a> {
    timestamp_start: Option<&'a str>,
    timestamp_end: Option<&'a str>,
    source_id: Option<String>,
}

impl UnitMeta<'_> {
    fn plain() -> Self {
        Self { timestamp_start: None, timestamp_end: None, source_id: None }
    }
}

/// Compiled rule engine
#[derive(Debug, Clone)]
pub struct RuleExtractor {
    table: AliasTable,
    matcher: AliasMatcher,
    config: RuleConfig,
}

impl Default for RuleExtractor {
    fn default() -> Self {
        Self::new(RuleConfig::default())
    }
}

impl RuleExtractor {
    /// Build the extractor over the built-in alias table
    pub fn new(config: RuleConfig) -> Self {
        let table = AliasTable::builtin()
            .with_overrides(&config.alias_map_add)
            .with_suppressed(&config.alias_remove_lower);
        Self::with_table(table, config)
    }

    /// Build the extractor over a caller-supplied table.
    ///
    /// The table is used as given; `alias_map_add` and `alias_remove_lower`
    /// in `config` are not applied again.
    pub fn with_table(table: AliasTable, config: RuleConfig) -> Self {
        let matcher = AliasMatcher::new(&table);
        Self { table, matcher, config }
    }

    /// Active configuration
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Active alias table
    pub fn table(&self) -> &AliasTable {
        &self.table
    }

    /// Extract hits from a single plain-text document
    pub fn extract_text(&self, text: &str) -> Vec<BrandHit> {
        self.extract(&[AnalyzeSource::plain(text)])
    }

    /// Extract hits from every source, in source order
    pub fn extract(&self, sources: &[AnalyzeSource]) -> Vec<BrandHit> {
        let mut hits = Vec::new();

        for source in sources {
            let before = hits.len();
            match source {
                AnalyzeSource::Plain { text, .. } => {
                    let units = split_into_sentences(text);
                    for idx in 0..units.len() {
                        self.extract_unit(&units, idx, UnitMeta::plain(), &mut hits);
                    }
                    debug!(
                        "Plain source {}: {} unit(s), {} hit(s)",
                        source.filename().unwrap_or("<text>"),
                        units.len(),
                        hits.len() - before
                    );
                }
                AnalyzeSource::Subtitle { filename, cues } => {
                    let texts: Vec<&str> = cues.iter().map(|c| c.text.as_str()).collect();
                    for (idx, cue) in cues.iter().enumerate() {
                        let meta = UnitMeta {
                            timestamp_start: cue.start.as_deref(),
                            timestamp_end: cue.end.as_deref(),
                            source_id: Some(format!("{}:{}", filename, cue.index)),
                        };
                        self.extract_unit(&texts, idx, meta, &mut hits);
                    }
                    debug!(
                        "Subtitle source {}: {} cue(s), {} hit(s)",
                        filename,
                        cues.len(),
                        hits.len() - before
                    );
                }
            }
        }

        hits
    }

    /// Scan `units[idx]` and append its hits
    fn extract_unit<S: AsRef<str>>(&self, units: &[S], idx: usize, meta: UnitMeta<'_>, hits: &mut Vec<BrandHit>) {
        let Some(unit_context) = build_context(units, idx, &self.config.context_window) else {
            return;
        };
        let unit = units[idx].as_ref();
        let leading_ws = unit.len() - unit.trim_start().len();
        let leading_chars = unit[..leading_ws].chars().count();

        let mut seen_brands: HashSet<&str> = HashSet::new();

        for (pattern, found) in self.matcher.scan(unit) {
            if self.table.is_suppressed(found.surface) {
                trace!("Suppressed ambiguous token '{}' in unit {}", found.surface, idx);
                continue;
            }

            let brand = pattern.brand();
            if self.config.dedup_per_cue && seen_brands.contains(brand) {
                continue;
            }

            let certainty = score_hit(found.surface, &unit_context.context);
            if certainty < self.config.min_certainty {
                continue;
            }

            let start_char = unit[..found.start].chars().count().saturating_sub(leading_chars);
            let end_char = start_char + found.surface.chars().count();

            hits.push(BrandHit {
                brand: brand.to_string(),
                certainty,
                input: unit_context.input.clone(),
                context: unit_context.context.clone(),
                alias_used: Some(found.surface.to_string()),
                timestamp_start: meta.timestamp_start.map(str::to_string),
                timestamp_end: meta.timestamp_end.map(str::to_string),
                source_id: meta.source_id.clone(),
                start_char: Some(start_char),
                end_char: Some(end_char),
            });
            seen_brands.insert(brand);
        }
    }
}
