/*!
 * Context window composition for matched units.
 *
 * The context of a unit is its neighbourhood: `prev` units before it, the unit
 * itself and `next` units after it, clamped to the document, joined with one
 * space and cut to `max_chars` characters.
 */

use serde::{Deserialize, Deserializer, Serialize};

/// Configuration for context window sizes.
///
/// Negative values in a configuration file are read as zero, so a negative
/// `max_chars` gives an empty context rather than a load error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextWindowConfig {
    /// Units taken before the matched unit
    #[serde(default = "default_prev", deserialize_with = "non_negative")]
    pub prev: usize,

    /// Units taken after the matched unit
    #[serde(default = "default_next", deserialize_with = "non_negative")]
    pub next: usize,

    /// Upper bound on the context length, in characters
    #[serde(default = "default_max_chars", deserialize_with = "non_negative")]
    pub max_chars: usize,
}

/// Any integer, with negatives clamped to zero
fn non_negative<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let value = i64::deserialize(deserializer)?;
    Ok(usize::try_from(value.max(0)).unwrap_or(usize::MAX))
}

fn default_prev() -> usize {
    1
}

fn default_next() -> usize {
    1
}

fn default_max_chars() -> usize {
    400
}

impl Default for ContextWindowConfig {
    fn default() -> Self {
        Self {
            prev: default_prev(),
            next: default_next(),
            max_chars: default_max_chars(),
        }
    }
}

/// Matched unit and its surrounding context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitContext {
    /// The matched unit, trimmed
    pub input: String,
    /// Neighbourhood text, truncated then trimmed
    pub context: String,
}

/// Build the context for `units[idx]`.
///
/// Returns `None` when `idx` is out of range.
pub fn build_context<S: AsRef<str>>(units: &[S], idx: usize, config: &ContextWindowConfig) -> Option<UnitContext> {
    let unit = units.get(idx)?;

    let first = idx.saturating_sub(config.prev);
    let last = idx.saturating_add(config.next).min(units.len() - 1);

    let joined = units[first..=last]
        .iter()
        .map(|u| u.as_ref())
        .collect::<Vec<_>>()
        .join(" ");
    let truncated: String = joined.chars().take(config.max_chars).collect();

    Some(UnitContext {
        input: unit.as_ref().trim().to_string(),
        context: truncated.trim().to_string(),
    })
}
