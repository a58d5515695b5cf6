/*!
 * Boundary-safe, case-insensitive alias matching.
 *
 * Each alias compiles to its own regex over the escaped alias text. The regex
 * engine has no look-around, so the flank check happens here: a match counts
 * only when the characters on both sides are neither word characters nor `+`
 * (or are the start/end of the unit). A rejected candidate restarts the search
 * one character later, so an overlapping occurrence is still found.
 */

use regex::{Regex, RegexBuilder};

use super::aliases::{AliasEntry, AliasTable};

/// One occurrence of an alias inside a unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasMatch<'t> {
    /// Exact surface text, original casing
    pub surface: &'t str,
    /// Byte offset of the match start
    pub start: usize,
    /// Byte offset one past the match end
    pub end: usize,
}

/// Compiled matcher for a single alias
#[derive(Debug, Clone)]
pub struct AliasPattern {
    entry: AliasEntry,
    regex: Regex,
}

/// True for characters that glue onto an alias and disqualify the match
fn is_attached(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '+'
}

impl AliasPattern {
    /// Compile an alias; `None` for an empty alias
    pub fn compile(entry: AliasEntry) -> Option<Self> {
        if entry.alias.is_empty() {
            return None;
        }
        let regex = RegexBuilder::new(&regex::escape(&entry.alias))
            .case_insensitive(true)
            .build()
            .ok()?;
        Some(Self { entry, regex })
    }

    /// Alias key as configured
    pub fn alias(&self) -> &str {
        &self.entry.alias
    }

    /// Canonical brand for this alias
    pub fn brand(&self) -> &str {
        &self.entry.brand
    }

    /// All flank-checked occurrences, left to right
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<AliasMatch<'t>> {
        let mut matches = Vec::new();
        let mut pos = 0;

        while pos <= text.len() {
            let Some(m) = self.regex.find_at(text, pos) else {
                break;
            };

            let before_ok = text[..m.start()].chars().next_back().is_none_or(|c| !is_attached(c));
            let after_ok = text[m.end()..].chars().next().is_none_or(|c| !is_attached(c));

            if before_ok && after_ok {
                matches.push(AliasMatch {
                    surface: m.as_str(),
                    start: m.start(),
                    end: m.end(),
                });
                pos = m.end();
            } else {
                // Step one character past the rejected start
                pos = m.start()
                    + text[m.start()..].chars().next().map_or(1, |c| c.len_utf8());
            }
        }

        matches
    }
}

/// Every alias of a table, compiled and ordered longest first.
#[derive(Debug, Clone)]
pub struct AliasMatcher {
    patterns: Vec<AliasPattern>,
}

impl AliasMatcher {
    /// Compile the effective entries of a table.
    ///
    /// The sort is stable, so aliases of equal length keep table order.
    pub fn new(table: &AliasTable) -> Self {
        let mut patterns: Vec<AliasPattern> = table
            .effective()
            .into_iter()
            .filter_map(AliasPattern::compile)
            .collect();
        patterns.sort_by(|a, b| b.alias().chars().count().cmp(&a.alias().chars().count()));
        Self { patterns }
    }

    /// Patterns in scan order
    pub fn patterns(&self) -> &[AliasPattern] {
        &self.patterns
    }

    /// Scan a unit with every pattern independently.
    ///
    /// Results are grouped by pattern (scan order), then by position.
    pub fn scan<'t, 'm>(&'m self, text: &'t str) -> impl Iterator<Item = (&'m AliasPattern, AliasMatch<'t>)> + 'm
    where
        't: 'm,
    {
        self.patterns
            .iter()
            .flat_map(move |p| p.find_all(text).into_iter().map(move |m| (p, m)))
    }
}
