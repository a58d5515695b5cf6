/*!
 * Alias table: surface aliases mapped to canonical brand names.
 *
 * The table is the built-in alias list overlaid by caller additions. A caller
 * entry replaces a built-in entry with the exact same key (case-sensitive) and
 * keeps its position; new keys are appended. Alongside the mapping the table
 * carries the suppression set, lowercase tokens that never surface as a hit.
 */

use std::collections::HashSet;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Built-in alias → canonical brand pairs.
///
/// Product lines and sub-brands map to their parent through ordinary entries.
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("Zillow", "Zillow"),
    ("Zestimate", "Zillow"),
    ("Zillowed", "Zillow"),
    ("The New York Times", "The New York Times"),
    ("Never Have I Ever", "Never Have I Ever"),
    ("WhatsApp", "WhatsApp"),
    ("Telegram", "Telegram"),
    ("YouTube", "YouTube"),
    ("Instagram", "Instagram"),
    ("Facebook", "Facebook"),
    ("HBO", "HBO"),
    ("Max", "HBO"),
    ("Paramount+", "Paramount+"),
    ("Prime Video", "Prime Video"),
    ("Netflix", "Netflix"),
    ("Uber", "Uber"),
    ("Lyft", "Lyft"),
    ("Tesla", "Tesla"),
    ("BMW", "BMW"),
    ("Audi", "Audi"),
    ("Mercedes", "Mercedes"),
    ("Toyota", "Toyota"),
    ("Ford", "Ford"),
    ("Chevrolet", "Chevrolet"),
    ("Lexus", "Lexus"),
    ("Jaguar", "Jaguar"),
    ("Coca-Cola", "Coca-Cola"),
    ("Coke", "Coca-Cola"),
    ("Pepsi", "Pepsi"),
    ("Red Bull", "Red Bull"),
    ("Burger King", "Burger King"),
    ("McDonald's", "McDonald's"),
    ("KFC", "KFC"),
    ("Subway", "Subway"),
    ("Domino's", "Domino's"),
    ("Pizza Hut", "Pizza Hut"),
    ("Starbucks", "Starbucks"),
    ("Apple", "Apple"),
    ("Microsoft", "Microsoft"),
    ("Google", "Google"),
    ("Sony", "Sony"),
    ("PlayStation", "PlayStation"),
    ("Xbox", "Xbox"),
    ("Disney+", "Disney+"),
    ("Marvel", "Marvel"),
    ("PayPal", "PayPal"),
    ("Visa", "Visa"),
    ("Mastercard", "Mastercard"),
    ("American Express", "American Express"),
    ("TikTok", "TikTok"),
    // Product lines and renamed services
    ("iPhone", "Apple"),
    ("iPad", "Apple"),
    ("MacBook", "Apple"),
    ("AirPods", "Apple"),
    ("PS5", "PlayStation"),
    ("Disney Plus", "Disney+"),
    ("Amazon Prime Video", "Prime Video"),
    ("X", "Twitter"),
    ("X (formerly Twitter)", "Twitter"),
    ("Googled", "Google"),
];

/// Bare tokens too ambiguous to report on their own.
pub const AMBIGUOUS_TOKENS: &[&str] = &["apple", "windows", "office", "prime", "max"];

/// Returns the default suppression list as owned strings
pub fn default_suppressed_tokens() -> Vec<String> {
    AMBIGUOUS_TOKENS.iter().map(|t| t.to_string()).collect()
}

/// One alias and the brand it reports as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    /// Surface string to look for
    pub alias: String,

    /// Canonical brand reported for the alias
    #[serde(rename = "canonicalBrand")]
    pub brand: String,
}

impl AliasEntry {
    /// Create a new alias entry
    pub fn new(alias: impl Into<String>, brand: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            brand: brand.into(),
        }
    }
}

/// Caller alias additions in the order they were given.
///
/// Reads and writes as a JSON object. A repeated key keeps its first position
/// and takes the last brand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasAdditions(Vec<AliasEntry>);

impl AliasAdditions {
    /// Empty set of additions
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an alias, or re-point an existing one in place
    pub fn insert(&mut self, alias: impl Into<String>, brand: impl Into<String>) {
        let alias = alias.into();
        let brand = brand.into();
        match self.0.iter_mut().find(|e| e.alias == alias) {
            Some(existing) => existing.brand = brand,
            None => self.0.push(AliasEntry { alias, brand }),
        }
    }

    /// Brand for an exact alias key
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.0.iter().find(|e| e.alias == alias).map(|e| e.brand.as_str())
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &AliasEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<A: Into<String>, B: Into<String>> FromIterator<(A, B)> for AliasAdditions {
    fn from_iter<I: IntoIterator<Item = (A, B)>>(iter: I) -> Self {
        let mut additions = Self::new();
        for (alias, brand) in iter {
            additions.insert(alias, brand);
        }
        additions
    }
}

impl Serialize for AliasAdditions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in &self.0 {
            map.serialize_entry(&entry.alias, &entry.brand)?;
        }
        map.end()
    }
}

struct AdditionsVisitor;

impl<'de> Visitor<'de> for AdditionsVisitor {
    type Value = AliasAdditions;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping aliases to brand names")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut additions = AliasAdditions::new();
        while let Some((alias, brand)) = access.next_entry::<String, String>()? {
            additions.insert(alias, brand);
        }
        Ok(additions)
    }
}

impl<'de> Deserialize<'de> for AliasAdditions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(AdditionsVisitor)
    }
}

/// Effective alias mapping plus suppression set.
#[derive(Debug, Clone)]
pub struct AliasTable {
    base: Vec<AliasEntry>,
    overrides: Vec<AliasEntry>,
    suppressed: HashSet<String>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AliasTable {
    /// Built-in aliases with the default suppression set
    pub fn builtin() -> Self {
        let base = DEFAULT_ALIASES
            .iter()
            .map(|(alias, brand)| AliasEntry::new(*alias, *brand))
            .collect();
        Self::new(base, AMBIGUOUS_TOKENS)
    }

    /// Create a table from a base mapping and suppression tokens.
    ///
    /// Tokens are lower-cased on the way in.
    pub fn new<I, S>(base: Vec<AliasEntry>, suppressed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            base,
            overrides: Vec::new(),
            suppressed: suppressed
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Overlay caller additions; later calls win over earlier ones.
    pub fn with_overrides(mut self, additions: &AliasAdditions) -> Self {
        for entry in additions.iter() {
            match self.overrides.iter_mut().find(|e| e.alias == entry.alias) {
                Some(existing) => existing.brand = entry.brand.clone(),
                None => self.overrides.push(entry.clone()),
            }
        }
        self
    }

    /// Replace the suppression set
    pub fn with_suppressed<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.suppressed = tokens
            .into_iter()
            .map(|t| t.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Base entries before any override
    pub fn base(&self) -> &[AliasEntry] {
        &self.base
    }

    /// Caller-supplied entries
    pub fn overrides(&self) -> &[AliasEntry] {
        &self.overrides
    }

    /// Lowercase tokens never reported as hits
    pub fn suppressed(&self) -> &HashSet<String> {
        &self.suppressed
    }

    /// Effective entries in table order: base positions first (with override
    /// values applied), then aliases only the overrides know about.
    pub fn effective(&self) -> Vec<AliasEntry> {
        let mut merged: Vec<AliasEntry> = Vec::with_capacity(self.base.len() + self.overrides.len());
        for entry in self.base.iter().chain(self.overrides.iter()) {
            match merged.iter_mut().find(|e| e.alias == entry.alias) {
                Some(existing) => existing.brand = entry.brand.clone(),
                None => merged.push(entry.clone()),
            }
        }
        merged
    }

    /// Canonical brand for an exact alias key
    pub fn canonical(&self, alias: &str) -> Option<&str> {
        self.overrides
            .iter()
            .rev()
            .chain(self.base.iter().rev())
            .find(|e| e.alias == alias)
            .map(|e| e.brand.as_str())
    }

    /// True when the matched surface text must not become a hit
    pub fn is_suppressed(&self, surface: &str) -> bool {
        self.suppressed.contains(&surface.to_lowercase())
    }
}
