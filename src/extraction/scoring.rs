//! Heuristic certainty for a matched alias.

/// Score every hit starts from
pub const BASE_CERTAINTY: f64 = 0.7;

/// Added when the surface text starts with a capital
pub const CAPITALIZED_BOOST: f64 = 0.1;

/// Added once when the context mentions any boost cue
pub const CONTEXT_CUE_BOOST: f64 = 0.05;

/// Phrases that suggest a brand reading of the surrounding text.
///
/// Compared lower-cased as plain substrings, so "OS" also fires inside
/// longer words.
pub const CONTEXT_BOOST_CUES: &[&str] = &[
    "operating system",
    "OS",
    "streaming",
    "app",
    "login",
    "App Store",
    "subscription",
    "series",
    "movie",
    "newspaper",
    "magazine",
    "brand",
    "poster",
    "advert",
    "commercial",
];

/// True when the lower-cased context contains at least one boost cue
pub fn has_context_cue(context: &str) -> bool {
    let lower = context.to_lowercase();
    CONTEXT_BOOST_CUES
        .iter()
        .any(|cue| lower.contains(&cue.to_lowercase()))
}

/// Certainty in `[0, 1]` for `surface` seen within `context`
pub fn score_hit(surface: &str, context: &str) -> f64 {
    let mut score = BASE_CERTAINTY;
    if surface.chars().next().is_some_and(char::is_uppercase) {
        score += CAPITALIZED_BOOST;
    }
    if has_context_cue(context) {
        score += CONTEXT_CUE_BOOST;
    }
    score.clamp(0.0, 1.0)
}
