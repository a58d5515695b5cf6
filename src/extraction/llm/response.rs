/*!
 * Parsing and sanitation of language-model replies.
 *
 * Models wrap their JSON in prose or code fences and are loose with types, so
 * the reply is cut down to its outermost array and every item is coerced
 * field by field into a `BrandHit`.
 */

use log::warn;
use serde_json::Value;

use crate::extraction::model::BrandHit;

/// Parse the outermost JSON array in `text`.
///
/// Takes everything from the first `[` to the last `]`. Any failure yields an
/// empty list.
pub fn extract_json_array(text: &str) -> Vec<Value> {
    let (Some(start), Some(end)) = (text.find('['), text.rfind(']')) else {
        return Vec::new();
    };
    if end <= start {
        return Vec::new();
    }

    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Number or numeric string as `f64`
fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Any non-null value rendered as text
fn coerce_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Non-negative whole number as a character offset
fn coerce_offset(value: Option<&Value>) -> Option<usize> {
    let n = coerce_number(value)?;
    (n >= 0.0 && n.fract() == 0.0).then_some(n as usize)
}

/// Coerce one reply item into a hit.
///
/// Returns `None` for non-object items and for certainties outside `[0, 1]`.
pub fn sanitize_item(item: &Value) -> Option<BrandHit> {
    let Some(obj) = item.as_object() else {
        warn!("Skipping language-model item that is not an object: {}", item);
        return None;
    };

    let field = |name: &str| obj.get(name);
    let text = |name: &str| coerce_string(field(name)).unwrap_or_default();

    let certainty = coerce_number(field("certainty")).unwrap_or(0.0);
    if !(0.0..=1.0).contains(&certainty) {
        warn!("Skipping language-model item with certainty {} outside [0, 1]: {}", certainty, item);
        return None;
    }

    let mut hit = BrandHit::new(text("brand"), certainty, text("input"), text("context"));
    hit.alias_used = coerce_string(field("alias_used"));
    hit.timestamp_start = coerce_string(field("timestamp_start"));
    hit.timestamp_end = coerce_string(field("timestamp_end"));
    hit.source_id = coerce_string(field("source_id"));
    hit.start_char = coerce_offset(field("start_char"));
    hit.end_char = coerce_offset(field("end_char"));

    Some(hit)
}

/// Parse a full reply into sanitized hits
pub fn parse_reply(reply: &str) -> Vec<BrandHit> {
    extract_json_array(reply)
        .iter()
        .filter_map(sanitize_item)
        .collect()
}
