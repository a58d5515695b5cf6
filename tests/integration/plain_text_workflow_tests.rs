/*!
 * Integration tests for plain text extraction workflow
 */

use brandspot::extraction::{AnalyzeSource, BrandHit, RuleConfig, RuleExtractor};

fn brands(hits: &[BrandHit]) -> Vec<&str> {
    hits.iter().map(|h| h.brand.as_str()).collect()
}

/// Test the three-brand sentence end to end
#[test]
fn test_plain_workflow_withThreeBrands_shouldReportAll() {
    let hits = RuleExtractor::default().extract_text("I used Google to find a Starbucks near Zillow.");

    let mut found = brands(&hits);
    found.sort_unstable();
    assert_eq!(found, vec!["Google", "Starbucks", "Zillow"]);

    for hit in &hits {
        assert!(hit.certainty >= 0.7 && hit.certainty <= 1.0);
        assert_eq!(hit.alias_used.as_deref(), Some(hit.brand.as_str()));
        assert!(hit.timestamp_start.is_none());
        assert!(hit.timestamp_end.is_none());
        assert!(hit.source_id.is_none());
    }
}

/// Test that hits follow sentence order across units
#[test]
fn test_plain_workflow_acrossSentences_shouldKeepUnitOrder() {
    let text = "First I opened YouTube. Then I ordered from Domino's! Finally I watched HBO.";
    let hits = RuleExtractor::default().extract_text(text);

    assert_eq!(brands(&hits), vec!["YouTube", "Domino's", "HBO"]);
    assert_eq!(hits[1].input, "Then I ordered from Domino's!");
    assert_eq!(
        hits[1].context,
        "First I opened YouTube. Then I ordered from Domino's! Finally I watched HBO."
    );
}

/// Test the bounds that hold for every produced hit
#[test]
fn test_plain_workflow_invariants_shouldHoldForMixedInput() {
    let text = "I love my iphone and my IPAD. Apple makes them. \
                Windows crashed, so I used Office on a MacBook. \
                We watched Prime Video, then Max, then HBO. \
                X (formerly Twitter) was down, so I Googled it.";
    let config = RuleConfig {
        context_window: brandspot::extraction::ContextWindowConfig { prev: 1, next: 1, max_chars: 60 },
        ..RuleConfig::default()
    };
    let extractor = RuleExtractor::new(config);
    let hits = extractor.extract_text(text);
    let suppressed = ["apple", "windows", "office", "prime", "max"];

    assert!(!hits.is_empty());
    for hit in &hits {
        assert!((0.0..=1.0).contains(&hit.certainty));
        assert!(hit.context.chars().count() <= 60);
        let alias = hit.alias_used.as_deref().unwrap_or_default();
        assert!(!suppressed.contains(&alias.to_lowercase().as_str()), "suppressed token surfaced: {alias}");
        assert!(extractor.table().effective().iter().any(|e| e.brand == hit.brand));
    }

    // one hit per brand per sentence
    let mut seen = std::collections::HashSet::new();
    for hit in &hits {
        assert!(seen.insert((hit.input.clone(), hit.brand.clone())), "duplicate {} in one unit", hit.brand);
    }
}

/// Test that empty and whitespace-only input yields nothing
#[test]
fn test_plain_workflow_withBlankInput_shouldReturnNoHits() {
    let extractor = RuleExtractor::default();
    assert!(extractor.extract_text("").is_empty());
    assert!(extractor.extract_text(" \n\t ").is_empty());
    assert!(extractor.extract(&[]).is_empty());
}

/// Test multiple sources in one call
#[test]
fn test_plain_workflow_withSeveralSources_shouldKeepSourceOrder() {
    let sources = vec![
        AnalyzeSource::plain_file("b.txt", "Drive a Toyota."),
        AnalyzeSource::plain("Drink a Pepsi."),
    ];
    let hits = RuleExtractor::default().extract(&sources);
    assert_eq!(brands(&hits), vec!["Toyota", "Pepsi"]);
    assert!(hits.iter().all(|h| h.source_id.is_none()));
}

/// Test the serialized shape of a plain-text hit
#[test]
fn test_plain_workflow_serializedHit_shouldOmitSubtitleFields() {
    let hits = RuleExtractor::default().extract_text("Netflix");
    let json = serde_json::to_value(&hits[0]).unwrap();

    assert_eq!(json["brand"], "Netflix");
    assert_eq!(json["alias_used"], "Netflix");
    assert_eq!(json["start_char"], 0);
    assert_eq!(json["end_char"], 7);
    assert!(json.get("timestamp_start").is_none());
    assert!(json.get("source_id").is_none());
}
