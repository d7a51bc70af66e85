//! Literal scoring scenarios and end-to-end screening.

use confusable::algorithms::tables::{EntryOrigin, SimilarityTables, TableKey};
use confusable::*;
use test_log::test;

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "got {actual}, expected {expected}"
    );
}

#[test]
fn test_case_invariance() {
    assert_eq!(visual_edit_distance("G", "G"), 0.0);
    assert_eq!(visual_edit_distance("g", "G"), 0.0);
}

#[test]
fn test_literal_distances() {
    assert_close(visual_edit_distance("i", "qI"), 1.0, 1e-9);
    assert_close(visual_edit_distance("K", "mk-"), 2.0, 1e-9);
    assert_close(visual_edit_distance("uh", "vH"), 0.9, 1e-9);
    assert_close(visual_edit_distance("f", "fl"), 0.5, 1e-9);
    assert_eq!(visual_edit_distance("wams", "warns"), 0.0);
    assert_close(visual_edit_distance("often", "otfen"), 0.7, 1e-9);
    assert_eq!(visual_edit_distance("1", "l"), 0.0);
}

#[test]
fn test_literal_scores() {
    assert_close(how_confusable_are("biz", "bz"), 0.29, 0.01);
    assert_eq!(how_confusable_are("exarnple", "example"), 1.0);
    assert_close(how_confusable_are("z", "zoology"), 0.016, 0.001);
    assert_eq!(how_confusable_are("", ""), 1.0);
}

#[test]
fn test_table_closure() {
    let tables = SimilarityTables::global();
    assert!(tables.diagnostics().is_empty());

    for (a, b, score, _) in tables.characters().iter() {
        if a.has_uppercase() || b.has_uppercase() {
            let lower = tables
                .characters()
                .lookup(TableKey::to_lowercase(&a), TableKey::to_lowercase(&b));
            assert_eq!(lower, Some(score), "({a}, {b})");
        }
        assert!(a == b || !tables.characters().contains_ordered(b, a), "({a}, {b}) reversed");
    }
    for (x, y, score, _) in tables.digraphs().iter() {
        if x.has_uppercase() || y.has_uppercase() {
            let lower = tables.digraphs().lookup(x.to_lowercase(), y.to_lowercase());
            assert_eq!(lower, Some(score), "({x}, {y})");
        }
    }
}

#[test]
fn test_synthesized_entries_are_lowercase() {
    let tables = SimilarityTables::global();
    let synthesized: Vec<_> = tables
        .characters()
        .iter()
        .filter(|entry| entry.3 == EntryOrigin::Synthesized)
        .collect();
    assert!(!synthesized.is_empty());
    assert!(synthesized
        .iter()
        .all(|(a, b, _, _)| !a.has_uppercase() && !b.has_uppercase()));
}

#[test]
fn test_selftest_report() {
    let report = confusable::selftest::run();
    assert!(report.is_ok(), "{report}");
}

#[test]
fn test_screening_end_to_end() {
    let watchlist = Watchlist::new(
        ["paypal", "microsoft", "google", "example"],
        ValidationMode::Strict,
    )
    .unwrap();
    let options = ScreenOptions {
        min_score: 0.8,
        ..ScreenOptions::default()
    };

    let results = watchlist
        .screen_batch(&["PAYPA1", "rnicrosoft", "g00gle", "benign"], &options)
        .unwrap();

    let flagged: Vec<(&str, &str)> = results
        .iter()
        .flat_map(|(candidate, hits)| hits.iter().map(move |hit| (candidate.as_str(), hit.label.as_str())))
        .collect();
    assert_eq!(
        flagged,
        vec![("PAYPA1", "paypal"), ("rnicrosoft", "microsoft"), ("g00gle", "google")]
    );
}

#[test]
fn test_visual_metric_outranks_baseline() {
    // homoglyph spoofs score higher under the visual metric than under
    // plain edit distance
    let visual = VisualConfusability::new();
    let plain = PlainLevenshtein::new();
    for (spoof, target) in [("rnicrosoft", "microsoft"), ("vvikipedia", "wikipedia"), ("examp1e", "example")] {
        assert!(
            Similarity::similarity(&visual, spoof, target)
                > Similarity::similarity(&plain, spoof, target)
        );
    }
}
