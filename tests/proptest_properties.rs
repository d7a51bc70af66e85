//! Property-based tests for the visual distance and confusability score.
//!
//! 1. **Symmetry**: d(s, t) = d(t, s), and the same for the score
//! 2. **Identity**: d(s, s) = 0 and score(s, s) = 1
//! 3. **Boundedness**: 0 <= d(s, t) <= max(|s|, |t|), score in [0, 1]
//! 4. **Case invariance**: upper-casing either side changes nothing
//! 5. **Monotonicity**: for fixed lengths a larger distance never raises
//!    the score

use confusable::algorithms::confusability_score;
use confusable::*;
use proptest::prelude::*;

fn arb_label() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9-]{0,12}").unwrap()
}

/// Labels drawn from characters that the tables know about, so digraph
/// and repetition edges actually fire.
fn arb_confusable_label() -> impl Strategy<Value = String> {
    prop::string::string_regex("[mnrlivw1o0cdfaAMVW]{0,10}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn distance_symmetric(a in arb_label(), b in arb_label()) {
        prop_assert_eq!(visual_edit_distance(&a, &b), visual_edit_distance(&b, &a));
    }

    #[test]
    fn distance_symmetric_on_tabled_characters(a in arb_confusable_label(), b in arb_confusable_label()) {
        prop_assert_eq!(visual_edit_distance(&a, &b), visual_edit_distance(&b, &a));
        prop_assert_eq!(how_confusable_are(&a, &b), how_confusable_are(&b, &a));
    }

    #[test]
    fn score_symmetric(a in arb_label(), b in arb_label()) {
        prop_assert_eq!(how_confusable_are(&a, &b), how_confusable_are(&b, &a));
    }

    #[test]
    fn distance_identity(a in arb_label()) {
        prop_assert_eq!(visual_edit_distance(&a, &a), 0.0);
    }

    #[test]
    fn score_identity(a in arb_label()) {
        prop_assert_eq!(how_confusable_are(&a, &a), 1.0);
    }

    #[test]
    fn distance_bounded(a in arb_confusable_label(), b in arb_label()) {
        let d = visual_edit_distance(&a, &b);
        let max_len = a.chars().count().max(b.chars().count()) as f64;
        prop_assert!(d >= 0.0);
        prop_assert!(d <= max_len + 1e-9, "d({}, {}) = {} > {}", a, b, d, max_len);
    }

    #[test]
    fn score_bounded(a in arb_confusable_label(), b in arb_confusable_label()) {
        let score = how_confusable_are(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn case_invariant(a in arb_label(), b in arb_label()) {
        let d = visual_edit_distance(&a, &b);
        prop_assert_eq!(d, visual_edit_distance(&a.to_ascii_uppercase(), &b));
        prop_assert_eq!(d, visual_edit_distance(&a, &b.to_ascii_lowercase()));
    }

    #[test]
    fn score_monotone_in_distance(
        len_s in 1usize..20,
        len_t in 1usize..20,
        x in 0.0f64..=1.0,
        y in 0.0f64..=1.0,
    ) {
        let max_len = len_s.max(len_t) as f64;
        let (d1, d2) = (x.min(y) * max_len, x.max(y) * max_len);
        let (s1, s2) = (confusability_score(d1, len_s, len_t), confusability_score(d2, len_s, len_t));
        prop_assert!(s1 + 1e-12 >= s2, "score({}) = {} < score({}) = {}", d1, s1, d2, s2);
    }

    #[test]
    fn reused_matrix_matches_fresh(pairs in prop::collection::vec((arb_confusable_label(), arb_label()), 1..8)) {
        let mut matrix = CostMatrix::new();
        for (a, b) in &pairs {
            prop_assert_eq!(visual_edit_distance_with(&mut matrix, a, b), visual_edit_distance(a, b));
            prop_assert_eq!(how_confusable_are_with(&mut matrix, a, b), how_confusable_are(a, b));
        }
    }

    #[test]
    fn alignment_costs_sum_to_distance(a in arb_confusable_label(), b in arb_confusable_label()) {
        let total: f64 = trace_alignment(&a, &b).iter().map(|step| step.cost).sum();
        prop_assert!((total - visual_edit_distance(&a, &b)).abs() < 1e-9);
    }
}
