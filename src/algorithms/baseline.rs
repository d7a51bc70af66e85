//! Plain Levenshtein baseline
//!
//! Unit-cost edit distance with no notion of visual similarity, used as the
//! reference point the visual score is benchmarked against. Comparison is
//! case-insensitive, like the visual metric.

use super::EditDistance;

/// SIMD-accelerated, case-insensitive Levenshtein distance.
///
/// Works on bytes, which matches character distance for ASCII labels.
/// Falls back to scalar code on CPUs without SIMD support.
///
/// # Example
/// ```
/// use confusable::algorithms::baseline::plain_edit_distance;
///
/// assert_eq!(plain_edit_distance("paypal", "paypa1"), 1);
/// assert_eq!(plain_edit_distance("Example", "example"), 0);
/// assert_eq!(plain_edit_distance("exarnple", "example"), 2);
/// ```
#[inline]
#[must_use]
pub fn plain_edit_distance(a: &str, b: &str) -> usize {
    if a.eq_ignore_ascii_case(b) {
        return 0;
    }
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let (a, b) = (a.to_ascii_lowercase(), b.to_ascii_lowercase());
    triple_accel::levenshtein::levenshtein(a.as_bytes(), b.as_bytes()) as usize
}

/// Plain Levenshtein similarity, `1 - d / maxlen` (0.0 to 1.0).
#[inline]
#[must_use]
pub fn plain_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        1.0
    } else {
        1.0 - (plain_edit_distance(a, b) as f64 / max_len as f64)
    }
}

/// Plain Levenshtein as an [`EditDistance`] metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainLevenshtein;

impl PlainLevenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EditDistance for PlainLevenshtein {
    fn distance(&self, a: &str, b: &str) -> f64 {
        plain_edit_distance(a, b) as f64
    }

    fn name(&self) -> &'static str {
        "plain_levenshtein"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::Similarity;

    #[test]
    fn test_plain_edit_distance() {
        assert_eq!(plain_edit_distance("", ""), 0);
        assert_eq!(plain_edit_distance("abc", ""), 3);
        assert_eq!(plain_edit_distance("", "abc"), 3);
        assert_eq!(plain_edit_distance("kitten", "sitting"), 3);
        assert_eq!(plain_edit_distance("often", "otfen"), 2);
        assert_eq!(plain_edit_distance("GOOGLE", "gooogle"), 1);
    }

    #[test]
    fn test_plain_similarity() {
        assert_eq!(plain_similarity("", ""), 1.0);
        assert_eq!(plain_similarity("abc", "xyz"), 0.0);
        assert!((plain_similarity("hello", "hallo") - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_metric_object() {
        let metric = PlainLevenshtein::new();
        assert_eq!(EditDistance::distance(&metric, "wams", "warns"), 2.0);
        assert!((Similarity::similarity(&metric, "wams", "warns") - 0.6).abs() < 1e-12);
        assert_eq!(Similarity::name(&metric), "plain_levenshtein");
    }
}
