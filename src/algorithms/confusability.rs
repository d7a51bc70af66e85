//! Confusability score
//!
//! Turns a visual edit distance into a score in [0, 1], where 1 means the
//! strings are visually indistinguishable and 0 means completely
//! different.

use super::visual::{visual_edit_distance_with, CostMatrix};
use super::Similarity;

/// Normalize a visual edit distance into a confusability score.
///
/// `(maxlen - d) / (maxlen + 3d + lendiff * d)`: zero distance scores 1,
/// longer strings tolerate more raw distance for the same score and a
/// length mismatch costs extra. Two empty strings score 1.
///
/// # Panics
/// Panics if the score falls outside [0, 1], which means `distance` did
/// not come from strings of the given lengths.
#[must_use]
pub fn confusability_score(distance: f64, len_s: usize, len_t: usize) -> f64 {
    let maxlen = len_s.max(len_t);
    if maxlen == 0 {
        return 1.0;
    }

    let maxlen = maxlen as f64;
    let lendiff = len_s.abs_diff(len_t) as f64;
    let score = (maxlen - distance) / (maxlen + 3.0 * distance + lendiff * distance);

    assert!(
        (0.0..=1.0).contains(&score),
        "confusability score {score} outside [0, 1] for distance {distance}, lengths {len_s} and {len_t}"
    );
    score
}

/// Rate how visually confusable two strings are, from 0 to 1.
///
/// # Example
/// ```
/// use confusable::algorithms::confusability::how_confusable_are;
///
/// assert_eq!(how_confusable_are("exarnple", "example"), 1.0);
/// assert!((how_confusable_are("biz", "bz") - 0.29).abs() < 0.01);
/// assert_eq!(how_confusable_are("", ""), 1.0);
/// ```
#[must_use]
pub fn how_confusable_are(s: &str, t: &str) -> f64 {
    let mut matrix = CostMatrix::new();
    how_confusable_are_with(&mut matrix, s, t)
}

/// [`how_confusable_are`] using a caller-provided matrix.
#[must_use]
pub fn how_confusable_are_with(matrix: &mut CostMatrix, s: &str, t: &str) -> f64 {
    let distance = visual_edit_distance_with(matrix, s, t);
    confusability_score(distance, s.chars().count(), t.chars().count())
}

/// Visual confusability as a [`Similarity`] metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisualConfusability;

impl VisualConfusability {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Similarity for VisualConfusability {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        how_confusable_are(a, b)
    }

    fn name(&self) -> &'static str {
        "visual_confusability"
    }
}
