//! Watch-list screening
//!
//! Scores candidate labels against a list of protected labels and reports
//! the ones that look confusable. Large batches are scored in parallel,
//! each worker reusing a single cost matrix.

use crate::algorithms::{confusability_score, visual_edit_distance_with, CostMatrix};
use crate::label::{Label, LabelError, ValidationMode};
use ahash::AHashSet;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of comparisons for parallel processing.
///
/// Below this, thread pool coordination costs more than it saves.
const PARALLEL_THRESHOLD: usize = 100;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScreenError {
    #[error("watch-list is empty")]
    EmptyWatchlist,

    #[error("invalid watch-list label {label:?}: {source}")]
    InvalidWatchlistLabel {
        label: String,
        #[source]
        source: LabelError,
    },

    #[error("invalid candidate {candidate:?}: {source}")]
    InvalidCandidate {
        candidate: String,
        #[source]
        source: LabelError,
    },

    #[error("min_score must be a finite number in range [0.0, 1.0], got {0}")]
    InvalidThreshold(f64),
}

/// Options for [`Watchlist::screen`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenOptions {
    /// Minimum confusability score for a protected label to be reported.
    pub min_score: f64,
    /// Maximum number of hits per candidate.
    pub limit: Option<usize>,
    /// Reject candidates outside the label alphabet.
    pub strict_labels: bool,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            min_score: 0.5,
            limit: None,
            strict_labels: true,
        }
    }
}

impl ScreenOptions {
    fn validation_mode(&self) -> ValidationMode {
        if self.strict_labels {
            ValidationMode::Strict
        } else {
            ValidationMode::Lenient
        }
    }

    fn validate(&self) -> Result<(), ScreenError> {
        if self.min_score.is_finite() && (0.0..=1.0).contains(&self.min_score) {
            Ok(())
        } else {
            Err(ScreenError::InvalidThreshold(self.min_score))
        }
    }
}

/// A protected label that a candidate resembles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenHit {
    pub label: String,
    pub score: f64,
    pub distance: f64,
}

/// A set of protected labels.
#[derive(Debug, Clone)]
pub struct Watchlist {
    labels: Vec<Label>,
}

impl Watchlist {
    /// Validate and collect protected labels. Duplicates, compared after
    /// lower-casing, are kept once in first-seen order.
    ///
    /// # Errors
    /// Returns [`ScreenError::InvalidWatchlistLabel`] for the first label
    /// that fails validation and [`ScreenError::EmptyWatchlist`] if no
    /// labels were given.
    pub fn new<I, S>(labels: I, mode: ValidationMode) -> Result<Self, ScreenError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = AHashSet::new();
        let mut unique = Vec::new();
        for raw in labels {
            let raw = raw.as_ref();
            let label = Label::parse(raw, mode).map_err(|source| ScreenError::InvalidWatchlistLabel {
                label: raw.to_string(),
                source,
            })?;
            if seen.insert(label.clone()) {
                unique.push(label);
            }
        }

        if unique.is_empty() {
            return Err(ScreenError::EmptyWatchlist);
        }
        Ok(Self { labels: unique })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Protected labels that `candidate` resembles, best first.
    ///
    /// # Errors
    /// Returns [`ScreenError::InvalidThreshold`] for a bad `min_score` and
    /// [`ScreenError::InvalidCandidate`] if `candidate` fails validation.
    pub fn screen(&self, candidate: &str, options: &ScreenOptions) -> Result<Vec<ScreenHit>, ScreenError> {
        options.validate()?;
        let candidate = parse_candidate(candidate, options)?;
        let mut matrix = CostMatrix::new();
        Ok(self.screen_with(&mut matrix, &candidate, options))
    }

    /// [`screen`](Self::screen) for many candidates, results in input
    /// order. Every candidate is validated before any scoring starts.
    ///
    /// # Errors
    /// Same as [`screen`](Self::screen), for the first failing candidate.
    pub fn screen_batch<S>(
        &self,
        candidates: &[S],
        options: &ScreenOptions,
    ) -> Result<Vec<(String, Vec<ScreenHit>)>, ScreenError>
    where
        S: AsRef<str> + Sync,
    {
        options.validate()?;
        let parsed = candidates
            .iter()
            .map(|c| parse_candidate(c.as_ref(), options))
            .collect::<Result<Vec<_>, _>>()?;

        let comparisons = parsed.len().saturating_mul(self.labels.len());
        let parallel = comparisons >= PARALLEL_THRESHOLD;
        let hits: Vec<Vec<ScreenHit>> = if parallel {
            parsed
                .par_iter()
                .map_init(CostMatrix::new, |matrix, candidate| {
                    self.screen_with(matrix, candidate, options)
                })
                .collect()
        } else {
            let mut matrix = CostMatrix::new();
            parsed
                .iter()
                .map(|candidate| self.screen_with(&mut matrix, candidate, options))
                .collect()
        };

        debug!(
            "screened {} candidates against {} labels ({} hits, parallel: {})",
            parsed.len(),
            self.labels.len(),
            hits.iter().map(Vec::len).sum::<usize>(),
            parallel
        );

        Ok(candidates
            .iter()
            .map(|c| c.as_ref().to_string())
            .zip(hits)
            .collect())
    }

    fn screen_with(&self, matrix: &mut CostMatrix, candidate: &Label, options: &ScreenOptions) -> Vec<ScreenHit> {
        let candidate_len = candidate.len();
        let mut hits: Vec<ScreenHit> = self
            .labels
            .iter()
            .filter_map(|label| {
                let distance = visual_edit_distance_with(matrix, candidate.as_str(), label.as_str());
                let score = confusability_score(distance, candidate_len, label.len());
                (score >= options.min_score).then(|| ScreenHit {
                    label: label.to_string(),
                    score,
                    distance,
                })
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.label.cmp(&b.label)));
        if let Some(limit) = options.limit {
            hits.truncate(limit);
        }
        hits
    }
}

fn parse_candidate(candidate: &str, options: &ScreenOptions) -> Result<Label, ScreenError> {
    Label::parse(candidate, options.validation_mode()).map_err(|source| ScreenError::InvalidCandidate {
        candidate: candidate.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watchlist() -> Watchlist {
        Watchlist::new(["example", "paypal", "microsoft", "google"], ValidationMode::Strict).unwrap()
    }

    #[test]
    fn test_screen_finds_homoglyph() {
        let hits = watchlist().screen("paypa1", &ScreenOptions::default()).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].label, "paypal");
        assert_eq!(hits[0].score, 1.0);
        assert_eq!(hits[0].distance, 0.0);
    }

    #[test]
    fn test_screen_sorted_and_limited() {
        let list = Watchlist::new(["example", "exampel", "sample"], ValidationMode::Strict).unwrap();
        let options = ScreenOptions {
            min_score: 0.0,
            ..ScreenOptions::default()
        };
        let hits = list.screen("exarnple", &options).unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].label, "example");
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));

        let limited = list
            .screen("exarnple", &ScreenOptions { limit: Some(1), ..options })
            .unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_exact_match_reported() {
        let hits = watchlist().screen("Google", &ScreenOptions::default()).unwrap();
        assert_eq!(hits[0].label, "google");
        assert_eq!(hits[0].score, 1.0);
    }

    #[test]
    fn test_watchlist_dedup_and_errors() {
        let list = Watchlist::new(["Example", "example", "test"], ValidationMode::Strict).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.labels()[0].as_str(), "example");

        assert_eq!(
            Watchlist::new(Vec::<String>::new(), ValidationMode::Strict).unwrap_err(),
            ScreenError::EmptyWatchlist
        );
        assert!(matches!(
            Watchlist::new(["ok", "not ok"], ValidationMode::Strict),
            Err(ScreenError::InvalidWatchlistLabel { .. })
        ));
    }

    #[test]
    fn test_invalid_threshold() {
        for min_score in [-0.1, 1.5, f64::NAN] {
            let options = ScreenOptions {
                min_score,
                ..ScreenOptions::default()
            };
            assert!(matches!(
                watchlist().screen("paypal", &options),
                Err(ScreenError::InvalidThreshold(_))
            ));
        }
    }

    #[test]
    fn test_candidate_validation() {
        let err = watchlist().screen("pay pal", &ScreenOptions::default()).unwrap_err();
        assert!(matches!(err, ScreenError::InvalidCandidate { .. }));

        let lenient = ScreenOptions {
            strict_labels: false,
            ..ScreenOptions::default()
        };
        assert!(watchlist().screen("pay pal", &lenient).is_ok());
    }

    #[test]
    fn test_batch_matches_single() {
        let list = watchlist();
        let options = ScreenOptions {
            min_score: 0.3,
            ..ScreenOptions::default()
        };
        // 30 candidates x 4 labels takes the parallel path
        let candidates: Vec<String> = ["paypa1", "rnicrosoft", "g00gle", "exarnple", "unrelated"]
            .iter()
            .cycle()
            .take(30)
            .map(|s| s.to_string())
            .collect();

        let batch = list.screen_batch(&candidates, &options).unwrap();
        assert_eq!(batch.len(), candidates.len());
        for ((candidate, hits), expected) in batch.iter().zip(&candidates) {
            assert_eq!(candidate, expected);
            assert_eq!(hits, &list.screen(candidate, &options).unwrap());
        }
    }

    #[test]
    fn test_batch_rejects_before_scoring() {
        let result = watchlist().screen_batch(&["paypa1", ""], &ScreenOptions::default());
        assert!(matches!(result, Err(ScreenError::InvalidCandidate { .. })));
    }

    #[test]
    fn test_options_serde_defaults() {
        let options: ScreenOptions = serde_json::from_str(r#"{"min_score": 0.8}"#).unwrap();
        assert_eq!(options.min_score, 0.8);
        assert_eq!(options.limit, None);
        assert!(options.strict_labels);
    }
}
