//! Confusable - visual confusability scoring for short ASCII labels
//!
//! Rates how easily two domain labels or reserved words can be mistaken
//! for each other, to help detect homograph and typosquatting spoofs.
//!
//! # Features
//! - Damerau-Levenshtein distance weighted by curated character and
//!   digraph similarity (`1`/`l`, `rn`/`m`, `vv`/`w`)
//! - Discounted insertion and deletion inside repeated-character runs
//! - A bounded [0, 1] confusability score
//! - Watch-list screening with parallel batch processing
//!
//! Similarity is not transitive: `a` resembling `b` and `b` resembling `c`
//! says nothing about `a` and `c`.
//!
//! # Example
//! ```
//! use confusable::{how_confusable_are, visual_edit_distance};
//!
//! assert_eq!(visual_edit_distance("wams", "warns"), 0.0);
//! assert_eq!(how_confusable_are("exarnple", "example"), 1.0);
//! assert!(how_confusable_are("z", "zoology") < 0.02);
//! ```

pub mod algorithms;
pub mod label;
pub mod screening;
pub mod selftest;

pub use algorithms::{
    character_similarity, digraph_similarity, how_confusable_are, how_confusable_are_with,
    plain_edit_distance, trace_alignment, visual_edit_distance, visual_edit_distance_with,
    CostMatrix, EditDistance, EditOp, EditStep, PlainLevenshtein, Similarity, SimilarityTables,
    TableDiagnostic, VisualConfusability, VisualEditDistance,
};
pub use label::{Label, LabelError, ValidationMode};
pub use screening::{ScreenError, ScreenHit, ScreenOptions, Watchlist};
pub use selftest::{SelfTestFailure, SelfTestReport};
