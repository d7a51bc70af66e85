//! Visual string similarity algorithms
//!
//! Leaves first: the similarity tables, the character and digraph
//! accessors over them, the repetition discount, the weighted edit
//! distance engine and the confusability score built on it. A plain
//! Levenshtein baseline sits alongside for comparison.
//!
//! Each algorithm is a standalone function for composability, plus a
//! trait-based interface for plugging metrics into screening.

pub mod baseline;
pub mod confusability;
pub mod glyph;
pub mod repetition;
pub mod tables;
pub mod visual;

pub use baseline::*;
pub use confusability::*;
pub use glyph::{character_similarity, digraph_similarity};
pub use repetition::*;
pub use tables::{SimilarityTables, Span, TableDiagnostic, TableKind};
pub use visual::*;

/// Trait for all similarity metrics.
/// Returns a value between 0.0 (completely different) and 1.0 (identical).
pub trait Similarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;

    /// Convenience method for distance (1.0 - similarity)
    fn distance(&self, a: &str, b: &str) -> f64 {
        1.0 - self.similarity(a, b)
    }

    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;
}

/// Trait for edit distances. Distances are real-valued because weighted
/// edits cost fractions of a unit.
pub trait EditDistance: Send + Sync {
    fn distance(&self, a: &str, b: &str) -> f64;

    /// Convert to normalized similarity score (0.0 to 1.0)
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let dist = self.distance(a, b);
        let max_len = a.chars().count().max(b.chars().count());
        if max_len == 0 {
            1.0
        } else {
            (1.0 - dist / max_len as f64).max(0.0)
        }
    }

    fn name(&self) -> &'static str;
}

/// Blanket implementation: any EditDistance is also a Similarity
impl<T: EditDistance> Similarity for T {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        EditDistance::similarity(self, a, b)
    }

    fn name(&self) -> &'static str {
        EditDistance::name(self)
    }
}
