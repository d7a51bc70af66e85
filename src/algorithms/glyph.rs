//! Character and digraph similarity accessors
//!
//! Pairs missing from the tables score 1.0 when identical and 0.0
//! otherwise.
//!
//! [`character_similarity`] requires lower-case input, while
//! [`digraph_similarity`] lower-cases its spans itself. The edit distance
//! engine lower-cases both strings once up front and goes through the
//! `*_lower` lookups, so the hot path never re-normalizes.

use super::tables::{SimilarityTables, Span, TableKey};

/// Rate the visual similarity of two lower-case characters.
///
/// # Panics
/// Panics if either character is upper case. Normalizing case is the
/// caller's job.
///
/// # Example
/// ```
/// use confusable::algorithms::glyph::character_similarity;
///
/// assert_eq!(character_similarity('l', '1'), 1.0);
/// assert_eq!(character_similarity('a', 'c'), 0.2);
/// assert_eq!(character_similarity('a', 'b'), 0.0);
/// ```
#[must_use]
pub fn character_similarity(a: char, b: char) -> f64 {
    assert!(
        !a.is_ascii_uppercase(),
        "character_similarity expects lower-case input, got {a:?}"
    );
    assert!(
        !b.is_ascii_uppercase(),
        "character_similarity expects lower-case input, got {b:?}"
    );
    character_similarity_lower(SimilarityTables::global(), a, b)
}

/// Rate the visual similarity of two spans of one or two characters.
///
/// Case is ignored.
///
/// # Panics
/// Panics if a span is empty or longer than two characters, or if neither
/// span is two characters long.
///
/// # Example
/// ```
/// use confusable::algorithms::glyph::digraph_similarity;
///
/// assert_eq!(digraph_similarity("rn", "m"), 1.0);
/// assert_eq!(digraph_similarity("W", "VV"), 0.8);
/// assert_eq!(digraph_similarity("fm", "FM"), 1.0);
/// assert_eq!(digraph_similarity("xb", "JK"), 0.0);
/// ```
#[must_use]
pub fn digraph_similarity(x: &str, y: &str) -> f64 {
    let (x, y) = (Span::parse(x), Span::parse(y));
    assert!(
        x.len() == 2 || y.len() == 2,
        "digraph_similarity needs at least one two-character span, got {x:?} and {y:?}"
    );
    digraph_similarity_lower(SimilarityTables::global(), x.to_lowercase(), y.to_lowercase())
}

/// Character lookup on already lower-cased input.
#[inline]
pub(crate) fn character_similarity_lower(tables: &SimilarityTables, a: char, b: char) -> f64 {
    match tables.characters().lookup(a, b) {
        Some(score) => score,
        None if a == b => 1.0,
        None => 0.0,
    }
}

/// Digraph lookup on already lower-cased spans.
#[inline]
pub(crate) fn digraph_similarity_lower(tables: &SimilarityTables, x: Span, y: Span) -> f64 {
    match tables.digraphs().lookup(x, y) {
        Some(score) => score,
        None if x == y => 1.0,
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_defaults() {
        assert_eq!(character_similarity('a', 'a'), 1.0);
        assert_eq!(character_similarity('-', '-'), 1.0);
        assert_eq!(character_similarity('a', 'b'), 0.0);
        assert_eq!(character_similarity('z', '-'), 0.0);
    }

    #[test]
    fn test_character_pairs() {
        assert_eq!(character_similarity('a', 'c'), 0.2);
        assert_eq!(character_similarity('c', 'a'), 0.2);
        assert_eq!(character_similarity('p', 'b'), 0.2);
        assert_eq!(character_similarity('i', '1'), 0.9);
        assert_eq!(character_similarity('l', '1'), 1.0);
        assert_eq!(character_similarity('u', 'v'), 0.1);
        assert_eq!(character_similarity('v', 'x'), 0.1);
        assert_eq!(character_similarity('v', 'y'), 0.2);
        assert_eq!(character_similarity('0', 'o'), 0.9);
    }

    #[test]
    #[should_panic(expected = "lower-case")]
    fn test_character_rejects_uppercase() {
        let _ = character_similarity('A', 'a');
    }

    #[test]
    fn test_digraph_pairs() {
        assert_eq!(digraph_similarity("cl", "d"), 0.4);
        assert_eq!(digraph_similarity("D", "cl"), 0.4);
        assert_eq!(digraph_similarity("E", "cl"), 0.0);
        assert_eq!(digraph_similarity("f", "fL"), 0.5);
        assert_eq!(digraph_similarity("MN", "NM"), 0.5);
        assert_eq!(digraph_similarity("nn", "mn"), 0.0);
        assert_eq!(digraph_similarity("m", "Nn"), 0.5);
        assert_eq!(digraph_similarity("Aa", "M"), 0.2);
        assert_eq!(digraph_similarity("AA", "AA"), 1.0);
        assert_eq!(digraph_similarity("m", "Rn"), 1.0);
        assert_eq!(digraph_similarity("rP", "m"), 0.0);
    }

    #[test]
    #[should_panic(expected = "two-character span")]
    fn test_digraph_rejects_two_single_characters() {
        let _ = digraph_similarity("a", "b");
    }

    #[test]
    #[should_panic(expected = "one or two characters")]
    fn test_digraph_rejects_empty_span() {
        let _ = digraph_similarity("", "rn");
    }
}
