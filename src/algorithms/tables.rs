//! Visual similarity tables
//!
//! Hand-curated scores for pairs of characters (`a`/`o`) and for digraphs
//! against characters or other digraphs (`rn`/`m`). Scores range from 0,
//! completely different, to 1, indistinguishable in at least one common
//! font.
//!
//! Each pair is authored in one ordering only and lookups try both. Some
//! pairs are authored in upper case because that is the form that causes
//! confusion (`O`/`Q`); comparisons happen in lower case, so building a
//! table synthesizes the lower-case twin of every such pair.
//!
//! The process-wide tables are built once, on first use, and never change
//! afterwards. Construction problems are returned as [`TableDiagnostic`]s
//! and logged at `warn` level; the authored value always wins.

use ahash::AHashMap;
use log::warn;
use once_cell::sync::Lazy;
use std::fmt;
use std::hash::Hash;
use thiserror::Error;

/// Single character pairs.
///
/// `B`/`D` and `C`/`O` are omitted on purpose: they are more similar in
/// lower case, which the lower-case pairs already cover.
pub const CHARACTER_PAIRS: &[(char, char, f64)] = &[
    ('0', 'O', 0.9),
    ('1', '7', 0.5), // European 1s
    ('1', 'i', 0.9),
    ('1', 'l', 1.0),
    ('2', 'Z', 0.2),
    ('3', 'E', 0.1),
    ('4', 'A', 0.1),
    ('4', 'H', 0.1),
    ('4', '9', 0.2),
    ('5', 'S', 0.2),
    ('6', 'b', 0.3),
    ('8', 'B', 0.3),
    ('9', 'P', 0.1),
    ('a', 'c', 0.2),
    ('a', 'd', 0.2),
    ('a', 'e', 0.2),
    ('a', 'o', 0.3),
    ('A', 'H', 0.1),
    ('b', 'd', 0.2),
    ('b', 'h', 0.2),
    ('B', 'E', 0.1),
    ('B', 'P', 0.2),
    ('B', 'R', 0.2),
    ('c', 'e', 0.2),
    ('c', 'o', 0.3),
    ('C', 'G', 0.2),
    ('d', 'o', 0.2),
    ('e', 'o', 0.2),
    ('E', 'F', 0.2),
    ('F', 'P', 0.1),
    ('f', 't', 0.3),
    ('g', 'q', 0.2),
    ('G', 'O', 0.1),
    ('h', 'k', 0.1),
    ('h', 'n', 0.4),
    ('i', 'j', 0.5),
    ('I', 'l', 1.0),
    ('K', 'X', 0.1),
    ('m', 'n', 0.1), // proportional fonts
    ('n', 'r', 0.1),
    ('o', 'p', 0.1),
    ('O', 'Q', 0.4),
    ('p', 'q', 0.1),
    ('P', 'R', 0.2),
    ('u', 'v', 0.1),
    ('v', 'w', 0.1),
    ('v', 'x', 0.1),
    ('v', 'y', 0.2),
    ('x', 'y', 0.1),
];

/// Digraph pairs. At least one side of every pair is two characters.
pub const DIGRAPH_PAIRS: &[(&str, &str, f64)] = &[
    ("cl", "d", 0.4), // proportional fonts
    ("fl", "f", 0.5), // ligatures
    ("mn", "nm", 0.5),
    ("nn", "m", 0.5),
    ("AA", "M", 0.2),
    ("rn", "m", 1.0),
    ("VV", "W", 0.8),
];

/// Which of the two tables a diagnostic or entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Character,
    Digraph,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Character => f.write_str("character"),
            TableKind::Digraph => f.write_str("digraph"),
        }
    }
}

/// A consistency problem found while building a table.
///
/// Diagnostics are warnings: the table is still built, keeping the value
/// that was authored first.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableDiagnostic {
    #[error("{table} table: ({first}, {second}) is present in both orderings")]
    ReversedDuplicate {
        table: TableKind,
        first: String,
        second: String,
    },

    #[error(
        "{table} table: ({first}, {second}) would insert ({lower_first}, {lower_second}) = {derived}, \
         but it is already present as {existing}"
    )]
    LowercaseConflict {
        table: TableKind,
        first: String,
        second: String,
        lower_first: String,
        lower_second: String,
        derived: f64,
        existing: f64,
    },
}

/// A key type that can be stored in a [`SimilarityTable`].
pub trait TableKey: Copy + Eq + Hash + fmt::Display {
    /// True if any character of the key is upper case.
    fn has_uppercase(&self) -> bool;

    /// The key with every character lower-cased.
    fn to_lowercase(&self) -> Self;
}

impl TableKey for char {
    fn has_uppercase(&self) -> bool {
        self.is_ascii_uppercase()
    }

    fn to_lowercase(&self) -> Self {
        self.to_ascii_lowercase()
    }
}

/// One or two characters, compared as a single visual unit.
///
/// Stored inline so digraph lookups never allocate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    chars: [char; 2],
    len: u8,
}

impl Span {
    /// Build a span from a slice of one or two characters.
    ///
    /// # Panics
    /// Panics if `chars` is empty or longer than two characters.
    #[must_use]
    pub fn from_chars(chars: &[char]) -> Self {
        match *chars {
            [a] => Self {
                chars: [a, '\0'],
                len: 1,
            },
            [a, b] => Self {
                chars: [a, b],
                len: 2,
            },
            _ => panic!(
                "a span must be one or two characters, got {}",
                chars.len()
            ),
        }
    }

    /// Build a span from a string of one or two characters.
    ///
    /// # Panics
    /// Panics if `s` is empty or longer than two characters.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let mut chars = ['\0'; 2];
        let mut len = 0;
        for c in s.chars() {
            assert!(len < 2, "a span must be one or two characters, got {s:?}");
            chars[len] = c;
            len += 1;
        }
        Self::from_chars(&chars[..len])
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Spans are never empty; provided for API symmetry with `len`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    #[must_use]
    pub fn as_chars(&self) -> &[char] {
        &self.chars[..self.len()]
    }
}

impl TableKey for Span {
    fn has_uppercase(&self) -> bool {
        self.as_chars().iter().any(char::is_ascii_uppercase)
    }

    fn to_lowercase(&self) -> Self {
        let mut lowered = *self;
        for c in &mut lowered.chars[..self.len as usize] {
            *c = c.to_ascii_lowercase();
        }
        lowered
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.as_chars() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Where a table entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOrigin {
    Authored,
    /// Lower-case twin of an authored pair containing upper case.
    Synthesized,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    score: f64,
    origin: EntryOrigin,
}

/// An unordered-pair similarity table.
///
/// Each pair is stored in exactly one ordering; [`lookup`](Self::lookup)
/// tries both.
#[derive(Debug, Clone)]
pub struct SimilarityTable<K: TableKey> {
    kind: TableKind,
    entries: AHashMap<(K, K), Entry>,
}

impl<K: TableKey> SimilarityTable<K> {
    /// Build a table from authored pairs, adding lower-case twins.
    ///
    /// Returns the table together with every consistency problem found.
    /// Pairs already present in the reverse ordering are skipped. A
    /// synthesized twin never replaces an entry that is already present.
    #[must_use]
    pub fn build<I>(kind: TableKind, pairs: I) -> (Self, Vec<TableDiagnostic>)
    where
        I: IntoIterator<Item = (K, K, f64)>,
    {
        let mut table = Self {
            kind,
            entries: AHashMap::new(),
        };
        let mut diagnostics = Vec::new();
        let mut authored = Vec::new();

        for (a, b, score) in pairs {
            if table.entries.contains_key(&(b, a)) && a != b {
                diagnostics.push(TableDiagnostic::ReversedDuplicate {
                    table: kind,
                    first: a.to_string(),
                    second: b.to_string(),
                });
                continue;
            }
            table.entries.entry((a, b)).or_insert(Entry {
                score,
                origin: EntryOrigin::Authored,
            });
            authored.push((a, b, score));
        }

        for (a, b, score) in authored {
            if !a.has_uppercase() && !b.has_uppercase() {
                continue;
            }
            let (la, lb) = (a.to_lowercase(), b.to_lowercase());
            match table.find(la, lb) {
                Some(existing) if existing.score == score => {}
                Some(existing) => diagnostics.push(TableDiagnostic::LowercaseConflict {
                    table: kind,
                    first: a.to_string(),
                    second: b.to_string(),
                    lower_first: la.to_string(),
                    lower_second: lb.to_string(),
                    derived: score,
                    existing: existing.score,
                }),
                None => {
                    table.entries.insert(
                        (la, lb),
                        Entry {
                            score,
                            origin: EntryOrigin::Synthesized,
                        },
                    );
                }
            }
        }

        (table, diagnostics)
    }

    fn find(&self, a: K, b: K) -> Option<Entry> {
        self.entries
            .get(&(a, b))
            .or_else(|| self.entries.get(&(b, a)))
            .copied()
    }

    /// Score of the unordered pair `(a, b)`, if present.
    #[inline]
    #[must_use]
    pub fn lookup(&self, a: K, b: K) -> Option<f64> {
        self.find(a, b).map(|entry| entry.score)
    }

    /// True if `(a, b)` is stored in exactly this ordering.
    #[must_use]
    pub fn contains_ordered(&self, a: K, b: K) -> bool {
        self.entries.contains_key(&(a, b))
    }

    #[must_use]
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over stored pairs in their stored ordering.
    pub fn iter(&self) -> impl Iterator<Item = (K, K, f64, EntryOrigin)> + '_ {
        self.entries
            .iter()
            .map(|(&(a, b), entry)| (a, b, entry.score, entry.origin))
    }
}

/// The character and digraph tables, built together.
#[derive(Debug, Clone)]
pub struct SimilarityTables {
    characters: SimilarityTable<char>,
    digraphs: SimilarityTable<Span>,
    diagnostics: Vec<TableDiagnostic>,
}

static TABLES: Lazy<SimilarityTables> = Lazy::new(|| {
    let tables = SimilarityTables::build();
    for diagnostic in tables.diagnostics() {
        warn!("{diagnostic}");
    }
    tables
});

impl SimilarityTables {
    /// Build the tables from the curated pair lists.
    #[must_use]
    pub fn build() -> Self {
        Self::from_pairs(
            CHARACTER_PAIRS.iter().copied(),
            DIGRAPH_PAIRS
                .iter()
                .map(|&(a, b, score)| (Span::parse(a), Span::parse(b), score)),
        )
    }

    /// Build tables from arbitrary pair lists.
    ///
    /// # Panics
    /// Panics if a digraph pair does not have at least one two-character
    /// side.
    #[must_use]
    pub fn from_pairs<C, D>(characters: C, digraphs: D) -> Self
    where
        C: IntoIterator<Item = (char, char, f64)>,
        D: IntoIterator<Item = (Span, Span, f64)>,
    {
        let (characters, mut diagnostics) =
            SimilarityTable::build(TableKind::Character, characters);
        let (digraphs, digraph_diagnostics) = SimilarityTable::build(
            TableKind::Digraph,
            digraphs.into_iter().inspect(|(a, b, _)| {
                assert!(
                    a.len() == 2 || b.len() == 2,
                    "digraph pair ({a}, {b}) needs a two-character side"
                );
            }),
        );
        diagnostics.extend(digraph_diagnostics);

        Self {
            characters,
            digraphs,
            diagnostics,
        }
    }

    /// The process-wide tables, built on first use.
    #[inline]
    pub fn global() -> &'static SimilarityTables {
        &TABLES
    }

    #[inline]
    #[must_use]
    pub fn characters(&self) -> &SimilarityTable<char> {
        &self.characters
    }

    #[inline]
    #[must_use]
    pub fn digraphs(&self) -> &SimilarityTable<Span> {
        &self.digraphs
    }

    /// Problems found while building; empty for the curated tables.
    #[must_use]
    pub fn diagnostics(&self) -> &[TableDiagnostic] {
        &self.diagnostics
    }
}
