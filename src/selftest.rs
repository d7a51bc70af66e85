//! Built-in consistency checks
//!
//! Verifies the tables and a set of reference scores, returning every
//! failure as data instead of printing it. Meant for CI and integration
//! tests; nothing on the scoring path calls it.

use crate::algorithms::glyph::{character_similarity, digraph_similarity};
use crate::algorithms::tables::{SimilarityTable, SimilarityTables, TableKey};
use crate::algorithms::{how_confusable_are, visual_edit_distance};
use crate::label::LABEL_ALPHABET;
use serde::Serialize;
use std::fmt;

/// Tolerance for edit distances, which must match almost exactly.
const DISTANCE_TOLERANCE: f64 = 1e-7;

/// Tolerance for confusability scores, which only need two decimals.
const SCORE_TOLERANCE: f64 = 0.01;

const CHARACTER_CASES: &[(char, char, f64)] = &[
    ('a', 'a', 1.0),
    ('A', 'a', 1.0),
    ('a', 'b', 0.0),
    ('a', 'c', 0.2),
    ('p', 'b', 0.2),
    ('c', 'a', 0.2),
    ('i', '1', 0.9),
    ('l', '1', 1.0),
    ('u', 'v', 0.1),
    ('v', 'x', 0.1),
    ('v', 'y', 0.2),
];

const DIGRAPH_CASES: &[(&str, &str, f64)] = &[
    ("cl", "d", 0.4),
    ("D", "cl", 0.4),
    ("E", "cl", 0.0),
    ("f", "fL", 0.5),
    ("fl", "F", 0.5),
    ("fm", "FM", 1.0),
    ("MN", "NM", 0.5),
    ("nm", "mn", 0.5),
    ("nn", "mn", 0.0),
    ("m", "Nn", 0.5),
    ("nn", "m", 0.5),
    ("nn", "j", 0.0),
    ("Aa", "M", 0.2),
    ("m", "AA", 0.2),
    ("AA", "AA", 1.0),
    ("m", "Rn", 1.0),
    ("rn", "m", 1.0),
    ("rP", "m", 0.0),
    ("vv", "w", 0.8),
    ("W", "VV", 0.8),
    ("xb", "JK", 0.0),
];

const DISTANCE_CASES: &[(&str, &str, f64)] = &[
    ("", "", 0.0),
    ("a", "", 1.0),
    ("bc", "", 2.0),
    ("G", "G", 0.0),
    ("H", "h", 0.0),
    ("i", "qI", 1.0),
    ("J", "Jd", 1.0),
    ("K", "mk-", 2.0),
    ("s", "x", 1.0),
    ("lrQ", "l4q", 1.0),
    ("T1", "tl", 0.0),
    ("uh", "vH", 0.9),
    ("Scar", "Soar", 0.7),
    ("labsRUs", "ladsRUs", 0.8),
    ("f", "fl", 0.5),
    ("Clock", "Dock", 0.6),
    ("WN", "vvn", 0.2),
    ("mn", "mn", 0.0),
    ("Mn", "nm", 0.5),
    ("xmn", "xnm", 0.5),
    ("m", "NN", 0.5),
    ("AAf", "mFL", 1.3),
    ("wams", "warns", 0.0),
    ("often", "otfen", 0.7),
    ("cheif", "chief", 1.0),
    ("Pterodactyl", "Tperodactyl", 1.0),
    ("Mm", "mmM", 0.9),
    ("XIIII", "XIII", 0.5),
    ("aaaah", "aaaaah", 0.1),
    ("MiSSsssipPpi", "MisSSssSippi", 0.9),
    ("xw", "5t", 2.0),
    ("w", "dd", 2.0),
    ("aerometeorograph", "floccinaucinihilipilification", 26.1),
];

const CONFUSABILITY_CASES: &[(&str, &str, f64)] = &[
    ("", "", 1.0),
    ("", "2", 0.0),
    ("y", "Y", 1.0),
    ("a", "ab", 0.17),
    ("Corn", "Com", 1.0),
    ("biz", "bz", 0.29),
    ("evample", "example", 0.63),
    ("exomple", "example", 0.69),
    ("exarnple", "example", 1.0),
    ("examqle", "example", 0.63),
    ("examp1e", "example", 1.0),
    ("exampl", "example", 0.55),
    ("examplo", "example", 0.66),
    ("z", "zoology", 0.016),
];

/// Which group of checks a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    TableConsistency,
    CharacterSimilarity,
    DigraphSimilarity,
    EditDistance,
    Confusability,
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Check::TableConsistency => "table consistency",
            Check::CharacterSimilarity => "character similarity",
            Check::DigraphSimilarity => "digraph similarity",
            Check::EditDistance => "edit distance",
            Check::Confusability => "confusability",
        };
        f.write_str(name)
    }
}

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelfTestFailure {
    pub check: Check,
    pub left: String,
    pub right: String,
    pub message: String,
}

impl fmt::Display for SelfTestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?}, {:?}): {}", self.check, self.left, self.right, self.message)
    }
}

/// Outcome of [`run`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelfTestReport {
    pub checks_run: usize,
    pub failures: Vec<SelfTestFailure>,
}

impl SelfTestReport {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, check: Check, left: impl Into<String>, right: impl Into<String>, failure: Option<String>) {
        self.checks_run += 1;
        if let Some(message) = failure {
            self.failures.push(SelfTestFailure {
                check,
                left: left.into(),
                right: right.into(),
                message,
            });
        }
    }

    /// Record a comparison of a symmetric function against an expected
    /// value, computed in both argument orders.
    fn expect_symmetric(
        &mut self,
        check: Check,
        (left, right): (&str, &str),
        (forward, backward): (f64, f64),
        expected: f64,
        tolerance: f64,
    ) {
        let failure = if forward != backward {
            Some(format!("returned {forward} one way and {backward} the other"))
        } else if (forward - expected).abs() >= tolerance {
            Some(format!("returned {forward} instead of {expected}"))
        } else {
            None
        };
        self.record(check, left, right, failure);
    }
}

impl fmt::Display for SelfTestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} checks, {} failures", self.checks_run, self.failures.len())?;
        for failure in &self.failures {
            write!(f, "\n  {failure}")?;
        }
        Ok(())
    }
}

/// Run every built-in check against the process-wide tables.
#[must_use]
pub fn run() -> SelfTestReport {
    let mut report = SelfTestReport::default();
    check_tables(&mut report, SimilarityTables::global());
    check_characters(&mut report);
    check_digraphs(&mut report);
    check_distances(&mut report);
    check_confusability(&mut report);
    report
}

/// Structural checks on a set of tables.
pub fn check_tables(report: &mut SelfTestReport, tables: &SimilarityTables) {
    for diagnostic in tables.diagnostics() {
        report.record(Check::TableConsistency, "", "", Some(diagnostic.to_string()));
    }
    check_table(report, tables.characters());
    check_table(report, tables.digraphs());
}

fn check_table<K: TableKey>(report: &mut SelfTestReport, table: &SimilarityTable<K>) {
    for (a, b, score, _) in table.iter() {
        let reversed = a != b && table.contains_ordered(b, a);
        report.record(
            Check::TableConsistency,
            a.to_string(),
            b.to_string(),
            reversed.then(|| format!("{} table has both orderings", table.kind())),
        );

        if a.has_uppercase() || b.has_uppercase() {
            let (la, lb) = (a.to_lowercase(), b.to_lowercase());
            let failure = match table.lookup(la, lb) {
                Some(lower) if lower == score => None,
                Some(lower) => Some(format!("lower-case ({la}, {lb}) scores {lower}, not {score}")),
                None => Some(format!("lower-case ({la}, {lb}) is missing")),
            };
            report.record(Check::TableConsistency, a.to_string(), b.to_string(), failure);
        }
    }
}

fn check_characters(report: &mut SelfTestReport) {
    for &(a, b, expected) in CHARACTER_CASES {
        let (la, lb) = (a.to_ascii_lowercase(), b.to_ascii_lowercase());
        report.expect_symmetric(
            Check::CharacterSimilarity,
            (&a.to_string(), &b.to_string()),
            (character_similarity(la, lb), character_similarity(lb, la)),
            expected,
            DISTANCE_TOLERANCE,
        );
    }

    // Every pair of label characters must at least be symmetric.
    for a in LABEL_ALPHABET.chars() {
        for b in LABEL_ALPHABET.chars() {
            let (forward, backward) = (character_similarity(a, b), character_similarity(b, a));
            report.expect_symmetric(
                Check::CharacterSimilarity,
                (&a.to_string(), &b.to_string()),
                (forward, backward),
                forward,
                DISTANCE_TOLERANCE,
            );
        }
    }
}

fn check_digraphs(report: &mut SelfTestReport) {
    for &(x, y, expected) in DIGRAPH_CASES {
        report.expect_symmetric(
            Check::DigraphSimilarity,
            (x, y),
            (digraph_similarity(x, y), digraph_similarity(y, x)),
            expected,
            DISTANCE_TOLERANCE,
        );
    }
}

fn check_distances(report: &mut SelfTestReport) {
    for &(s, t, expected) in DISTANCE_CASES {
        report.expect_symmetric(
            Check::EditDistance,
            (s, t),
            (visual_edit_distance(s, t), visual_edit_distance(t, s)),
            expected,
            DISTANCE_TOLERANCE,
        );
    }
}

fn check_confusability(report: &mut SelfTestReport) {
    for &(s, t, expected) in CONFUSABILITY_CASES {
        report.expect_symmetric(
            Check::Confusability,
            (s, t),
            (how_confusable_are(s, t), how_confusable_are(t, s)),
            expected,
            SCORE_TOLERANCE,
        );
    }
}
