//! Visually weighted Damerau-Levenshtein distance
//!
//! A generalized edit distance in which substitutions between characters
//! that look alike are cheap, digraphs can stand in for single characters
//! (`rn` for `m`) and extending a run of repeated characters is discounted.
//!
//! Cell `[i][j]` of the cost matrix holds the cheapest way to turn the
//! first `i` characters of `s` into the first `j` characters of `t`. It is
//! the minimum over these edges:
//!
//! | edge            | from            | cost                                   |
//! |-----------------|-----------------|----------------------------------------|
//! | delete          | `[i-1][j]`      | 1                                      |
//! | insert          | `[i][j-1]`      | 1                                      |
//! | repeat insert   | `[i][j-1]`      | run discount                           |
//! | repeat delete   | `[i-1][j]`      | run discount, strings swapped          |
//! | substitute      | `[i-1][j-1]`    | 1 - character similarity               |
//! | two for one     | `[i-2][j]`      | 1 - digraph similarity, 2 if unrelated |
//! | one for two     | `[i][j-2]`      | 1 - digraph similarity, 2 if unrelated |
//! | two for two     | `[i-2][j-2]`    | 1 - digraph similarity, 2 if unrelated |
//! | transpose       | `[i-2][j-2]`    | 1 - character similarity               |
//!
//! Every edge cost is symmetric in its two operands, so the distance is
//! symmetric too. Comparison is case-insensitive.
//!
//! Characters at the start or end of a string are not weighted any
//! differently from those in the middle.

use super::glyph::{character_similarity_lower, digraph_similarity_lower};
use super::repetition::repetition_discount;
use super::tables::{SimilarityTables, Span};
use super::EditDistance;
use log::{log_enabled, trace, Level};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Lower-cased characters of one operand.
type Chars = SmallVec<[char; 64]>;

/// Cost of replacing two characters with something that does not resemble
/// them at all.
const UNRELATED_DIGRAPH_COST: f64 = 2.0;

/// Dense `(len(s) + 1) x (len(t) + 1)` matrix of partial edit costs.
///
/// A matrix can be reused across calls; each computation resets it to the
/// size it needs. Reusing one matrix per thread avoids an allocation per
/// comparison when screening many strings.
#[derive(Debug, Clone, Default)]
pub struct CostMatrix {
    cells: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl CostMatrix {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preallocate room for a `rows x cols` matrix.
    #[must_use]
    pub fn with_capacity(rows: usize, cols: usize) -> Self {
        Self {
            cells: Vec::with_capacity(rows * cols),
            rows: 0,
            cols: 0,
        }
    }

    /// Resize to `rows x cols` and zero every cell.
    pub fn reset(&mut self, rows: usize, cols: usize) {
        self.cells.clear();
        self.cells.resize(rows * cols, 0.0);
        self.rows = rows;
        self.cols = cols;
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.rows && j < self.cols);
        self.cells[i * self.cols + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        debug_assert!(i < self.rows && j < self.cols);
        self.cells[i * self.cols + j] = value;
    }
}

/// The kind of edge taken into a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOp {
    /// Substitution of a character by the same character.
    Match,
    Delete,
    Insert,
    /// Insertion that extends a run of repeated characters.
    RepeatInsert,
    /// Deletion that shortens a run of repeated characters.
    RepeatDelete,
    Substitute,
    TwoForOne,
    OneForTwo,
    TwoForTwo,
    Transpose,
}

impl EditOp {
    /// How many characters of `s` and of `t` the edge consumes.
    #[must_use]
    pub fn step(self) -> (usize, usize) {
        match self {
            EditOp::Delete | EditOp::RepeatDelete => (1, 0),
            EditOp::Insert | EditOp::RepeatInsert => (0, 1),
            EditOp::Match | EditOp::Substitute => (1, 1),
            EditOp::TwoForOne => (2, 1),
            EditOp::OneForTwo => (1, 2),
            EditOp::TwoForTwo | EditOp::Transpose => (2, 2),
        }
    }
}

/// One edge of an optimal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EditStep {
    pub op: EditOp,
    /// Start of the consumed characters in `s`.
    pub source_pos: usize,
    /// Start of the consumed characters in `t`.
    pub target_pos: usize,
    pub cost: f64,
}

/// Lower-cased operands plus the tables they are priced with.
struct Operands<'a> {
    s: &'a [char],
    t: &'a [char],
    tables: &'a SimilarityTables,
}

/// Candidate edges into a cell, as `(op, cost)`.
type Edges = SmallVec<[(EditOp, f64); 9]>;

fn digraph_cost(tables: &SimilarityTables, x: &[char], y: &[char]) -> f64 {
    let cost = 1.0 - digraph_similarity_lower(tables, Span::from_chars(x), Span::from_chars(y));
    if cost == 1.0 {
        UNRELATED_DIGRAPH_COST
    } else {
        cost
    }
}

/// Every edge that can lead into cell `[i][j]`, `i, j >= 1`.
fn edges_into(ops: &Operands<'_>, i: usize, j: usize) -> Edges {
    let (s, t, tables) = (ops.s, ops.t, ops.tables);
    let mut edges = Edges::new();

    edges.push((EditOp::Delete, 1.0));
    edges.push((EditOp::Insert, 1.0));
    if let Some(cost) = repetition_discount(s, i - 1, t, j - 1) {
        edges.push((EditOp::RepeatInsert, cost));
    }
    if let Some(cost) = repetition_discount(t, j - 1, s, i - 1) {
        edges.push((EditOp::RepeatDelete, cost));
    }

    let (a, b) = (s[i - 1], t[j - 1]);
    let op = if a == b { EditOp::Match } else { EditOp::Substitute };
    edges.push((op, 1.0 - character_similarity_lower(tables, a, b)));

    if i >= 2 {
        edges.push((EditOp::TwoForOne, digraph_cost(tables, &s[i - 2..i], &t[j - 1..j])));
    }
    if j >= 2 {
        edges.push((EditOp::OneForTwo, digraph_cost(tables, &s[i - 1..i], &t[j - 2..j])));
    }
    if i >= 2 && j >= 2 {
        edges.push((EditOp::TwoForTwo, digraph_cost(tables, &s[i - 2..i], &t[j - 2..j])));
        if s[i - 2] == t[j - 1] && s[i - 1] == t[j - 2] {
            edges.push((EditOp::Transpose, 1.0 - character_similarity_lower(tables, a, b)));
        }
    }

    edges
}

/// Origin cell of `op` when it leads into `[i][j]`.
#[inline]
fn origin(op: EditOp, i: usize, j: usize) -> (usize, usize) {
    let (di, dj) = op.step();
    (i - di, j - dj)
}

/// Cheapest edge into `[i][j]` given the filled cells before it.
fn cheapest_edge(matrix: &CostMatrix, ops: &Operands<'_>, i: usize, j: usize) -> (EditOp, f64) {
    edges_into(ops, i, j)
        .into_iter()
        .map(|(op, cost)| {
            let (oi, oj) = origin(op, i, j);
            (op, matrix.get(oi, oj) + cost)
        })
        .fold((EditOp::Delete, f64::INFINITY), |best, candidate| {
            if candidate.1 < best.1 {
                candidate
            } else {
                best
            }
        })
}

/// Fill `matrix` for `ops` and return the bottom-right cell.
fn fill(matrix: &mut CostMatrix, ops: &Operands<'_>) -> f64 {
    let (m, n) = (ops.s.len(), ops.t.len());
    matrix.reset(m + 1, n + 1);

    for i in 0..=m {
        matrix.set(i, 0, i as f64);
    }
    for j in 0..=n {
        matrix.set(0, j, j as f64);
    }

    let tracing = log_enabled!(Level::Trace);
    for i in 1..=m {
        for j in 1..=n {
            let (op, total) = cheapest_edge(matrix, ops, i, j);
            if tracing {
                trace!("[{i}][{j}] {op:?} -> {total}");
            }
            matrix.set(i, j, total);
        }
    }

    matrix.get(m, n)
}

fn lowercase_chars(s: &str) -> Chars {
    s.chars().map(|c| c.to_ascii_lowercase()).collect()
}

/// Visually weighted edit distance between `s` and `t`.
///
/// The result is a non-negative real number. It can be zero for
/// different strings whose characters are tabled as indistinguishable.
///
/// # Example
/// ```
/// use confusable::algorithms::visual::visual_edit_distance;
///
/// assert_eq!(visual_edit_distance("wams", "warns"), 0.0);
/// assert_eq!(visual_edit_distance("paypal", "paypa1"), 0.0);
/// assert!((visual_edit_distance("f", "fl") - 0.5).abs() < 1e-9);
/// ```
#[must_use]
pub fn visual_edit_distance(s: &str, t: &str) -> f64 {
    let mut matrix = CostMatrix::new();
    visual_edit_distance_with(&mut matrix, s, t)
}

/// [`visual_edit_distance`] using a caller-provided matrix.
#[must_use]
pub fn visual_edit_distance_with(matrix: &mut CostMatrix, s: &str, t: &str) -> f64 {
    let (sl, tl) = (lowercase_chars(s), lowercase_chars(t));
    let ops = Operands {
        s: &sl,
        t: &tl,
        tables: SimilarityTables::global(),
    };
    fill(matrix, &ops)
}

/// One optimal alignment of `s` onto `t`, in string order.
///
/// The step costs sum to [`visual_edit_distance`]. Ties are broken in
/// favor of the edge listed first in the module table.
#[must_use]
pub fn trace_alignment(s: &str, t: &str) -> Vec<EditStep> {
    let (sl, tl) = (lowercase_chars(s), lowercase_chars(t));
    let ops = Operands {
        s: &sl,
        t: &tl,
        tables: SimilarityTables::global(),
    };
    let mut matrix = CostMatrix::new();
    fill(&mut matrix, &ops);

    let mut steps = Vec::new();
    let (mut i, mut j) = (sl.len(), tl.len());
    while i > 0 || j > 0 {
        let (op, cost) = if i == 0 {
            (EditOp::Insert, 1.0)
        } else if j == 0 {
            (EditOp::Delete, 1.0)
        } else {
            let target = matrix.get(i, j);
            edges_into(&ops, i, j)
                .into_iter()
                .find(|&(op, cost)| {
                    let (oi, oj) = origin(op, i, j);
                    matrix.get(oi, oj) + cost == target
                })
                .unwrap_or_else(|| unreachable!("cell [{i}][{j}] has no originating edge"))
        };
        let (oi, oj) = origin(op, i, j);
        steps.push(EditStep {
            op,
            source_pos: oi,
            target_pos: oj,
            cost,
        });
        (i, j) = (oi, oj);
    }

    steps.reverse();
    steps
}

/// Visually weighted edit distance as an [`EditDistance`] metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisualEditDistance;

impl VisualEditDistance {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EditDistance for VisualEditDistance {
    fn distance(&self, a: &str, b: &str) -> f64 {
        visual_edit_distance(a, b)
    }

    fn name(&self) -> &'static str {
        "visual_edit_distance"
    }
}
