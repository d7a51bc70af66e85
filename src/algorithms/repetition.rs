//! Repeated-character run discount
//!
//! People miscount repeated letters: `misssippi` reads much like
//! `mississippi`'s `ss`. Inserting one more copy of a character that
//! extends a run of two or more therefore costs less than a plain
//! insertion, and the longer the run the cheaper it gets.
//!
//! Only a single extra character is handled, and "visual" repetitions
//! (`boom` vs `b00rn`) are not.

/// Run length at which the discount starts.
const MIN_RUN: usize = 2;

/// Cost of extending a run of `run` matching characters by one.
///
/// A linear fit: run 2 costs 0.9, 3 costs 0.5, 4 costs 0.1 and anything
/// longer is free.
#[inline]
#[must_use]
pub fn run_extension_cost(run: usize) -> f64 {
    (1.7 - 0.4 * run as f64).max(0.0)
}

/// Discounted cost of inserting `tl[j]` after the prefixes `sl[..i]` and
/// `tl[..j]`, when that insertion extends a run.
///
/// Both strings must already be lower-cased. The run must line up across
/// the two strings: `sl[i - 1]`, `sl[i]`, `tl[j - 2]` and `tl[j - 1]` all
/// equal the inserted `tl[j]`. Returns `None` when any of that fails.
///
/// Called with the strings swapped, this prices the mirror-image
/// deletion.
///
/// # Example
/// ```
/// use confusable::algorithms::repetition::repetition_discount;
///
/// let s: Vec<char> = "mm".chars().collect();
/// let t: Vec<char> = "mmm".chars().collect();
/// let cost = repetition_discount(&s, 1, &t, 2).unwrap();
/// assert!((cost - 0.9).abs() < 1e-9);
/// assert_eq!(repetition_discount(&s, 0, &t, 2), None);
/// ```
#[must_use]
pub fn repetition_discount(sl: &[char], i: usize, tl: &[char], j: usize) -> Option<f64> {
    if i < 1 || j < MIN_RUN {
        return None;
    }
    let &run_char = tl.get(j)?;
    let source = sl.get(i - 1..=i)?;
    let target = &tl[j - MIN_RUN..j];
    if source != target || target.iter().any(|&c| c != run_char) {
        return None;
    }

    // How far back does the run extend on both sides?
    let mut run = MIN_RUN;
    while run <= i && run < j && sl[i - run] == run_char && tl[j - run - 1] == run_char {
        run += 1;
    }

    Some(run_extension_cost(run))
}
