//! Algorithm X search over the cover matrix.
//!
//! The search keeps two sorted index sets, the active rows and active
//! columns, and runs as an explicit stack machine instead of recursion: one
//! frame per tentative selection, each frame owning the candidate cursor and
//! the exact row/column sets its selection removed. Backtracking pops the
//! frame and re-inserts those sets, so restoration never recomputes anything.
//!
//! Every selection and deselection is appended to an event log; the log plus
//! the final solution stack fully determine the search trace.

use log::debug;

use crate::counting::{select_column, ColumnCounter};
use crate::cover::CoverMatrix;

/// One entry of the search event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEvent {
    /// The possibility was pushed onto the solution stack.
    Select,
    /// The possibility was popped while backtracking.
    Deselect,
}

/// Outcome of a full search run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Selected possibility indices forming an exact cover, or `None` when
    /// the search exhausted every branch.
    pub solution: Option<Vec<usize>>,
    /// The complete select/deselect trace, frozen at return.
    pub events: Vec<(SearchEvent, usize)>,
}

/// Computes what selecting `row` eliminates.
///
/// Returns `(rows_to_remove, cols_to_remove)`: the active columns `row`
/// satisfies, and every active row (including `row`) that satisfies any of
/// those columns. Both come back in ascending order. The caller removes them
/// from the active sets and must retain them for [`deselect`].
pub fn select(
    cover: &CoverMatrix,
    row: usize,
    active_rows: &[usize],
    active_cols: &[usize],
) -> (Vec<usize>, Vec<usize>) {
    let cols_to_remove: Vec<usize> = active_cols
        .iter()
        .copied()
        .filter(|&col| cover.is_set(row, col))
        .collect();
    let rows_to_remove: Vec<usize> = active_rows
        .iter()
        .copied()
        .filter(|&r| cols_to_remove.iter().any(|&col| cover.is_set(r, col)))
        .collect();
    (rows_to_remove, cols_to_remove)
}

/// Re-inserts exactly the sets a previous [`select`] removed.
pub fn deselect(
    removed_rows: &[usize],
    removed_cols: &[usize],
    active_rows: &mut Vec<usize>,
    active_cols: &mut Vec<usize>,
) {
    restore(active_rows, removed_rows);
    restore(active_cols, removed_cols);
}

/// Removes a sorted subset from a sorted set.
fn remove_all(active: &mut Vec<usize>, removed: &[usize]) {
    if removed.is_empty() {
        return;
    }
    let mut next = 0;
    active.retain(|&x| {
        if next < removed.len() && removed[next] == x {
            next += 1;
            false
        } else {
            true
        }
    });
    debug_assert_eq!(next, removed.len(), "removed set desynchronized");
}

/// Merges a sorted removed subset back into a sorted set.
fn restore(active: &mut Vec<usize>, removed: &[usize]) {
    if removed.is_empty() {
        return;
    }
    let old = std::mem::take(active);
    let mut merged = Vec::with_capacity(old.len() + removed.len());
    let (mut i, mut j) = (0, 0);
    while i < old.len() && j < removed.len() {
        if old[i] < removed[j] {
            merged.push(old[i]);
            i += 1;
        } else {
            merged.push(removed[j]);
            j += 1;
        }
    }
    merged.extend_from_slice(&old[i..]);
    merged.extend_from_slice(&removed[j..]);
    debug_assert!(merged.windows(2).all(|w| w[0] < w[1]));
    *active = merged;
}

/// One node of the explicit search stack.
#[derive(Debug)]
struct Frame {
    /// Active rows satisfying this node's chosen column, ascending.
    candidates: Vec<usize>,
    /// Next candidate to try.
    next: usize,
    /// Sets removed by the candidate currently being explored, retained for
    /// exact restoration when that branch fails.
    removed_rows: Vec<usize>,
    removed_cols: Vec<usize>,
}

impl Frame {
    fn new(candidates: Vec<usize>) -> Self {
        Self {
            candidates,
            next: 0,
            removed_rows: Vec::new(),
            removed_cols: Vec::new(),
        }
    }
}

/// Candidate rows for the best branch column at the current node.
///
/// Empty when the minimum column count is 0: the branch is infeasible and
/// must be abandoned without trying any row.
fn node_candidates<C: ColumnCounter + ?Sized>(
    counter: &C,
    cover: &CoverMatrix,
    active_rows: &[usize],
    active_cols: &[usize],
) -> Vec<usize> {
    let Some((col, count)) = select_column(counter, cover, active_rows, active_cols) else {
        return Vec::new();
    };
    if count == 0 {
        return Vec::new();
    }
    active_rows
        .iter()
        .copied()
        .filter(|&row| cover.is_set(row, col))
        .collect()
}

/// Depth-first Algorithm X search; returns the first solution found.
///
/// Each loop turn either descends by selecting the top frame's next candidate
/// or pops an exhausted frame and restores its parent's removals. Every
/// descent removes at least the chosen column from the active set, so the
/// tree is finite and bounded by the possibility count.
pub fn search<C: ColumnCounter + ?Sized>(cover: &CoverMatrix, counter: &C) -> SearchResult {
    let mut active_rows: Vec<usize> = (0..cover.rows()).collect();
    let mut active_cols: Vec<usize> = (0..cover.cols()).collect();
    let mut solution: Vec<usize> = Vec::new();
    let mut events: Vec<(SearchEvent, usize)> = Vec::new();

    if active_cols.is_empty() {
        // degenerate cover with nothing to satisfy
        return SearchResult {
            solution: Some(solution),
            events,
        };
    }

    let mut stack = vec![Frame::new(node_candidates(
        counter,
        cover,
        &active_rows,
        &active_cols,
    ))];

    loop {
        let frame = stack
            .last_mut()
            .expect("search stack emptied without returning");

        if frame.next < frame.candidates.len() {
            let row = frame.candidates[frame.next];
            frame.next += 1;

            solution.push(row);
            events.push((SearchEvent::Select, row));

            let (removed_rows, removed_cols) = select(cover, row, &active_rows, &active_cols);
            remove_all(&mut active_rows, &removed_rows);
            remove_all(&mut active_cols, &removed_cols);
            frame.removed_rows = removed_rows;
            frame.removed_cols = removed_cols;

            if active_cols.is_empty() {
                finish_log(&events, solution.len());
                return SearchResult {
                    solution: Some(solution),
                    events,
                };
            }
            stack.push(Frame::new(node_candidates(
                counter,
                cover,
                &active_rows,
                &active_cols,
            )));
        } else {
            // node exhausted: undo the selection that created it
            stack.pop();
            let Some(parent) = stack.last_mut() else {
                // root exhausted: no solution exists
                finish_log(&events, 0);
                return SearchResult {
                    solution: None,
                    events,
                };
            };
            let row = solution.pop().expect("solution stack desynchronized");
            events.push((SearchEvent::Deselect, row));
            deselect(
                &parent.removed_rows,
                &parent.removed_cols,
                &mut active_rows,
                &mut active_cols,
            );
            parent.removed_rows.clear();
            parent.removed_cols.clear();
        }
    }
}

/// Final consistency check between the event log and the solution stack.
fn finish_log(events: &[(SearchEvent, usize)], solution_len: usize) {
    let selects = events
        .iter()
        .filter(|(e, _)| *e == SearchEvent::Select)
        .count();
    let deselects = events.len() - selects;
    debug_assert_eq!(
        selects - deselects,
        solution_len,
        "event log desynchronized from solution stack"
    );
    debug!("search finished: {selects} selections, {deselects} backtracks");
}
