//! Lane allocator (§4.4).
//!
//! Row-by-row column assignment over the already ordered, filtered, graft
//! commit sequence. Generalizes the teacher's `active_lanes` /
//! `allocate_lane` / `free_lane` scheme (`graph::layout::compute_layout`)
//! to the spec's duplicate-expectation-collapses-into-merge rule (step 2a)
//! and per-parent lane reservation (step 3).

use std::collections::{HashMap, HashSet};

use crate::model::Commit;

/// Output of the lane allocator: the column chosen for every commit, plus a
/// per-row snapshot of which lanes were active entering/leaving that row
/// (consumed by the grid synthesiser to derive vertical-line flags).
pub struct LaneAllocation {
    /// hash -> column.
    pub columns: HashMap<String, usize>,
    /// `active_before[r]`: lane -> expected hash, as of the start of row `r`.
    pub active_before: Vec<HashMap<usize, String>>,
    /// `active_after[r]`: lane -> expected hash, after row `r` is processed.
    pub active_after: Vec<HashMap<usize, String>>,
}

/// Assign every commit in `commits` (top to bottom) to a column.
pub fn allocate_lanes(commits: &[Commit]) -> LaneAllocation {
    let visible: HashSet<&str> = commits.iter().map(|c| c.hash.as_str()).collect();

    let mut active_lanes: HashMap<usize, String> = HashMap::new();
    let mut columns: HashMap<String, usize> = HashMap::with_capacity(commits.len());
    let mut active_before = Vec::with_capacity(commits.len());
    let mut active_after = Vec::with_capacity(commits.len());

    for commit in commits {
        active_before.push(active_lanes.clone());

        // Step 2: assign this commit's column.
        let mut expecting: Vec<usize> = active_lanes
            .iter()
            .filter(|(_, expected)| *expected == &commit.hash)
            .map(|(&column, _)| column)
            .collect();
        expecting.sort_unstable();

        let column = match expecting.first() {
            Some(&lowest) => {
                // Duplicate expectations collapse into a merge at `lowest`;
                // the other lanes are released here.
                for &other in &expecting[1..] {
                    active_lanes.remove(&other);
                }
                lowest
            }
            None => lowest_free_column(&active_lanes, 0),
        };
        columns.insert(commit.hash.clone(), column);

        // Step 3: reserve lanes for this commit's visible parents.
        let visible_parents: Vec<&str> = commit
            .parents
            .iter()
            .map(String::as_str)
            .filter(|parent| visible.contains(parent))
            .collect();

        if visible_parents.is_empty() {
            // Step 4: no parents, this lane ends here.
            active_lanes.remove(&column);
        } else {
            for (i, &parent) in visible_parents.iter().enumerate() {
                if i == 0 {
                    active_lanes.insert(column, parent.to_string());
                } else if !active_lanes.values().any(|expected| expected == parent) {
                    let merge_column = lowest_free_column(&active_lanes, column + 1);
                    active_lanes.insert(merge_column, parent.to_string());
                }
            }
        }

        active_after.push(active_lanes.clone());
    }

    LaneAllocation {
        columns,
        active_before,
        active_after,
    }
}

/// Lowest column index `>= min` absent from `active_lanes`.
fn lowest_free_column(active_lanes: &HashMap<usize, String>, min: usize) -> usize {
    let mut column = min;
    while active_lanes.contains_key(&column) {
        column += 1;
    }
    column
}
