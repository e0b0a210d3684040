//! Grid synthesiser (§4.6).
//!
//! Turns the lane allocation + edge list into the per-row cell grid
//! renderers draw from. No teacher file materializes this shape directly
//! (the teacher only ever emits a flat edge list); the cell-per-column
//! layout is modeled after the gutter/column bookkeeping in
//! `other_examples/..._kenjutu-core-src-services-graph.rs` (`GraphRow`),
//! adapted to the flag-bitset-like `GridCell` this spec calls for.

use crate::lanes::LaneAllocation;
use crate::model::{Commit, Edge, GridCell};

/// Build the canonical (top-down, un-mirrored) `row -> Vec<GridCell>` grid.
///
/// `graph_width` is `1 + the maximum column used anywhere` (§3 "Snapshot").
pub fn synthesize_grid(
    commits: &[Commit],
    allocation: &LaneAllocation,
    edges: &[Edge],
    index_column: Option<usize>,
) -> (Vec<Vec<GridCell>>, usize) {
    let graph_width = allocation
        .columns
        .values()
        .copied()
        .max()
        .map(|max| max + 1)
        .unwrap_or(0);

    let mut grid: Vec<Vec<GridCell>> = (0..commits.len())
        .map(|_| vec![GridCell::default(); graph_width])
        .collect();

    for (row, commit) in commits.iter().enumerate() {
        let column = allocation.columns[&commit.hash];
        let before = &allocation.active_before[row];
        let after = &allocation.active_after[row];

        {
            let cell = &mut grid[row][column];
            cell.is_node = true;
            cell.is_column_above_empty = !before.contains_key(&column);
            cell.is_column_below_empty = !after.contains_key(&column);
        }

        for k in 0..graph_width {
            if k == column {
                continue;
            }
            if before.contains_key(&k) && after.contains_key(&k) {
                grid[row][k].is_vertical_line = true;
            }
        }
    }

    for edge in edges {
        if edge.from_column == edge.to_column {
            continue;
        }
        let from_row = row_of(commits, &edge.from).expect("edge source must be in the grid");
        let anchor_row = from_row + 1;
        if anchor_row >= grid.len() {
            continue;
        }

        let span = inclusive_span(edge.from_column, edge.to_column);
        for &col in &span {
            let cell = &mut grid[anchor_row][col];
            cell.is_horizontal_line = true;
            for &source in &edge.merge_source_columns {
                if !cell.merge_source_columns.contains(&source) {
                    cell.merge_source_columns.push(source);
                }
            }
        }

        let bend_column = edge.from_column.max(edge.to_column);
        let entering_from_above = allocation.active_before[anchor_row].contains_key(&bend_column);
        let cell = &mut grid[anchor_row][bend_column];
        if entering_from_above {
            cell.is_left_up_curve = true;
        } else {
            cell.is_left_down_curve = true;
        }
    }

    if let Some(index_column) = index_column {
        mark_index_lane(&mut grid, index_column);
    }

    let last_row = grid.len().saturating_sub(1);
    for (row, cells) in grid.iter_mut().enumerate() {
        for cell in cells.iter_mut() {
            cell.is_first_row = row == 0;
            cell.is_last_row = row == last_row;
        }
    }

    (grid, graph_width)
}

fn row_of(commits: &[Commit], hash: &str) -> Option<usize> {
    commits.iter().position(|c| c.hash == hash)
}

/// Ordered columns from `from` to `to`, walking in travel direction and
/// including both endpoints (the full visible horizontal run, §4.5).
fn inclusive_span(from: usize, to: usize) -> Vec<usize> {
    if from <= to {
        (from..=to).collect()
    } else {
        (to..=from).rev().collect()
    }
}

/// Mark the index commit's own lane as dashed (§4.6 rule 6): the synthetic
/// row's node plus the vertical continuation down to (and including) the
/// first real commit that lane connects to. Stops there — older history
/// further down the same column is ordinary solid line, not part of the
/// index decoration.
fn mark_index_lane(grid: &mut [Vec<GridCell>], index_column: usize) {
    for (row, cells) in grid.iter_mut().enumerate() {
        let Some(cell) = cells.get_mut(index_column) else {
            break;
        };
        if row == 0 {
            cell.is_vertical_index_line = true;
            continue;
        }
        if cell.is_vertical_line {
            cell.is_vertical_index_line = true;
            continue;
        }
        if cell.is_node {
            cell.is_vertical_index_line = true;
        }
        break;
    }
}
