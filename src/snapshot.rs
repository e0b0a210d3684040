//! View adapter (§4.7).
//!
//! Wires the whole pipeline together and exposes the accessor functions
//! external renderers use against a built `Snapshot`.

use std::collections::HashMap;

use crate::edges::route_edges;
use crate::grid::synthesize_grid;
use crate::index_row::graft_index_row;
use crate::lanes::allocate_lanes;
use crate::model::{
    Commit, Edge, Entry, GraphError, GridCell, Position, Snapshot, ViewParams,
};
use crate::normalize::normalize;
use crate::order::order_and_filter;

/// Build a complete `Snapshot` from raw entries and view parameters.
///
/// Fails with `GraphError::EmptyInput` when `entries` is empty and
/// `showIndex` is false — the one case where there would be no row at
/// all for a renderer to draw (§4.7).
pub fn build_snapshot(entries: Vec<Entry>, view: ViewParams) -> Result<Snapshot, GraphError> {
    if entries.is_empty() && !view.show_index {
        return Err(GraphError::EmptyInput);
    }

    let mut diagnostics = Vec::new();

    let index = normalize(entries, &mut diagnostics);
    let ordered = order_and_filter(&index, view.filter, view.paging, &mut diagnostics);
    let mut commits = graft_index_row(ordered, view.show_index, view.index_status);

    let allocation = allocate_lanes(&commits);
    let edges = route_edges(&commits, &allocation.columns, &mut diagnostics);

    let index_column = if view.show_index {
        allocation.columns.get(crate::model::INDEX_COMMIT_HASH).copied()
    } else {
        None
    };
    let (mut grid, graph_width) = synthesize_grid(&commits, &allocation, &edges, index_column);

    let mut positions: HashMap<String, Position> = HashMap::with_capacity(commits.len());
    for (row, commit) in commits.iter().enumerate() {
        positions.insert(
            commit.hash.clone(),
            Position {
                row,
                column: allocation.columns[&commit.hash],
            },
        );
    }

    if matches!(view.orientation, crate::model::Orientation::Flipped) {
        mirror_orientation(&mut commits, &mut grid, &mut positions);
    }

    let parent_adjacency: HashMap<String, Vec<String>> = edges.iter().fold(
        HashMap::new(),
        |mut acc: HashMap<String, Vec<String>>, edge| {
            acc.entry(edge.from.clone()).or_default().push(edge.to.clone());
            acc
        },
    );
    let child_adjacency: HashMap<String, Vec<String>> = commits
        .iter()
        .map(|c| (c.hash.clone(), c.children.clone()))
        .collect();

    let mut commit_index = HashMap::with_capacity(commits.len());
    for commit in &commits {
        commit_index.insert(commit.hash.clone(), commit.clone());
    }

    Ok(Snapshot {
        commits,
        index: commit_index,
        parent_adjacency,
        child_adjacency,
        positions,
        edges,
        grid,
        graph_width,
        diagnostics,
    })
}

/// Post-pass: reverse row order and mirror curve flags for
/// `Orientation::Flipped` (§4.7, §9 "Orientation handling"). Lane
/// allocation itself is orientation-invariant; only emission is mirrored.
fn mirror_orientation(
    commits: &mut Vec<Commit>,
    grid: &mut Vec<Vec<GridCell>>,
    positions: &mut HashMap<String, Position>,
) {
    commits.reverse();
    grid.reverse();

    let last_row = grid.len().saturating_sub(1);
    for (row, cells) in grid.iter_mut().enumerate() {
        for cell in cells.iter_mut() {
            std::mem::swap(&mut cell.is_left_up_curve, &mut cell.is_left_down_curve);
            cell.is_first_row = row == 0;
            cell.is_last_row = row == last_row;
        }
    }

    for position in positions.values_mut() {
        position.row = last_row - position.row;
    }
}

/// Look up a commit by hash (visible set only).
pub fn lookup<'a>(snapshot: &'a Snapshot, hash: &str) -> Option<&'a Commit> {
    snapshot.index.get(hash)
}

/// Visible parents and children of `hash`.
pub fn neighbours(snapshot: &Snapshot, hash: &str) -> (Vec<String>, Vec<String>) {
    let parents = snapshot
        .parent_adjacency
        .get(hash)
        .cloned()
        .unwrap_or_default();
    let children = snapshot
        .child_adjacency
        .get(hash)
        .cloned()
        .unwrap_or_default();
    (parents, children)
}

/// The cell at `(row, column)`, if within bounds.
pub fn cell_at(snapshot: &Snapshot, row: usize, column: usize) -> Option<&GridCell> {
    snapshot.grid.get(row).and_then(|cells| cells.get(column))
}

/// The full routed edge list.
pub fn edges(snapshot: &Snapshot) -> &[Edge] {
    &snapshot.edges
}
