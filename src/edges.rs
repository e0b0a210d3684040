//! Edge router (§4.5).
//!
//! Builds the directed `Edge` list connecting each commit to its visible
//! parents, classifying each edge's geometry and recording the merge
//! source columns the grid synthesiser needs to paint horizontal runs.

use std::collections::{HashMap, HashSet};

use crate::model::{Commit, Diagnostic, Edge, EdgeKind};

/// Route all edges for the given ordered commit sequence and column
/// assignment. Iteration is row-ascending, then parent order within a row,
/// matching the determinism requirement in §4.6.
pub fn route_edges(
    commits: &[Commit],
    columns: &HashMap<String, usize>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Edge> {
    let visible: HashSet<&str> = commits.iter().map(|c| c.hash.as_str()).collect();
    let mut edges = Vec::new();

    for commit in commits {
        let from_column = columns[&commit.hash];
        for (i, parent) in commit.parents.iter().enumerate() {
            if !visible.contains(parent.as_str()) {
                diagnostics.push(Diagnostic::DanglingParent {
                    commit: commit.hash.clone(),
                    parent: parent.clone(),
                });
                continue;
            }

            let to_column = columns[parent];
            let (kind, merge_source_columns) = if from_column == to_column {
                (EdgeKind::Straight, Vec::new())
            } else {
                let kind = if i == 0 {
                    EdgeKind::Corner
                } else {
                    EdgeKind::Merge
                };
                (kind, span_excluding(from_column, to_column))
            };

            edges.push(Edge {
                from: commit.hash.clone(),
                to: parent.clone(),
                from_column,
                to_column,
                kind,
                merge_source_columns,
            });
        }
    }

    edges
}

/// Ordered list of columns an edge's horizontal run visibly spans, walking
/// from `from` toward `to` but excluding `to` itself (the destination
/// column already carries the node/line the renderer anchors onto).
fn span_excluding(from: usize, to: usize) -> Vec<usize> {
    if from < to {
        (from..to).collect()
    } else {
        (to + 1..=from).rev().collect()
    }
}
