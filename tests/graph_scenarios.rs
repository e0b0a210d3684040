//! End-to-end scenarios, one per concrete case enumerated for testing.
//!
//! Placed in a top-level `tests/` directory rather than inline
//! `#[cfg(test)]` modules since these exercise the whole pipeline
//! (normalize -> order -> graft -> lanes -> edges -> grid -> snapshot)
//! rather than a single function, following the convention
//! `arxanas-git-branchless` uses for its `tests/test_smartlog.rs`.

use commit_graph_layout::model::{Author, Entry, IndexStatus, Orientation, Paging, ViewParams};
use commit_graph_layout::snapshot::{build_snapshot, neighbours};

fn entry(hash: &str, parents: &[&str], committer_date: &str, message: &str) -> Entry {
    Entry {
        hash: hash.to_string(),
        parents: parents.iter().map(|s| s.to_string()).collect(),
        committer_date: committer_date.to_string(),
        author_date: committer_date.to_string(),
        message: message.to_string(),
        branch: "refs/heads/main".to_string(),
        author: Some(Author {
            name: "Dev".to_string(),
            email: "dev@example.com".to_string(),
        }),
    }
}

#[test]
fn linear_history() {
    let entries = vec![
        entry("a", &["b"], "1700000400", "A"),
        entry("b", &["c"], "1700000300", "B"),
        entry("c", &["d"], "1700000200", "C"),
        entry("d", &[], "1700000100", "D"),
    ];
    let snapshot = build_snapshot(entries, ViewParams::default()).unwrap();

    assert_eq!(snapshot.graph_width, 1);
    for (i, hash) in ["a", "b", "c", "d"].iter().enumerate() {
        assert_eq!(snapshot.positions[*hash].row, i);
        assert_eq!(snapshot.positions[*hash].column, 0);
    }
    for cells in &snapshot.grid {
        assert!(cells[0].is_node);
    }
    assert_eq!(snapshot.edges.len(), 3);
    assert!(snapshot
        .edges
        .iter()
        .all(|e| e.kind == commit_graph_layout::model::EdgeKind::Straight));
}

#[test]
fn simple_branch() {
    // Tip X (parent B); linear A -> B -> C. X newer than A.
    let entries = vec![
        entry("x", &["b"], "1700000400", "X"),
        entry("a", &["b"], "1700000300", "A"),
        entry("b", &["c"], "1700000200", "B"),
        entry("c", &[], "1700000100", "C"),
    ];
    let snapshot = build_snapshot(entries, ViewParams::default()).unwrap();

    assert_eq!(snapshot.graph_width, 2);
    assert_eq!(snapshot.positions["x"], commit_graph_layout::model::Position { row: 0, column: 0 });
    assert_eq!(snapshot.positions["a"], commit_graph_layout::model::Position { row: 1, column: 1 });
    assert_eq!(snapshot.positions["b"], commit_graph_layout::model::Position { row: 2, column: 0 });
    assert_eq!(snapshot.positions["c"], commit_graph_layout::model::Position { row: 3, column: 0 });

    let (parents, children) = neighbours(&snapshot, "b");
    assert_eq!(parents, vec!["c".to_string()]);
    assert_eq!(children.len(), 2);

    assert_eq!(snapshot.grid[2][0].merge_source_columns, vec![1]);
    assert!(snapshot.grid[2][1].is_left_up_curve);
}

#[test]
fn merge_commit() {
    let entries = vec![
        entry("m", &["p1", "p2"], "1700000400", "Merge"),
        entry("p1", &["r"], "1700000300", "P1"),
        entry("p2", &["r"], "1700000200", "P2"),
        entry("r", &[], "1700000100", "R"),
    ];
    let snapshot = build_snapshot(entries, ViewParams::default()).unwrap();

    assert_eq!(snapshot.positions["m"], commit_graph_layout::model::Position { row: 0, column: 0 });
    assert_eq!(snapshot.positions["p1"], commit_graph_layout::model::Position { row: 1, column: 0 });
    assert_eq!(snapshot.positions["p2"], commit_graph_layout::model::Position { row: 2, column: 1 });
    assert_eq!(snapshot.positions["r"], commit_graph_layout::model::Position { row: 3, column: 0 });
}

#[test]
fn filtered_view_recomputes_adjacency_across_gaps() {
    let entries = vec![
        entry("a", &["b"], "1700000400", "A"),
        entry("b", &["c"], "1700000300", "B"),
        entry("c", &["d"], "1700000200", "C"),
        entry("d", &[], "1700000100", "D"),
    ];
    let keep_ac = |c: &commit_graph_layout::model::Commit| c.hash == "a" || c.hash == "c";
    let mut view = ViewParams::default();
    view.filter = Some(&keep_ac);
    let snapshot = build_snapshot(entries, view).unwrap();

    assert_eq!(snapshot.commits.len(), 2);
    assert_eq!(snapshot.positions["a"].row, 0);
    assert_eq!(snapshot.positions["c"].row, 1);
    let edge = snapshot
        .edges
        .iter()
        .find(|e| e.from == "a")
        .expect("a->c edge survives the filter");
    assert_eq!(edge.to, "c");
    assert_eq!(edge.kind, commit_graph_layout::model::EdgeKind::Straight);
}

#[test]
fn paged_view_slices_ordering_and_marks_page_edges() {
    let entries: Vec<Entry> = (0..100)
        .map(|i| {
            let hash = format!("h{i}");
            let parent = if i < 99 { vec![format!("h{}", i + 1)] } else { Vec::new() };
            Entry {
                hash,
                parents: parent,
                committer_date: format!("{}", 1700000000 - i),
                author_date: format!("{}", 1700000000 - i),
                message: format!("commit {i}"),
                branch: "refs/heads/main".to_string(),
                author: None,
            }
        })
        .collect();

    let mut view = ViewParams::default();
    view.paging = Paging::page(20, 2);
    let snapshot = build_snapshot(entries, view).unwrap();

    assert_eq!(snapshot.commits.len(), 20);
    assert_eq!(snapshot.commits[0].hash, "h40");
    assert_eq!(snapshot.commits[19].hash, "h59");
    assert_eq!(snapshot.graph_width, 1);
    assert!(snapshot.grid[0][0].is_column_above_empty);
    assert!(snapshot.grid[19][0].is_column_below_empty);
}

#[test]
fn index_row_is_grafted_with_head_as_parent() {
    let entries = vec![
        entry("head", &["older"], "1700000200", "HEAD"),
        entry("older", &[], "1700000100", "Older"),
    ];
    let mut view = ViewParams::default();
    view.show_index = true;
    view.index_status = Some(IndexStatus {
        added: 2,
        modified: 0,
        deleted: 1,
    });
    let snapshot = build_snapshot(entries, view).unwrap();

    assert_eq!(snapshot.commits.len(), 3);
    assert_eq!(snapshot.commits[0].hash, commit_graph_layout::model::INDEX_COMMIT_HASH);
    assert_eq!(snapshot.commits[0].parents, vec!["head".to_string()]);
    assert_eq!(
        snapshot.commits[0].index_status,
        Some(IndexStatus {
            added: 2,
            modified: 0,
            deleted: 1,
        })
    );
    assert_eq!(snapshot.commits[1].index_status, None);
    assert!(snapshot.grid[0][snapshot.positions[commit_graph_layout::model::INDEX_COMMIT_HASH].column]
        .is_vertical_index_line);
    assert!(snapshot.grid[1][snapshot.positions["head"].column].is_vertical_index_line);
    assert!(!snapshot.grid[2][snapshot.positions["older"].column].is_vertical_index_line);
}

#[test]
fn empty_entries_without_index_is_fatal() {
    let result = build_snapshot(Vec::new(), ViewParams::default());
    assert!(result.is_err());
}

#[test]
fn flipped_orientation_mirrors_row_order() {
    let entries = vec![
        entry("a", &["b"], "1700000200", "A"),
        entry("b", &[], "1700000100", "B"),
    ];
    let mut view = ViewParams::default();
    view.orientation = Orientation::Flipped;
    let snapshot = build_snapshot(entries, view).unwrap();

    assert_eq!(snapshot.commits[0].hash, "b");
    assert_eq!(snapshot.commits[1].hash, "a");
}
