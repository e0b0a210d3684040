//! Data model shared by every stage of the layout pipeline.
//!
//! `Entry` is what the external text parser hands us (out of scope of this
//! crate, see `spec.md` §6); everything downstream of `Entry` is produced
//! here and is immutable once built.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A raw log record as produced by the external git-log parser.
///
/// Fields mirror `spec.md` §3 ("Entry (input)") exactly; this crate treats
/// them as opaque strings except for `hash`/`parents`, which it resolves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    pub hash: String,
    pub parents: Vec<String>,
    pub committer_date: String,
    pub author_date: String,
    pub message: String,
    pub branch: String,
    pub author: Option<Author>,
}

/// Author name + email pair, carried through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: String,
}

/// Canonical commit record produced by the entry normaliser (§4.1).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub hash: String,
    /// All parent hashes from the entry, including ones not present in the
    /// current visible set (preserved so edges can be filtered later).
    pub parents: Vec<String>,
    /// Children in first-seen order, restricted to the currently visible set.
    pub children: Vec<String>,
    pub committer_date: String,
    pub author_date: String,
    pub message: String,
    pub branch: String,
    pub author: Option<Author>,
    /// True iff no visible child points to this commit under the current
    /// ordering.
    pub is_branch_tip: bool,
    /// Working-copy status counts, set only on the synthetic `INDEX`
    /// commit (§4.3).
    pub index_status: Option<IndexStatus>,
}

impl Commit {
    fn from_entry(entry: Entry) -> Self {
        Commit {
            hash: entry.hash,
            parents: entry.parents,
            children: Vec::new(),
            committer_date: entry.committer_date,
            author_date: entry.author_date,
            message: entry.message,
            branch: entry.branch,
            author: entry.author,
            is_branch_tip: true,
            index_status: None,
        }
    }
}

/// Reserved hash for the synthetic "working copy" row (§4.3).
pub const INDEX_COMMIT_HASH: &str = "INDEX";

/// Status counts attached to the synthetic index commit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct IndexStatus {
    pub added: u32,
    pub modified: u32,
    pub deleted: u32,
}

/// Immutable hash -> Commit lookup table.
pub type CommitIndex = HashMap<String, Commit>;

/// Non-negative paging descriptor. `size == 0` disables paging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub size: usize,
    pub page: usize,
}

impl Paging {
    /// No paging: every surviving commit is included.
    pub fn unpaged() -> Self {
        Paging { size: 0, page: 0 }
    }

    /// Page `page` (0-based) of `size` commits.
    pub fn page(size: usize, page: usize) -> Self {
        Paging { size, page }
    }

    pub fn is_enabled(&self) -> bool {
        self.size != 0
    }
}

impl Default for Paging {
    fn default() -> Self {
        Paging::unpaged()
    }
}

/// Row orientation: which end of the ordered sequence is row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Row 0 = newest commit.
    Normal,
    /// Row 0 = oldest commit.
    Flipped,
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Normal
    }
}

/// `(row, column)` position of a commit in the rendered grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

/// The geometric kind of a rendered edge (§3 "Edge").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    Straight,
    Corner,
    Merge,
}

/// A directed visual connection from a commit to one of its visible parents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub from_column: usize,
    pub to_column: usize,
    pub kind: EdgeKind,
    /// Ordered list of columns the horizontal run visibly spans.
    pub merge_source_columns: Vec<usize>,
}

/// A single cell in the rendered grid (§3 "Grid cell").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub is_node: bool,
    pub is_vertical_line: bool,
    pub is_horizontal_line: bool,
    pub is_left_up_curve: bool,
    pub is_left_down_curve: bool,
    pub merge_source_columns: Vec<usize>,
    pub is_column_above_empty: bool,
    pub is_column_below_empty: bool,
    pub is_first_row: bool,
    pub is_last_row: bool,
    pub is_vertical_index_line: bool,
}

/// Text-match / date-range / user-supplied predicate over commits (§4.2).
pub trait CommitFilter {
    fn matches(&self, commit: &Commit) -> bool;
}

/// Blanket impl so ad hoc closures satisfy `CommitFilter` directly, for
/// callers who don't want one of the built-in filters in `crate::filter`.
impl<F: Fn(&Commit) -> bool> CommitFilter for F {
    fn matches(&self, commit: &Commit) -> bool {
        self(commit)
    }
}

/// Parameters governing a single `build_snapshot` call (§6).
#[derive(Default)]
pub struct ViewParams<'a> {
    pub filter: Option<&'a dyn CommitFilter>,
    pub paging: Paging,
    pub orientation: Orientation,
    pub show_index: bool,
    pub index_status: Option<IndexStatus>,
}

/// Non-fatal condition surfaced alongside an otherwise well-formed snapshot
/// (§7 "Error handling design").
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum Diagnostic {
    #[error("entry at index {index} is missing a required field")]
    MalformedEntry { index: usize },

    #[error("duplicate entry for hash {hash}; later occurrence skipped")]
    DuplicateEntry { hash: String },

    #[error("commit {commit} references parent {parent} that is not in the visible set")]
    DanglingParent { commit: String, parent: String },

    #[error("requested page {requested_page} is past the last page {last_page}; coerced")]
    PagingOutOfRange {
        requested_page: usize,
        last_page: usize,
    },
}

/// Fatal error from `build_snapshot` (§7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("no entries and showIndex is false; renderer requires at least one row")]
    EmptyInput,
}

/// Immutable bundle returned by `build_snapshot` (§3 "Snapshot").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub commits: Vec<Commit>,
    #[serde(skip)]
    pub index: CommitIndex,
    /// hash -> visible parent hashes, order preserved.
    pub parent_adjacency: HashMap<String, Vec<String>>,
    /// hash -> children hashes, insertion order.
    pub child_adjacency: HashMap<String, Vec<String>>,
    pub positions: HashMap<String, Position>,
    pub edges: Vec<Edge>,
    pub grid: Vec<Vec<GridCell>>,
    pub graph_width: usize,
    pub diagnostics: Vec<Diagnostic>,
}

pub(crate) fn entries_to_commits(entries: Vec<Entry>, diagnostics: &mut Vec<Diagnostic>) -> Vec<Commit> {
    let mut out = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        if entry.hash.is_empty() {
            diagnostics.push(Diagnostic::MalformedEntry { index });
            continue;
        }
        out.push(Commit::from_entry(entry));
    }
    out
}
