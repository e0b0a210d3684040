//! Index-row grafter (§4.3).
//!
//! Optionally prepends a synthetic "working copy" row so uncommitted state
//! is representable in the graph.

use crate::model::{Author, Commit, IndexStatus, INDEX_COMMIT_HASH};

/// Prepend the synthetic `INDEX` commit to `commits` if `show_index` is set.
///
/// Placement happens after sort + paging complete (§4.3): the synthetic
/// commit does not participate in ordering, it is always row 0 of whatever
/// sequence survives §4.2.
pub fn graft_index_row(
    mut commits: Vec<Commit>,
    show_index: bool,
    index_status: Option<IndexStatus>,
) -> Vec<Commit> {
    if !show_index {
        return commits;
    }

    let head_hash = commits.first().map(|c| c.hash.clone());

    if let Some(head_hash) = &head_hash {
        if let Some(head) = commits
            .iter_mut()
            .find(|commit| &commit.hash == head_hash)
        {
            head.children.push(INDEX_COMMIT_HASH.to_string());
            head.is_branch_tip = false;
        }
    }

    let index_commit = Commit {
        hash: INDEX_COMMIT_HASH.to_string(),
        parents: head_hash.into_iter().collect(),
        children: Vec::new(),
        committer_date: String::new(),
        author_date: String::new(),
        message: String::new(),
        branch: String::new(),
        author: None::<Author>,
        is_branch_tip: true,
        index_status: Some(index_status.unwrap_or_default()),
    };

    commits.insert(0, index_commit);
    commits
}
