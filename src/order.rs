//! Order & filter pipeline (§4.2).
//!
//! Produces the ordered, paginated, filtered commit sequence with
//! `children`/`is_branch_tip` recomputed against the surviving set.

use std::collections::{HashMap, HashSet};

use crate::dates::canonical_epoch;
use crate::model::{Commit, CommitFilter, CommitIndex, Diagnostic, Paging};

/// Run the full order & filter pipeline described in §4.2, steps 1-4.
pub fn order_and_filter(
    index: &CommitIndex,
    filter: Option<&dyn CommitFilter>,
    paging: Paging,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<Commit> {
    let mut surviving: Vec<Commit> = index.values().cloned().collect();

    if let Some(filter) = filter {
        surviving.retain(|commit| filter.matches(commit));
    }

    sort_commits(&mut surviving);
    let surviving = apply_paging(surviving, paging, diagnostics);
    recompute_children(surviving)
}

/// Sort key: committer date descending, author date descending, hash
/// lexicographic ascending as the deterministic tie-break (§3).
fn sort_commits(commits: &mut [Commit]) {
    commits.sort_by(|a, b| {
        let committer_cmp =
            canonical_epoch(&b.committer_date).cmp(&canonical_epoch(&a.committer_date));
        committer_cmp
            .then_with(|| canonical_epoch(&b.author_date).cmp(&canonical_epoch(&a.author_date)))
            .then_with(|| a.hash.cmp(&b.hash))
    });
}

/// Select `[page * size, page * size + size)`, clamped to available length.
/// A page past the last available one is coerced to the last page and a
/// diagnostic is emitted (§7 `PagingOutOfRange`).
fn apply_paging(commits: Vec<Commit>, paging: Paging, diagnostics: &mut Vec<Diagnostic>) -> Vec<Commit> {
    if !paging.is_enabled() {
        return commits;
    }

    let len = commits.len();
    if len == 0 {
        return commits;
    }

    let last_page = (len - 1) / paging.size;
    let page = if paging.page > last_page {
        diagnostics.push(Diagnostic::PagingOutOfRange {
            requested_page: paging.page,
            last_page,
        });
        log::warn!(
            "requested page {} is past last page {}; coercing",
            paging.page,
            last_page
        );
        last_page
    } else {
        paging.page
    };

    let start = (page * paging.size).min(len);
    let end = (start + paging.size).min(len);
    commits[start..end].to_vec()
}

/// Restrict `children` (and thus `is_branch_tip`) to the surviving set,
/// so that edges drawn downstream never reference an invisible commit.
fn recompute_children(commits: Vec<Commit>) -> Vec<Commit> {
    let visible: HashSet<&str> = commits.iter().map(|c| c.hash.as_str()).collect();

    let mut children_of: HashMap<String, Vec<String>> = HashMap::new();
    for commit in &commits {
        for parent in &commit.parents {
            if visible.contains(parent.as_str()) {
                children_of
                    .entry(parent.clone())
                    .or_default()
                    .push(commit.hash.clone());
            }
        }
    }

    commits
        .into_iter()
        .map(|mut commit| {
            let children = children_of.remove(&commit.hash).unwrap_or_default();
            commit.is_branch_tip = children.is_empty();
            commit.children = children;
            commit
        })
        .collect()
}
