//! Entry normaliser (§4.1).
//!
//! Converts the flat, unordered stream of parser `Entry` records into a
//! `CommitIndex` keyed by hash, with a first pass over every commit's
//! back-references (children) resolved.

use std::collections::HashMap;

use crate::model::{entries_to_commits, Commit, CommitIndex, Diagnostic, Entry};

/// Build a commit index from raw entries.
///
/// Duplicate hashes are rejected: the later occurrence is skipped and a
/// `Diagnostic::DuplicateEntry` is recorded. Entries missing `hash` are
/// skipped with `Diagnostic::MalformedEntry`. Both are non-fatal; the
/// pipeline continues with the remaining entries.
pub fn normalize(entries: Vec<Entry>, diagnostics: &mut Vec<Diagnostic>) -> CommitIndex {
    let commits = entries_to_commits(entries, diagnostics);

    let mut index: CommitIndex = HashMap::with_capacity(commits.len());
    for commit in commits {
        if index.contains_key(&commit.hash) {
            diagnostics.push(Diagnostic::DuplicateEntry {
                hash: commit.hash.clone(),
            });
            log::debug!("skipping duplicate entry for hash {}", commit.hash);
            continue;
        }
        index.insert(commit.hash.clone(), commit);
    }

    // Second pass: resolve children from parents. A parent hash not present
    // in the index is left untouched in `parents` so edges can be filtered
    // later (§4.1); it contributes no child back-reference here.
    let child_additions: Vec<(String, String)> = index
        .values()
        .flat_map(|commit| {
            commit
                .parents
                .iter()
                .map(move |parent| (parent.clone(), commit.hash.clone()))
        })
        .collect();

    for (parent_hash, child_hash) in child_additions {
        if let Some(parent) = index.get_mut(&parent_hash) {
            parent.children.push(child_hash);
        }
    }

    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(hash: &str, parents: &[&str]) -> Entry {
        Entry {
            hash: hash.to_string(),
            parents: parents.iter().map(|s| s.to_string()).collect(),
            committer_date: "2024-01-01T00:00:00Z".to_string(),
            author_date: "2024-01-01T00:00:00Z".to_string(),
            message: "msg".to_string(),
            branch: "refs/heads/main".to_string(),
            author: None,
        }
    }

    #[test]
    fn builds_children_from_parents() {
        let mut diags = Vec::new();
        let index = normalize(vec![entry("a", &["b"]), entry("b", &[])], &mut diags);
        assert!(diags.is_empty());
        assert_eq!(index["b"].children, vec!["a".to_string()]);
        assert!(index["a"].children.is_empty());
    }

    #[test]
    fn skips_malformed_entry() {
        let mut diags = Vec::new();
        let index = normalize(vec![entry("", &[]), entry("a", &[])], &mut diags);
        assert_eq!(index.len(), 1);
        assert!(matches!(diags[0], Diagnostic::MalformedEntry { index: 0 }));
    }

    #[test]
    fn rejects_duplicate_hash_keeping_first() {
        let mut diags = Vec::new();
        let mut first = entry("a", &[]);
        first.message = "first".to_string();
        let mut second = entry("a", &[]);
        second.message = "second".to_string();
        let index = normalize(vec![first, second], &mut diags);
        assert_eq!(index.len(), 1);
        assert_eq!(index["a"].message, "first");
        assert!(matches!(&diags[0], Diagnostic::DuplicateEntry { hash } if hash == "a"));
    }

    #[test]
    fn preserves_dangling_parent_hash() {
        let mut diags = Vec::new();
        let index = normalize(vec![entry("a", &["missing"])], &mut diags);
        assert_eq!(index["a"].parents, vec!["missing".to_string()]);
    }
}
