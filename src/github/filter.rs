//! Exclusion set parsing and the pure approval filter.

use std::collections::HashSet;

use super::models::Approval;

/// Commit identifiers whose approvals must be spared from dismissal.
///
/// Parsed once from the `excluding-shas` input; used only for membership
/// tests. An empty set excludes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet(HashSet<String>);

impl ExclusionSet {
    /// Parses a comma-separated list of commit identifiers.
    ///
    /// Entries are trimmed and blank entries dropped, so `"abc, def"`
    /// yields `{"abc", "def"}` and an empty input yields the empty set.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self(
            input
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
        )
    }

    /// True when no commit is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of excluded commits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, commit_id: &str) -> bool {
        self.0.contains(commit_id)
    }
}

/// Removes approvals whose commit is in the exclusion set.
///
/// Pure and order-preserving. An approval is kept when the set is empty,
/// when it has no associated commit, or when its commit is not a member
/// of the set. Filtering twice with the same set yields the same result
/// as filtering once.
#[must_use]
pub fn without_excluded(approvals: Vec<Approval>, exclusions: &ExclusionSet) -> Vec<Approval> {
    if exclusions.is_empty() {
        return approvals;
    }

    approvals
        .into_iter()
        .filter(|approval| {
            approval
                .commit_id
                .as_deref()
                .is_none_or(|commit_id| !exclusions.contains(commit_id))
        })
        .collect()
}
