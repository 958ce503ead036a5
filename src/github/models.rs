//! Data models for pull request reviews and approval snapshots.

use serde::Deserialize;

/// A review record as listed by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Review identifier.
    pub id: u64,
    /// Review state (e.g. `APPROVED`, `CHANGES_REQUESTED`).
    pub state: Option<String>,
    /// Commit the review was left against, if any.
    pub commit_id: Option<String>,
}

impl Review {
    /// True when the review is in "approved" state.
    ///
    /// GitHub reports review state in upper case on the wire, so the
    /// comparison ignores ASCII case.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.state
            .as_deref()
            .is_some_and(|state| state.eq_ignore_ascii_case("approved"))
    }
}

/// A review approval eligible for dismissal.
///
/// Immutable snapshot taken from a [`Review`] in "approved" state. The
/// commit identifier stays optional because a review may lack an
/// associated commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Approval {
    /// Review identifier used by the dismissal endpoint.
    pub id: u64,
    /// Commit the review was left against, if any.
    pub commit_id: Option<String>,
}

impl From<Review> for Approval {
    fn from(value: Review) -> Self {
        Self {
            id: value.id,
            commit_id: value.commit_id,
        }
    }
}

/// One page of review listing results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPage {
    /// Reviews on this page, in remote order.
    pub reviews: Vec<Review>,
    /// Whether the response's Link header advertised a "next" relation.
    pub has_next: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiReview {
    pub(super) id: u64,
    pub(super) state: Option<String>,
    pub(super) commit_id: Option<String>,
}

impl From<ApiReview> for Review {
    fn from(value: ApiReview) -> Self {
        Self {
            id: value.id,
            state: value.state,
            commit_id: value.commit_id,
        }
    }
}
