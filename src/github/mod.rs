//! GitHub review sweep: gateway, pagination, filtering, and dismissal.
//!
//! This module wraps Octocrab to enumerate pull request review approvals,
//! filter out approvals tied to excluded commits, and dismiss (or
//! dry-run report) the rest. Errors are mapped into typed variants so
//! callers can surface precise failures without exposing Octocrab
//! internals.

pub mod collector;
pub mod error;
pub mod executor;
pub mod filter;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod sweep;

pub use collector::collect_approvals;
pub use error::SweepError;
pub use executor::{DismissalReason, SweepOutcome};
pub use filter::{ExclusionSet, without_excluded};
pub use gateway::{OctocrabGateway, ReviewGateway};
pub use locator::{
    PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryName, RepositoryOwner,
};
pub use models::{Approval, Review, ReviewPage};
pub use sweep::{ApprovalSweep, SweepSettings};

#[cfg(test)]
pub use gateway::MockReviewGateway;
