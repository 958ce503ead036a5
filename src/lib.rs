//! Unstamp library crate for dismissing stale pull request approvals.
//!
//! The library wraps Octocrab to enumerate review approvals on a pull
//! request, filter out approvals tied to excluded commits, and dismiss
//! (or dry-run report) the remainder with a stated reason, surfacing
//! friendly errors that can be displayed in the CLI.

pub mod config;
pub mod context;
pub mod github;

pub use config::UnstampConfig;
pub use context::TriggerContext;
pub use github::{
    Approval, ApprovalSweep, DismissalReason, ExclusionSet, OctocrabGateway, PersonalAccessToken,
    PullRequestLocator, ReviewGateway, SweepError, SweepOutcome, SweepSettings,
};
