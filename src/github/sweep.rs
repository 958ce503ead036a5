//! High-level sweep facade used by the CLI.

use super::collector::collect_approvals;
use super::error::SweepError;
use super::executor::{DismissalReason, SweepOutcome, execute};
use super::filter::{ExclusionSet, without_excluded};
use super::gateway::ReviewGateway;
use super::locator::PullRequestLocator;

/// Settings for one sweep run, derived from configuration inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepSettings {
    /// Reason attached to every dismissal or dry-run report.
    pub reason: DismissalReason,
    /// Commits whose approvals are spared.
    pub exclusions: ExclusionSet,
    /// Report-only mode switch.
    pub dry_run: bool,
}

/// Runs the collect → filter → execute pipeline against a gateway.
pub struct ApprovalSweep<'client, Gateway>
where
    Gateway: ReviewGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> ApprovalSweep<'client, Gateway>
where
    Gateway: ReviewGateway,
{
    /// Create a new sweep facade using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Collects all approvals, drops excluded ones, and dismisses (or
    /// reports) the remainder.
    ///
    /// # Errors
    ///
    /// Propagates any failure from the underlying gateway, including
    /// GitHub authentication errors or network problems. Nothing is
    /// retried; a mid-run failure discards all partial progress.
    pub async fn run(
        &self,
        locator: &PullRequestLocator,
        settings: &SweepSettings,
    ) -> Result<SweepOutcome, SweepError> {
        let approvals = collect_approvals(self.client, locator).await?;
        let remaining = without_excluded(approvals, &settings.exclusions);
        execute(
            self.client,
            locator,
            &remaining,
            &settings.reason,
            settings.dry_run,
        )
        .await
    }
}
