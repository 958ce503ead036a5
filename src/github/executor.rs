//! Dismissal execution: no-op, dry-run report, or live concurrent
//! dismissal.

use futures::future::try_join_all;

use super::error::SweepError;
use super::gateway::ReviewGateway;
use super::locator::PullRequestLocator;
use super::models::Approval;

/// Free-text reason attached to every dismissal or dry-run report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DismissalReason(String);

impl DismissalReason {
    /// Validates that the reason is non-blank and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `SweepError::MissingRequiredInput` when the supplied string
    /// is blank.
    pub fn new(reason: impl AsRef<str>) -> Result<Self, SweepError> {
        let trimmed = reason.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SweepError::MissingRequiredInput {
                name: "reason".to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the reason text.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// What the executor did (or would have done) with the final approvals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepOutcome {
    /// No approvals remained after filtering; nothing was called.
    NothingToDismiss,
    /// Dry-run mode: a report comment was posted instead of dismissing.
    DryRun {
        /// How many approvals would have been dismissed.
        would_dismiss: usize,
    },
    /// Live mode: all dismissal calls completed.
    Dismissed {
        /// How many approvals were dismissed.
        count: usize,
    },
}

/// Dismisses the given approvals, or reports what would be dismissed.
///
/// - Empty input: no-op, zero network calls.
/// - Dry run: exactly one comment on the discussion thread stating the
///   count and reason; the dismissal endpoint is never called.
/// - Live: one dismissal call per approval, issued concurrently with no
///   ordering guarantee and awaited jointly. The first failure fails the
///   whole operation; already-dismissed approvals are not rolled back and
///   nothing is retried.
///
/// # Errors
///
/// Propagates the comment call's failure in dry-run mode, or the first
/// dismissal failure in live mode.
pub async fn execute<Gateway>(
    gateway: &Gateway,
    locator: &PullRequestLocator,
    approvals: &[Approval],
    reason: &DismissalReason,
    dry_run: bool,
) -> Result<SweepOutcome, SweepError>
where
    Gateway: ReviewGateway,
{
    if approvals.is_empty() {
        tracing::info!("no stale approvals to dismiss");
        return Ok(SweepOutcome::NothingToDismiss);
    }

    if dry_run {
        let body = dry_run_report(approvals.len(), reason);
        gateway.create_comment(locator, &body).await?;
        tracing::info!(count = approvals.len(), "dry run report posted");
        return Ok(SweepOutcome::DryRun {
            would_dismiss: approvals.len(),
        });
    }

    try_join_all(
        approvals
            .iter()
            .map(|approval| gateway.dismiss_review(locator, approval.id, reason.as_str())),
    )
    .await?;

    tracing::info!(count = approvals.len(), "dismissed stale approvals");
    Ok(SweepOutcome::Dismissed {
        count: approvals.len(),
    })
}

fn dry_run_report(count: usize, reason: &DismissalReason) -> String {
    format!(
        "Dry run: {count} approval(s) would have been dismissed with \
         reason: {reason}",
        reason = reason.as_str()
    )
}
