//! Paginated collection of review approvals.

use super::error::SweepError;
use super::gateway::ReviewGateway;
use super::locator::PullRequestLocator;
use super::models::Approval;

/// Collects every approval on the pull request, across all result pages.
///
/// Pages are requested strictly in sequence starting at page 1; each
/// page's reviews are filtered down to "approved" state while preserving
/// the remote ordering. The loop terminates only when a page stops
/// advertising a "next" relation — there is no page cap.
///
/// # Errors
///
/// Propagates the first gateway failure unmodified; partial results are
/// discarded and nothing is retried.
pub async fn collect_approvals<Gateway>(
    gateway: &Gateway,
    locator: &PullRequestLocator,
) -> Result<Vec<Approval>, SweepError>
where
    Gateway: ReviewGateway,
{
    let mut approvals = Vec::new();
    let mut page: u32 = 1;

    loop {
        let review_page = gateway.list_reviews(locator, page).await?;
        let has_next = review_page.has_next;
        approvals.extend(
            review_page
                .reviews
                .into_iter()
                .filter(super::models::Review::is_approved)
                .map(Approval::from),
        );

        if !has_next {
            break;
        }
        page += 1;
    }

    tracing::debug!(
        pull_request = locator.number().get(),
        pages = page,
        approvals = approvals.len(),
        "collected approvals"
    );

    Ok(approvals)
}
