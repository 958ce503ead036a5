//! Gateway to the remote review-hosting API, backed by Octocrab.
//!
//! The trait-based design keeps the sweep pipeline testable with mocks
//! while the Octocrab implementation handles real HTTP requests. Errors
//! are mapped into [`SweepError`] variants so callers never see Octocrab
//! internals.

use async_trait::async_trait;
use http::{StatusCode, Uri};
use octocrab::{Octocrab, Page};
use serde_json::json;

use super::error::SweepError;
use super::locator::{PersonalAccessToken, PullRequestLocator};
use super::models::{ApiReview, Review, ReviewPage};

/// Reviews requested per page; termination is still driven solely by the
/// Link header's "next" relation.
const REVIEWS_PER_PAGE: u8 = 100;

/// Builds an Octocrab client for the given token and API base URL.
///
/// # Errors
///
/// Returns `SweepError::InvalidUrl` when the base URI cannot be parsed or
/// `SweepError::Api` when Octocrab fails to construct a client.
fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &str,
) -> Result<Octocrab, SweepError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| SweepError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .personal_token(token.as_ref())
        .base_uri(base_uri)
        .map_err(|error| SweepError::Api {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}

/// Remote operations needed by the sweep pipeline.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewGateway: Send + Sync {
    /// Fetch one page of reviews for the pull request (1-based page).
    async fn list_reviews(
        &self,
        locator: &PullRequestLocator,
        page: u32,
    ) -> Result<ReviewPage, SweepError>;

    /// Post a comment on the pull request's discussion thread.
    async fn create_comment(
        &self,
        locator: &PullRequestLocator,
        body: &str,
    ) -> Result<(), SweepError>;

    /// Dismiss one review, attaching the given message.
    async fn dismiss_review(
        &self,
        locator: &PullRequestLocator,
        review_id: u64,
        message: &str,
    ) -> Result<(), SweepError>;
}

/// Octocrab-backed gateway.
pub struct OctocrabGateway {
    client: Octocrab,
}

impl OctocrabGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and pull request
    /// locator.
    ///
    /// # Errors
    ///
    /// Returns `SweepError::InvalidUrl` when the base URI cannot be parsed
    /// or `SweepError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: &PullRequestLocator,
    ) -> Result<Self, SweepError> {
        let octocrab = build_octocrab_client(token, locator.api_base().as_str())?;
        Ok(Self::new(octocrab))
    }
}

#[async_trait]
impl ReviewGateway for OctocrabGateway {
    async fn list_reviews(
        &self,
        locator: &PullRequestLocator,
        page: u32,
    ) -> Result<ReviewPage, SweepError> {
        let page_str = page.to_string();
        let per_page_str = REVIEWS_PER_PAGE.to_string();
        let query_params = [
            ("page", page_str.as_str()),
            ("per_page", per_page_str.as_str()),
        ];

        let page_result = self
            .client
            .get::<Page<ApiReview>, _, _>(locator.reviews_path(), Some(&query_params))
            .await
            .map_err(|error| map_octocrab_error("list reviews", &error))?;

        let has_next = page_result.next.is_some();
        let reviews: Vec<Review> = page_result.items.into_iter().map(Into::into).collect();

        Ok(ReviewPage { reviews, has_next })
    }

    async fn create_comment(
        &self,
        locator: &PullRequestLocator,
        body: &str,
    ) -> Result<(), SweepError> {
        let payload = json!({ "body": body });
        let _ack: serde_json::Value = self
            .client
            .post(locator.comments_path(), Some(&payload))
            .await
            .map_err(|error| map_octocrab_error("create comment", &error))?;
        Ok(())
    }

    async fn dismiss_review(
        &self,
        locator: &PullRequestLocator,
        review_id: u64,
        message: &str,
    ) -> Result<(), SweepError> {
        let payload = json!({ "message": message });
        let _ack: serde_json::Value = self
            .client
            .put(locator.dismissal_path(review_id), Some(&payload))
            .await
            .map_err(|error| map_octocrab_error("dismiss review", &error))?;
        Ok(())
    }
}

// --- Error mapping helpers ---

/// Checks if a GitHub error status indicates an authentication failure.
const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> SweepError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return if is_auth_failure(source.status_code) {
            SweepError::Authentication {
                message: format!(
                    "{operation} failed: GitHub returned {status} {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        } else {
            SweepError::Api {
                message: format!(
                    "{operation} failed with status {status}: {message}",
                    status = source.status_code,
                    message = source.message
                ),
            }
        };
    }

    if is_network_error(error) {
        return SweepError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    SweepError::Api {
        message: format!("{operation} failed: {error}"),
    }
}
