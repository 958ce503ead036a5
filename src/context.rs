//! Trigger context resolution for the hosting environment.
//!
//! A run targets exactly one pull request. The target comes either from
//! an explicit `--pr-url` override or from the trigger context the
//! hosting environment supplies: an event payload file
//! (`GITHUB_EVENT_PATH`) carrying the pull request number, the
//! `GITHUB_REPOSITORY` slug, and an optional `GITHUB_API_URL` root.
//! When no pull request can be located the run fails fast with
//! [`SweepError::MissingContext`] before any network call is made.

use std::env;
use std::fs;

use serde::Deserialize;

use crate::github::error::SweepError;
use crate::github::locator::PullRequestLocator;

/// Default API root when the environment does not override it.
const DEFAULT_API_BASE: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<EventPullRequest>,
}

#[derive(Debug, Deserialize)]
struct EventPullRequest {
    number: u64,
}

/// Resolved identity of the pull request that triggered this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerContext {
    locator: PullRequestLocator,
}

impl TriggerContext {
    /// The pull request this run targets.
    #[must_use]
    pub const fn locator(&self) -> &PullRequestLocator {
        &self.locator
    }

    /// Resolves the target pull request.
    ///
    /// An explicit pull request URL takes precedence; otherwise the
    /// trigger context is read from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::MissingContext`] when neither an explicit URL
    /// nor a pull-request trigger is available, or any parse/read failure
    /// from the underlying sources.
    pub fn resolve(pr_url: Option<&str>) -> Result<Self, SweepError> {
        match pr_url {
            Some(input) => Ok(Self {
                locator: PullRequestLocator::parse(input)?,
            }),
            None => Self::from_env(),
        }
    }

    /// Builds the context from an event payload document.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::MissingContext`] when the payload has no
    /// pull request, [`SweepError::Configuration`] when the payload does
    /// not parse, and locator errors for a malformed repository slug or
    /// API base.
    pub fn from_payload(
        payload: &str,
        repository: &str,
        api_base: &str,
    ) -> Result<Self, SweepError> {
        let event: EventPayload =
            serde_json::from_str(payload).map_err(|error| SweepError::Configuration {
                message: format!("event payload is not valid JSON: {error}"),
            })?;

        let number = event
            .pull_request
            .map(|pull_request| pull_request.number)
            .ok_or(SweepError::MissingContext)?;

        Ok(Self {
            locator: PullRequestLocator::from_trigger(api_base, repository, number)?,
        })
    }

    /// Reads the trigger context from the environment.
    fn from_env() -> Result<Self, SweepError> {
        let event_path = env::var("GITHUB_EVENT_PATH").map_err(|_| SweepError::MissingContext)?;
        let repository = env::var("GITHUB_REPOSITORY").map_err(|_| SweepError::MissingContext)?;
        let api_base =
            env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE.to_owned());

        let payload = fs::read_to_string(&event_path).map_err(|error| SweepError::Io {
            message: format!("failed to read event payload '{event_path}': {error}"),
        })?;

        Self::from_payload(&payload, &repository, &api_base)
    }
}
