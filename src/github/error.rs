//! Error types exposed by the approval sweep pipeline.

use thiserror::Error;

/// Errors surfaced while loading context, parsing input, or talking to
/// GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SweepError {
    /// The trigger payload did not reference a pull request.
    #[error(
        "no pull request found in the trigger context; this tool must be \
         triggered by a pull_request event"
    )]
    MissingContext,

    /// A required configuration input was not supplied.
    #[error("required input `{name}` is missing")]
    MissingRequiredInput {
        /// Name of the absent input.
        name: String,
    },

    /// The provided pull request URL could not be parsed.
    #[error("pull request URL is invalid: {0}")]
    InvalidUrl(String),

    /// The pull request path is incomplete.
    #[error("pull request URL must match /owner/repo/pull/<number>")]
    MissingPathSegments,

    /// The pull request number is not a valid integer.
    #[error("pull request number must be a positive integer")]
    InvalidPullRequestNumber,

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}

impl SweepError {
    /// True when the failure message suggests the token lacks the
    /// permissions needed to read or dismiss reviews.
    #[must_use]
    pub fn suggests_missing_permissions(&self) -> bool {
        self.to_string().contains("Not Found")
    }
}
