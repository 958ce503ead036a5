//! URL parsing and identity wrappers for the target pull request.

use url::Url;

use super::error::SweepError;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, SweepError> {
        if value.is_empty() {
            return Err(SweepError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, SweepError> {
        if value.is_empty() {
            return Err(SweepError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Pull request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    pub(crate) const fn new(value: u64) -> Result<Self, SweepError> {
        if value == 0 {
            return Err(SweepError::InvalidPullRequestNumber);
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `SweepError::MissingRequiredInput` when the supplied string
    /// is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, SweepError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SweepError::MissingRequiredInput {
                name: "token".to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Derives the GitHub API base URL from a host string.
fn derive_api_base_from_host(
    scheme: &str,
    host: &str,
    port: Option<u16>,
) -> Result<Url, SweepError> {
    if host.eq_ignore_ascii_case("github.com") {
        Url::parse("https://api.github.com")
            .map_err(|error| SweepError::InvalidUrl(error.to_string()))
    } else {
        let authority = if host.contains(':') {
            format!("[{host}]")
        } else {
            host.to_owned()
        };
        let mut api_url = Url::parse(&format!("{scheme}://{authority}"))
            .map_err(|error| SweepError::InvalidUrl(error.to_string()))?;

        api_url
            .set_port(port)
            .map_err(|()| SweepError::InvalidUrl("invalid port".to_owned()))?;
        api_url.set_path("api/v3");
        Ok(api_url)
    }
}

/// Identity of the pull request whose approvals are being swept.
///
/// Constant for the whole run; built either from an explicit pull request
/// URL or from the trigger context supplied by the hosting environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
    number: PullRequestNumber,
}

impl PullRequestLocator {
    /// Parses a GitHub pull request URL in the form
    /// `https://github.com/<owner>/<repo>/pull/<number>`.
    ///
    /// # Errors
    ///
    /// Returns `SweepError::InvalidUrl` when parsing fails,
    /// `MissingPathSegments` when the URL path is not
    /// `/owner/repo/pull/<number>`, and `InvalidPullRequestNumber` when the
    /// final segment is not a positive integer.
    pub fn parse(input: &str) -> Result<Self, SweepError> {
        let parsed =
            Url::parse(input).map_err(|error| SweepError::InvalidUrl(error.to_string()))?;

        let mut segments = parsed
            .path_segments()
            .ok_or(SweepError::MissingPathSegments)?;

        let owner_segment = segments.next().ok_or(SweepError::MissingPathSegments)?;
        let repository_segment = segments.next().ok_or(SweepError::MissingPathSegments)?;
        let marker = segments.next().ok_or(SweepError::MissingPathSegments)?;
        let number_segment = segments.next().ok_or(SweepError::MissingPathSegments)?;

        if marker != "pull" {
            return Err(SweepError::MissingPathSegments);
        }

        if number_segment.is_empty() {
            return Err(SweepError::MissingPathSegments);
        }

        let owner = RepositoryOwner::new(owner_segment)?;
        let repository = RepositoryName::new(repository_segment)?;
        let number = number_segment
            .parse::<u64>()
            .map_err(|_| SweepError::InvalidPullRequestNumber)
            .and_then(PullRequestNumber::new)?;

        let host = parsed
            .host_str()
            .ok_or_else(|| SweepError::InvalidUrl("URL must include a host".to_owned()))?;
        let api_base = derive_api_base_from_host(parsed.scheme(), host, parsed.port())?;

        Ok(Self {
            api_base,
            owner,
            repository,
            number,
        })
    }

    /// Builds a locator from trigger-context parts.
    ///
    /// `repository` is the `owner/name` slug supplied by the hosting
    /// environment; `api_base` is the API root URL to call against.
    ///
    /// # Errors
    ///
    /// Returns `SweepError::InvalidUrl` when the API base does not parse,
    /// `MissingPathSegments` when the slug is not `owner/name`, and
    /// `InvalidPullRequestNumber` when the number is zero.
    pub fn from_trigger(api_base: &str, repository: &str, number: u64) -> Result<Self, SweepError> {
        let parsed_base =
            Url::parse(api_base).map_err(|error| SweepError::InvalidUrl(error.to_string()))?;

        let (owner_part, name_part) = repository
            .split_once('/')
            .ok_or(SweepError::MissingPathSegments)?;

        Ok(Self {
            api_base: parsed_base,
            owner: RepositoryOwner::new(owner_part)?,
            repository: RepositoryName::new(name_part)?,
            number: PullRequestNumber::new(number)?,
        })
    }

    /// API base URL all requests are issued against.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }

    pub(crate) fn reviews_path(&self) -> String {
        format!(
            "/repos/{}/{}/pulls/{}/reviews",
            self.owner.as_str(),
            self.repository.as_str(),
            self.number.get()
        )
    }

    pub(crate) fn comments_path(&self) -> String {
        format!(
            "/repos/{}/{}/issues/{}/comments",
            self.owner.as_str(),
            self.repository.as_str(),
            self.number.get()
        )
    }

    pub(crate) fn dismissal_path(&self, review_id: u64) -> String {
        format!(
            "/repos/{}/{}/pulls/{}/reviews/{review_id}/dismissals",
            self.owner.as_str(),
            self.repository.as_str(),
            self.number.get()
        )
    }
}
