//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest
//! to highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.unstamp.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `UNSTAMP_TOKEN`, `UNSTAMP_REASON`, or
//!    legacy `GITHUB_TOKEN`
//! 4. **Command-line arguments** – `--token`/`-t`, `--reason`, and so on

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::error::SweepError;
use crate::github::executor::DismissalReason;
use crate::github::filter::ExclusionSet;
use crate::github::locator::PersonalAccessToken;
use crate::github::sweep::SweepSettings;

/// Application configuration supporting CLI, environment, and file
/// sources.
///
/// # Environment Variables
///
/// - `UNSTAMP_TOKEN`, `GITHUB_TOKEN`, or `--token`: Authentication token
/// - `UNSTAMP_REASON` or `--reason`: Dismissal reason
/// - `UNSTAMP_EXCLUDING_SHAS` or `--excluding-shas`: Commits to spare
/// - `UNSTAMP_DRY_RUN` or `--dry-run`: Report-only mode
/// - `UNSTAMP_PR_URL` or `--pr-url`: Explicit pull request target
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "UNSTAMP",
    discovery(
        dotfile_name = ".unstamp.toml",
        config_file_name = "unstamp.toml",
        app_name = "unstamp"
    )
)]
pub struct UnstampConfig {
    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `UNSTAMP_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Reason attached to every dismissal or dry-run report.
    ///
    /// Can be provided via:
    /// - CLI: `--reason <TEXT>`
    /// - Environment: `UNSTAMP_REASON`
    /// - Config file: `reason = "..."`
    pub reason: Option<String>,

    /// Comma-separated commit SHAs whose approvals are spared.
    ///
    /// Can be provided via:
    /// - CLI: `--excluding-shas <LIST>`
    /// - Environment: `UNSTAMP_EXCLUDING_SHAS`
    /// - Config file: `excluding_shas = "..."`
    pub excluding_shas: Option<String>,

    /// Reports what would be dismissed without mutating anything.
    ///
    /// When set, exactly one comment is posted on the pull request's
    /// discussion thread and the dismissal endpoint is never called.
    pub dry_run: bool,

    /// Explicit GitHub pull request URL to sweep.
    ///
    /// Overrides the trigger context supplied by the hosting environment.
    ///
    /// Can be provided via:
    /// - CLI: `--pr-url <URL>` or `-u <URL>`
    /// - Environment: `UNSTAMP_PR_URL`
    /// - Config file: `pr_url = "..."`
    #[ortho_config(cli_short = 'u')]
    pub pr_url: Option<String>,
}

impl UnstampConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// For compatibility with the hosting environment, if no token is
    /// provided via `UNSTAMP_TOKEN`, the CLI, or a configuration file,
    /// this method falls back to reading `GITHUB_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::MissingRequiredInput`] when no token source
    /// provides a non-blank value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, SweepError> {
        let raw = self
            .token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or_else(|| SweepError::MissingRequiredInput {
                name: "token".to_owned(),
            })?;
        PersonalAccessToken::new(raw)
    }

    /// Returns the dismissal reason or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::MissingRequiredInput`] when no reason is
    /// configured or the configured value is blank.
    pub fn require_reason(&self) -> Result<DismissalReason, SweepError> {
        let raw = self
            .reason
            .as_deref()
            .ok_or_else(|| SweepError::MissingRequiredInput {
                name: "reason".to_owned(),
            })?;
        DismissalReason::new(raw)
    }

    /// Parses the exclusion set from the `excluding-shas` input.
    ///
    /// A missing input yields the empty set, which excludes nothing.
    #[must_use]
    pub fn exclusion_set(&self) -> ExclusionSet {
        self.excluding_shas
            .as_deref()
            .map(ExclusionSet::parse)
            .unwrap_or_default()
    }

    /// Builds the sweep settings for this run.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::MissingRequiredInput`] when the reason is
    /// absent.
    pub fn sweep_settings(&self) -> Result<SweepSettings, SweepError> {
        Ok(SweepSettings {
            reason: self.require_reason()?,
            exclusions: self.exclusion_set(),
            dry_run: self.dry_run,
        })
    }
}

#[cfg(test)]
mod tests {
    use ortho_config::MergeComposer;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::UnstampConfig;
    use crate::github::error::SweepError;

    /// Applies a configuration layer to the composer based on the layer
    /// type.
    fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
        match layer_type {
            "defaults" => composer.push_defaults(value),
            "file" => composer.push_file(value, None),
            "environment" => composer.push_environment(value),
            "cli" => composer.push_cli(value),
            _ => panic!("unknown layer type: {layer_type}"),
        }
    }

    #[rstest]
    #[case::file_overrides_defaults(
        vec![("defaults", json!({"reason": "default"})), ("file", json!({"reason": "file"}))],
        "reason",
        "file",
        "file should override default"
    )]
    #[case::environment_overrides_file(
        vec![("file", json!({"token": "file-token"})), ("environment", json!({"token": "env-token"}))],
        "token",
        "env-token",
        "environment should override file"
    )]
    #[case::cli_overrides_environment(
        vec![("environment", json!({"reason": "env"})), ("cli", json!({"reason": "cli"}))],
        "reason",
        "cli",
        "CLI should override environment"
    )]
    fn test_layer_precedence(
        #[case] layers: Vec<(&str, Value)>,
        #[case] field: &str,
        #[case] expected: &str,
        #[case] message: &str,
    ) {
        let mut composer = MergeComposer::new();

        for (layer_type, value) in layers {
            apply_layer(&mut composer, layer_type, value);
        }

        let config =
            UnstampConfig::merge_from_layers(composer.layers()).expect("merge should succeed");

        let actual = match field {
            "reason" => config.reason.as_deref(),
            "token" => config.token.as_deref(),
            _ => panic!("unknown field: {field}"),
        };

        assert_eq!(actual, Some(expected), "{message}");
    }

    #[rstest]
    fn resolve_token_prefers_configured_value() {
        let _guard = env_lock::lock_env([("GITHUB_TOKEN", Some("ambient-token"))]);
        let config = UnstampConfig {
            token: Some("configured-token".to_owned()),
            ..Default::default()
        };

        let token = config.resolve_token().expect("token should resolve");
        assert_eq!(token.value(), "configured-token");
    }

    #[rstest]
    fn resolve_token_falls_back_to_github_token() {
        let _guard = env_lock::lock_env([("GITHUB_TOKEN", Some("ambient-token"))]);
        let config = UnstampConfig::default();

        let token = config.resolve_token().expect("fallback should resolve");
        assert_eq!(token.value(), "ambient-token");
    }

    #[rstest]
    fn resolve_token_errors_when_no_source_provides_one() {
        let _guard = env_lock::lock_env([("GITHUB_TOKEN", None::<&str>)]);
        let config = UnstampConfig::default();

        let result = config.resolve_token();
        assert!(
            matches!(result, Err(SweepError::MissingRequiredInput { ref name }) if name == "token"),
            "expected MissingRequiredInput for token, got {result:?}"
        );
    }

    #[rstest]
    fn require_reason_errors_when_absent() {
        let config = UnstampConfig::default();
        let result = config.require_reason();
        assert!(
            matches!(result, Err(SweepError::MissingRequiredInput { ref name }) if name == "reason"),
            "expected MissingRequiredInput for reason, got {result:?}"
        );
    }

    #[rstest]
    fn exclusion_set_defaults_to_empty() {
        let config = UnstampConfig::default();
        assert!(
            config.exclusion_set().is_empty(),
            "missing excluding-shas should exclude nothing"
        );
    }

    #[rstest]
    fn sweep_settings_carry_all_inputs() {
        let config = UnstampConfig {
            reason: Some("stale".to_owned()),
            excluding_shas: Some("abc, def".to_owned()),
            dry_run: true,
            ..Default::default()
        };

        let settings = config.sweep_settings().expect("settings should build");
        assert_eq!(settings.reason.as_str(), "stale");
        assert_eq!(settings.exclusions.len(), 2);
        assert!(settings.dry_run, "dry_run flag should carry through");
    }
}
