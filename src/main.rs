//! Unstamp CLI entrypoint for stale approval dismissal.

use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use unstamp::{
    ApprovalSweep, OctocrabGateway, SweepError, SweepOutcome, TriggerContext, UnstampConfig,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let mut stderr = io::stderr().lock();
            if writeln!(stderr, "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            if error.suggests_missing_permissions() {
                tracing::warn!("remote service returned Not Found; check token permissions");
                let _ignored = writeln!(
                    stderr,
                    "hint: the token may lack permission to read or dismiss \
                     reviews on this repository"
                );
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), SweepError> {
    let config = load_config()?;

    let token = config.resolve_token()?;
    let settings = config.sweep_settings()?;
    let context = TriggerContext::resolve(config.pr_url.as_deref())?;

    let gateway = OctocrabGateway::for_token(&token, context.locator())?;
    let sweep = ApprovalSweep::new(&gateway);
    let outcome = sweep.run(context.locator(), &settings).await?;

    write_summary(outcome)?;
    Ok(())
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`SweepError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<UnstampConfig, SweepError> {
    UnstampConfig::load().map_err(|error| SweepError::Configuration {
        message: error.to_string(),
    })
}

fn write_summary(outcome: SweepOutcome) -> Result<(), SweepError> {
    let mut stdout = io::stdout().lock();
    let message = match outcome {
        SweepOutcome::NothingToDismiss => "No stale approvals to dismiss".to_owned(),
        SweepOutcome::DryRun { would_dismiss } => {
            format!("Dry run: {would_dismiss} approval(s) would have been dismissed")
        }
        SweepOutcome::Dismissed { count } => format!("Dismissed {count} approval(s)"),
    };

    writeln!(stdout, "{message}").map_err(|error| SweepError::Io {
        message: error.to_string(),
    })
}
