//! Run orchestration
//!
//! Executes the four steps in order and stops at the first failure. Nothing
//! here exits the process; the binary maps the returned error to a status.

use crate::config::Settings;
use crate::credentials::{check_aws_credentials, materialize_kubeconfig};
use crate::document::{load_deployment_set, resolve_input};
use crate::driver::{deploy_all, CommandRunner, DeploySummary};
use crate::Error;
use std::path::PathBuf;
use tracing::info;

/// Run the whole pipeline
///
/// `make_runner` receives the path of the materialized credential file (if
/// any) and builds the runner used for every `kubectl` invocation. It is only
/// called once the input has been validated.
pub async fn run<F, R>(settings: &Settings, make_runner: F) -> Result<DeploySummary, Error>
where
    F: FnOnce(Option<PathBuf>) -> R,
    R: CommandRunner,
{
    let kubeconfig =
        materialize_kubeconfig(settings.kube_config.as_deref(), &settings.kubeconfig_path)?;

    check_aws_credentials(&settings.aws)?;

    let text = resolve_input(settings.input_env.as_deref(), settings.input_arg.as_deref())?;
    let set = load_deployment_set(text)?;

    let runner = make_runner(kubeconfig);
    let summary = deploy_all(&runner, &set).await?;

    info!(
        namespace = %summary.namespace,
        updated = summary.updated.len(),
        rollout_checked = summary.rollout_checked,
        "All deployments updated"
    );

    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[path = "app_test.rs"]
mod tests;
