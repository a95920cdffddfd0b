use super::kubectl::{rollout_status_args, set_image_args};
use super::runner::{CommandError, CommandOutput, CommandRunner};
use crate::document::{DeploymentSet, DeploymentTarget};
use thiserror::Error;
use tracing::{error, info, info_span, Instrument};

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Error updating deployment {deployment}: {source}")]
    ImageUpdate {
        deployment: String,
        #[source]
        source: CommandError,
    },

    #[error("Error checking rollout status of deployment {deployment}: {source}")]
    RolloutStatus {
        deployment: String,
        #[source]
        source: CommandError,
    },
}

impl DeployError {
    pub fn deployment(&self) -> &str {
        match self {
            DeployError::ImageUpdate { deployment, .. }
            | DeployError::RolloutStatus { deployment, .. } => deployment,
        }
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploySummary {
    pub namespace: String,
    /// Deployments whose image was updated, in processing order
    pub updated: Vec<String>,
    /// Whether each rollout was waited on
    pub rollout_checked: bool,
}

/// Update every deployment in `set`, strictly in order
///
/// For each target the image is set, then, when `set.status` is true, the
/// rollout is waited on before moving to the next target. The first failure
/// stops the run. Deployments already updated are left as they are.
pub async fn deploy_all(
    runner: &dyn CommandRunner,
    set: &DeploymentSet,
) -> Result<DeploySummary, DeployError> {
    let mut summary = DeploySummary {
        namespace: set.namespace.clone(),
        updated: Vec::with_capacity(set.deployments.len()),
        rollout_checked: set.status,
    };

    for target in &set.deployments {
        let span = info_span!("deployment", deployment = %target.deployment);
        deploy_one(runner, &set.namespace, target, set.status)
            .instrument(span)
            .await?;
        summary.updated.push(target.deployment.clone());
    }

    Ok(summary)
}

async fn deploy_one(
    runner: &dyn CommandRunner,
    namespace: &str,
    target: &DeploymentTarget,
    check_status: bool,
) -> Result<(), DeployError> {
    run_checked(runner, &set_image_args(namespace, target))
        .await
        .map_err(|source| {
            error!(error = %source, "Error updating the deployment");
            DeployError::ImageUpdate {
                deployment: target.deployment.clone(),
                source,
            }
        })?;
    info!(
        namespace = %namespace,
        container = %target.container,
        image = %target.image,
        "Deployment successfully updated"
    );

    if check_status {
        run_checked(runner, &rollout_status_args(namespace, &target.deployment))
            .await
            .map_err(|source| {
                error!(error = %source, "Error checking the rollout status");
                DeployError::RolloutStatus {
                    deployment: target.deployment.clone(),
                    source,
                }
            })?;
        info!(namespace = %namespace, "Rollout status successfully checked");
    }

    Ok(())
}

/// Run a command and treat a non-zero exit as [`CommandError::Failed`]
pub async fn run_checked(
    runner: &dyn CommandRunner,
    args: &[String],
) -> Result<CommandOutput, CommandError> {
    let output = runner.run(args).await?;

    if output.success() {
        Ok(output)
    } else {
        Err(CommandError::Failed {
            command: runner.command_line(args),
            code: output.code,
            stderr: output.stderr,
        })
    }
}
