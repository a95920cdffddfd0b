//! Deployment driver
//!
//! Turns a validated [`DeploymentSet`](crate::document::DeploymentSet) into
//! `kubectl` invocations, one target at a time:
//! - `set image` for every target
//! - `rollout status` right after it when the `status` flag is set
//!
//! The cluster CLI sits behind the [`CommandRunner`] trait so tests can
//! substitute an in-memory runner.

pub mod deploy;
pub mod kubectl;
pub mod runner;

pub use deploy::{deploy_all, run_checked, DeployError, DeploySummary};
pub use kubectl::{rollout_status_args, set_image_args};
pub use runner::{CommandError, CommandOutput, CommandRunner, KubectlRunner};

#[cfg(test)]
pub use runner::MockRunner;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[path = "deploy_test.rs"]
mod tests;
