//! Image rollout shim around `kubectl`
//!
//! Reads credentials and a YAML list of deployments, then drives `kubectl` to
//! update container images and optionally wait for each rollout to finish.
//!
//! The pipeline is strictly sequential:
//! 1. [`credentials::materialize_kubeconfig`] writes the cluster credential file
//! 2. [`credentials::check_aws_credentials`] gates on cloud credentials
//! 3. [`document::load_deployment_set`] parses and validates the input
//! 4. [`driver::deploy_all`] runs `kubectl` for every target in order
//!
//! [`app::run`] composes the steps; only the binary decides the exit status.

pub mod app;
pub mod config;
pub mod credentials;
pub mod document;
pub mod driver;
pub mod error;
pub mod shutdown;

pub use error::Error;
