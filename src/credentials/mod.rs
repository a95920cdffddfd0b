//! Credential handling
//!
//! - [`kubeconfig`]: writes the cluster credential file from `KUBE_CONFIG`
//! - [`aws`]: checks that cloud credentials are present before anything runs

pub mod aws;
pub mod kubeconfig;

pub use aws::{check_aws_credentials, AuthMode, AwsCredentials, CredentialError};
pub use kubeconfig::{materialize_kubeconfig, KubeconfigError};
