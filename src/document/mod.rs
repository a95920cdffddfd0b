//! Input document handling
//!
//! The YAML input names a namespace, a list of deployment targets and an
//! optional `status` flag. It is parsed into a generic YAML value first so that
//! shape errors can be reported per field rather than as serde errors.

pub mod source;
pub mod types;
pub mod validation;

pub use source::resolve_input;
pub use types::{DeploymentSet, DeploymentTarget};
pub use validation::{parse_document, status_flag, validate_document, REQUIRED_FIELDS};

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("No YAML input provided. Set INPUT_ARGS or pass YAML as an argument")]
    MissingInput,

    #[error("Error parsing YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Input document must be a YAML mapping")]
    NotAMapping,

    #[error("Invalid or missing namespace. It must be a non-empty string")]
    InvalidNamespace,

    #[error("Deployments must be a non-empty list")]
    InvalidDeployments,

    #[error("deployments[{index}] must be a mapping")]
    RecordNotAMapping { index: usize },

    #[error("Field '{field}' is missing or not a valid non-empty string in deployments[{index}]")]
    InvalidField { index: usize, field: &'static str },
}

/// Parse and validate YAML text in one step
pub fn load_deployment_set(text: &str) -> Result<DeploymentSet, DocumentError> {
    let document = parse_document(text)?;
    let set = validate_document(&document)?;

    let targets: Vec<&str> = set.deployments.iter().map(|d| d.deployment.as_str()).collect();
    info!(
        namespace = %set.namespace,
        deployments = ?targets,
        status = set.status,
        "Validated deployment input"
    );

    Ok(set)
}
