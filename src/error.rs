use crate::credentials::{CredentialError, KubeconfigError};
use crate::document::DocumentError;
use crate::driver::DeployError;
use thiserror::Error;

/// Exit status for every failure class
pub const FAILURE_EXIT_CODE: u8 = 1;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Kubeconfig(#[from] KubeconfigError),

    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error("Interrupted by {0}")]
    Interrupted(&'static str),
}

impl Error {
    /// Failure class, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Kubeconfig(_) | Error::Credentials(_) => "configuration",
            Error::Document(DocumentError::MissingInput) => "configuration",
            Error::Document(DocumentError::Parse(_)) => "parse",
            Error::Document(_) => "schema",
            Error::Deploy(_) => "execution",
            Error::Interrupted(_) => "interrupted",
        }
    }

    /// Every failure exits with the same status
    pub fn exit_code(&self) -> u8 {
        FAILURE_EXIT_CODE
    }
}
