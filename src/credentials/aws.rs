use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("AWS_REGION is not set")]
    MissingRegion,

    #[error(
        "either AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set, or AWS_ROLE_TO_ASSUME must be defined"
    )]
    MissingCredentials,
}

/// Cloud credentials as found in the environment
#[derive(Debug, Clone, Default)]
pub struct AwsCredentials {
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub region: Option<String>,
    pub role_to_assume: Option<String>,
}

/// Authentication mode the cluster CLI will end up using
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    AssumeRole { role: String },
    StaticKeys { access_key_id: String },
}

/// Check that a region is set and that either a static key pair or an
/// assumable role is available
///
/// A role wins over a key pair when both are present.
pub fn check_aws_credentials(creds: &AwsCredentials) -> Result<AuthMode, CredentialError> {
    let region = creds
        .region
        .as_deref()
        .ok_or(CredentialError::MissingRegion)?;

    let mode = match (
        &creds.role_to_assume,
        &creds.access_key_id,
        &creds.secret_access_key,
    ) {
        (Some(role), _, _) => AuthMode::AssumeRole { role: role.clone() },
        (None, Some(key), Some(_)) => AuthMode::StaticKeys {
            access_key_id: key.clone(),
        },
        _ => return Err(CredentialError::MissingCredentials),
    };

    match &mode {
        AuthMode::AssumeRole { role } => {
            info!(region = %region, role = %role, "Using AWS role to assume");
        }
        AuthMode::StaticKeys { access_key_id } => {
            info!(
                region = %region,
                access_key_id = %access_key_id,
                "Using AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY"
            );
        }
    }

    Ok(mode)
}
