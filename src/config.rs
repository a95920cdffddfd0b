//! Runtime configuration
//!
//! Every environment value the tool reads is captured once into [`Settings`]
//! and handed to each step by reference. Tests build settings from a map via
//! [`Settings::from_lookup`] instead of touching the process environment.

use crate::credentials::AwsCredentials;
use std::path::PathBuf;
use std::time::Duration;

/// Base64-encoded kubeconfig blob
pub const KUBE_CONFIG_ENV: &str = "KUBE_CONFIG";
pub const AWS_ACCESS_KEY_ID_ENV: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY_ENV: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_REGION_ENV: &str = "AWS_REGION";
pub const AWS_ROLE_TO_ASSUME_ENV: &str = "AWS_ROLE_TO_ASSUME";
/// YAML input document (preferred over the positional argument)
pub const INPUT_ARGS_ENV: &str = "INPUT_ARGS";
/// Exported to every `kubectl` invocation when a credential file was written
pub const KUBECONFIG_ENV: &str = "KUBECONFIG";

/// Default location of the materialized credential file
pub const DEFAULT_KUBECONFIG_PATH: &str = "/tmp/kube_config";

/// Default cluster CLI program
pub const DEFAULT_KUBECTL: &str = "kubectl";

/// Settings for a single run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Raw `KUBE_CONFIG` value (still base64)
    pub kube_config: Option<String>,
    pub aws: AwsCredentials,
    /// `INPUT_ARGS` value
    pub input_env: Option<String>,
    /// Positional command-line argument
    pub input_arg: Option<String>,
    pub kubectl: PathBuf,
    pub kubeconfig_path: PathBuf,
    /// Per-command timeout; `None` waits forever
    pub command_timeout: Option<Duration>,
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env(input_arg: Option<String>) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), input_arg)
    }

    /// Build settings from an arbitrary lookup function
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F, input_arg: Option<String>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Settings {
            kube_config: get(KUBE_CONFIG_ENV),
            aws: AwsCredentials {
                access_key_id: get(AWS_ACCESS_KEY_ID_ENV),
                secret_access_key: get(AWS_SECRET_ACCESS_KEY_ENV),
                region: get(AWS_REGION_ENV),
                role_to_assume: get(AWS_ROLE_TO_ASSUME_ENV),
            },
            input_env: get(INPUT_ARGS_ENV),
            input_arg: input_arg.filter(|v| !v.is_empty()),
            kubectl: PathBuf::from(DEFAULT_KUBECTL),
            kubeconfig_path: PathBuf::from(DEFAULT_KUBECONFIG_PATH),
            command_timeout: None,
        }
    }

    pub fn with_kubectl(mut self, kubectl: impl Into<PathBuf>) -> Self {
        self.kubectl = kubectl.into();
        self
    }

    pub fn with_kubeconfig_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.kubeconfig_path = path.into();
        self
    }

    pub fn with_command_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.command_timeout = timeout;
        self
    }
}

/// Parse a duration string like "5m", "30s", "1h" into std::time::Duration
///
/// Supported formats:
/// - "30s" → 30 seconds (max 24h = 86400s)
/// - "5m" → 5 minutes (max 24h = 1440m)
/// - "2h" → 2 hours (max 1 week = 168h)
///
/// Zero is rejected. Returns None if the value is invalid or out of range.
pub fn parse_duration(duration_str: &str) -> Option<Duration> {
    let duration_str = duration_str.trim();

    let unit = duration_str.chars().last()?;
    let number: u64 = duration_str[..duration_str.len() - unit.len_utf8()]
        .parse()
        .ok()?;

    if number == 0 {
        return None;
    }

    match unit {
        's' if number <= 86400 => Some(Duration::from_secs(number)),
        'm' if number <= 1440 => number.checked_mul(60).map(Duration::from_secs),
        'h' if number <= 168 => number.checked_mul(3600).map(Duration::from_secs),
        _ => None,
    }
}

/// `clap` value parser wrapper around [`parse_duration`]
pub fn parse_timeout(value: &str) -> Result<Duration, String> {
    parse_duration(value).ok_or_else(|| {
        format!(
            "invalid timeout '{}': expected e.g. '30s', '5m' or '1h' (non-zero, max 168h)",
            value
        )
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
