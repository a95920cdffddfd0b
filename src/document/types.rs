use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Deployments to update, all within one namespace
///
/// Example input:
/// ```yaml
/// namespace: staging
/// status: true
/// deployments:
///   - deployment: api
///     container: api
///     image: registry.example.com/api:v2
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct DeploymentSet {
    /// Namespace every deployment lives in
    pub namespace: String,

    /// Deployments to update, processed in order
    pub deployments: Vec<DeploymentTarget>,

    /// Wait for each rollout to finish after updating its image
    #[serde(default)]
    pub status: bool,
}

/// A single `kubectl set image` target
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct DeploymentTarget {
    /// Deployment name
    pub deployment: String,

    /// Container within the deployment's pod template
    pub container: String,

    /// New image reference
    pub image: String,
}
