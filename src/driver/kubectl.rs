//! `kubectl` argument vectors

use crate::document::DeploymentTarget;

/// `set image deployment/<name> <container>=<image> --namespace <ns>`
pub fn set_image_args(namespace: &str, target: &DeploymentTarget) -> Vec<String> {
    vec![
        "set".to_string(),
        "image".to_string(),
        deployment_ref(&target.deployment),
        format!("{}={}", target.container, target.image),
        "--namespace".to_string(),
        namespace.to_string(),
    ]
}

/// `rollout status deployment/<name> --namespace <ns>`
///
/// `kubectl` blocks until the rollout completes or fails.
pub fn rollout_status_args(namespace: &str, deployment: &str) -> Vec<String> {
    vec![
        "rollout".to_string(),
        "status".to_string(),
        deployment_ref(deployment),
        "--namespace".to_string(),
        namespace.to_string(),
    ]
}

fn deployment_ref(name: &str) -> String {
    format!("deployment/{}", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_image_args() {
        let target = DeploymentTarget {
            deployment: "app".to_string(),
            container: "app".to_string(),
            image: "app:v2".to_string(),
        };

        assert_eq!(
            set_image_args("staging", &target),
            vec![
                "set",
                "image",
                "deployment/app",
                "app=app:v2",
                "--namespace",
                "staging"
            ]
        );
    }

    #[test]
    fn test_rollout_status_args() {
        assert_eq!(
            rollout_status_args("staging", "app"),
            vec!["rollout", "status", "deployment/app", "--namespace", "staging"]
        );
    }
}
