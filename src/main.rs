use clap::Parser;
use kubectl_deploy::app;
use kubectl_deploy::config::{parse_timeout, Settings, DEFAULT_KUBECONFIG_PATH, DEFAULT_KUBECTL};
use kubectl_deploy::driver::KubectlRunner;
use kubectl_deploy::shutdown::wait_for_signal;
use kubectl_deploy::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

/// Update deployment images with kubectl and optionally wait for rollouts
#[derive(Debug, Parser)]
#[command(name = "kubectl-deploy", version)]
struct Cli {
    /// YAML input document, used when INPUT_ARGS is not set
    #[arg(allow_hyphen_values = true)]
    input: Option<String>,

    /// Cluster CLI program
    #[arg(long, env = "KUBECTL_BIN", default_value = DEFAULT_KUBECTL)]
    kubectl: PathBuf,

    /// Where the decoded KUBE_CONFIG is written
    #[arg(long, env = "KUBECONFIG_PATH", default_value = DEFAULT_KUBECONFIG_PATH)]
    kubeconfig_path: PathBuf,

    /// Per-command timeout, e.g. "30s", "5m", "1h" (default: none)
    #[arg(long, env = "KUBECTL_TIMEOUT", value_parser = parse_timeout)]
    timeout: Option<Duration>,
}

impl Cli {
    fn into_settings(self) -> Settings {
        Settings::from_env(self.input)
            .with_kubectl(self.kubectl)
            .with_kubeconfig_path(self.kubeconfig_path)
            .with_command_timeout(self.timeout)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = Cli::parse().into_settings();
    let span = info_span!("run", run_id = %Uuid::new_v4());

    info!(parent: &span, kubectl = %settings.kubectl.display(), "Starting kubectl-deploy");

    // Dropping the run future kills any in-flight kubectl child
    let result = tokio::select! {
        result = app::run(&settings, |kubeconfig| {
            KubectlRunner::from_settings(&settings, kubeconfig)
        }).instrument(span.clone()) => result,
        signal = wait_for_signal() => Err(Error::Interrupted(signal)),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(parent: &span, error = %e, kind = e.kind(), "Exiting");
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
