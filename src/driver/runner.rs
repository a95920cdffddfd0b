//! External command execution
//!
//! Production code uses `KubectlRunner`, which spawns the cluster CLI and
//! streams its output through to the operator while capturing it.
//! Tests use `MockRunner`, which records argument vectors in memory.

use crate::config::{Settings, KUBECONFIG_ENV};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while running `{command}`: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed with {}{}", describe_code(.code), describe_stderr(.stderr))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("`{command}` timed out after {timeout:?}")]
    TimedOut { command: String, timeout: Duration },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "termination by signal".to_string(),
    }
}

fn describe_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

/// Exit status and captured output of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs the cluster CLI with an argument vector
///
/// A non-zero exit is not an error at this level; callers decide what a
/// failed command means.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, args: &[String]) -> Result<CommandOutput, CommandError>;

    /// Human-readable command line, used in logs and error messages
    ///
    /// The default names `kubectl` and only suits runners without a real
    /// program path, such as test doubles. [`KubectlRunner`] overrides it.
    fn command_line(&self, args: &[String]) -> String {
        format!("kubectl {}", args.join(" "))
    }
}

/// Production runner that spawns the cluster CLI
#[derive(Debug, Clone)]
pub struct KubectlRunner {
    program: PathBuf,
    kubeconfig: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl KubectlRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        KubectlRunner {
            program: program.into(),
            kubeconfig: None,
            timeout: None,
        }
    }

    /// Runner configured from settings and the materialized credential file
    pub fn from_settings(settings: &Settings, kubeconfig: Option<PathBuf>) -> Self {
        Self::new(&settings.kubectl)
            .with_kubeconfig(kubeconfig)
            .with_timeout(settings.command_timeout)
    }

    /// Export `KUBECONFIG=<path>` to every invocation
    pub fn with_kubeconfig(mut self, kubeconfig: Option<PathBuf>) -> Self {
        self.kubeconfig = kubeconfig;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

#[async_trait]
impl CommandRunner for KubectlRunner {
    fn command_line(&self, args: &[String]) -> String {
        format!("{} {}", self.program.display(), args.join(" "))
    }

    async fn run(&self, args: &[String]) -> Result<CommandOutput, CommandError> {
        let command = self.command_line(args);

        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(path) = &self.kubeconfig {
            cmd.env(KUBECONFIG_ENV, path);
        }

        debug!(command = %command, "Running command");

        let mut child = cmd.spawn().map_err(|source| CommandError::Spawn {
            program: self.program.display().to_string(),
            source,
        })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let finished = async {
            let (stdout, stderr, status) = tokio::join!(
                forward(stdout, tokio::io::stdout()),
                forward(stderr, tokio::io::stderr()),
                child.wait(),
            );
            Ok::<_, std::io::Error>(CommandOutput {
                code: status?.code(),
                stdout: stdout?,
                stderr: stderr?,
            })
        };

        let result = match self.timeout {
            None => finished.await,
            Some(timeout) => match tokio::time::timeout(timeout, finished).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(command = %command, timeout = ?timeout, "Command timed out, killing it");
                    if let Err(e) = child.kill().await {
                        warn!(error = %e, "Failed to kill timed out command");
                    }
                    return Err(CommandError::TimedOut { command, timeout });
                }
            },
        };

        result.map_err(|source| CommandError::Io { command, source })
    }
}

/// Copy a child's output stream to `sink` line by line, keeping a copy
async fn forward<R, W>(reader: Option<R>, mut sink: W) -> std::io::Result<String>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let Some(reader) = reader else {
        return Ok(String::new());
    };

    let mut reader = BufReader::new(reader);
    let mut captured = String::new();
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        sink.write_all(&line).await?;
        sink.flush().await?;
        captured.push_str(&String::from_utf8_lossy(&line));
    }

    Ok(captured)
}

/// Mock runner for testing - records every argument vector
///
/// Commands succeed unless one of their arguments matches a registered failure.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockRunner {
    calls: std::sync::Arc<std::sync::Mutex<Vec<Vec<String>>>>,
    failures: Vec<(String, i32)>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any command containing the argument `arg` with exit `code`
    pub fn fail_on(mut self, arg: &str, code: i32) -> Self {
        self.failures.push((arg.to_string(), code));
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, args: &[String]) -> Result<CommandOutput, CommandError> {
        #[allow(clippy::unwrap_used)]
        self.calls.lock().unwrap().push(args.to_vec());

        let failure = self
            .failures
            .iter()
            .find(|(arg, _)| args.iter().any(|a| a == arg));

        Ok(match failure {
            Some((_, code)) => CommandOutput {
                code: Some(*code),
                stdout: String::new(),
                stderr: "error: mock failure\n".to_string(),
            },
            None => CommandOutput {
                code: Some(0),
                stdout: "ok\n".to_string(),
                stderr: String::new(),
            },
        })
    }
}

#[cfg(all(test, unix))]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[tokio::test]
    async fn test_captures_output_and_exit_code() {
        let runner = KubectlRunner::new("sh");

        let output = runner
            .run(&sh("echo out; echo err >&2; exit 3"))
            .await
            .unwrap();

        assert_eq!(output.code, Some(3));
        assert!(!output.success());
        assert_eq!(output.stdout, "out\n");
        assert_eq!(output.stderr, "err\n");
    }

    #[tokio::test]
    async fn test_success() {
        let output = KubectlRunner::new("sh").run(&sh("true")).await.unwrap();
        assert!(output.success());
        assert!(output.stdout.is_empty());
    }

    #[tokio::test]
    async fn test_exports_kubeconfig_when_set() {
        let runner =
            KubectlRunner::new("sh").with_kubeconfig(Some(PathBuf::from("/tmp/kube_config")));

        let output = runner
            .run(&sh("printf '%s' \"$KUBECONFIG\""))
            .await
            .unwrap();

        assert_eq!(output.stdout, "/tmp/kube_config");
    }

    #[tokio::test]
    async fn test_kubeconfig_not_forced_when_unset() {
        let runner = KubectlRunner::new("sh");

        let output = runner
            .run(&sh("printf '%s' \"${KUBECONFIG-unset}\""))
            .await
            .unwrap();

        let inherited = std::env::var("KUBECONFIG").unwrap_or_else(|_| "unset".to_string());
        assert_eq!(output.stdout, inherited);
    }

    #[tokio::test]
    async fn test_timeout_kills_command() {
        let runner = KubectlRunner::new("sh").with_timeout(Some(Duration::from_millis(200)));

        let started = std::time::Instant::now();
        let err = runner.run(&sh("sleep 5")).await.unwrap_err();

        assert!(matches!(err, CommandError::TimedOut { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_dropping_run_kills_command() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("pid");
        let script = format!("echo $$ > '{}'; exec sleep 30", pid_file.display());
        let runner = KubectlRunner::new("sh");

        let cancelled = tokio::time::timeout(Duration::from_millis(500), runner.run(&sh(&script)))
            .await
            .is_err();
        assert!(cancelled);

        let pid = std::fs::read_to_string(&pid_file).unwrap();
        let stat = std::path::Path::new("/proc").join(pid.trim()).join("stat");
        if std::path::Path::new("/proc").is_dir() {
            let deadline = std::time::Instant::now() + Duration::from_secs(5);
            let alive = || {
                std::fs::read_to_string(&stat)
                    .map(|s| !s.contains(") Z "))
                    .unwrap_or(false)
            };
            while alive() && std::time::Instant::now() < deadline {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            assert!(!alive(), "command survived its dropped future");
        }
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let runner = KubectlRunner::new("/nonexistent/kubectl");

        let err = runner.run(&["version".to_string()]).await.unwrap_err();

        match err {
            CommandError::Spawn { program, .. } => assert_eq!(program, "/nonexistent/kubectl"),
            other => panic!("expected spawn error, got {:?}", other),
        }
    }

    #[test]
    fn test_command_line_uses_program() {
        let runner = KubectlRunner::new("/usr/local/bin/kubectl");
        let args = vec!["rollout".to_string(), "status".to_string()];

        assert_eq!(runner.program(), Path::new("/usr/local/bin/kubectl"));
        assert_eq!(
            runner.command_line(&args),
            "/usr/local/bin/kubectl rollout status"
        );
        assert_eq!(MockRunner::new().command_line(&args), "kubectl rollout status");
    }

    #[test]
    fn test_failed_error_message() {
        let err = CommandError::Failed {
            command: "kubectl set image deployment/app app=app:v2 --namespace staging".to_string(),
            code: Some(1),
            stderr: "Error from server (NotFound): deployments.apps \"app\" not found\n".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "`kubectl set image deployment/app app=app:v2 --namespace staging` failed with exit status 1: Error from server (NotFound): deployments.apps \"app\" not found"
        );
    }

    #[test]
    fn test_failed_by_signal_message() {
        let err = CommandError::Failed {
            command: "kubectl rollout status deployment/app".to_string(),
            code: None,
            stderr: String::new(),
        };

        assert_eq!(
            err.to_string(),
            "`kubectl rollout status deployment/app` failed with termination by signal"
        );
    }
}
