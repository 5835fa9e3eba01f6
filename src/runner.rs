//! Run mode: execute the combined output with an external interpreter.

use std::path::Path;
use std::process::{ExitStatus, Stdio};

use anyhow::{bail, Context, Result};
use tokio::process::Command;

use crate::cancel::CancelSignal;

pub const DEFAULT_INTERPRETER: &str = "node";

/// Run `interpreter <script>` with inherited stdio until it exits.
///
/// A non-zero exit is an error. If `cancel` fires first the child is killed.
pub async fn run_script(
    interpreter: &str,
    script: &Path,
    mut cancel: CancelSignal,
) -> Result<ExitStatus> {
    tracing::debug!("running {} {}", interpreter, script.display());

    let mut child = Command::new(interpreter)
        .arg(script)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("starting {}", interpreter))?;

    tokio::select! {
        status = child.wait() => {
            let status = status.with_context(|| format!("waiting for {}", interpreter))?;
            if !status.success() {
                bail!("{} exited with {}", interpreter, status);
            }
            Ok(status)
        }
        reason = cancel.cancelled() => {
            child.kill().await.with_context(|| format!("stopping {}", interpreter))?;
            bail!("run cancelled: {}", reason);
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::cancel::{self, CancelReason};

    fn script(body: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("main.sh");
        std::fs::write(&path, body).expect("write script");
        (dir, path)
    }

    #[tokio::test]
    async fn test_successful_script() {
        let (_dir, path) = script("exit 0\n");
        let status = run_script("sh", &path, CancelSignal::never())
            .await
            .expect("run");
        assert!(status.success());
    }

    #[tokio::test]
    async fn test_failing_script_is_error() {
        let (_dir, path) = script("exit 3\n");
        let err = run_script("sh", &path, CancelSignal::never())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("sh exited with"));
    }

    #[tokio::test]
    async fn test_missing_interpreter_is_error() {
        let (_dir, path) = script("");
        let err = run_script("jdsl-no-such-interpreter", &path, CancelSignal::never())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("starting jdsl-no-such-interpreter"));
    }

    #[tokio::test]
    async fn test_cancel_kills_child() {
        let (_dir, path) = script("sleep 30\n");
        let (canceller, signal) = cancel::channel();
        canceller.cancel(CancelReason::Requested("test".into()));
        let err = run_script("sh", &path, signal).await.unwrap_err();
        assert!(err.to_string().contains("run cancelled: test"));
    }
}
