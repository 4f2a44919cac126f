use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;

use crate::cancel::CancelToken;
use crate::error::{ForgeError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct ProcessOutput {
    pub status: ExitStatus,
    /// Empty when stdout was passed through to the terminal.
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// Trimmed stderr, falling back to stdout when stderr is empty.
    pub fn failure_message(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        format!("exited with {}", self.status)
    }
}

/// Run `cmd` to completion, killing it if `cancel` is raised.
///
/// stderr is always captured; stdout is captured unless `passthrough_stdout`.
pub fn run(
    cmd: &mut Command,
    step: &str,
    passthrough_stdout: bool,
    cancel: &CancelToken,
) -> Result<ProcessOutput> {
    cancel.check()?;

    cmd.stdin(Stdio::null()).stderr(Stdio::piped());
    if passthrough_stdout {
        cmd.stdout(Stdio::inherit());
    } else {
        cmd.stdout(Stdio::piped());
    }

    debug!(step, command = ?cmd, "spawning");

    let mut child = cmd.spawn().map_err(|e| ForgeError::Io {
        context: format!("spawning {step}"),
        source: e,
    })?;

    let stdout_handle = child.stdout.take().map(drain);
    let stderr_handle = child.stderr.take().map(drain);

    let status = wait_or_kill(&mut child, step, cancel)?;

    let stdout = stdout_handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default();
    let stderr = stderr_handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default();

    debug!(step, %status, "process exited");

    Ok(ProcessOutput {
        status,
        stdout,
        stderr,
    })
}

fn wait_or_kill(child: &mut Child, step: &str, cancel: &CancelToken) -> Result<ExitStatus> {
    loop {
        if cancel.is_cancelled() {
            let _ = child.kill();
            let _ = child.wait();
            debug!(step, "killed after cancellation");
            return Err(ForgeError::Cancelled);
        }
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => std::thread::sleep(POLL_INTERVAL),
            Err(e) => {
                return Err(ForgeError::Io {
                    context: format!("waiting for {step}"),
                    source: e,
                })
            }
        }
    }
}

/// Read a pipe to the end on its own thread so the child never blocks on a full pipe.
fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn captures_both_streams() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo out; echo err >&2; exit 3"]);
        let output = run(&mut cmd, "test", false, &CancelToken::new()).unwrap();
        assert!(!output.status.success());
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
        assert_eq!(output.failure_message(), "err");
    }

    #[test]
    fn failure_message_falls_back_to_stdout() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo only-stdout; exit 1"]);
        let output = run(&mut cmd, "test", false, &CancelToken::new()).unwrap();
        assert_eq!(output.failure_message(), "only-stdout");
    }

    #[test]
    fn cancelled_token_kills_the_child() {
        let cancel = CancelToken::new();
        let trigger = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(100));
            trigger.cancel();
        });

        let started = Instant::now();
        let mut cmd = Command::new("sleep");
        cmd.arg("30");
        let result = run(&mut cmd, "sleep", false, &cancel);
        assert!(matches!(result, Err(ForgeError::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn already_cancelled_never_spawns() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut cmd = Command::new("forge-test-definitely-not-installed");
        assert!(matches!(
            run(&mut cmd, "x", false, &cancel),
            Err(ForgeError::Cancelled)
        ));
    }

    #[test]
    fn missing_program_is_an_io_error() {
        let mut cmd = Command::new("forge-test-definitely-not-installed");
        assert!(matches!(
            run(&mut cmd, "x", false, &CancelToken::new()),
            Err(ForgeError::Io { .. })
        ));
    }
}
