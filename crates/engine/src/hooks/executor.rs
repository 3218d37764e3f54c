//! Hook execution engine
//!
//! Runs a single hook executable with the lifecycle state on its stdin and its
//! stdout/stderr captured. Without a timeout the caller blocks until the hook
//! exits. With one, a waiter thread races a timer and the hook is sent SIGKILL
//! if the timer wins.

use super::state::LifecycleState;
use shimhook_core::{Error, HookDescriptor, Result};
use std::io;
use std::os::unix::process::CommandExt;
use std::process::Output;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

/// Run `hook` once with `state` written to its stdin
///
/// Returns once the hook has exited, or once its timeout has elapsed and the
/// kill signal has been sent. A hook without a timeout that never exits blocks
/// forever.
#[tracing::instrument(skip_all, fields(path = %hook.path, timeout = ?hook.timeout))]
pub fn invoke(hook: &HookDescriptor, state: &LifecycleState) -> Result<()> {
    let payload = state.to_payload()?;

    let handle = build_expression(hook, payload)
        .start()
        .map_err(|source| Error::Spawn {
            path: hook.path.clone(),
            source,
        })?;
    tracing::debug!(pids = ?handle.pids(), "Hook started");

    match hook.timeout {
        None => match handle.wait() {
            Ok(output) => check_output(output),
            Err(err) => Err(wait_failed(&err)),
        },
        Some(seconds) => wait_with_timeout(handle, seconds),
    }
}

/// Build the command for a hook
///
/// `args[0]` is passed as `argv[0]` rather than as an argument. Output is
/// captured unchecked so a non-zero exit still yields the captured text.
fn build_expression(hook: &HookDescriptor, payload: Vec<u8>) -> duct::Expression {
    let (argv0, args) = match hook.args.split_first() {
        Some((first, rest)) => (Some(first.clone()), rest),
        None => (None, &[][..]),
    };

    let mut expression = duct::cmd(&hook.path, args)
        .stdin_bytes(payload)
        .stdout_capture()
        .stderr_capture()
        .unchecked();

    if let Some(env) = &hook.env {
        expression = expression.full_env(parse_env(env));
    }

    if let Some(argv0) = argv0 {
        expression = expression.before_spawn(move |command| {
            command.arg0(&argv0);
            Ok(())
        });
    }

    expression
}

/// Split `KEY=VALUE` entries, skipping malformed ones
fn parse_env(entries: &[String]) -> Vec<(String, String)> {
    entries
        .iter()
        .filter_map(|entry| match entry.split_once('=') {
            Some((key, value)) => Some((key.to_string(), value.to_string())),
            None => {
                tracing::warn!(entry = %entry, "Ignoring environment entry without '='");
                None
            }
        })
        .collect()
}

/// Race the hook's exit against a timer of `seconds`
fn wait_with_timeout(handle: duct::Handle, seconds: u64) -> Result<()> {
    let handle = Arc::new(handle);
    let (done_tx, done_rx) = mpsc::sync_channel(1);

    // The waiter owns a clone of the handle and reaps the child whenever it
    // exits, even after the timer has won and nobody receives the result.
    let waiter = Arc::clone(&handle);
    let spawned = std::thread::Builder::new()
        .name("hook-waiter".to_string())
        .spawn(move || {
            let result = waiter.wait().cloned();
            done_tx.send(result).ok();
        });

    if let Err(err) = spawned {
        kill(&handle).ok();
        return Err(Error::Io(err));
    }

    match done_rx.recv_timeout(Duration::from_secs(seconds)) {
        Ok(Ok(output)) => check_output(&output),
        Ok(Err(err)) => Err(wait_failed(&err)),
        Err(RecvTimeoutError::Timeout) => {
            tracing::debug!(timeout = seconds, "Hook timed out, killing it");
            kill(&handle)?;
            Err(Error::HookTimeout { timeout: seconds })
        }
        Err(RecvTimeoutError::Disconnected) => Err(Error::HookFailed {
            reason: "hook waiter exited without a result".to_string(),
            stdout: String::new(),
            stderr: String::new(),
        }),
    }
}

/// Send SIGKILL to the hook process
///
/// Only delivery is checked; the process is not waited on here. A child the
/// waiter has already reaped is not signalled again.
fn kill(handle: &duct::Handle) -> Result<()> {
    handle.kill().map_err(|source| Error::Kill {
        pid: handle.pids().first().copied().unwrap_or_default(),
        source,
    })
}

fn check_output(output: &Output) -> Result<()> {
    tracing::debug!(status = %output.status, "Hook exited");

    if output.status.success() {
        return Ok(());
    }

    Err(Error::HookFailed {
        reason: output.status.to_string(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

// duct drops the captured output when the wait itself fails.
fn wait_failed(err: &io::Error) -> Error {
    Error::HookFailed {
        reason: err.to_string(),
        stdout: String::new(),
        stderr: String::new(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use std::fs;
    use std::path::Path;
    use std::time::Instant;
    use tempfile::TempDir;

    fn sh(script: &str) -> HookDescriptor {
        HookDescriptor::new("/bin/sh").with_args(["sh", "-c", script])
    }

    fn test_state() -> LifecycleState {
        LifecycleState::new(4242, "/run/b", "c1")
    }

    fn quoted(path: &Path) -> String {
        format!("'{}'", path.display())
    }

    #[test]
    fn test_invoke_success() {
        invoke(&sh("exit 0"), &test_state()).unwrap();
    }

    #[test]
    fn test_invoke_writes_state_to_stdin() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("state.json");
        let hook = sh(&format!("cat > {}", quoted(&out)));

        invoke(&hook, &test_state()).unwrap();

        let received: LifecycleState =
            serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(received, test_state());
    }

    #[test]
    fn test_invoke_failure_carries_output() {
        let hook = sh("echo partial; echo boom >&2; exit 3");

        let err = invoke(&hook, &test_state()).unwrap_err();
        match &err {
            Error::HookFailed {
                reason,
                stdout,
                stderr,
            } => {
                assert!(reason.contains('3'), "unexpected reason: {reason}");
                assert_eq!(stdout, "partial\n");
                assert_eq!(stderr, "boom\n");
            }
            other => panic!("expected HookFailed, got {other:?}"),
        }
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_invoke_missing_executable() {
        let hook = HookDescriptor::new("/nonexistent/shimhook-hook");

        let err = invoke(&hook, &test_state()).unwrap_err();
        assert!(
            matches!(err, Error::Spawn { ref path, .. } if path == "/nonexistent/shimhook-hook")
        );
    }

    #[test]
    fn test_invoke_without_timeout_waits_for_exit() {
        let temp = TempDir::new().unwrap();
        let marker = temp.path().join("done");
        let hook = sh(&format!("sleep 1; echo done > {}", quoted(&marker)));

        let start = Instant::now();
        invoke(&hook, &test_state()).unwrap();

        assert!(start.elapsed() >= Duration::from_secs(1));
        assert!(marker.exists());
    }

    #[test]
    fn test_invoke_timeout_kills_hook() {
        let temp = TempDir::new().unwrap();
        let pid_file = temp.path().join("pid");
        let hook = sh(&format!("echo $$ > {}; exec sleep 5", quoted(&pid_file))).with_timeout(1);

        let start = Instant::now();
        let err = invoke(&hook, &test_state()).unwrap_err();
        let elapsed = start.elapsed();

        assert!(matches!(err, Error::HookTimeout { timeout: 1 }));
        assert!(elapsed >= Duration::from_secs(1));
        assert!(elapsed < Duration::from_secs(4), "took {elapsed:?}");

        // The waiter thread reaps the killed process shortly afterwards
        let pid: i32 = fs::read_to_string(&pid_file).unwrap().trim().parse().unwrap();
        let pid = rustix::process::Pid::from_raw(pid).unwrap();
        let deadline = Instant::now() + Duration::from_secs(3);
        while rustix::process::test_kill_process(pid).is_ok() {
            assert!(Instant::now() < deadline, "hook process still alive");
            std::thread::sleep(Duration::from_millis(50));
        }
    }

    #[test]
    fn test_kill_after_exit_is_noop() {
        let handle = duct::cmd!("/bin/true").start().unwrap();
        handle.wait().unwrap();

        // The pid may already belong to another process by now
        kill(&handle).unwrap();
        kill(&handle).unwrap();
    }

    #[test]
    fn test_kill_running_hook() {
        let handle = duct::cmd!("/bin/sh", "-c", "exec sleep 5")
            .unchecked()
            .start()
            .unwrap();

        let start = Instant::now();
        kill(&handle).unwrap();
        let output = handle.wait().unwrap();

        assert!(!output.status.success());
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_invoke_timeout_not_reached() {
        let hook = sh("exit 0").with_timeout(5);

        let start = Instant::now();
        invoke(&hook, &test_state()).unwrap();

        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_invoke_failure_with_timeout_configured() {
        let hook = sh("echo boom >&2; exit 1").with_timeout(5);

        let err = invoke(&hook, &test_state()).unwrap_err();
        assert!(matches!(err, Error::HookFailed { ref stderr, .. } if stderr == "boom\n"));
    }

    #[test]
    fn test_invoke_passes_environment() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("env");
        let hook = sh("echo \"$HOOK_VAR\" > \"$OUT\"").with_env([
            "HOOK_VAR=hello".to_string(),
            format!("OUT={}", out.display()),
        ]);

        invoke(&hook, &test_state()).unwrap();

        assert_eq!(fs::read_to_string(&out).unwrap(), "hello\n");
    }

    #[test]
    fn test_invoke_explicit_empty_env_clears_environment() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("env");
        let hook = sh(&format!(
            "if [ -z \"$HOME\" ]; then echo cleared; else echo \"$HOME\"; fi > {}",
            quoted(&out)
        ))
        .with_env(Vec::<String>::new());

        invoke(&hook, &test_state()).unwrap();

        assert_eq!(fs::read_to_string(&out).unwrap(), "cleared\n");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_invoke_sets_argv0() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("argv0");
        let hook = HookDescriptor::new("/bin/sh").with_args([
            "my-hook".to_string(),
            "-c".to_string(),
            format!("tr '\\0' '\\n' < /proc/$$/cmdline | head -n 1 > {}", quoted(&out)),
        ]);

        invoke(&hook, &test_state()).unwrap();

        assert_eq!(fs::read_to_string(&out).unwrap(), "my-hook\n");
    }

    #[test]
    fn test_parse_env_skips_malformed() {
        let entries = vec![
            "A=1".to_string(),
            "MALFORMED".to_string(),
            "B=x=y".to_string(),
            "C=".to_string(),
        ];

        assert_eq!(
            parse_env(&entries),
            vec![
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "x=y".to_string()),
                ("C".to_string(), String::new()),
            ]
        );
    }
}
