// components/session_registry/src/runner.rs
//! Background execution of one download session: spawn the external tool,
//! stream its progress lines into the registry, and settle the session's
//! final state when the process exits or is cancelled.

use crate::registry::SessionRegistry;
use crate::types::SessionId;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use ytdlp_bridge::{classify_stderr, parse_progress_line};

/// How long a cancelled child gets to exit before the hard kill.
const KILL_GRACE: Duration = Duration::from_secs(5);

/// Lines of stderr kept for the failure message.
const STDERR_TAIL_LINES: usize = 30;

/// Launch the runner task for an already registered session.
pub fn spawn(
    registry: SessionRegistry,
    id: SessionId,
    program: PathBuf,
    args: Vec<String>,
) -> JoinHandle<()> {
    tokio::spawn(run(registry, id, program, args))
}

async fn run(registry: SessionRegistry, id: SessionId, program: PathBuf, args: Vec<String>) {
    let Some(token) = registry.cancel_token(&id) else {
        tracing::warn!(session = %id, "runner started for unregistered session");
        return;
    };

    let mut child = match Command::new(&program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            tracing::error!(session = %id, "failed to spawn {}: {err}", program.display());
            registry.mark_failed(&id, format!("Could not start the download tool: {err}"));
            return;
        }
    };

    registry.session_started(&id, child.id());
    tracing::info!(session = %id, pid = ?child.id(), "download started");

    let stderr_tail = Arc::new(Mutex::new(VecDeque::with_capacity(STDERR_TAIL_LINES)));
    let stderr_task = child.stderr.take().map(|stderr| {
        let tail = Arc::clone(&stderr_tail);
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                let mut tail = tail.lock();
                if tail.len() == STDERR_TAIL_LINES {
                    tail.pop_front();
                }
                tail.push_back(line);
            }
        })
    });

    let mut cancelled = false;
    if let Some(stdout) = child.stdout.take() {
        let mut lines = BufReader::new(stdout).lines();
        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    cancelled = true;
                    break;
                }
                line = lines.next_line() => match line {
                    Ok(Some(line)) => {
                        if let Some(update) = parse_progress_line(&line) {
                            registry.apply_progress(&id, &update);
                        }
                    }
                    Ok(None) | Err(_) => break,
                }
            }
        }
    }

    if cancelled {
        tracing::info!(session = %id, "terminating cancelled download");
        terminate(&mut child).await;
        if let Some(task) = stderr_task {
            task.abort();
        }
        registry.mark_cancelled(&id);
        registry.clear_pid(&id);
        return;
    }

    let status = child.wait().await;
    if let Some(task) = stderr_task {
        let _ = task.await;
    }

    match status {
        Ok(status) if status.success() => {
            tracing::info!(session = %id, "download completed");
            registry.mark_completed(&id);
        }
        Ok(status) => {
            let tail: Vec<String> = stderr_tail.lock().iter().cloned().collect();
            let message = failure_message(&tail, status.code());
            tracing::warn!(session = %id, code = ?status.code(), "download failed: {message}");
            registry.mark_failed(&id, message);
        }
        Err(err) => {
            registry.mark_failed(&id, format!("Download failed: {err}"));
        }
    }
    registry.clear_pid(&id);
}

/// Graceful termination first, hard kill once the grace period lapses.
async fn terminate(child: &mut Child) {
    #[cfg(unix)]
    if let Some(pid) = child.id() {
        unsafe {
            libc::kill(pid as libc::pid_t, libc::SIGTERM);
        }
    }
    #[cfg(not(unix))]
    let _ = child.start_kill();

    if tokio::time::timeout(KILL_GRACE, child.wait()).await.is_err() {
        let _ = child.kill().await;
    }
}

fn failure_message(stderr_tail: &[String], exit_code: Option<i32>) -> String {
    let tail = stderr_tail.join("\n");
    if let Some(friendly) = classify_stderr(&tail) {
        return friendly.to_string();
    }
    match stderr_tail.iter().rev().find(|l| !l.trim().is_empty()) {
        Some(last) => format!("Download failed: {}", last.trim()),
        None => format!("Download failed (exit code {})", exit_code.unwrap_or(-1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SessionStatus;
    use std::time::Instant;

    #[test]
    fn failure_message_prefers_known_fragments() {
        let tail = vec![
            "[youtube] extracting".to_string(),
            "ERROR: [youtube] abc: Video unavailable".to_string(),
        ];
        assert_eq!(failure_message(&tail, Some(1)), "This video is unavailable.");
    }

    #[test]
    fn failure_message_falls_back_to_last_line() {
        let tail = vec!["ERROR: weird new problem".to_string(), "  ".to_string()];
        assert_eq!(
            failure_message(&tail, Some(1)),
            "Download failed: ERROR: weird new problem"
        );
    }

    #[test]
    fn failure_message_without_stderr_reports_exit_code() {
        assert_eq!(failure_message(&[], Some(101)), "Download failed (exit code 101)");
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use std::path::Path;

        /// Drop an executable shell script into `dir`.
        fn script(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("fake-ytdlp.sh");
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            let mut perms = std::fs::metadata(&path).unwrap().permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&path, perms).unwrap();
            path
        }

        async fn wait_for_terminal(registry: &SessionRegistry, id: &SessionId) -> SessionStatus {
            let deadline = Instant::now() + Duration::from_secs(10);
            loop {
                let status = registry.snapshot(id).unwrap().status;
                if status.is_terminal() {
                    return status;
                }
                assert!(Instant::now() < deadline, "session never settled");
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        }

        #[tokio::test]
        async fn successful_run_completes_with_progress() {
            let dir = tempfile::tempdir().unwrap();
            let script = script(
                dir.path(),
                concat!(
                    r#"echo 'vidhaul:{"status": "downloading", "downloaded_bytes": 50.0, "total_bytes": 100.0, "speed": 2048.0, "eta": 1}'"#,
                    "\n",
                    r#"echo 'vidhaul:{"status": "finished", "downloaded_bytes": 100.0, "total_bytes": 100.0, "filename": "clip.mp4"}'"#,
                ),
            );

            let registry = SessionRegistry::new();
            let id = registry.register();
            spawn(registry.clone(), id.clone(), script, vec![])
                .await
                .unwrap();

            let snap = registry.snapshot(&id).unwrap();
            assert_eq!(snap.status, SessionStatus::Completed);
            assert_eq!(snap.percent, 100.0);
            assert_eq!(snap.filename, "clip.mp4");
        }

        #[tokio::test]
        async fn failed_run_reports_friendly_stderr() {
            let dir = tempfile::tempdir().unwrap();
            let script = script(
                dir.path(),
                "echo 'ERROR: Private video' >&2\nexit 1",
            );

            let registry = SessionRegistry::new();
            let id = registry.register();
            spawn(registry.clone(), id.clone(), script, vec![])
                .await
                .unwrap();

            let snap = registry.snapshot(&id).unwrap();
            assert_eq!(snap.status, SessionStatus::Failed);
            assert_eq!(snap.message, "This video is private.");
        }

        #[tokio::test]
        async fn cancel_terminates_the_child() {
            let dir = tempfile::tempdir().unwrap();
            let script = script(dir.path(), "sleep 30");

            let registry = SessionRegistry::new();
            let id = registry.register();
            let handle = spawn(registry.clone(), id.clone(), script, vec![]);

            // Give the child a moment to start, then cancel
            tokio::time::sleep(Duration::from_millis(100)).await;
            registry.cancel(&id).unwrap();
            handle.await.unwrap();

            assert_eq!(
                registry.snapshot(&id).unwrap().status,
                SessionStatus::Cancelled
            );
        }

        #[tokio::test]
        async fn pause_and_resume_roundtrip() {
            let dir = tempfile::tempdir().unwrap();
            let script = script(dir.path(), "sleep 30");

            let registry = SessionRegistry::new();
            let id = registry.register();
            let handle = spawn(registry.clone(), id.clone(), script, vec![]);

            let deadline = Instant::now() + Duration::from_secs(5);
            while registry.snapshot(&id).unwrap().status != SessionStatus::Downloading {
                assert!(Instant::now() < deadline, "download never started");
                tokio::time::sleep(Duration::from_millis(20)).await;
            }

            registry.pause(&id).unwrap();
            assert_eq!(registry.snapshot(&id).unwrap().status, SessionStatus::Paused);

            registry.resume(&id).unwrap();
            assert_eq!(
                registry.snapshot(&id).unwrap().status,
                SessionStatus::Downloading
            );

            registry.cancel(&id).unwrap();
            handle.await.unwrap();
            assert_eq!(wait_for_terminal(&registry, &id).await, SessionStatus::Cancelled);
        }
    }
}
