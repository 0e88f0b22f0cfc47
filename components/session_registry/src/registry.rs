// components/session_registry/src/registry.rs
use crate::types::{ProgressSnapshot, RegistryError, SessionId, SessionStatus};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use ytdlp_bridge::{humanize, ProgressUpdate};

struct Session {
    snapshot: ProgressSnapshot,
    pid: Option<u32>,
    cancel: CancellationToken,
}

/// Shared map of live download sessions. Handlers read it, runner tasks
/// write it. The lock is never held across an await point.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<Mutex<HashMap<SessionId, Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session in the queued state and hand back its id.
    pub fn register(&self) -> SessionId {
        let id = SessionId::generate();
        let session = Session {
            snapshot: ProgressSnapshot::queued(),
            pid: None,
            cancel: CancellationToken::new(),
        };
        self.inner.lock().insert(id.clone(), session);
        id
    }

    pub fn snapshot(&self, id: &SessionId) -> Option<ProgressSnapshot> {
        self.inner.lock().get(id).map(|s| s.snapshot.clone())
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.inner.lock().contains_key(id)
    }

    pub(crate) fn cancel_token(&self, id: &SessionId) -> Option<CancellationToken> {
        self.inner.lock().get(id).map(|s| s.cancel.clone())
    }

    /// Record the spawned child and flip the session to downloading.
    pub(crate) fn session_started(&self, id: &SessionId, pid: Option<u32>) {
        let mut guard = self.inner.lock();
        let Some(session) = guard.get_mut(id) else {
            return;
        };
        session.pid = pid;
        if !session.snapshot.status.is_terminal() {
            session.snapshot.status = SessionStatus::Downloading;
            session.snapshot.message = "Downloading...".to_string();
        }
    }

    pub(crate) fn clear_pid(&self, id: &SessionId) {
        if let Some(session) = self.inner.lock().get_mut(id) {
            session.pid = None;
        }
    }

    /// Fold one parsed progress line into the snapshot.
    pub fn apply_progress(&self, id: &SessionId, update: &ProgressUpdate) {
        let mut guard = self.inner.lock();
        let Some(session) = guard.get_mut(id) else {
            return;
        };
        let snap = &mut session.snapshot;
        if snap.status.is_terminal() {
            return;
        }

        snap.percent = update.percent;
        if let Some(speed) = update.speed_bytes_per_sec {
            snap.speed = humanize::format_speed(speed);
        }
        if let Some(total) = update.total_bytes {
            snap.size = humanize::format_size_pair(update.downloaded_bytes, total);
        }
        if let Some(eta) = update.eta_seconds {
            snap.eta = humanize::format_eta(eta);
        }
        if let Some(filename) = &update.filename {
            snap.filename = filename.clone();
        }
        if update.finished {
            // Per-file finish; the session completes when the process exits
            snap.message = "Processing downloaded file...".to_string();
        }
    }

    pub fn mark_completed(&self, id: &SessionId) {
        self.finish(id, SessionStatus::Completed, |snap| {
            snap.percent = 100.0;
            snap.message = "Download completed successfully!".to_string();
        });
    }

    pub fn mark_failed(&self, id: &SessionId, message: String) {
        self.finish(id, SessionStatus::Failed, |snap| {
            snap.message = message;
        });
    }

    pub fn mark_cancelled(&self, id: &SessionId) {
        self.finish(id, SessionStatus::Cancelled, |snap| {
            snap.message = "Download cancelled.".to_string();
        });
    }

    fn finish(&self, id: &SessionId, status: SessionStatus, apply: impl FnOnce(&mut ProgressSnapshot)) {
        let mut guard = self.inner.lock();
        let Some(session) = guard.get_mut(id) else {
            return;
        };
        if session.snapshot.status.is_terminal() {
            return;
        }
        session.snapshot.status = status;
        apply(&mut session.snapshot);
    }

    /// Request cancellation. The runner terminates the child and marks the
    /// session; cancelling an already finished session is a no-op.
    pub fn cancel(&self, id: &SessionId) -> Result<(), RegistryError> {
        let mut guard = self.inner.lock();
        let session = guard
            .get_mut(id)
            .ok_or_else(|| RegistryError::UnknownSession(id.to_string()))?;
        if session.snapshot.status.is_terminal() {
            return Ok(());
        }
        session.snapshot.message = "Cancelling download...".to_string();
        session.cancel.cancel();
        Ok(())
    }

    /// Suspend the child process. Only a downloading session can pause.
    ///
    /// On non-unix targets there is no SIGSTOP; the status flips but the
    /// external tool keeps running.
    pub fn pause(&self, id: &SessionId) -> Result<(), RegistryError> {
        let mut guard = self.inner.lock();
        let session = guard
            .get_mut(id)
            .ok_or_else(|| RegistryError::UnknownSession(id.to_string()))?;
        if session.snapshot.status != SessionStatus::Downloading {
            return Err(RegistryError::WrongState {
                session: id.to_string(),
                status: session.snapshot.status,
                action: "pause",
            });
        }
        #[cfg(unix)]
        if let Some(pid) = session.pid {
            signal(pid, libc::SIGSTOP);
        }
        #[cfg(not(unix))]
        tracing::warn!(session = %id, "pause is advisory on this platform; the download keeps running");
        session.snapshot.status = SessionStatus::Paused;
        session.snapshot.message = "Download paused.".to_string();
        Ok(())
    }

    /// Resume a paused child with SIGCONT (unix only, see `pause`).
    pub fn resume(&self, id: &SessionId) -> Result<(), RegistryError> {
        let mut guard = self.inner.lock();
        let session = guard
            .get_mut(id)
            .ok_or_else(|| RegistryError::UnknownSession(id.to_string()))?;
        if session.snapshot.status != SessionStatus::Paused {
            return Err(RegistryError::WrongState {
                session: id.to_string(),
                status: session.snapshot.status,
                action: "resume",
            });
        }
        #[cfg(unix)]
        if let Some(pid) = session.pid {
            signal(pid, libc::SIGCONT);
        }
        session.snapshot.status = SessionStatus::Downloading;
        session.snapshot.message = "Downloading...".to_string();
        Ok(())
    }
}

#[cfg(unix)]
fn signal(pid: u32, signal: libc::c_int) {
    // Best effort; the pid is gone once the child exits and kill fails
    let rc = unsafe { libc::kill(pid as libc::pid_t, signal) };
    if rc != 0 {
        tracing::debug!(pid, signal, "kill failed: {}", std::io::Error::last_os_error());
    }
}
