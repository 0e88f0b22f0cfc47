// components/session_registry/src/types.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown download session: {0}")]
    UnknownSession(String),

    #[error("session {session} is {status:?}, cannot {action}")]
    WrongState {
        session: String,
        status: SessionStatus,
        action: &'static str,
    },
}

/// Identifier handed to the browser when a download starts, used for every
/// later progress poll and control request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Queued,
    Downloading,
    Paused,
    Completed,
    Failed,
    Cancelled,
}

impl SessionStatus {
    /// Terminal states are never overwritten by later progress updates.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionStatus::Completed | SessionStatus::Failed | SessionStatus::Cancelled
        )
    }
}

/// What a progress poll returns. The speed/size/eta fields are
/// pre-formatted display strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub status: SessionStatus,
    #[serde(rename = "progress")]
    pub percent: f64,
    pub speed: String,
    pub size: String,
    pub eta: String,
    pub filename: String,
    pub message: String,
}

impl ProgressSnapshot {
    pub(crate) fn queued() -> Self {
        Self {
            status: SessionStatus::Queued,
            percent: 0.0,
            speed: "0 KB/s".to_string(),
            size: "0 MB".to_string(),
            eta: "00:00".to_string(),
            filename: String::new(),
            message: "Preparing download...".to_string(),
        }
    }
}
