// components/session_registry/src/lib.rs
//! Concurrent download-session management: a registry of live sessions
//! shared between HTTP handlers and runner tasks, plus best-effort
//! pause/resume/cancel on top of the external tool's process.

mod registry;
mod runner;
mod types;

pub use registry::SessionRegistry;
pub use runner::spawn;
pub use types::{ProgressSnapshot, RegistryError, SessionId, SessionStatus};
