// components/folder_browser/src/types.rs
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("directory does not exist: {0}")]
    NotADirectory(PathBuf),

    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("invalid folder name: {0}")]
    InvalidName(String),

    #[error("folder already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("no files to archive")]
    EmptyArchive,

    #[error("io error during {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

impl BrowseError {
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        BrowseError::Io {
            operation: operation.into(),
            source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Folder,
    File,
}

#[derive(Debug, Clone, Serialize)]
pub struct DirEntryInfo {
    pub name: String,
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommonFolder {
    pub name: &'static str,
    pub path: PathBuf,
}

/// One page of the folder picker.
#[derive(Debug, Serialize)]
pub struct DirListing {
    pub current_path: PathBuf,
    pub parent_path: Option<PathBuf>,
    pub folders: Vec<DirEntryInfo>,
    pub files: Vec<DirEntryInfo>,
    pub common_folders: Vec<CommonFolder>,
}

/// Disk usage for the filesystem holding a download folder.
#[derive(Debug, Clone, Serialize)]
pub struct StorageInfo {
    pub total_bytes: u64,
    pub available_bytes: u64,
    pub used_bytes: u64,
    pub used_percent: f64,
    pub total: String,
    pub available: String,
}
