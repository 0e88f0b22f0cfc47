// bases/ui_server/src/payloads.rs
//! Request and response shapes for the JSON API.

use folder_browser::{DirListing, StorageInfo};
use serde::{Deserialize, Serialize};
use session_registry::SessionId;
use std::path::PathBuf;
use ytdlp_bridge::{DownloadOptions, FormatCatalogue, VideoMetadata};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub info: VideoMetadata,
}

#[derive(Debug, Serialize)]
pub struct FormatsResponse {
    pub success: bool,
    pub formats: FormatCatalogue,
}

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub url: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub folder: Option<String>,
    #[serde(default)]
    pub options: DownloadOptions,
}

#[derive(Debug, Serialize)]
pub struct DownloadStarted {
    pub success: bool,
    pub download_id: SessionId,
}

#[derive(Debug, Serialize)]
pub struct Ack {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct FoldersRequest {
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub success: bool,
    #[serde(flatten)]
    pub listing: DirListing,
}

#[derive(Debug, Deserialize)]
pub struct CreateFolderRequest {
    pub parent_path: String,
    pub folder_name: String,
}

#[derive(Debug, Serialize)]
pub struct CreateFolderResponse {
    pub success: bool,
    pub folder_path: PathBuf,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DefaultFolderResponse {
    pub success: bool,
    pub folder: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct OpenFolderRequest {
    #[serde(default)]
    pub folder: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StorageQuery {
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StorageResponse {
    pub success: bool,
    #[serde(flatten)]
    pub info: StorageInfo,
}

#[derive(Debug, Deserialize)]
pub struct ZipRequest {
    pub files: Vec<PathBuf>,
    #[serde(default)]
    pub dest: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct ZipResponse {
    pub success: bool,
    pub archive_path: PathBuf,
    pub file_count: usize,
}
