// components/ytdlp_bridge/src/types.rs
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("yt-dlp not found on PATH")]
    ToolNotFound,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("failed to run {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("yt-dlp failed: {stderr}")]
    ToolFailed { stderr: String },

    #[error("failed to parse yt-dlp output: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BridgeError {
    pub fn spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        BridgeError::Spawn {
            command: command.into(),
            source,
        }
    }
}

/// What kind of media tracks a format carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatKind {
    #[serde(rename = "video+audio")]
    VideoAudio,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "audio")]
    Audio,
}

/// One downloadable format as offered to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    pub format_id: String,
    pub ext: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abr: Option<f64>,
    pub filesize: u64,
    #[serde(rename = "type")]
    pub kind: FormatKind,
}

/// Formats split the way the UI presents them: video choices first,
/// audio-only choices separately.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormatCatalogue {
    pub video: Vec<FormatInfo>,
    pub audio: Vec<FormatInfo>,
}

/// Everything the analyze endpoint reports about a URL. The string fields
/// are pre-formatted for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub channel: String,
    pub duration: String,
    pub view_count: String,
    pub upload_date: String,
    pub thumbnail: String,
    pub formats: FormatCatalogue,
}

/// Optional extras a download may request on top of the format selection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadOptions {
    pub subtitles: bool,
    pub thumbnail: bool,
    pub extract_audio: bool,
}

/// A fully resolved download request, ready to be turned into an argument
/// vector for yt-dlp.
#[derive(Debug, Clone)]
pub struct DownloadSpec {
    pub url: url::Url,
    pub format_selector: String,
    pub dest_dir: PathBuf,
    pub options: DownloadOptions,
}

impl DownloadSpec {
    pub const DEFAULT_FORMAT: &'static str = "best[height<=720]";

    pub fn new(url: url::Url, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            url,
            format_selector: Self::DEFAULT_FORMAT.to_string(),
            dest_dir: dest_dir.into(),
            options: DownloadOptions::default(),
        }
    }
}
