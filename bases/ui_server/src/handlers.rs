// bases/ui_server/src/handlers.rs
use crate::error::ApiError;
use crate::payloads::*;
use crate::server::AppState;
use axum::extract::{Path as UrlPath, Query, State};
use axum::Json;
use serde_json::{json, Value};
use session_registry::SessionId;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use url::Url;
use ytdlp_bridge::{download_args, BridgeError, DownloadSpec};

/// POST /api/analyze — probe a URL for metadata and formats.
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let url = parse_url(&req.url)?;
    tracing::info!(%url, "analyzing");
    let info = state.tool.probe(&url).await?;
    Ok(Json(AnalyzeResponse {
        success: true,
        info,
    }))
}

/// POST /api/formats — just the format catalogue for a URL.
pub async fn formats(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<FormatsResponse>, ApiError> {
    let url = parse_url(&req.url)?;
    let info = state.tool.probe(&url).await?;
    Ok(Json(FormatsResponse {
        success: true,
        formats: info.formats,
    }))
}

/// POST /api/download — register a session and start the download.
pub async fn download(
    State(state): State<AppState>,
    Json(req): Json<DownloadRequest>,
) -> Result<Json<DownloadStarted>, ApiError> {
    let url = parse_url(&req.url)?;
    let dest_dir = resolve_folder(&state, req.folder.as_deref());
    tokio::fs::create_dir_all(&dest_dir).await.map_err(|e| {
        ApiError::Validation(format!("Cannot create directory {}: {e}", dest_dir.display()))
    })?;

    let mut spec = DownloadSpec::new(url, dest_dir);
    if let Some(format) = req.format.filter(|f| !f.trim().is_empty()) {
        spec.format_selector = format;
    }
    spec.options = req.options;

    let id = state.registry.register();
    let args = download_args(&spec);
    tracing::info!(session = %id, url = %spec.url, dest = %spec.dest_dir.display(), "starting download");
    session_registry::spawn(
        state.registry.clone(),
        id.clone(),
        state.tool.binary().to_path_buf(),
        args,
    );

    Ok(Json(DownloadStarted {
        success: true,
        download_id: id,
    }))
}

/// GET /api/progress/:id — poll a session.
///
/// Unknown ids answer 200 with a `not_found` status so a UI that keeps
/// polling after a restart degrades quietly.
pub async fn progress(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Json<Value> {
    let id = SessionId::from(id);
    match state.registry.snapshot(&id) {
        Some(snapshot) => Json(
            serde_json::to_value(&snapshot)
                .unwrap_or_else(|_| json!({ "status": "error", "message": "unserializable snapshot" })),
        ),
        None => Json(json!({
            "status": "not_found",
            "progress": 0,
            "message": "Download not found"
        })),
    }
}

/// POST /api/pause/:id
pub async fn pause(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<Ack>, ApiError> {
    state.registry.pause(&SessionId::from(id))?;
    Ok(Json(Ack { success: true }))
}

/// POST /api/resume/:id
pub async fn resume(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<Ack>, ApiError> {
    state.registry.resume(&SessionId::from(id))?;
    Ok(Json(Ack { success: true }))
}

/// POST /api/cancel/:id
pub async fn cancel(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<Ack>, ApiError> {
    state.registry.cancel(&SessionId::from(id))?;
    Ok(Json(Ack { success: true }))
}

/// POST /api/folders — one page of the folder picker.
pub async fn folders(
    Json(req): Json<FoldersRequest>,
) -> Result<Json<ListingResponse>, ApiError> {
    let path = req.path.filter(|p| !p.trim().is_empty());
    let listing = folder_browser::list_dir(path.as_deref().map(Path::new))?;
    Ok(Json(ListingResponse {
        success: true,
        listing,
    }))
}

/// POST /api/create-folder
pub async fn create_folder(
    Json(req): Json<CreateFolderRequest>,
) -> Result<Json<CreateFolderResponse>, ApiError> {
    if req.parent_path.trim().is_empty() {
        return Err(ApiError::Validation(
            "Parent path and folder name are required".to_string(),
        ));
    }
    let folder_path =
        folder_browser::create_folder(Path::new(&req.parent_path), &req.folder_name)?;
    Ok(Json(CreateFolderResponse {
        success: true,
        message: format!("Folder \"{}\" created successfully", req.folder_name),
        folder_path,
    }))
}

/// GET /api/default-folder
pub async fn default_folder(State(state): State<AppState>) -> Json<DefaultFolderResponse> {
    Json(DefaultFolderResponse {
        success: true,
        folder: state.config.download_dir.clone(),
    })
}

/// POST /api/open-folder — reveal a folder in the OS file manager.
pub async fn open_folder(
    State(state): State<AppState>,
    Json(req): Json<OpenFolderRequest>,
) -> Result<Json<Ack>, ApiError> {
    let folder = resolve_folder(&state, req.folder.as_deref());
    folder_browser::reveal(&folder)?;
    Ok(Json(Ack { success: true }))
}

/// GET /api/storage — disk usage for a download folder.
pub async fn storage(
    State(state): State<AppState>,
    Query(query): Query<StorageQuery>,
) -> Result<Json<StorageResponse>, ApiError> {
    let path = match query.path.filter(|p| !p.trim().is_empty()) {
        Some(p) => PathBuf::from(p),
        None => {
            let default = state.config.download_dir.clone();
            tokio::fs::create_dir_all(&default)
                .await
                .map_err(|e| ApiError::Internal(e.to_string()))?;
            default
        }
    };
    let info = folder_browser::storage_info(&path)?;
    Ok(Json(StorageResponse {
        success: true,
        info,
    }))
}

/// POST /api/zip — bundle finished output files into one archive.
pub async fn zip(
    State(state): State<AppState>,
    Json(req): Json<ZipRequest>,
) -> Result<Json<ZipResponse>, ApiError> {
    if req.files.is_empty() {
        return Err(ApiError::Validation("No files given".to_string()));
    }
    let dest = match req.dest {
        Some(dest) => dest,
        None => {
            let stamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            state.config.download_dir.join(format!("vidhaul-{stamp}.zip"))
        }
    };

    // Zipping large media is CPU/IO heavy; keep it off the async workers
    let files = req.files;
    let dest_clone = dest.clone();
    let file_count = tokio::task::spawn_blocking(move || {
        folder_browser::zip_files(&files, &dest_clone)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("archive task failed: {e}")))??;

    Ok(Json(ZipResponse {
        success: true,
        archive_path: dest,
        file_count,
    }))
}

fn parse_url(raw: &str) -> Result<Url, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ApiError::Validation("URL is required".to_string()));
    }
    Url::parse(raw)
        .map_err(|e| ApiError::Bridge(BridgeError::InvalidUrl(format!("{raw}: {e}"))))
}

/// A request's folder field: absolute paths are honored as-is, relative
/// ones land under the configured download directory, and an empty or
/// missing field means the default directory itself.
fn resolve_folder(state: &AppState, folder: Option<&str>) -> PathBuf {
    match folder.map(str::trim).filter(|f| !f.is_empty()) {
        Some(folder) => {
            let path = Path::new(folder);
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                state.config.download_dir.join(path)
            }
        }
        None => state.config.download_dir.clone(),
    }
}
