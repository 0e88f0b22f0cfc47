// components/folder_browser/src/storage.rs
use crate::types::{BrowseError, StorageInfo};
use std::path::Path;

const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = MIB * 1024.0;

/// Disk usage of the filesystem containing `path`.
pub fn storage_info(path: &Path) -> Result<StorageInfo, BrowseError> {
    if !path.is_dir() {
        return Err(BrowseError::NotADirectory(path.to_path_buf()));
    }
    let stats = fs2::statvfs(path)
        .map_err(|e| BrowseError::io(format!("statvfs ({})", path.display()), e))?;

    let total_bytes = stats.total_space();
    let available_bytes = stats.available_space();
    let used_bytes = total_bytes.saturating_sub(available_bytes);
    let used_percent = if total_bytes == 0 {
        0.0
    } else {
        used_bytes as f64 / total_bytes as f64 * 100.0
    };

    Ok(StorageInfo {
        total_bytes,
        available_bytes,
        used_bytes,
        used_percent,
        total: human(total_bytes),
        available: human(available_bytes),
    })
}

fn human(bytes: u64) -> String {
    let bytes = bytes as f64;
    if bytes >= GIB {
        format!("{:.1} GB", bytes / GIB)
    } else {
        format!("{:.1} MB", bytes / MIB)
    }
}
