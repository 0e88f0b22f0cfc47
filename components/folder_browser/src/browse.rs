// components/folder_browser/src/browse.rs
use crate::types::{BrowseError, CommonFolder, DirEntryInfo, DirListing, EntryKind};
use std::io;
use std::path::{Path, PathBuf};

/// At most this many files are included per listing; the picker is for
/// choosing folders, files are only shown for orientation.
const MAX_FILES_SHOWN: usize = 10;

/// List a directory for the folder picker. `None` starts at home.
pub fn list_dir(path: Option<&Path>) -> Result<DirListing, BrowseError> {
    let start = match path {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => home_dir(),
    };

    if !start.is_dir() {
        return Err(BrowseError::NotADirectory(start));
    }
    let current = start
        .canonicalize()
        .map_err(|e| map_access_error(&start, "canonicalize path", e))?;

    let entries = std::fs::read_dir(&current)
        .map_err(|e| map_access_error(&current, "read directory", e))?;

    let mut folders = Vec::new();
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| map_access_error(&current, "read directory entry", e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            folders.push(DirEntryInfo {
                name,
                path,
                kind: EntryKind::Folder,
            });
        } else {
            files.push(DirEntryInfo {
                name,
                path,
                kind: EntryKind::File,
            });
        }
    }

    folders.sort_by_key(|e| e.name.to_lowercase());
    files.sort_by_key(|e| e.name.to_lowercase());
    files.truncate(MAX_FILES_SHOWN);

    Ok(DirListing {
        parent_path: current.parent().map(Path::to_path_buf),
        current_path: current,
        folders,
        files,
        common_folders: common_folders(),
    })
}

/// Create a new folder under an existing parent. The name must be a single
/// path component.
pub fn create_folder(parent: &Path, name: &str) -> Result<PathBuf, BrowseError> {
    let name = name.trim();
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
    {
        return Err(BrowseError::InvalidName(name.to_string()));
    }
    if !parent.is_dir() {
        return Err(BrowseError::NotADirectory(parent.to_path_buf()));
    }

    let target = parent.join(name);
    if target.exists() {
        return Err(BrowseError::AlreadyExists(target));
    }
    std::fs::create_dir_all(&target)
        .map_err(|e| map_access_error(&target, "create folder", e))?;
    Ok(target)
}

/// Where downloads land when the user never picks a folder.
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .unwrap_or_else(|| home_dir().join("Downloads"))
        .join("vidhaul")
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

/// Quick-access shortcuts, filtered to those that exist on this machine.
fn common_folders() -> Vec<CommonFolder> {
    let home = home_dir();
    let candidates = [
        ("Home", home.clone()),
        ("Desktop", home.join("Desktop")),
        ("Downloads", home.join("Downloads")),
        ("Documents", home.join("Documents")),
        ("Videos", home.join("Videos")),
    ];
    candidates
        .into_iter()
        .filter(|(_, path)| path.is_dir())
        .map(|(name, path)| CommonFolder { name, path })
        .collect()
}

fn map_access_error(path: &Path, operation: &str, err: io::Error) -> BrowseError {
    if err.kind() == io::ErrorKind::PermissionDenied {
        BrowseError::PermissionDenied(path.to_path_buf())
    } else {
        BrowseError::io(format!("{operation} ({})", path.display()), err)
    }
}
