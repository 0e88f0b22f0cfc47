// components/folder_browser/src/reveal.rs
use crate::types::BrowseError;
use std::path::Path;
use std::process::{Command, Stdio};

/// Open an existing folder in the OS file manager. The viewer process is
/// spawned detached; whether the window actually appears is up to the
/// desktop environment.
pub fn reveal(path: &Path) -> Result<(), BrowseError> {
    if !path.is_dir() {
        return Err(BrowseError::NotADirectory(path.to_path_buf()));
    }

    let program = if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    Command::new(program)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| BrowseError::io(format!("{program} {}", path.display()), e))?;

    tracing::info!(path = %path.display(), "opened folder in file manager");
    Ok(())
}
