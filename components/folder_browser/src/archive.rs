// components/folder_browser/src/archive.rs
use crate::types::BrowseError;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::CompressionMethod;

/// Write a flat zip archive of the given files. Files that no longer exist
/// are skipped; erroring the whole archive because one output was moved
/// would lose the rest.
pub fn zip_files(paths: &[PathBuf], dest: &Path) -> Result<usize, BrowseError> {
    let file = File::create(dest)
        .map_err(|e| BrowseError::io(format!("create archive ({})", dest.display()), e))?;
    let mut writer = zip::ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut added = 0;
    for path in paths {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        let mut source = match File::open(path) {
            Ok(source) => source,
            Err(err) => {
                tracing::warn!(path = %path.display(), "skipping missing file: {err}");
                continue;
            }
        };
        writer
            .start_file(&name, options)
            .map_err(|e| BrowseError::io(format!("add {name} to archive"), zip_err(e)))?;
        io::copy(&mut source, &mut writer)
            .map_err(|e| BrowseError::io(format!("write {name} to archive"), e))?;
        added += 1;
    }

    if added == 0 {
        // Do not leave an empty archive behind
        drop(writer);
        let _ = std::fs::remove_file(dest);
        return Err(BrowseError::EmptyArchive);
    }

    writer
        .finish()
        .map_err(|e| BrowseError::io("finish archive", zip_err(e)))?;
    Ok(added)
}

fn zip_err(err: zip::result::ZipError) -> io::Error {
    match err {
        zip::result::ZipError::Io(io) => io,
        other => io::Error::new(io::ErrorKind::Other, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn archives_existing_files_and_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.mp4");
        let b = dir.path().join("b.mp4");
        std::fs::write(&a, b"aaaa").unwrap();
        std::fs::write(&b, b"bbbb").unwrap();
        let gone = dir.path().join("gone.mp4");

        let dest = dir.path().join("out.zip");
        let added = zip_files(&[a, gone, b], &dest).unwrap();
        assert_eq!(added, 2);

        let archive = zip::ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn empty_archive_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.zip");
        assert_matches!(
            zip_files(&[dir.path().join("missing.mp4")], &dest),
            Err(BrowseError::EmptyArchive)
        );
        assert!(!dest.exists());
    }
}
