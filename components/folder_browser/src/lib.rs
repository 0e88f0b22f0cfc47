// components/folder_browser/src/lib.rs
//! Filesystem glue behind the UI's folder picker: directory listings,
//! folder creation, disk usage, zipping of finished downloads, and
//! opening folders in the OS file manager.

mod archive;
mod browse;
mod reveal;
mod storage;
mod types;

pub use archive::zip_files;
pub use browse::{create_folder, default_download_dir, list_dir};
pub use reveal::reveal;
pub use storage::storage_info;
pub use types::{
    BrowseError, CommonFolder, DirEntryInfo, DirListing, EntryKind, StorageInfo,
};
