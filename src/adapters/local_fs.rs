//! Filesystem gateway backed by `std::fs`.

use std::fs;

use tracing::debug;

use crate::domain::{FileMetadata, FilePath, FileSize};
use crate::ports::outbound::{FileSystem, FileSystemError};

/// Direct access to the local filesystem, relative to the process cwd.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &FilePath) -> bool {
        path.as_path().exists()
    }

    fn is_regular_file(&self, path: &FilePath) -> bool {
        path.as_path().is_file()
    }

    fn is_directory(&self, path: &FilePath) -> bool {
        path.as_path().is_dir()
    }

    fn read_all(&self, path: &FilePath) -> Result<Vec<u8>, FileSystemError> {
        fs::read(path.as_path()).map_err(|e| FileSystemError::new("read", path, e))
    }

    fn write_all(&self, path: &FilePath, content: &[u8]) -> Result<(), FileSystemError> {
        if let Some(parent) = path.as_path().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| FileSystemError::new("create parent directories of", path, e))?;
                debug!(path = %parent.display(), "Created parent directories");
            }
        }

        fs::write(path.as_path(), content).map_err(|e| FileSystemError::new("write", path, e))
    }

    fn list_directory(&self, path: &FilePath) -> Result<Vec<FileMetadata>, FileSystemError> {
        let list_error = |e| FileSystemError::new("list", path, e);
        let mut entries = Vec::new();

        for entry in fs::read_dir(path.as_path()).map_err(list_error)? {
            let entry = entry.map_err(list_error)?;
            let entry_path = entry.path();
            let is_directory = entry_path.is_dir();
            let size = if is_directory {
                0
            } else {
                entry.metadata().map_err(list_error)?.len()
            };

            let Ok(entry_file_path) = FilePath::new(&entry_path.to_string_lossy()) else {
                continue;
            };

            entries.push(FileMetadata::new(
                entry_file_path,
                FileSize::from_bytes(size),
                is_directory,
            ));
        }

        Ok(entries)
    }

    fn file_size(&self, path: &FilePath) -> Result<FileSize, FileSystemError> {
        let metadata =
            fs::metadata(path.as_path()).map_err(|e| FileSystemError::new("stat", path, e))?;
        Ok(FileSize::from_bytes(metadata.len()))
    }
}
