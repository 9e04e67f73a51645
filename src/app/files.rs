//! File operation use case.
//!
//! Every path passes [`path_policy::ensure_safe`] before the filesystem port
//! is touched.

use std::sync::Arc;

use crate::domain::{path_policy, FileMetadata, FilePath};
use crate::ports::inbound::{FileOperationError, FileOperationUseCase};
use crate::ports::outbound::{FileSystem, FileSystemError, Logger};

pub struct FileService {
    fs: Arc<dyn FileSystem>,
    logger: Arc<dyn Logger>,
}

impl FileService {
    pub fn new(fs: Arc<dyn FileSystem>, logger: Arc<dyn Logger>) -> Self {
        Self { fs, logger }
    }

    fn ensure_safe(&self, path: &FilePath) -> Result<(), FileOperationError> {
        path_policy::ensure_safe(path).map_err(|e| {
            self.logger.warn(&format!("Rejected path: {}", e));
            FileOperationError::from(e)
        })
    }

    fn io_error(
        &self,
        action: &'static str,
        path: &FilePath,
        source: FileSystemError,
    ) -> FileOperationError {
        self.logger
            .error(&format!("Error {} {}", action, path), Some(&source));
        FileOperationError::Io {
            action,
            path: path.to_string(),
            source,
        }
    }
}

impl FileOperationUseCase for FileService {
    fn read_file(&self, path: &FilePath) -> Result<String, FileOperationError> {
        self.logger.info(&format!("Reading file: {}", path));
        self.ensure_safe(path)?;

        if !self.fs.exists(path) {
            return Err(FileOperationError::FileNotFound(path.to_string()));
        }
        if !self.fs.is_regular_file(path) {
            return Err(FileOperationError::NotARegularFile(path.to_string()));
        }

        let size = self
            .fs
            .file_size(path)
            .map_err(|e| self.io_error("reading file", path, e))?;
        self.logger.info(&format!("Reading {} from {}", size, path));

        let bytes = self
            .fs
            .read_all(path)
            .map_err(|e| self.io_error("reading file", path, e))?;

        self.logger
            .info(&format!("Read {} bytes from: {}", bytes.len(), path));
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn write_file(&self, path: &FilePath, content: &str) -> Result<usize, FileOperationError> {
        self.logger.info(&format!(
            "Writing to file: {} ({} bytes)",
            path,
            content.len()
        ));
        self.ensure_safe(path)?;

        self.fs
            .write_all(path, content.as_bytes())
            .map_err(|e| self.io_error("writing file", path, e))?;

        self.logger
            .info(&format!("Wrote {} bytes to: {}", content.len(), path));
        Ok(content.len())
    }

    fn list_directory(&self, path: &FilePath) -> Result<Vec<FileMetadata>, FileOperationError> {
        self.logger.info(&format!("Listing directory: {}", path));
        self.ensure_safe(path)?;

        if !self.fs.exists(path) {
            return Err(FileOperationError::DirectoryNotFound(path.to_string()));
        }
        if !self.fs.is_directory(path) {
            return Err(FileOperationError::NotADirectory(path.to_string()));
        }

        let mut entries = self
            .fs
            .list_directory(path)
            .map_err(|e| self.io_error("listing directory", path, e))?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        self.logger
            .info(&format!("Found {} entries in: {}", entries.len(), path));
        Ok(entries)
    }
}
