//! Input ports: the use cases the protocol adapter drives.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use super::outbound::{FileSystemError, RepositoryError, WeatherGatewayError};
use crate::domain::{Calculation, CityName, DomainError, FileMetadata, FilePath, Note, NoteId, Operation, Weather};

/// Coarse classification of a use-case failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Caller supplied something unacceptable.
    InvalidArgument,
    /// The addressed thing does not exist.
    NotFound,
    /// A dependency could not serve the request.
    Unavailable,
}

// ========== Calculation ==========

pub trait CalculationUseCase: Send + Sync {
    fn calculate(&self, operation: Operation, a: f64, b: f64) -> Result<Calculation, DomainError>;
}

// ========== Notes ==========

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NoteError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl NoteError {
    pub fn kind(&self) -> FailureKind {
        match self {
            NoteError::Invalid(_) => FailureKind::InvalidArgument,
            NoteError::Repository(_) => FailureKind::Unavailable,
        }
    }
}

pub trait NoteManagementUseCase: Send + Sync {
    fn create_note(&self, title: &str, content: &str) -> Result<Note, NoteError>;

    /// All notes, ascending by id.
    fn list_notes(&self) -> Result<Vec<Note>, NoteError>;

    fn get_note(&self, id: NoteId) -> Result<Option<Note>, NoteError>;
}

// ========== Weather ==========

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Failed to fetch weather for {city}: {source}")]
pub struct WeatherQueryError {
    pub city: String,
    #[source]
    pub source: WeatherGatewayError,
}

impl WeatherQueryError {
    pub fn kind(&self) -> FailureKind {
        match self.source {
            WeatherGatewayError::CityNotFound(_) => FailureKind::NotFound,
            _ => FailureKind::Unavailable,
        }
    }
}

#[async_trait]
pub trait WeatherQueryUseCase: Send + Sync {
    async fn weather_for_city(&self, city: CityName) -> Result<Weather, WeatherQueryError>;
}

// ========== Files ==========

#[derive(Error, Debug)]
pub enum FileOperationError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Not a regular file: {0}")]
    NotARegularFile(String),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Error {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: String,
        #[source]
        source: FileSystemError,
    },
}

impl FileOperationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FileOperationError::Invalid(_)
            | FileOperationError::NotARegularFile(_)
            | FileOperationError::NotADirectory(_) => FailureKind::InvalidArgument,
            FileOperationError::FileNotFound(_) | FileOperationError::DirectoryNotFound(_) => {
                FailureKind::NotFound
            }
            FileOperationError::Io { .. } => FailureKind::Unavailable,
        }
    }
}

pub trait FileOperationUseCase: Send + Sync {
    /// Full text content of a regular file.
    fn read_file(&self, path: &FilePath) -> Result<String, FileOperationError>;

    /// Create or overwrite a file. Returns the number of bytes written.
    fn write_file(&self, path: &FilePath, content: &str) -> Result<usize, FileOperationError>;

    /// Directory entries sorted by name.
    fn list_directory(&self, path: &FilePath) -> Result<Vec<FileMetadata>, FileOperationError>;
}

// ========== Resources ==========

/// Entry of `resources/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub uri: String,
    pub mime_type: String,
    pub name: String,
    pub description: String,
}

/// Body of `resources/read`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContent {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResourceError {
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Malformed note URI: {0}")]
    MalformedNoteUri(String),

    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("Note not found: {0}")]
    NoteNotFound(NoteId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ResourceError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ResourceError::MalformedNoteUri(_) | ResourceError::Invalid(_) => {
                FailureKind::InvalidArgument
            }
            ResourceError::UnknownResource(_) | ResourceError::NoteNotFound(_) => {
                FailureKind::NotFound
            }
            ResourceError::Repository(_) => FailureKind::Unavailable,
        }
    }
}

pub trait ResourceQueryUseCase: Send + Sync {
    fn list_resources(&self) -> Result<Vec<ResourceDescriptor>, ResourceError>;

    fn read_resource(&self, uri: &str) -> Result<ResourceContent, ResourceError>;
}

// ========== Prompts ==========

/// Declared argument of a prompt template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptArgument {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// Entry of `prompts/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: Vec<PromptArgument>,
}

/// A rendered prompt message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMessage {
    pub role: &'static str,
    pub text: String,
}

/// A rendered prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPrompt {
    pub description: &'static str,
    pub messages: Vec<PromptMessage>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PromptError {
    #[error("Unknown prompt: {0}")]
    UnknownPrompt(String),

    #[error("Missing required argument '{argument}' for prompt '{prompt}'")]
    MissingArgument {
        prompt: &'static str,
        argument: &'static str,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl PromptError {
    pub fn kind(&self) -> FailureKind {
        match self {
            PromptError::UnknownPrompt(_) => FailureKind::NotFound,
            PromptError::MissingArgument { .. } => FailureKind::InvalidArgument,
            PromptError::Repository(_) => FailureKind::Unavailable,
        }
    }
}

pub trait PromptGenerationUseCase: Send + Sync {
    fn list_prompts(&self) -> Vec<PromptTemplate>;

    fn generate_prompt(
        &self,
        name: &str,
        arguments: &HashMap<String, String>,
    ) -> Result<GeneratedPrompt, PromptError>;
}
