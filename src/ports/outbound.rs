//! Output ports: everything the application needs from the outside world.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    CityName, Coordinates, DomainError, FileMetadata, FilePath, FileSize, Note, NoteId,
    Temperature, WindSpeed,
};

/// Note store failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepositoryError {
    #[error("Note store unavailable: {0}")]
    Unavailable(String),

    #[error("Note identities exhausted")]
    IdentityExhausted,
}

/// Storage for notes. Shared across requests, so implementations must be
/// safe for concurrent use.
pub trait NoteRepository: Send + Sync {
    fn save(&self, note: Note) -> Result<(), RepositoryError>;

    fn find_by_id(&self, id: NoteId) -> Result<Option<Note>, RepositoryError>;

    /// All stored notes, in no particular order.
    fn find_all(&self) -> Result<Vec<Note>, RepositoryError>;

    /// Reserve the next identity. Must be a single atomic step: two callers
    /// never observe the same id.
    fn next_identity(&self) -> Result<NoteId, RepositoryError>;
}

/// Low-level filesystem failure.
#[derive(Error, Debug)]
#[error("Failed to {op} {path}: {source}")]
pub struct FileSystemError {
    pub op: &'static str,
    pub path: String,
    #[source]
    pub source: std::io::Error,
}

impl FileSystemError {
    pub fn new(op: &'static str, path: &FilePath, source: std::io::Error) -> Self {
        Self {
            op,
            path: path.to_string(),
            source,
        }
    }
}

/// Filesystem gateway.
pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &FilePath) -> bool;

    fn is_regular_file(&self, path: &FilePath) -> bool;

    fn is_directory(&self, path: &FilePath) -> bool;

    fn read_all(&self, path: &FilePath) -> Result<Vec<u8>, FileSystemError>;

    /// Write `content`, replacing any existing file and creating missing
    /// parent directories.
    fn write_all(&self, path: &FilePath, content: &[u8]) -> Result<(), FileSystemError>;

    /// Entries of a directory, unsorted.
    fn list_directory(&self, path: &FilePath) -> Result<Vec<FileMetadata>, FileSystemError>;

    fn file_size(&self, path: &FilePath) -> Result<FileSize, FileSystemError>;
}

/// Weather lookup failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeatherGatewayError {
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Weather service timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Weather service returned HTTP {0}")]
    Status(u16),

    #[error("Malformed weather service response: {0}")]
    MalformedPayload(String),

    #[error("Weather service returned invalid data: {0}")]
    InvalidData(#[from] DomainError),
}

/// Outcome of resolving a city name.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub coordinates: Coordinates,
    pub country: String,
}

/// Raw current conditions at a location.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub temperature: Temperature,
    pub condition_code: i64,
    pub wind_speed: WindSpeed,
}

/// External weather service. Implementations bound every call with a timeout.
#[async_trait]
pub trait WeatherGateway: Send + Sync {
    async fn geocode(&self, city: &CityName) -> Result<GeocodeResult, WeatherGatewayError>;

    async fn current_weather(
        &self,
        coordinates: Coordinates,
    ) -> Result<WeatherReading, WeatherGatewayError>;
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Diagnostic log sink. Never writes to the protocol stream.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);

    fn warn(&self, message: &str);

    fn error(&self, message: &str, cause: Option<&(dyn std::error::Error + 'static)>);
}
