//! Domain entities.

use std::fmt;

use chrono::{DateTime, Utc};

use super::condition::WeatherCondition;
use super::error::DomainError;
use super::value::{CityName, FilePath, FileSize, NoteId, Operation, Temperature, WindSpeed};

/// Maximum accepted length of a note title, in characters.
pub const MAX_TITLE_CHARS: usize = 200;

/// A user note. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    id: NoteId,
    title: String,
    content: String,
    created: DateTime<Utc>,
}

impl Note {
    /// Build a note, trimming the title and enforcing its length bounds.
    pub fn new(
        id: NoteId,
        title: &str,
        content: impl Into<String>,
        created: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let title = Self::validate_title(title)?;

        Ok(Self {
            id,
            title: title.to_string(),
            content: content.into(),
            created,
        })
    }

    /// Trimmed title, or the invariant it breaks.
    pub fn validate_title(title: &str) -> Result<&str, DomainError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::EmptyTitle);
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(DomainError::TitleTooLong {
                max: MAX_TITLE_CHARS,
            });
        }
        Ok(title)
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Creation time as shown to clients (`2024-05-01T09:30:00`).
    pub fn created_display(&self) -> String {
        self.created.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

/// Result of one arithmetic request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calculation {
    operation: Operation,
    a: f64,
    b: f64,
    result: f64,
}

impl Calculation {
    /// Evaluate `a <op> b`. Division by zero is rejected rather than
    /// producing an infinite or NaN result.
    pub fn perform(operation: Operation, a: f64, b: f64) -> Result<Self, DomainError> {
        let result = match operation {
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            Operation::Multiply => a * b,
            Operation::Divide => {
                if b == 0.0 {
                    return Err(DomainError::DivisionByZero);
                }
                a / b
            }
        };

        Ok(Self {
            operation,
            a,
            b,
            result,
        })
    }

    pub fn result(&self) -> f64 {
        self.result
    }

    pub fn format(&self) -> String {
        format!(
            "Result: {:.2} {} {:.2} = {:.2}",
            self.a,
            self.operation.symbol(),
            self.b,
            self.result
        )
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Current weather for a city.
#[derive(Debug, Clone, PartialEq)]
pub struct Weather {
    pub city: CityName,
    pub country: String,
    pub temperature: Temperature,
    pub condition: WeatherCondition,
    pub wind_speed: WindSpeed,
}

impl Weather {
    pub fn format(&self) -> String {
        format!(
            "Weather in {} ({}):\nTemperature: {}\nCondition: {}\nWind: {}",
            self.city,
            self.country,
            self.temperature,
            self.condition.description(),
            self.wind_speed
        )
    }
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq)]
pub struct FileMetadata {
    pub path: FilePath,
    pub name: String,
    pub size: FileSize,
    pub is_directory: bool,
}

impl FileMetadata {
    /// Entry for `path`, named after its last component.
    pub fn new(path: FilePath, size: FileSize, is_directory: bool) -> Self {
        let name = path.file_name().to_string();
        Self {
            path,
            name,
            size,
            is_directory,
        }
    }

    pub fn format_list_entry(&self) -> String {
        if self.is_directory {
            format!("[DIR]  {}", self.name)
        } else {
            format!("[FILE] {} ({})", self.name, self.size)
        }
    }
}
