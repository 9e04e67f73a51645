//! Value objects.
//!
//! Each type validates its invariant once, at construction, so holders never
//! re-check it.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::error::DomainError;

/// Maximum accepted length of a city name, in characters.
pub const MAX_CITY_NAME_CHARS: usize = 100;

/// Lowest physically possible temperature in Celsius.
pub const ABSOLUTE_ZERO_CELSIUS: f64 = -273.15;

/// Identifier of a stored note. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteId(u64);

impl NoteId {
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::InvalidNoteId(value));
        }
        Ok(Self(value as u64))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A trimmed, non-empty filesystem path as supplied by the client.
///
/// Safety rules (traversal, system prefixes) live in
/// [`crate::domain::path_policy`]; this type only guarantees shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilePath(String);

impl FilePath {
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyPath);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Last path component, accepting both `/` and `\` separators.
    pub fn file_name(&self) -> &str {
        match self.0.rfind(['/', '\\']) {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Byte count of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct FileSize(u64);

impl FileSize {
    const UNITS: [&'static str; 5] = ["B", "KB", "MB", "GB", "TB"];

    pub fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> u64 {
        self.0
    }

    /// Human-readable size, base 1024, one decimal place (`"1.5 KB"`).
    pub fn format(&self) -> String {
        if self.0 == 0 {
            return "0 B".to_string();
        }

        let mut value = self.0 as f64;
        let mut unit = 0;
        while value >= 1024.0 && unit < Self::UNITS.len() - 1 {
            value /= 1024.0;
            unit += 1;
        }

        format!("{:.1} {}", value, Self::UNITS[unit])
    }
}

impl fmt::Display for FileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Temperature in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperature(f64);

impl Temperature {
    pub fn celsius(value: f64) -> Result<Self, DomainError> {
        if value.is_nan() || value < ABSOLUTE_ZERO_CELSIUS {
            return Err(DomainError::BelowAbsoluteZero(value));
        }
        Ok(Self(value))
    }

    pub fn as_celsius(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

/// Wind speed in km/h.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindSpeed(f64);

impl WindSpeed {
    pub fn km_per_hour(value: f64) -> Result<Self, DomainError> {
        if value.is_nan() || value < 0.0 {
            return Err(DomainError::NegativeWindSpeed(value));
        }
        Ok(Self(value))
    }

    pub fn as_km_per_hour(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for WindSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} km/h", self.0)
    }
}

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.latitude, self.longitude)
    }
}

/// A trimmed city name, 1 to 100 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityName(String);

impl CityName {
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyCityName);
        }
        if trimmed.chars().count() > MAX_CITY_NAME_CHARS {
            return Err(DomainError::CityNameTooLong {
                max: MAX_CITY_NAME_CHARS,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Arithmetic operation offered by the `calculate` tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Wire name, as accepted in tool arguments.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    /// Display symbol used in formatted results.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
        }
    }
}

impl FromStr for Operation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownOperation(s.to_string()))
    }
}
