//! Fakes for output ports, shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::adapters::LocalFileSystem;
use crate::domain::{CityName, Coordinates, FileMetadata, FilePath, FileSize, Temperature, WindSpeed};
use crate::ports::outbound::{
    Clock, FileSystem, FileSystemError, GeocodeResult, Logger, WeatherGateway,
    WeatherGatewayError, WeatherReading,
};

/// Clock frozen at 2024-05-01T09:30:00Z.
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Logger that keeps every line as `"LEVEL message"`.
#[derive(Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    fn push(&self, level: &str, message: &str) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("{} {}", level, message));
    }
}

impl Logger for RecordingLogger {
    fn info(&self, message: &str) {
        self.push("INFO", message);
    }

    fn warn(&self, message: &str) {
        self.push("WARN", message);
    }

    fn error(&self, message: &str, cause: Option<&(dyn std::error::Error + 'static)>) {
        match cause {
            Some(cause) => self.push("ERROR", &format!("{}: {}", message, cause)),
            None => self.push("ERROR", message),
        }
    }
}

/// Weather gateway returning canned answers.
pub struct ScriptedWeather {
    pub geocode: Result<GeocodeResult, WeatherGatewayError>,
    pub reading: Result<WeatherReading, WeatherGatewayError>,
    pub weather_calls: AtomicUsize,
}

impl ScriptedWeather {
    /// Paris, 21.5°C, partly cloudy, 11 km/h.
    pub fn sunny() -> Self {
        Self {
            geocode: Ok(GeocodeResult {
                coordinates: Coordinates::new(48.85, 2.35).unwrap(),
                country: "France".to_string(),
            }),
            reading: Ok(WeatherReading {
                temperature: Temperature::celsius(21.5).unwrap(),
                condition_code: 2,
                wind_speed: WindSpeed::km_per_hour(11.0).unwrap(),
            }),
            weather_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_geocode(error: WeatherGatewayError) -> Self {
        Self {
            geocode: Err(error),
            ..Self::sunny()
        }
    }

    pub fn failing_reading(error: WeatherGatewayError) -> Self {
        Self {
            reading: Err(error),
            ..Self::sunny()
        }
    }
}

#[async_trait]
impl WeatherGateway for ScriptedWeather {
    async fn geocode(&self, _city: &CityName) -> Result<GeocodeResult, WeatherGatewayError> {
        self.geocode.clone()
    }

    async fn current_weather(
        &self,
        _coordinates: Coordinates,
    ) -> Result<WeatherReading, WeatherGatewayError> {
        self.weather_calls.fetch_add(1, Ordering::SeqCst);
        self.reading.clone()
    }
}

/// Local filesystem that counts every call made through the port.
#[derive(Default)]
pub struct CountingFileSystem {
    inner: LocalFileSystem,
    calls: Arc<AtomicUsize>,
}

impl CountingFileSystem {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl FileSystem for CountingFileSystem {
    fn exists(&self, path: &FilePath) -> bool {
        self.touch();
        self.inner.exists(path)
    }

    fn is_regular_file(&self, path: &FilePath) -> bool {
        self.touch();
        self.inner.is_regular_file(path)
    }

    fn is_directory(&self, path: &FilePath) -> bool {
        self.touch();
        self.inner.is_directory(path)
    }

    fn read_all(&self, path: &FilePath) -> Result<Vec<u8>, FileSystemError> {
        self.touch();
        self.inner.read_all(path)
    }

    fn write_all(&self, path: &FilePath, content: &[u8]) -> Result<(), FileSystemError> {
        self.touch();
        self.inner.write_all(path, content)
    }

    fn list_directory(&self, path: &FilePath) -> Result<Vec<FileMetadata>, FileSystemError> {
        self.touch();
        self.inner.list_directory(path)
    }

    fn file_size(&self, path: &FilePath) -> Result<FileSize, FileSystemError> {
        self.touch();
        self.inner.file_size(path)
    }
}
