//! Domain layer: value objects, entities and pure domain rules.
//!
//! Nothing here performs I/O.

pub mod condition;
pub mod error;
pub mod model;
pub mod path_policy;
pub mod value;

pub use condition::WeatherCondition;
pub use error::DomainError;
pub use model::{Calculation, FileMetadata, Note, Weather};
pub use value::{CityName, Coordinates, FilePath, FileSize, NoteId, Operation, Temperature, WindSpeed};
