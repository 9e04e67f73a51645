//! Application services. Each implements one input port using only output
//! ports.

pub mod calculation;
pub mod files;
pub mod notes;
pub mod prompts;
pub mod resources;
pub mod weather;

pub use calculation::CalculationService;
pub use files::FileService;
pub use notes::NoteService;
pub use prompts::PromptService;
pub use resources::ResourceService;
pub use weather::WeatherQueryService;
