//! Concrete implementations of the output ports.

mod local_fs;
mod memory_repo;
mod open_meteo;
mod system_clock;
mod tracing_logger;

pub use local_fs::LocalFileSystem;
pub use memory_repo::InMemoryNoteRepository;
pub use open_meteo::OpenMeteoGateway;
pub use system_clock::SystemClock;
pub use tracing_logger::TracingLogger;
