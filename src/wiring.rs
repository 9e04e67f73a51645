//! Assembles the object graph: outbound adapters into application services,
//! application services into the use cases the protocol layer drives.

use std::sync::Arc;

use crate::adapters::{
    InMemoryNoteRepository, LocalFileSystem, OpenMeteoGateway, SystemClock, TracingLogger,
};
use crate::app::{
    CalculationService, FileService, NoteService, PromptService, ResourceService,
    WeatherQueryService,
};
use crate::config::Config;
use crate::error::Error;
use crate::mcp::UseCases;
use crate::ports::outbound::{Clock, FileSystem, Logger, NoteRepository, WeatherGateway};

/// One instance of every output port, shared by all services.
pub struct OutboundPorts {
    pub repository: Arc<dyn NoteRepository>,
    pub file_system: Arc<dyn FileSystem>,
    pub weather: Arc<dyn WeatherGateway>,
    pub clock: Arc<dyn Clock>,
    pub logger: Arc<dyn Logger>,
}

impl OutboundPorts {
    /// Real adapters: in-memory notes, local disk, Open-Meteo, system clock
    /// and `tracing`.
    pub fn production(config: &Config) -> Result<Self, Error> {
        Ok(Self {
            repository: Arc::new(InMemoryNoteRepository::new()),
            file_system: Arc::new(LocalFileSystem),
            weather: Arc::new(OpenMeteoGateway::new(&config.weather)?),
            clock: Arc::new(SystemClock),
            logger: Arc::new(TracingLogger),
        })
    }

    pub fn into_use_cases(self) -> UseCases {
        UseCases {
            calculation: Arc::new(CalculationService::new(self.logger.clone())),
            notes: Arc::new(NoteService::new(
                self.repository.clone(),
                self.clock,
                self.logger.clone(),
            )),
            weather: Arc::new(WeatherQueryService::new(self.weather, self.logger.clone())),
            files: Arc::new(FileService::new(self.file_system, self.logger)),
            resources: Arc::new(ResourceService::new(self.repository.clone())),
            prompts: Arc::new(PromptService::new(self.repository)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_production_graph_shares_note_store() {
        let use_cases = OutboundPorts::production(&Config::default())
            .unwrap()
            .into_use_cases();

        let note = use_cases.notes.create_note("Shared", "body").unwrap();
        let read = use_cases
            .resources
            .read_resource(&format!("note://{}", note.id()))
            .unwrap();
        assert!(read.text.starts_with("Title: Shared\n"));
    }
}
