//! Resource query use case: two static documents plus one resource per note.

use std::sync::Arc;

use serde_json::json;

use crate::domain::{Note, NoteId};
use crate::ports::inbound::{ResourceContent, ResourceDescriptor, ResourceError, ResourceQueryUseCase};
use crate::ports::outbound::NoteRepository;

pub const INFO_URI: &str = "demo://info";
pub const CAPABILITIES_URI: &str = "demo://capabilities";
pub const NOTE_URI_PREFIX: &str = "note://";

const TEXT_PLAIN: &str = "text/plain";
const APPLICATION_JSON: &str = "application/json";

pub struct ResourceService {
    repository: Arc<dyn NoteRepository>,
}

impl ResourceService {
    pub fn new(repository: Arc<dyn NoteRepository>) -> Self {
        Self { repository }
    }

    fn read_note(&self, uri: &str, suffix: &str) -> Result<ResourceContent, ResourceError> {
        let raw: i64 = suffix
            .parse()
            .map_err(|_| ResourceError::MalformedNoteUri(uri.to_string()))?;
        let id = NoteId::new(raw)?;

        let note = self
            .repository
            .find_by_id(id)?
            .ok_or(ResourceError::NoteNotFound(id))?;

        Ok(ResourceContent {
            uri: uri.to_string(),
            mime_type: TEXT_PLAIN.to_string(),
            text: format!(
                "Title: {}\nCreated: {}\n\n{}",
                note.title(),
                note.created_display(),
                note.content()
            ),
        })
    }
}

fn info_text() -> String {
    format!(
        "MCP Demo Server v{}\n\nThis server demonstrates the core capabilities of the Model Context Protocol.",
        env!("CARGO_PKG_VERSION")
    )
}

fn capabilities_text() -> String {
    json!({
        "protocol": "Model Context Protocol (MCP)",
        "version": env!("CARGO_PKG_VERSION"),
        "features": {
            "tools": "Execute functions with structured input/output",
            "resources": "Access and read external data sources",
            "prompts": "Use pre-configured prompt templates"
        },
        "transport": "stdio",
        "documentation": "https://modelcontextprotocol.io"
    })
    .to_string()
}

fn note_descriptor(note: &Note) -> ResourceDescriptor {
    ResourceDescriptor {
        uri: format!("{}{}", NOTE_URI_PREFIX, note.id()),
        mime_type: TEXT_PLAIN.to_string(),
        name: format!("Note: {}", note.title()),
        description: format!("Note created on {}", note.created_display()),
    }
}

impl ResourceQueryUseCase for ResourceService {
    fn list_resources(&self) -> Result<Vec<ResourceDescriptor>, ResourceError> {
        let mut resources = vec![
            ResourceDescriptor {
                uri: INFO_URI.to_string(),
                mime_type: TEXT_PLAIN.to_string(),
                name: "Server Information".to_string(),
                description: "Information about this MCP demo server".to_string(),
            },
            ResourceDescriptor {
                uri: CAPABILITIES_URI.to_string(),
                mime_type: APPLICATION_JSON.to_string(),
                name: "MCP Capabilities".to_string(),
                description: "Overview of MCP protocol capabilities".to_string(),
            },
        ];

        let mut notes = self.repository.find_all()?;
        notes.sort_by_key(Note::id);
        resources.extend(notes.iter().map(note_descriptor));

        Ok(resources)
    }

    fn read_resource(&self, uri: &str) -> Result<ResourceContent, ResourceError> {
        match uri {
            INFO_URI => Ok(ResourceContent {
                uri: uri.to_string(),
                mime_type: TEXT_PLAIN.to_string(),
                text: info_text(),
            }),
            CAPABILITIES_URI => Ok(ResourceContent {
                uri: uri.to_string(),
                mime_type: APPLICATION_JSON.to_string(),
                text: capabilities_text(),
            }),
            _ => match uri.strip_prefix(NOTE_URI_PREFIX) {
                Some(suffix) => self.read_note(uri, suffix),
                None => Err(ResourceError::UnknownResource(uri.to_string())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryNoteRepository;
    use crate::domain::DomainError;
    use crate::ports::inbound::FailureKind;
    use crate::testing::FixedClock;
    use crate::ports::outbound::Clock;

    fn repo_with(titles: &[(&str, &str)]) -> Arc<InMemoryNoteRepository> {
        let repo = Arc::new(InMemoryNoteRepository::new());
        for (title, content) in titles {
            let id = repo.next_identity().unwrap();
            let note = Note::new(id, title, *content, FixedClock::default().now()).unwrap();
            repo.save(note).unwrap();
        }
        repo
    }

    #[test]
    fn test_list_has_static_and_note_entries() {
        let service = ResourceService::new(repo_with(&[("Alpha", "a"), ("Beta", "b")]));
        let resources = service.list_resources().unwrap();

        let uris: Vec<&str> = resources.iter().map(|r| r.uri.as_str()).collect();
        assert_eq!(
            uris,
            vec![INFO_URI, CAPABILITIES_URI, "note://1", "note://2"]
        );
        assert_eq!(resources[2].name, "Note: Alpha");
        assert_eq!(resources[2].description, "Note created on 2024-05-01T09:30:00");
        assert_eq!(resources[1].mime_type, "application/json");
    }

    #[test]
    fn test_read_static_resources() {
        let service = ResourceService::new(repo_with(&[]));

        let info = service.read_resource(INFO_URI).unwrap();
        assert!(info.text.starts_with("MCP Demo Server v"));

        let caps = service.read_resource(CAPABILITIES_URI).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&caps.text).unwrap();
        assert_eq!(parsed["transport"], "stdio");
    }

    #[test]
    fn test_read_note() {
        let service = ResourceService::new(repo_with(&[("T", "C")]));
        let content = service.read_resource("note://1").unwrap();

        assert_eq!(content.uri, "note://1");
        assert_eq!(content.text, "Title: T\nCreated: 2024-05-01T09:30:00\n\nC");
    }

    #[test]
    fn test_missing_note_is_not_found_and_does_not_mutate() {
        let repo = repo_with(&[("Only", "one")]);
        let service = ResourceService::new(repo.clone());

        let err = service.read_resource("note://7").unwrap_err();
        assert_eq!(err.kind(), FailureKind::NotFound);
        assert_eq!(err.to_string(), "Note not found: 7");
        assert_eq!(repo.find_all().unwrap().len(), 1);
        assert_eq!(repo.next_identity().unwrap().value(), 2);
    }

    #[test]
    fn test_malformed_note_uris() {
        let service = ResourceService::new(repo_with(&[]));

        for uri in ["note://", "note://abc", "note://1.5", "note:// 1"] {
            assert_eq!(
                service.read_resource(uri),
                Err(ResourceError::MalformedNoteUri(uri.to_string()))
            );
        }
        assert_eq!(
            service.read_resource("note://0"),
            Err(ResourceError::Invalid(DomainError::InvalidNoteId(0)))
        );
    }

    #[test]
    fn test_unknown_resource() {
        let service = ResourceService::new(repo_with(&[]));
        let err = service.read_resource("demo://nothing").unwrap_err();

        assert_eq!(err, ResourceError::UnknownResource("demo://nothing".to_string()));
        assert_eq!(err.kind(), FailureKind::NotFound);
    }
}
