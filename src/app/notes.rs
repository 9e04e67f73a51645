//! Note management use case.

use std::sync::Arc;

use crate::domain::{Note, NoteId};
use crate::ports::inbound::{NoteError, NoteManagementUseCase};
use crate::ports::outbound::{Clock, Logger, NoteRepository};

pub struct NoteService {
    repository: Arc<dyn NoteRepository>,
    clock: Arc<dyn Clock>,
    logger: Arc<dyn Logger>,
}

impl NoteService {
    pub fn new(
        repository: Arc<dyn NoteRepository>,
        clock: Arc<dyn Clock>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            repository,
            clock,
            logger,
        }
    }
}

impl NoteManagementUseCase for NoteService {
    fn create_note(&self, title: &str, content: &str) -> Result<Note, NoteError> {
        self.logger
            .info(&format!("Creating note with title: {}", title.trim()));

        // Validate before reserving an id so rejected titles leave no gaps.
        if let Err(e) = Note::validate_title(title) {
            self.logger.warn(&format!("Rejected note title: {}", e));
            return Err(e.into());
        }

        let id = self.repository.next_identity()?;
        let note = Note::new(id, title, content, self.clock.now())?;
        self.repository.save(note.clone())?;

        self.logger.info(&format!("Created note with ID: {}", id));
        Ok(note)
    }

    fn list_notes(&self) -> Result<Vec<Note>, NoteError> {
        let mut notes = self.repository.find_all()?;
        notes.sort_by_key(Note::id);

        self.logger.info(&format!("Found {} notes", notes.len()));
        Ok(notes)
    }

    fn get_note(&self, id: NoteId) -> Result<Option<Note>, NoteError> {
        self.logger.info(&format!("Retrieving note with ID: {}", id));
        Ok(self.repository.find_by_id(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryNoteRepository;
    use crate::domain::DomainError;
    use crate::testing::{FixedClock, RecordingLogger};

    fn service() -> NoteService {
        NoteService::new(
            Arc::new(InMemoryNoteRepository::new()),
            Arc::new(FixedClock::default()),
            Arc::new(RecordingLogger::default()),
        )
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let service = service();
        let first = service.create_note("First", "a").unwrap();
        let second = service.create_note("  Second ", "b").unwrap();

        assert_eq!(first.id().value(), 1);
        assert_eq!(second.id().value(), 2);
        assert_eq!(second.title(), "Second");
        assert_eq!(first.created(), FixedClock::default().0);
    }

    #[test]
    fn test_invalid_title_is_not_stored() {
        let service = service();
        let err = service.create_note("   ", "body").unwrap_err();

        assert_eq!(err, NoteError::Invalid(DomainError::EmptyTitle));
        assert!(service.list_notes().unwrap().is_empty());

        let next = service.create_note("Valid", "").unwrap();
        assert_eq!(next.id().value(), 1);
    }

    #[test]
    fn test_list_sorted_by_id() {
        let service = service();
        for title in ["c", "a", "b"] {
            service.create_note(title, "").unwrap();
        }

        let ids: Vec<u64> = service
            .list_notes()
            .unwrap()
            .iter()
            .map(|n| n.id().value())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_get_note() {
        let service = service();
        let note = service.create_note("Keep", "me").unwrap();

        assert_eq!(service.get_note(note.id()).unwrap(), Some(note));
        assert_eq!(service.get_note(NoteId::new(99).unwrap()).unwrap(), None);
    }

    #[test]
    fn test_concurrent_creates_get_distinct_ids() {
        let service = Arc::new(service());
        let threads = 8;
        let per_thread = 25;

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let service = Arc::clone(&service);
                std::thread::spawn(move || {
                    (0..per_thread)
                        .map(|i| {
                            service
                                .create_note(&format!("note {}-{}", t, i), "")
                                .unwrap()
                                .id()
                                .value()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();

        let expected: Vec<u64> = (1..=(threads * per_thread) as u64).collect();
        assert_eq!(ids, expected);

        let listed: Vec<u64> = service
            .list_notes()
            .unwrap()
            .iter()
            .map(|n| n.id().value())
            .collect();
        assert_eq!(listed, expected);
    }
}
