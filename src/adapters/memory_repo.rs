//! In-memory note repository.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::domain::{Note, NoteId};
use crate::ports::outbound::{NoteRepository, RepositoryError};

/// Map-backed note store. Lives as long as the process.
#[derive(Debug)]
pub struct InMemoryNoteRepository {
    notes: RwLock<HashMap<NoteId, Note>>,
    next_id: AtomicU64,
}

impl Default for InMemoryNoteRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self {
            notes: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::Unavailable("note store lock poisoned".to_string())
}

impl NoteRepository for InMemoryNoteRepository {
    fn save(&self, note: Note) -> Result<(), RepositoryError> {
        self.notes.write().map_err(poisoned)?.insert(note.id(), note);
        Ok(())
    }

    fn find_by_id(&self, id: NoteId) -> Result<Option<Note>, RepositoryError> {
        Ok(self.notes.read().map_err(poisoned)?.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Note>, RepositoryError> {
        Ok(self.notes.read().map_err(poisoned)?.values().cloned().collect())
    }

    fn next_identity(&self) -> Result<NoteId, RepositoryError> {
        let id = self
            .next_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |id| {
                id.checked_add(1).filter(|next| *next <= i64::MAX as u64)
            })
            .map_err(|_| RepositoryError::IdentityExhausted)?;

        NoteId::new(id as i64).map_err(|_| RepositoryError::IdentityExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedClock;
    use crate::ports::outbound::Clock;
    use std::sync::Arc;

    #[test]
    fn test_identity_starts_at_one() {
        let repo = InMemoryNoteRepository::new();
        assert_eq!(repo.next_identity().unwrap().value(), 1);
        assert_eq!(repo.next_identity().unwrap().value(), 2);
    }

    #[test]
    fn test_save_and_find() {
        let repo = InMemoryNoteRepository::new();
        let id = repo.next_identity().unwrap();
        let note = Note::new(id, "Title", "Body", FixedClock::default().now()).unwrap();

        repo.save(note.clone()).unwrap();

        assert_eq!(repo.find_by_id(id).unwrap(), Some(note));
        assert_eq!(repo.find_by_id(NoteId::new(42).unwrap()).unwrap(), None);
        assert_eq!(repo.find_all().unwrap().len(), 1);
    }

    #[test]
    fn test_concurrent_identities_are_unique() {
        let repo = Arc::new(InMemoryNoteRepository::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let repo = Arc::clone(&repo);
                std::thread::spawn(move || {
                    (0..100)
                        .map(|_| repo.next_identity().unwrap().value())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort_unstable();

        assert_eq!(ids, (1..=1600).collect::<Vec<u64>>());
    }

    #[test]
    fn test_exhausted_identity() {
        let repo = InMemoryNoteRepository {
            notes: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(i64::MAX as u64),
        };
        assert_eq!(repo.next_identity(), Err(RepositoryError::IdentityExhausted));
    }
}
