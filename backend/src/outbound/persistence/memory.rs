//! In-memory snapshot store.

use std::sync::{PoisonError, RwLock};

use crate::domain::{StoreBackend, StoreError, User};

/// [`StoreBackend`] over a locked vector.
///
/// Substitutes for the file-backed store wherever touching a real
/// filesystem is unwanted, which is every unit and handler test.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryStore {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoreBackend for InMemoryStore {
    fn load(&self) -> Result<Vec<User>, StoreError> {
        Ok(self
            .users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, users: &[User]) -> Result<(), StoreError> {
        *self.users.write().unwrap_or_else(PoisonError::into_inner) = users.to_vec();
        Ok(())
    }
}
