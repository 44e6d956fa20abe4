//! Port abstraction for user snapshot persistence and its errors.

use thiserror::Error;

use crate::domain::user::User;

/// Persistence failures raised by snapshot backends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The snapshot could not be loaded from backing storage.
    #[error("failed to load user snapshot: {message}")]
    Load { message: String },
    /// The snapshot could not be written to backing storage.
    #[error("failed to save user snapshot: {message}")]
    Save { message: String },
}

impl StoreError {
    /// Wrap an underlying load failure.
    pub fn load(err: impl std::fmt::Display) -> Self {
        Self::Load {
            message: err.to_string(),
        }
    }

    /// Wrap an underlying save failure.
    pub fn save(err: impl std::fmt::Display) -> Self {
        Self::Save {
            message: err.to_string(),
        }
    }
}

/// Whole-collection snapshot storage.
///
/// Implementations own the persisted representation of the full user
/// collection; every operation in
/// [`UserStore`](crate::domain::store::UserStore) is a load-mutate-save
/// cycle over this port. Injecting the port lets tests substitute an
/// in-memory backing without touching a real filesystem.
#[cfg_attr(test, mockall::automock)]
pub trait StoreBackend: Send + Sync {
    /// Read the full ordered collection.
    fn load(&self) -> Result<Vec<User>, StoreError>;

    /// Replace the persisted collection wholesale.
    fn save(&self, users: &[User]) -> Result<(), StoreError>;
}
