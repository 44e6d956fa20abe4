//! Persistence component owning the user collection.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::warn;

use crate::domain::ports::{StoreBackend, StoreError};
use crate::domain::user::{NewUser, User, UserId, UserPatch};

/// Whole-file user store: every operation is a load-mutate-save cycle.
///
/// Each operation loads the full collection from the backend, applies the
/// operation, and (for mutations) writes the full collection back. This is
/// the intended persistence strategy for a single-process, low-volume
/// store: no indexing, no partial writes.
///
/// Mutations hold an internal lock for the whole load-modify-save span so
/// concurrent in-process writers cannot interleave and produce duplicate
/// ids or lost updates. Reads take no lock. Cross-process writers remain
/// unsynchronized.
pub struct UserStore {
    backend: Arc<dyn StoreBackend>,
    write_lock: Mutex<()>,
}

impl UserStore {
    /// Build a store over the given snapshot backend.
    pub fn new(backend: Arc<dyn StoreBackend>) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    /// Every record as currently persisted, in insertion order.
    ///
    /// On load failure this returns an empty collection and logs a warning,
    /// so an empty result can mean "no users" or "unreadable store".
    pub fn list_all(&self) -> Vec<User> {
        match self.backend.load() {
            Ok(users) => users,
            Err(err) => {
                warn!(error = %err, "user snapshot unreadable, returning empty collection");
                Vec::new()
            }
        }
    }

    /// Linear scan for an exact id match.
    pub fn find_by_id(&self, id: UserId) -> Option<User> {
        self.list_all().into_iter().find(|user| user.id == id)
    }

    /// Linear scan with case-insensitive email comparison.
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.list_all()
            .into_iter()
            .find(|user| user.email_matches(email))
    }

    /// Append a new record with a freshly assigned id and timestamps.
    ///
    /// The next id is `1 + max(existing ids)`, or 1 when the collection is
    /// empty. A load or save failure surfaces as [`StoreError`] and leaves
    /// the prior persisted state unchanged.
    pub fn insert(&self, fields: NewUser) -> Result<User, StoreError> {
        let _guard = self.lock_mutations();
        let mut users = self.backend.load()?;
        let id = users
            .iter()
            .map(|user| user.id)
            .max()
            .map_or(UserId::new(1), UserId::next);
        let now = Utc::now();
        let user = User {
            id,
            name: fields.name,
            email: fields.email,
            age: fields.age,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        self.backend.save(&users)?;
        Ok(user)
    }

    /// Merge `fields` over the record with the given id.
    ///
    /// `id` and `created_at` keep their original values; `updated_at` is
    /// refreshed on every successful call, including one that supplies no
    /// fields. Returns `Ok(None)` without writing when no record matches.
    pub fn replace(&self, id: UserId, fields: UserPatch) -> Result<Option<User>, StoreError> {
        let _guard = self.lock_mutations();
        let mut users = self.backend.load()?;
        let Some(user) = users.iter_mut().find(|user| user.id == id) else {
            return Ok(None);
        };
        if let Some(name) = fields.name {
            user.name = name;
        }
        if let Some(email) = fields.email {
            user.email = email;
        }
        if let Some(age) = fields.age {
            user.age = age;
        }
        user.updated_at = Utc::now();
        let updated = user.clone();
        self.backend.save(&users)?;
        Ok(Some(updated))
    }

    /// Remove the record with the given id.
    ///
    /// Returns `Ok(false)` without writing when no record matches.
    pub fn remove(&self, id: UserId) -> Result<bool, StoreError> {
        let _guard = self.lock_mutations();
        let mut users = self.backend.load()?;
        let before = users.len();
        users.retain(|user| user.id != id);
        if users.len() == before {
            return Ok(false);
        }
        self.backend.save(&users)?;
        Ok(true)
    }

    fn lock_mutations(&self) -> MutexGuard<'_, ()> {
        // A poisoned lock only means another mutation panicked mid-cycle;
        // the snapshot itself is still consistent on disk.
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::ports::MockStoreBackend;
    use crate::outbound::persistence::InMemoryStore;

    fn store() -> UserStore {
        UserStore::new(Arc::new(InMemoryStore::new()))
    }

    fn fields(name: &str, email: &str, age: u8) -> NewUser {
        NewUser {
            name: name.into(),
            email: email.into(),
            age,
        }
    }

    #[test]
    fn ids_are_monotonic_and_never_reused() {
        let store = store();
        let ann = store.insert(fields("Ann", "ann@x.com", 30)).unwrap();
        let bo = store.insert(fields("Bo", "bo@x.com", 40)).unwrap();
        assert_eq!(ann.id, UserId::new(1));
        assert_eq!(bo.id, UserId::new(2));

        assert!(store.remove(UserId::new(1)).unwrap());
        let listed = store.list_all();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Bo");

        // max+1 over the current collection, not a persistent counter.
        let cy = store.insert(fields("Cy", "cy@x.com", 20)).unwrap();
        assert_eq!(cy.id, UserId::new(3));
    }

    #[test]
    fn removing_the_max_id_frees_it_for_reassignment() {
        let store = store();
        store.insert(fields("Ann", "ann@x.com", 30)).unwrap();
        let bo = store.insert(fields("Bo", "bo@x.com", 40)).unwrap();
        assert!(store.remove(bo.id).unwrap());
        let cy = store.insert(fields("Cy", "cy@x.com", 20)).unwrap();
        assert_eq!(cy.id, UserId::new(2));
    }

    #[test]
    fn insert_then_find_round_trips() {
        let store = store();
        let created = store.insert(fields("Ann", "ann@x.com", 30)).unwrap();
        assert_eq!(created.created_at, created.updated_at);
        let found = store.find_by_id(created.id).unwrap();
        assert_eq!(found, created);
    }

    #[test]
    fn find_by_email_ignores_case() {
        let store = store();
        store.insert(fields("Ann", "Ann@X.com", 30)).unwrap();
        assert!(store.find_by_email("ann@x.COM").is_some());
        assert!(store.find_by_email("bo@x.com").is_none());
    }

    #[test]
    fn replace_merges_fields_and_pins_id_and_created_at() {
        let store = store();
        let created = store.insert(fields("Ann", "ann@x.com", 30)).unwrap();
        std::thread::sleep(Duration::from_millis(2));
        let patch = UserPatch {
            name: Some("Anna".into()),
            email: None,
            age: Some(31),
        };
        let updated = store.replace(created.id, patch).unwrap().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.name, "Anna");
        assert_eq!(updated.email, "ann@x.com");
        assert_eq!(updated.age, 31);
        assert!(updated.updated_at > created.updated_at);
    }

    #[test]
    fn empty_replace_still_refreshes_updated_at() {
        let store = store();
        let created = store.insert(fields("Ann", "ann@x.com", 30)).unwrap();
        std::thread::sleep(Duration::from_millis(2));
        let updated = store
            .replace(created.id, UserPatch::default())
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.age, created.age);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[test]
    fn replace_of_unknown_id_is_a_no_op() {
        let store = store();
        store.insert(fields("Ann", "ann@x.com", 30)).unwrap();
        let result = store.replace(UserId::new(99), UserPatch::default()).unwrap();
        assert!(result.is_none());
        assert_eq!(store.list_all().len(), 1);
    }

    #[test]
    fn remove_of_unknown_id_never_writes() {
        let mut backend = MockStoreBackend::new();
        backend
            .expect_load()
            .returning(|| Ok(vec![]));
        // No save expectation: a write here would panic the mock.
        let store = UserStore::new(Arc::new(backend));
        assert!(!store.remove(UserId::new(1)).unwrap());
    }

    #[test]
    fn insert_surfaces_save_failures() {
        let mut backend = MockStoreBackend::new();
        backend.expect_load().returning(|| Ok(vec![]));
        backend
            .expect_save()
            .returning(|_| Err(StoreError::save("disk full")));
        let store = UserStore::new(Arc::new(backend));
        let err = store.insert(fields("Ann", "ann@x.com", 30)).unwrap_err();
        assert!(matches!(err, StoreError::Save { .. }));
    }

    #[test]
    fn mutations_surface_load_failures() {
        let mut backend = MockStoreBackend::new();
        backend
            .expect_load()
            .returning(|| Err(StoreError::load("permission denied")));
        let store = UserStore::new(Arc::new(backend));
        assert!(store.insert(fields("Ann", "ann@x.com", 30)).is_err());
        assert!(store.remove(UserId::new(1)).is_err());
        assert!(store.replace(UserId::new(1), UserPatch::default()).is_err());
    }

    #[test]
    fn reads_degrade_to_empty_on_load_failure() {
        let mut backend = MockStoreBackend::new();
        backend
            .expect_load()
            .returning(|| Err(StoreError::load("permission denied")));
        let store = UserStore::new(Arc::new(backend));
        assert!(store.list_all().is_empty());
        assert!(store.find_by_id(UserId::new(1)).is_none());
        assert!(store.find_by_email("ann@x.com").is_none());
    }
}
