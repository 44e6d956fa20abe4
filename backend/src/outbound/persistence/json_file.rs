//! File-backed snapshot store: one pretty-printed JSON array per collection.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::{StoreBackend, StoreError, User};

/// Whole-file JSON persistence at a fixed path.
///
/// A missing file reads as an empty collection so a fresh deployment
/// bootstraps without a seed step; an unreadable or unparseable file is a
/// load error. Saves serialize the full snapshot to a temporary file in
/// the target directory and rename it over the previous one, so a failed
/// write leaves the prior snapshot authoritative.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Persist the collection at the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn snapshot_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl StoreBackend for JsonFileStore {
    fn load(&self) -> Result<Vec<User>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::load(err)),
        };
        serde_json::from_str(&contents).map_err(StoreError::load)
    }

    fn save(&self, users: &[User]) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(users).map_err(StoreError::save)?;
        let mut tmp = NamedTempFile::new_in(self.snapshot_dir()).map_err(StoreError::save)?;
        tmp.write_all(body.as_bytes()).map_err(StoreError::save)?;
        tmp.persist(&self.path).map_err(StoreError::save)?;
        debug!(
            path = %self.path.display(),
            records = users.len(),
            "user snapshot written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use tempfile::tempdir;

    use super::*;
    use crate::domain::{NewUser, UserId, UserStore};

    fn sample(id: i64, email: &str) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(id),
            name: "Ann".into(),
            email: email.into(),
            age: 30,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("users.json"));
        assert_eq!(store.load().unwrap(), Vec::new());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("users.json"));
        let users = vec![sample(1, "ann@x.com"), sample(2, "bo@x.com")];
        store.save(&users).unwrap();
        assert_eq!(store.load().unwrap(), users);
    }

    #[test]
    fn snapshot_is_human_readable_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.json");
        let store = JsonFileStore::new(&path);
        store.save(&[sample(1, "ann@x.com")]).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains('\n'), "snapshot should be pretty-printed");
        assert!(raw.contains("\"createdAt\""));
    }

    #[test]
    fn corrupt_snapshot_is_a_load_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.json");
        fs::write(&path, "not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Load { .. })));
    }

    #[test]
    fn save_replaces_the_previous_snapshot_wholesale() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.json");
        let store = JsonFileStore::new(&path);
        store
            .save(&[sample(1, "ann@x.com"), sample(2, "bo@x.com")])
            .unwrap();
        store.save(&[sample(2, "bo@x.com")]).unwrap();
        let users = store.load().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, UserId::new(2));
    }

    #[test]
    fn store_over_corrupt_file_keeps_it_intact_on_failed_insert() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.json");
        fs::write(&path, "not json").unwrap();
        let store = UserStore::new(Arc::new(JsonFileStore::new(&path)));
        let result = store.insert(NewUser {
            name: "Ann".into(),
            email: "ann@x.com".into(),
            age: 30,
        });
        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
    }
}
