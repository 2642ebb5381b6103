//! File-backed document store.
//!
//! The entire state lives in one JSON file. Every logical operation reads
//! the whole document and mutations write the whole document back. A single
//! `RwLock` guards the file: readers share it, and a read-modify-write holds
//! the write half from load through save so concurrent writers never see
//! each other's intermediate state.

mod chirps;
mod revokes;
mod users;

use crate::{credentials::PasswordHasher, errors::Error, models::Document};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};
use tracing::debug;

pub struct Db {
    path: PathBuf,
    lock: RwLock<()>,
    hasher: PasswordHasher,
}

impl Db {
    /// Open the document at `path`, seeding an empty one if the file does
    /// not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let db = Self {
            path: path.as_ref().to_path_buf(),
            lock: RwLock::new(()),
            hasher: PasswordHasher::default(),
        };
        if !db.path.exists() {
            db.write_unlocked(&Document::default())?;
            debug!(path = %db.path.display(), "seeded empty database");
        }
        Ok(db)
    }

    pub fn with_hasher(mut self, hasher: PasswordHasher) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// Snapshot of the whole document.
    pub fn load(&self) -> Result<Document, Error> {
        let _guard = self.lock.read().unwrap_or_else(PoisonError::into_inner);
        self.read_unlocked()
    }

    /// Overwrite the whole document.
    ///
    /// `load` followed by `save` is two separate critical sections; use
    /// [`Db::update`] when the write depends on what was read.
    pub fn save(&self, doc: &Document) -> Result<(), Error> {
        let _guard = self.lock.write().unwrap_or_else(PoisonError::into_inner);
        self.write_unlocked(doc)
    }

    /// Run `f` over a snapshot while holding the shared lock.
    pub fn read<T>(&self, f: impl FnOnce(&Document) -> Result<T, Error>) -> Result<T, Error> {
        let _guard = self.lock.read().unwrap_or_else(PoisonError::into_inner);
        let doc = self.read_unlocked()?;
        f(&doc)
    }

    /// Load, apply `f`, and save, all under the exclusive lock. Nothing is
    /// written if `f` fails.
    pub fn update<T>(
        &self,
        f: impl FnOnce(&mut Document) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let _guard = self.lock.write().unwrap_or_else(PoisonError::into_inner);
        let mut doc = self.read_unlocked()?;
        let out = f(&mut doc)?;
        self.write_unlocked(&doc)?;
        Ok(out)
    }

    fn read_unlocked(&self) -> Result<Document, Error> {
        let bytes = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    // Write to a sibling file and rename it into place so a crash mid-write
    // never leaves a truncated document behind.
    fn write_unlocked(&self, doc: &Document) -> Result<(), Error> {
        let bytes = serde_json::to_vec(doc)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        debug!(
            path = %self.path.display(),
            chirps = doc.chirps.len(),
            users = doc.users.len(),
            "saved database"
        );
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn test_db(dir: &tempfile::TempDir) -> Db {
    Db::open(dir.path().join("database.json"))
        .unwrap()
        .with_hasher(PasswordHasher::new(4))
}
