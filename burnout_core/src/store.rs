//! Profile persistence with atomic file replacement.
//!
//! The profile lives under a single fixed key in a small key-value store.
//! The store is passed in explicitly so callers and tests choose the backend.

use crate::schema::{self, Decoded};
use crate::{Error, LegacyPolicy, Result, UserProfile};
use chrono::Utc;
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Key under which the profile is stored
pub const PROFILE_KEY: &str = "user_information";

/// Minimal key-value storage used by [`UserProfileStore`]
pub trait KeyValueStore {
    /// Read the value for `key`, or `None` if nothing is stored
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-backed store: one `<key>.json` file per key inside `dir`
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir` (created lazily on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            tracing::debug!("No value stored at {:?}", path);
            return Ok(None);
        }

        let bytes = std::fs::read(&path)?;
        let contents = String::from_utf8(bytes)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(Some(contents))
    }

    /// Atomically write by:
    /// 1. Writing to a temp file in the same directory
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    ///
    /// Readers see either the old file or the new one, never a partial write.
    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);

        let temp = NamedTempFile::new_in(&self.dir)?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            writer.write_all(value.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;

        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }
}

/// In-memory store
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Owner of the single persisted [`UserProfile`]
#[derive(Debug)]
pub struct UserProfileStore<S: KeyValueStore> {
    backend: S,
    legacy_policy: LegacyPolicy,
}

impl<S: KeyValueStore> UserProfileStore<S> {
    pub fn new(backend: S, legacy_policy: LegacyPolicy) -> Self {
        Self {
            backend,
            legacy_policy,
        }
    }

    /// Load the stored profile
    ///
    /// Returns `None` if nothing is stored. Unreadable, corrupted or
    /// unsupported records are logged and also yield `None`, which sends
    /// the user back through setup.
    pub fn load(&self) -> Option<UserProfile> {
        let contents = match self.backend.read(PROFILE_KEY) {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                tracing::info!("No stored profile found");
                return None;
            }
            Err(e) => {
                tracing::warn!("Unable to read stored profile: {}. Treating as absent.", e);
                return None;
            }
        };

        match schema::decode(&contents) {
            Ok(Decoded::Current(profile)) => {
                tracing::debug!("Loaded profile for {:?}", profile.name);
                Some(profile)
            }
            Ok(Decoded::Legacy { version, profile }) => match self.legacy_policy {
                LegacyPolicy::Upgrade => {
                    tracing::info!("Upgraded v{} profile to current schema", version);
                    Some(profile)
                }
                LegacyPolicy::Discard => {
                    tracing::info!("Discarding v{} profile", version);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Failed to parse stored profile: {}. Treating as absent.", e);
                None
            }
        }
    }

    /// Overwrite the stored profile
    ///
    /// Returns `false` if the profile could not be serialized or written.
    pub fn save(&mut self, profile: &UserProfile) -> bool {
        match self.try_save(profile) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to save profile: {}", e);
                false
            }
        }
    }

    /// Overwrite the stored profile, reporting the failure cause
    pub fn try_save(&mut self, profile: &UserProfile) -> Result<()> {
        let contents = schema::encode(profile, Utc::now())?;
        self.backend.write(PROFILE_KEY, &contents)?;
        tracing::debug!("Saved profile for {:?}", profile.name);
        Ok(())
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }
}

impl UserProfileStore<FileStore> {
    /// File-backed store inside `data_dir`
    pub fn open(data_dir: impl Into<PathBuf>, legacy_policy: LegacyPolicy) -> Self {
        Self::new(FileStore::new(data_dir), legacy_policy)
    }
}
