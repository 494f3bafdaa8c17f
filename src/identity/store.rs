//! Key/value session storage behind the identity memo.

use super::IdentityError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{debug, warn};

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, IdentityError>;
    async fn set(&self, key: &str, value: Value) -> Result<(), IdentityError>;
    async fn remove(&self, key: &str) -> Result<(), IdentityError>;
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, Value>>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, IdentityError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), IdentityError> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), IdentityError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

/// A JSON object on disk, one entry per key. Rewritten whole on every change.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Reads the entries. An unreadable JSON document counts as empty and is flagged
    /// so the next write replaces it.
    async fn load(&self) -> Result<(Map<String, Value>, bool), IdentityError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok((Map::new(), false)),
            Err(e) => return Err(e.into()),
        };
        if bytes.is_empty() {
            return Ok((Map::new(), false));
        }
        match serde_json::from_slice(&bytes) {
            Ok(entries) => Ok((entries, false)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding corrupt session file");
                Ok((Map::new(), true))
            }
        }
    }

    /// Writes to a sibling temp file, then renames it over the real one.
    async fn save(&self, entries: &Map<String, Value>) -> Result<(), IdentityError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(entries)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), entries = entries.len(), "Session saved");
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, IdentityError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.0.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), IdentityError> {
        let _guard = self.lock.lock().await;
        let (mut entries, _) = self.load().await?;
        entries.insert(key.to_string(), value);
        self.save(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), IdentityError> {
        let _guard = self.lock.lock().await;
        let (mut entries, corrupt) = self.load().await?;
        if entries.remove(key).is_some() || corrupt {
            self.save(&entries).await?;
        }
        Ok(())
    }
}
