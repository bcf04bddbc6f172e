//! Whole-document JSON persistence
//!
//! Each domain owns one JSON file holding a map from id to record. Every
//! mutation is read-modify-write of the entire document under the
//! document's async mutex, write-back included, so two mutations to the
//! same document can never interleave. Mutations to different documents do
//! not contend.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{error, warn};

use warden_core::{DomainError, StoreResult};

/// One JSON document: an id-to-record map mirrored to disk
pub(crate) struct JsonDocument<V> {
    path: PathBuf,
    state: Mutex<HashMap<String, V>>,
}

impl<V> JsonDocument<V>
where
    V: Serialize + DeserializeOwned + Clone + Send,
{
    /// Open the document, loading existing content
    ///
    /// A missing or empty file starts the document empty. A corrupt file is
    /// logged and also starts empty rather than refusing to boot.
    pub async fn open(path: PathBuf) -> StoreResult<Self> {
        let state = match tokio::fs::read_to_string(&path).await {
            Ok(raw) if raw.trim().is_empty() => HashMap::new(),
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(e) => {
                    error!(path = %path.display(), error = %e, "Corrupt document, starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(DomainError::Storage(e.to_string())),
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    /// Read under the document lock
    pub async fn read<T>(&self, f: impl FnOnce(&HashMap<String, V>) -> T) -> T {
        let state = self.state.lock().await;
        f(&state)
    }

    /// Mutate under the document lock and persist the whole document
    ///
    /// The lock is held across the write-back; a second queued mutation
    /// starts only after this one has fully landed on disk.
    pub async fn mutate<T>(&self, f: impl FnOnce(&mut HashMap<String, V>) -> T) -> StoreResult<T> {
        let mut state = self.state.lock().await;
        let out = f(&mut state);
        self.persist(&state).await?;
        Ok(out)
    }

    async fn persist(&self, state: &HashMap<String, V>) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| DomainError::Storage(e.to_string()))?;
            }
        }

        // Write through a temp file so a crash mid-write cannot truncate
        // the live document.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            warn!(path = %self.path.display(), error = %e, "Document rename failed");
            return Err(DomainError::Storage(e.to_string()));
        }
        Ok(())
    }
}
