//! JSON file implementation of DivorceStore

use std::path::Path;

use async_trait::async_trait;
use tracing::instrument;

use warden_core::{DivorceRequest, DivorceStore, Snowflake, StoreResult};

use crate::document::JsonDocument;

/// `divorces.json` - composite id to DivorceRequest
pub struct JsonDivorceStore {
    doc: JsonDocument<DivorceRequest>,
}

impl JsonDivorceStore {
    /// Open `divorces.json` under the data directory
    pub async fn open(data_dir: &Path) -> StoreResult<Self> {
        Ok(Self {
            doc: JsonDocument::open(data_dir.join("divorces.json")).await?,
        })
    }
}

#[async_trait]
impl DivorceStore for JsonDivorceStore {
    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> StoreResult<Option<DivorceRequest>> {
        Ok(self.doc.read(|m| m.get(id).cloned()).await)
    }

    #[instrument(skip(self, request))]
    async fn put(&self, request: &DivorceRequest) -> StoreResult<()> {
        let (id, request) = (request.id(), request.clone());
        self.doc
            .mutate(|m| {
                m.insert(id, request);
            })
            .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.doc
            .mutate(|m| {
                m.remove(id);
            })
            .await
    }

    #[instrument(skip(self))]
    async fn any_involving(&self, member: Snowflake) -> StoreResult<bool> {
        Ok(self
            .doc
            .read(|m| m.values().any(|r| r.involves(member)))
            .await)
    }

    #[instrument(skip(self))]
    async fn all(&self) -> StoreResult<Vec<(String, DivorceRequest)>> {
        Ok(self
            .doc
            .read(|m| m.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .await)
    }
}
