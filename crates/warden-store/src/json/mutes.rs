//! JSON file implementation of MuteStore

use std::path::Path;

use async_trait::async_trait;
use tracing::instrument;

use warden_core::{MuteRecord, MuteStore, Snowflake, StoreResult};

use crate::document::JsonDocument;

/// `muted_members.json` - member id to MuteRecord
pub struct JsonMuteStore {
    doc: JsonDocument<MuteRecord>,
}

impl JsonMuteStore {
    /// Open `muted_members.json` under the data directory
    pub async fn open(data_dir: &Path) -> StoreResult<Self> {
        Ok(Self {
            doc: JsonDocument::open(data_dir.join("muted_members.json")).await?,
        })
    }
}

#[async_trait]
impl MuteStore for JsonMuteStore {
    #[instrument(skip(self))]
    async fn get(&self, member: Snowflake) -> StoreResult<Option<MuteRecord>> {
        Ok(self.doc.read(|m| m.get(&member.to_string()).cloned()).await)
    }

    #[instrument(skip(self, record))]
    async fn put(&self, member: Snowflake, record: &MuteRecord) -> StoreResult<()> {
        let record = record.clone();
        self.doc
            .mutate(|m| {
                m.insert(member.to_string(), record);
            })
            .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, member: Snowflake) -> StoreResult<Option<MuteRecord>> {
        self.doc.mutate(|m| m.remove(&member.to_string())).await
    }

    #[instrument(skip(self))]
    async fn all(&self) -> StoreResult<Vec<(Snowflake, MuteRecord)>> {
        Ok(self
            .doc
            .read(|m| {
                m.iter()
                    .filter_map(|(k, v)| k.parse().ok().map(|id| (id, v.clone())))
                    .collect()
            })
            .await)
    }
}
