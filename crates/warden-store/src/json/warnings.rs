//! JSON file implementation of WarningStore

use std::path::Path;

use async_trait::async_trait;
use tracing::instrument;

use warden_core::{Snowflake, StoreResult, WarningRecord, WarningStore};

use crate::document::JsonDocument;

/// `warnings.json` - member id to WarningRecord
pub struct JsonWarningStore {
    doc: JsonDocument<WarningRecord>,
}

impl JsonWarningStore {
    /// Open `warnings.json` under the data directory
    pub async fn open(data_dir: &Path) -> StoreResult<Self> {
        Ok(Self {
            doc: JsonDocument::open(data_dir.join("warnings.json")).await?,
        })
    }
}

#[async_trait]
impl WarningStore for JsonWarningStore {
    #[instrument(skip(self))]
    async fn get(&self, member: Snowflake) -> StoreResult<Option<WarningRecord>> {
        Ok(self.doc.read(|m| m.get(&member.to_string()).cloned()).await)
    }

    #[instrument(skip(self, record))]
    async fn put(&self, member: Snowflake, record: &WarningRecord) -> StoreResult<()> {
        let record = record.clone();
        self.doc
            .mutate(|m| {
                m.insert(member.to_string(), record);
            })
            .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, member: Snowflake) -> StoreResult<Option<WarningRecord>> {
        self.doc.mutate(|m| m.remove(&member.to_string())).await
    }
}
