//! JSON file implementation of MarriageStore

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::instrument;

use warden_core::{MarriageLink, MarriageStore, Snowflake, StoreResult};

use crate::document::JsonDocument;

/// `marriages.json` - member id to MarriageLink
///
/// The symmetric invariant lives here: both sides of a marriage are
/// written (and deleted) inside a single document mutation.
pub struct JsonMarriageStore {
    doc: JsonDocument<MarriageLink>,
}

impl JsonMarriageStore {
    /// Open `marriages.json` under the data directory
    pub async fn open(data_dir: &Path) -> StoreResult<Self> {
        Ok(Self {
            doc: JsonDocument::open(data_dir.join("marriages.json")).await?,
        })
    }
}

#[async_trait]
impl MarriageStore for JsonMarriageStore {
    #[instrument(skip(self))]
    async fn get(&self, member: Snowflake) -> StoreResult<Option<MarriageLink>> {
        Ok(self.doc.read(|m| m.get(&member.to_string()).copied()).await)
    }

    #[instrument(skip(self))]
    async fn link_pair(
        &self,
        a: Snowflake,
        b: Snowflake,
        married_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        self.doc
            .mutate(|m| {
                m.insert(a.to_string(), MarriageLink::new(b, married_at));
                m.insert(b.to_string(), MarriageLink::new(a, married_at));
            })
            .await
    }

    #[instrument(skip(self))]
    async fn unlink_pair(&self, a: Snowflake, b: Snowflake) -> StoreResult<()> {
        self.doc
            .mutate(|m| {
                m.remove(&a.to_string());
                m.remove(&b.to_string());
            })
            .await
    }
}
