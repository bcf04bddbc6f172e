//! JSON file implementation of ProposalStore

use std::path::Path;

use async_trait::async_trait;
use tracing::instrument;

use warden_core::{Proposal, ProposalStore, Snowflake, StoreResult};

use crate::document::JsonDocument;

/// `proposals.json` - composite id to Proposal
pub struct JsonProposalStore {
    doc: JsonDocument<Proposal>,
}

impl JsonProposalStore {
    /// Open `proposals.json` under the data directory
    pub async fn open(data_dir: &Path) -> StoreResult<Self> {
        Ok(Self {
            doc: JsonDocument::open(data_dir.join("proposals.json")).await?,
        })
    }
}

#[async_trait]
impl ProposalStore for JsonProposalStore {
    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> StoreResult<Option<Proposal>> {
        Ok(self.doc.read(|m| m.get(id).cloned()).await)
    }

    #[instrument(skip(self, proposal))]
    async fn put(&self, proposal: &Proposal) -> StoreResult<()> {
        let (id, proposal) = (proposal.id(), proposal.clone());
        self.doc
            .mutate(|m| {
                m.insert(id, proposal);
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
            .read(|m| m.values().any(|p| p.involves(member)))
            .await)
    }

    #[instrument(skip(self))]
    async fn all(&self) -> StoreResult<Vec<(String, Proposal)>> {
        Ok(self
            .doc
            .read(|m| m.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .await)
    }
}
