//! In-memory implementations of the store traits
//!
//! Drop-in substitutes for the JSON stores in tests; same serialization
//! discipline (one async mutex per store), no disk.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use warden_core::{
    DivorceRequest, DivorceStore, MarriageLink, MarriageStore, MuteRecord, MuteStore, Proposal,
    ProposalStore, Snowflake, StoreResult, WarningRecord, WarningStore,
};

/// In-memory WarningStore
#[derive(Default)]
pub struct MemoryWarningStore {
    state: Mutex<HashMap<String, WarningRecord>>,
}

#[async_trait]
impl WarningStore for MemoryWarningStore {
    async fn get(&self, member: Snowflake) -> StoreResult<Option<WarningRecord>> {
        Ok(self.state.lock().await.get(&member.to_string()).cloned())
    }

    async fn put(&self, member: Snowflake, record: &WarningRecord) -> StoreResult<()> {
        self.state
            .lock()
            .await
            .insert(member.to_string(), record.clone());
        Ok(())
    }

    async fn delete(&self, member: Snowflake) -> StoreResult<Option<WarningRecord>> {
        Ok(self.state.lock().await.remove(&member.to_string()))
    }
}

/// In-memory MarriageStore
#[derive(Default)]
pub struct MemoryMarriageStore {
    state: Mutex<HashMap<String, MarriageLink>>,
}

#[async_trait]
impl MarriageStore for MemoryMarriageStore {
    async fn get(&self, member: Snowflake) -> StoreResult<Option<MarriageLink>> {
        Ok(self.state.lock().await.get(&member.to_string()).copied())
    }

    async fn link_pair(
        &self,
        a: Snowflake,
        b: Snowflake,
        married_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        state.insert(a.to_string(), MarriageLink::new(b, married_at));
        state.insert(b.to_string(), MarriageLink::new(a, married_at));
        Ok(())
    }

    async fn unlink_pair(&self, a: Snowflake, b: Snowflake) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        state.remove(&a.to_string());
        state.remove(&b.to_string());
        Ok(())
    }
}

/// In-memory ProposalStore
#[derive(Default)]
pub struct MemoryProposalStore {
    state: Mutex<HashMap<String, Proposal>>,
}

#[async_trait]
impl ProposalStore for MemoryProposalStore {
    async fn get(&self, id: &str) -> StoreResult<Option<Proposal>> {
        Ok(self.state.lock().await.get(id).cloned())
    }

    async fn put(&self, proposal: &Proposal) -> StoreResult<()> {
        self.state
            .lock()
            .await
            .insert(proposal.id(), proposal.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.state.lock().await.remove(id);
        Ok(())
    }

    async fn any_involving(&self, member: Snowflake) -> StoreResult<bool> {
        Ok(self
            .state
            .lock()
            .await
            .values()
            .any(|p| p.involves(member)))
    }

    async fn all(&self) -> StoreResult<Vec<(String, Proposal)>> {
        Ok(self
            .state
            .lock()
            .await
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

/// In-memory DivorceStore
#[derive(Default)]
pub struct MemoryDivorceStore {
    state: Mutex<HashMap<String, DivorceRequest>>,
}

#[async_trait]
impl DivorceStore for MemoryDivorceStore {
    async fn get(&self, id: &str) -> StoreResult<Option<DivorceRequest>> {
        Ok(self.state.lock().await.get(id).cloned())
    }

    async fn put(&self, request: &DivorceRequest) -> StoreResult<()> {
        self.state
            .lock()
            .await
            .insert(request.id(), request.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.state.lock().await.remove(id);
        Ok(())
    }

    async fn any_involving(&self, member: Snowflake) -> StoreResult<bool> {
        Ok(self
            .state
            .lock()
            .await
            .values()
            .any(|r| r.involves(member)))
    }

    async fn all(&self) -> StoreResult<Vec<(String, DivorceRequest)>> {
        Ok(self
            .state
            .lock()
            .await
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

/// In-memory MuteStore
#[derive(Default)]
pub struct MemoryMuteStore {
    state: Mutex<HashMap<String, MuteRecord>>,
}

#[async_trait]
impl MuteStore for MemoryMuteStore {
    async fn get(&self, member: Snowflake) -> StoreResult<Option<MuteRecord>> {
        Ok(self.state.lock().await.get(&member.to_string()).cloned())
    }

    async fn put(&self, member: Snowflake, record: &MuteRecord) -> StoreResult<()> {
        self.state
            .lock()
            .await
            .insert(member.to_string(), record.clone());
        Ok(())
    }

    async fn delete(&self, member: Snowflake) -> StoreResult<Option<MuteRecord>> {
        Ok(self.state.lock().await.remove(&member.to_string()))
    }

    async fn all(&self) -> StoreResult<Vec<(Snowflake, MuteRecord)>> {
        Ok(self
            .state
            .lock()
            .await
            .iter()
            .filter_map(|(k, v)| k.parse().ok().map(|id| (id, v.clone())))
            .collect())
    }
}
