//! Expiry sweepers
//!
//! Two independent periodic passes over the stores: one releases elapsed
//! mutes, one reaps stale proposals and divorce requests. Both expose
//! `sweep_once` with an explicit `now` so tests drive them without a
//! clock. Failures inside a sweep are logged and never stop the pass.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, instrument};

use crate::services::{notify_member, ServiceContext, ServiceResult};

/// Default mute sweep period
pub const MUTE_SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// Default pending-request sweep period
pub const REQUEST_SWEEP_PERIOD: Duration = Duration::from_secs(600);

/// Releases mutes whose timer has elapsed
pub struct MuteSweeper {
    ctx: Arc<ServiceContext>,
}

impl MuteSweeper {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Run forever on the given period
    pub async fn run(self, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            match self.sweep_once(Utc::now()).await {
                Ok(0) => {}
                Ok(released) => info!(released, "Mute sweep released members"),
                Err(e) => error!(error = %e, "Mute sweep failed"),
            }
        }
    }

    /// One pass; returns how many records were removed
    ///
    /// The record is deleted even when the member left or the lookup
    /// failed - an entry must never be retried forever.
    #[instrument(skip(self))]
    pub async fn sweep_once(&self, now: DateTime<Utc>) -> ServiceResult<u32> {
        let mut released = 0;

        for (member, record) in self.ctx.mute_store().all().await? {
            if !record.is_expired(now) {
                continue;
            }

            match self.ctx.platform().fetch_member(record.guild_id, member).await {
                Ok(Some(profile)) if profile.is_timed_out(now) => {
                    notify_member(
                        self.ctx.platform(),
                        member,
                        "Your mute has expired. Welcome back!",
                    )
                    .await;

                    if let Err(e) = self
                        .ctx
                        .platform()
                        .clear_timeout(record.guild_id, member)
                        .await
                    {
                        error!(member = %member, error = %e, "Failed to lift expired timeout");
                    }
                }
                Ok(_) => {
                    debug!(member = %member, "Expired mute, member absent or already free");
                }
                Err(e) => {
                    error!(member = %member, error = %e, "Member lookup failed during sweep");
                }
            }

            self.ctx.mute_store().delete(member).await?;
            released += 1;
        }

        Ok(released)
    }
}

/// Reaps pending proposals and divorce requests past their window
pub struct RequestSweeper {
    ctx: Arc<ServiceContext>,
}

impl RequestSweeper {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Run forever on the given period
    pub async fn run(self, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            match self.sweep_once(Utc::now()).await {
                Ok(0) => {}
                Ok(reaped) => info!(reaped, "Request sweep reaped stale entries"),
                Err(e) => error!(error = %e, "Request sweep failed"),
            }
        }
    }

    /// One pass; returns how many records were removed. No notification
    /// is owed on expiry.
    #[instrument(skip(self))]
    pub async fn sweep_once(&self, now: DateTime<Utc>) -> ServiceResult<u32> {
        let mut reaped = 0;

        for (id, proposal) in self.ctx.proposal_store().all().await? {
            if proposal.is_expired(now) {
                self.ctx.proposal_store().delete(&id).await?;
                debug!(id, "Expired proposal reaped");
                reaped += 1;
            }
        }

        for (id, request) in self.ctx.divorce_store().all().await? {
            if request.is_expired(now) {
                self.ctx.divorce_store().delete(&id).await?;
                debug!(id, "Expired divorce request reaped");
                reaped += 1;
            }
        }

        Ok(reaped)
    }
}
