//! Warning service
//!
//! The warning ledger: appends warnings, keeps the running count, and
//! triggers threshold escalation. Escalation and notification are side
//! effects of recording a warning, never preconditions - their failures
//! are logged and the warning stands.

use chrono::Utc;
use tracing::{error, info, instrument, warn};

use warden_core::{
    EscalationAction, MuteRecord, Snowflake, Warning, WarningRecord,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notify_member;

/// Outcome of recording a warning
#[derive(Debug, Clone)]
pub struct WarningIssued {
    pub warning: Warning,
    pub count: u32,
    pub action: EscalationAction,
}

/// Warning service
pub struct WarningService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> WarningService<'a> {
    /// Create a new WarningService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// A member's ledger; an empty one if they have no warnings yet.
    ///
    /// Creation is implicit and idempotent - the empty record is not
    /// persisted until the first warning lands.
    #[instrument(skip(self))]
    pub async fn record(&self, member: Snowflake) -> ServiceResult<WarningRecord> {
        Ok(self
            .ctx
            .warning_store()
            .get(member)
            .await?
            .unwrap_or_default())
    }

    /// Record a warning against a member and escalate if a threshold is hit
    #[instrument(skip(self, reason))]
    pub async fn add_warning(
        &self,
        member: Snowflake,
        moderator: Snowflake,
        reason: &str,
        guild: Snowflake,
    ) -> ServiceResult<WarningIssued> {
        if reason.trim().is_empty() {
            return Err(warden_core::DomainError::EmptyReason.into());
        }

        let mut record = self.record(member).await?;
        let warning = Warning::new(reason.trim().to_string(), moderator, Utc::now());
        record.push(warning.clone());
        self.ctx.warning_store().put(member, &record).await?;

        info!(
            member = %member,
            moderator = %moderator,
            count = record.count,
            "Warning recorded"
        );

        let delivery = notify_member(
            self.ctx.platform(),
            member,
            &format!(
                "You received a warning: {reason}. You now have {} warning(s).",
                record.count
            ),
        )
        .await;
        if !delivery.is_delivered() {
            warn!(member = %member, "Warning DM not delivered");
        }

        let action = self.ctx.thresholds().action_for(record.count);
        self.escalate(member, moderator, guild, record.count, action)
            .await;

        Ok(WarningIssued {
            warning,
            count: record.count,
            action,
        })
    }

    /// Delete one warning by id, recomputing the count
    #[instrument(skip(self))]
    pub async fn delete_warning(
        &self,
        member: Snowflake,
        warning_id: i64,
    ) -> ServiceResult<Warning> {
        let mut record = self
            .ctx
            .warning_store()
            .get(member)
            .await?
            .ok_or(warden_core::DomainError::WarningNotFound(warning_id))?;

        let removed = record
            .remove(warning_id)
            .ok_or(warden_core::DomainError::WarningNotFound(warning_id))?;

        self.ctx.warning_store().put(member, &record).await?;

        info!(member = %member, warning_id, count = record.count, "Warning deleted");

        notify_member(
            self.ctx.platform(),
            member,
            &format!(
                "One of your warnings was revoked. You now have {} warning(s).",
                record.count
            ),
        )
        .await;

        Ok(removed)
    }

    /// Clear a member's entire ledger, returning how many warnings were
    /// removed; a member with no record yields 0 and no write.
    #[instrument(skip(self))]
    pub async fn clear_all(&self, member: Snowflake) -> ServiceResult<u32> {
        let Some(record) = self.ctx.warning_store().get(member).await? else {
            return Ok(0);
        };
        if record.is_empty() {
            return Ok(0);
        }

        self.ctx.warning_store().delete(member).await?;

        info!(member = %member, cleared = record.count, "All warnings cleared");

        notify_member(
            self.ctx.platform(),
            member,
            &format!("All {} of your warnings were cleared.", record.count),
        )
        .await;

        Ok(record.count)
    }

    /// Execute the escalation action; failures never unwind the warning
    async fn escalate(
        &self,
        member: Snowflake,
        moderator: Snowflake,
        guild: Snowflake,
        count: u32,
        action: EscalationAction,
    ) {
        let outcome = match action {
            EscalationAction::None => return,
            EscalationAction::Mute => self.auto_mute(member, moderator, guild, count).await,
            EscalationAction::Kick => {
                let reason = format!("Automatic kick - reached {count} warnings");
                self.ctx
                    .platform()
                    .kick_member(guild, member, &reason)
                    .await
                    .map_err(ServiceError::from_platform)
            }
            EscalationAction::Ban => {
                let reason = format!("Automatic ban - reached {count} warnings");
                self.ctx
                    .platform()
                    .ban_member(guild, member, &reason)
                    .await
                    .map_err(ServiceError::from_platform)
            }
        };

        match outcome {
            Ok(()) => info!(member = %member, count, ?action, "Escalation applied"),
            Err(e) => {
                error!(member = %member, count, ?action, error = %e, "Escalation failed");
            }
        }
    }

    async fn auto_mute(
        &self,
        member: Snowflake,
        moderator: Snowflake,
        guild: Snowflake,
        count: u32,
    ) -> Result<(), ServiceError> {
        let reason = format!("Automatic mute - reached {count} warnings");
        let record = MuteRecord::new(
            guild,
            reason.clone(),
            self.ctx.auto_mute_minutes(),
            moderator,
            Utc::now(),
        );

        self.ctx.mute_store().put(member, &record).await?;
        self.ctx
            .platform()
            .timeout_member(guild, member, record.unmute_at, &reason)
            .await
            .map_err(ServiceError::from_platform)
    }
}
