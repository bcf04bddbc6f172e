//! Moderation service
//!
//! Manual mute/unmute/kick/ban. Kick and ban send the courtesy DM before
//! acting - the member is unreachable afterwards.

use chrono::Utc;
use tracing::{info, instrument};

use warden_core::{DomainError, MuteRecord, Snowflake, MAX_MUTE_MINUTES};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notify_member;

/// Moderation service
pub struct ModerationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ModerationService<'a> {
    /// Create a new ModerationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Mute a member for a duration in minutes (1 to 28 days)
    #[instrument(skip(self, reason))]
    pub async fn mute(
        &self,
        target: Snowflake,
        moderator: Snowflake,
        guild: Snowflake,
        duration_minutes: u32,
        reason: &str,
    ) -> ServiceResult<MuteRecord> {
        if duration_minutes == 0 || duration_minutes > MAX_MUTE_MINUTES {
            return Err(DomainError::InvalidMuteDuration {
                max: MAX_MUTE_MINUTES,
            }
            .into());
        }

        let record = MuteRecord::new(
            guild,
            reason.to_string(),
            duration_minutes,
            moderator,
            Utc::now(),
        );

        // The record lands before the platform call; if the timeout is
        // refused the sweeper reaps the orphan at its expiry.
        self.ctx.mute_store().put(target, &record).await?;
        self.ctx
            .platform()
            .timeout_member(guild, target, record.unmute_at, reason)
            .await
            .map_err(ServiceError::from_platform)?;

        info!(target = %target, moderator = %moderator, duration_minutes, "Member muted");

        notify_member(
            self.ctx.platform(),
            target,
            &format!(
                "You were muted for {duration_minutes} minute(s): {reason}. \
                 The mute lifts automatically."
            ),
        )
        .await;

        Ok(record)
    }

    /// Lift a member's mute early
    #[instrument(skip(self))]
    pub async fn unmute(
        &self,
        target: Snowflake,
        moderator: Snowflake,
        guild: Snowflake,
    ) -> ServiceResult<()> {
        let stored = self.ctx.mute_store().get(target).await?;

        let profile = self
            .ctx
            .platform()
            .fetch_member(guild, target)
            .await
            .map_err(ServiceError::from_platform)?;

        let platform_muted = profile
            .as_ref()
            .is_some_and(|p| p.is_timed_out(Utc::now()));

        if stored.is_none() && !platform_muted {
            return Err(DomainError::NotMuted(target).into());
        }

        match self.ctx.platform().clear_timeout(guild, target).await {
            Ok(()) => {}
            // A stored record for a member who already left still has to go
            Err(warden_core::PlatformError::NotFound) => {
                tracing::debug!(target = %target, "Member gone, dropping stored mute");
            }
            Err(e) => return Err(ServiceError::from_platform(e)),
        }
        self.ctx.mute_store().delete(target).await?;

        info!(target = %target, moderator = %moderator, "Member unmuted");

        notify_member(
            self.ctx.platform(),
            target,
            "Your mute was lifted by a moderator.",
        )
        .await;

        Ok(())
    }

    /// Kick a member from the server
    #[instrument(skip(self, reason))]
    pub async fn kick(
        &self,
        target: Snowflake,
        moderator: Snowflake,
        guild: Snowflake,
        reason: &str,
    ) -> ServiceResult<()> {
        // DM first; the member cannot be reached once kicked
        notify_member(
            self.ctx.platform(),
            target,
            &format!("You were kicked from the server: {reason}"),
        )
        .await;

        self.ctx
            .platform()
            .kick_member(guild, target, reason)
            .await
            .map_err(ServiceError::from_platform)?;

        info!(target = %target, moderator = %moderator, "Member kicked");

        Ok(())
    }

    /// Ban a member from the server
    #[instrument(skip(self, reason))]
    pub async fn ban(
        &self,
        target: Snowflake,
        moderator: Snowflake,
        guild: Snowflake,
        reason: &str,
    ) -> ServiceResult<()> {
        // DM first; the member cannot be reached once banned
        notify_member(
            self.ctx.platform(),
            target,
            &format!("You were banned from the server: {reason}"),
        )
        .await;

        self.ctx
            .platform()
            .ban_member(guild, target, reason)
            .await
            .map_err(ServiceError::from_platform)?;

        info!(target = %target, moderator = %moderator, "Member banned");

        Ok(())
    }
}
