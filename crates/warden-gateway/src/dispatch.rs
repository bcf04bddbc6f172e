//! Command dispatcher
//!
//! Routes inbound events to the service layer and renders replies. The
//! moderation command set is admin-gated; the relationship and stats
//! commands are public. Unknown commands and unrelated buttons are
//! ignored with a log line - but a recognized command never goes without
//! a reply.

use std::sync::Arc;

use tracing::{debug, info, warn};

use warden_core::{DomainError, EscalationAction, Snowflake};
use warden_service::{
    DivorceOutcome, ModerationService, RegistrationService, RelationshipService, ServiceContext,
    ServiceError, WarningService,
};

use crate::payloads::{CommandOptions, Event, MemberRef};
use crate::reply::{ButtonSpec, InteractionReply};

/// Commands only members with the admin role (or the platform
/// administrator flag) may invoke
const ADMIN_COMMANDS: &[&str] = &[
    "warn",
    "check_warn",
    "delete_warn",
    "clear_all_warn",
    "kick",
    "ban",
    "mute",
    "unmute",
];

const DEFAULT_REASON: &str = "No reason provided";

/// Command dispatcher
pub struct Dispatcher {
    ctx: Arc<ServiceContext>,
    admin_role_id: Snowflake,
    registration_channel: Option<Snowflake>,
}

impl Dispatcher {
    /// Create a new Dispatcher
    pub fn new(
        ctx: Arc<ServiceContext>,
        admin_role_id: Snowflake,
        registration_channel: Option<Snowflake>,
    ) -> Self {
        Self {
            ctx,
            admin_role_id,
            registration_channel,
        }
    }

    /// Handle one inbound event; None means the event was ignored
    pub async fn handle(&self, event: Event) -> Option<InteractionReply> {
        match event {
            Event::Command {
                name,
                guild_id,
                member,
                options,
            } => self.handle_command(&name, guild_id, &member, options).await,
            Event::Button {
                custom_id,
                guild_id: _,
                member,
            } => self.handle_button(&custom_id, &member).await,
            Event::Message {
                channel_id,
                message_id,
                member,
                content,
                ..
            } => {
                self.handle_message(channel_id, message_id, &member, &content)
                    .await
            }
        }
    }

    fn is_admin(&self, member: &MemberRef) -> bool {
        member.is_admin || member.role_ids.contains(&self.admin_role_id)
    }

    async fn handle_command(
        &self,
        name: &str,
        guild: Snowflake,
        member: &MemberRef,
        options: CommandOptions,
    ) -> Option<InteractionReply> {
        if ADMIN_COMMANDS.contains(&name) && !self.is_admin(member) {
            info!(command = name, member = %member.id, "Admin command refused");
            return Some(InteractionReply::ephemeral(
                ServiceError::PermissionDenied.user_message(),
            ));
        }

        let result = match name {
            "warn" => self.cmd_warn(guild, member, &options).await,
            "check_warn" => self.cmd_check_warn(&options).await,
            "delete_warn" => self.cmd_delete_warn(&options).await,
            "clear_all_warn" => self.cmd_clear_all_warn(&options).await,
            "kick" => self.cmd_kick(guild, member, &options).await,
            "ban" => self.cmd_ban(guild, member, &options).await,
            "mute" => self.cmd_mute(guild, member, &options).await,
            "unmute" => self.cmd_unmute(guild, member, &options).await,
            "propose" => self.cmd_propose(guild, member, &options).await,
            "marriage" => self.cmd_marriage(member, &options).await,
            "divorce" => self.cmd_divorce(guild, member).await,
            "registration_stats" => self.cmd_registration_stats().await,
            other => {
                debug!(command = other, "Unknown command ignored");
                return None;
            }
        };

        Some(result.unwrap_or_else(|e| {
            warn!(command = name, code = e.error_code(), error = %e, "Command rejected");
            InteractionReply::ephemeral(e.user_message())
        }))
    }

    async fn handle_button(
        &self,
        custom_id: &str,
        member: &MemberRef,
    ) -> Option<InteractionReply> {
        let relationships = RelationshipService::new(&self.ctx);

        let result = if let Some(id) = custom_id.strip_prefix("divorce_accept_") {
            relationships.accept_divorce(member.id, id).await.map(|r| {
                InteractionReply::public(format!(
                    "<@{}> and <@{}> are divorced. You are both single again.",
                    r.applicant, r.spouse
                ))
            })
        } else if let Some(id) = custom_id.strip_prefix("divorce_reject_") {
            relationships.reject_divorce(member.id, id).await.map(|r| {
                InteractionReply::public(format!(
                    "<@{}> declined the divorce. The marriage stands.",
                    r.spouse
                ))
            })
        } else if let Some(id) = custom_id.strip_prefix("accept_") {
            relationships.accept_proposal(member.id, id).await.map(|p| {
                InteractionReply::public(format!(
                    "<@{}> said yes! <@{}> and <@{}> are now married.",
                    p.target, p.proposer, p.target
                ))
            })
        } else if let Some(id) = custom_id.strip_prefix("reject_") {
            relationships.reject_proposal(member.id, id).await.map(|p| {
                InteractionReply::public(format!(
                    "<@{}> declined the proposal from <@{}>.",
                    p.target, p.proposer
                ))
            })
        } else {
            debug!(custom_id, "Unrelated button ignored");
            return None;
        };

        // A missing record here is the idempotent outcome of racing the
        // sweeper (or a double click); the member just sees it expired.
        Some(result.unwrap_or_else(|e| {
            info!(custom_id, code = e.error_code(), "Button rejected");
            InteractionReply::ephemeral(e.user_message())
        }))
    }

    async fn handle_message(
        &self,
        channel: Snowflake,
        message: Snowflake,
        member: &MemberRef,
        content: &str,
    ) -> Option<InteractionReply> {
        if self.registration_channel != Some(channel) {
            return None;
        }

        let registrations = RegistrationService::new(&self.ctx);
        match registrations.ingest(&member.display_name, content).await {
            Ok(entry) => Some(InteractionReply::public(format!(
                "Registration recorded for {} ({}, level {}).",
                entry.display_name, entry.profession, entry.level
            ))),
            Err(e) => {
                // Rejected submissions are removed from the channel; the
                // removal itself is best-effort.
                if let Err(del) = self.ctx.platform().delete_message(channel, message).await {
                    debug!(error = %del, "Could not remove rejected registration message");
                }
                Some(InteractionReply::ephemeral(e.user_message()))
            }
        }
    }

    // ========================================================================
    // Moderation commands
    // ========================================================================

    async fn cmd_warn(
        &self,
        guild: Snowflake,
        member: &MemberRef,
        options: &CommandOptions,
    ) -> Result<InteractionReply, ServiceError> {
        let target = require_user(options)?;
        let reason = options.reason.clone().ok_or(DomainError::EmptyReason)?;

        let issued = WarningService::new(&self.ctx)
            .add_warning(target, member.id, &reason, guild)
            .await?;

        let mut content = format!(
            "<@{target}> has been warned: {reason} (warning #{}, {} total).",
            issued.warning.id, issued.count
        );
        match issued.action {
            EscalationAction::None => {}
            EscalationAction::Mute => content.push_str(" Threshold reached: automatic mute."),
            EscalationAction::Kick => content.push_str(" Threshold reached: automatic kick."),
            EscalationAction::Ban => content.push_str(" Threshold reached: automatic ban."),
        }

        Ok(InteractionReply::public(content))
    }

    async fn cmd_check_warn(
        &self,
        options: &CommandOptions,
    ) -> Result<InteractionReply, ServiceError> {
        let target = require_user(options)?;
        let record = WarningService::new(&self.ctx).record(target).await?;

        if record.is_empty() {
            return Ok(InteractionReply::ephemeral(format!(
                "<@{target}> has no warnings."
            )));
        }

        let mut content = format!("<@{target}> has {} warning(s):", record.count);
        for w in record.recent(5) {
            content.push_str(&format!(
                "\n#{} - {} (by <@{}>, {})",
                w.id,
                w.reason,
                w.moderator_id,
                w.issued_at.format("%Y-%m-%d %H:%M UTC")
            ));
        }
        if record.count as usize > 5 {
            content.push_str(&format!(
                "\nShowing the 5 most recent of {} warnings.",
                record.count
            ));
        }

        Ok(InteractionReply::ephemeral(content))
    }

    async fn cmd_delete_warn(
        &self,
        options: &CommandOptions,
    ) -> Result<InteractionReply, ServiceError> {
        let target = require_user(options)?;
        let warn_id = options
            .warn_id
            .ok_or_else(|| ServiceError::internal("warn_id option missing"))?;

        let removed = WarningService::new(&self.ctx)
            .delete_warning(target, warn_id)
            .await?;

        Ok(InteractionReply::ephemeral(format!(
            "Deleted warning #{} of <@{target}> and notified them.",
            removed.id
        )))
    }

    async fn cmd_clear_all_warn(
        &self,
        options: &CommandOptions,
    ) -> Result<InteractionReply, ServiceError> {
        let target = require_user(options)?;
        let cleared = WarningService::new(&self.ctx).clear_all(target).await?;

        if cleared == 0 {
            Ok(InteractionReply::ephemeral(format!(
                "<@{target}> has no warnings to clear."
            )))
        } else {
            Ok(InteractionReply::ephemeral(format!(
                "Cleared all {cleared} warning(s) of <@{target}> and notified them."
            )))
        }
    }

    async fn cmd_kick(
        &self,
        guild: Snowflake,
        member: &MemberRef,
        options: &CommandOptions,
    ) -> Result<InteractionReply, ServiceError> {
        let target = require_user(options)?;
        let reason = options.reason.as_deref().unwrap_or(DEFAULT_REASON);

        ModerationService::new(&self.ctx)
            .kick(target, member.id, guild, reason)
            .await?;

        Ok(InteractionReply::public(format!(
            "<@{target}> was kicked: {reason}"
        )))
    }

    async fn cmd_ban(
        &self,
        guild: Snowflake,
        member: &MemberRef,
        options: &CommandOptions,
    ) -> Result<InteractionReply, ServiceError> {
        let target = require_user(options)?;
        let reason = options.reason.as_deref().unwrap_or(DEFAULT_REASON);

        ModerationService::new(&self.ctx)
            .ban(target, member.id, guild, reason)
            .await?;

        Ok(InteractionReply::public(format!(
            "<@{target}> was banned: {reason}"
        )))
    }

    async fn cmd_mute(
        &self,
        guild: Snowflake,
        member: &MemberRef,
        options: &CommandOptions,
    ) -> Result<InteractionReply, ServiceError> {
        let target = require_user(options)?;
        let duration = options
            .mute_duration
            .ok_or_else(|| ServiceError::internal("mute_duration option missing"))?;
        let reason = options.reason.as_deref().unwrap_or(DEFAULT_REASON);

        let record = ModerationService::new(&self.ctx)
            .mute(target, member.id, guild, duration, reason)
            .await?;

        Ok(InteractionReply::public(format!(
            "<@{target}> was muted for {duration} minute(s): {reason}. Unmutes at {}.",
            record.unmute_at.format("%Y-%m-%d %H:%M UTC")
        )))
    }

    async fn cmd_unmute(
        &self,
        guild: Snowflake,
        member: &MemberRef,
        options: &CommandOptions,
    ) -> Result<InteractionReply, ServiceError> {
        let target = require_user(options)?;

        ModerationService::new(&self.ctx)
            .unmute(target, member.id, guild)
            .await?;

        Ok(InteractionReply::public(format!(
            "The mute of <@{target}> was lifted."
        )))
    }

    // ========================================================================
    // Relationship commands
    // ========================================================================

    async fn cmd_propose(
        &self,
        guild: Snowflake,
        member: &MemberRef,
        options: &CommandOptions,
    ) -> Result<InteractionReply, ServiceError> {
        let target = require_user(options)?;

        let proposal = RelationshipService::new(&self.ctx)
            .propose(member.id, target, guild)
            .await?;
        let id = proposal.id();

        Ok(InteractionReply::public(format!(
            "<@{}> proposes to <@{target}>! Respond within 30 minutes.",
            member.id
        ))
        .with_buttons(vec![
            ButtonSpec {
                custom_id: format!("accept_{id}"),
                label: "Accept".to_string(),
            },
            ButtonSpec {
                custom_id: format!("reject_{id}"),
                label: "Decline".to_string(),
            },
        ]))
    }

    async fn cmd_marriage(
        &self,
        member: &MemberRef,
        options: &CommandOptions,
    ) -> Result<InteractionReply, ServiceError> {
        let subject = options.user.unwrap_or(member.id);
        let status = RelationshipService::new(&self.ctx)
            .marriage_status(subject)
            .await?;

        let content = match status {
            None if subject == member.id => {
                "You are single. Maybe try /propose?".to_string()
            }
            None => format!("<@{subject}> is single."),
            Some(link) => format!(
                "<@{subject}> is married to <@{}> since {} ({} days together).",
                link.spouse,
                link.married_at.format("%Y-%m-%d"),
                link.days_together(chrono::Utc::now())
            ),
        };

        Ok(InteractionReply::ephemeral(content))
    }

    async fn cmd_divorce(
        &self,
        guild: Snowflake,
        member: &MemberRef,
    ) -> Result<InteractionReply, ServiceError> {
        let outcome = RelationshipService::new(&self.ctx)
            .divorce(member.id, guild)
            .await?;

        Ok(match outcome {
            DivorceOutcome::Completed { ex_spouse } => InteractionReply::public(format!(
                "<@{}> and <@{ex_spouse}> are divorced. You are both single again.",
                member.id
            )),
            DivorceOutcome::Pending(request) => {
                let id = request.id();
                InteractionReply::public(format!(
                    "<@{}> filed for divorce. <@{}>, do you consent? Respond within 30 minutes.",
                    request.applicant, request.spouse
                ))
                .with_buttons(vec![
                    ButtonSpec {
                        custom_id: format!("divorce_accept_{id}"),
                        label: "Consent".to_string(),
                    },
                    ButtonSpec {
                        custom_id: format!("divorce_reject_{id}"),
                        label: "Decline".to_string(),
                    },
                ])
            }
        })
    }

    async fn cmd_registration_stats(&self) -> Result<InteractionReply, ServiceError> {
        if self.ctx.sheet().is_none() {
            return Ok(InteractionReply::ephemeral(
                "Registration is not enabled on this server.",
            ));
        }

        let count = RegistrationService::new(&self.ctx).stats().await?;
        Ok(InteractionReply::ephemeral(format!(
            "{count} registration(s) on file."
        )))
    }
}

fn require_user(options: &CommandOptions) -> Result<Snowflake, ServiceError> {
    options
        .user
        .ok_or_else(|| ServiceError::internal("user option missing"))
}
