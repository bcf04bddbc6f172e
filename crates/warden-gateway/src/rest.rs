//! Platform REST client
//!
//! The concrete `Platform` implementation: a thin reqwest client over the
//! platform's HTTP API. Only the handful of routes the bot needs are
//! covered - DM delivery, member lookup, timeout, kick, ban, and message
//! removal.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use warden_core::{MemberProfile, Platform, PlatformError, Snowflake};

/// REST implementation of the Platform trait
#[derive(Clone)]
pub struct RestPlatform {
    http: reqwest::Client,
    base: String,
    token: String,
}

impl RestPlatform {
    /// Create a new client against the given API base URL
    pub fn new(base: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into(),
            token: token.into(),
        }
    }

    fn auth(&self) -> String {
        format!("Bot {}", self.token)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base.trim_end_matches('/'))
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, PlatformError> {
        match response.status() {
            s if s.is_success() => Ok(response),
            StatusCode::FORBIDDEN => {
                let body = response.text().await.unwrap_or_default();
                Err(PlatformError::Denied(body))
            }
            StatusCode::NOT_FOUND => Err(PlatformError::NotFound),
            s => Err(PlatformError::Transport(format!("unexpected status {s}"))),
        }
    }
}

/// Wire shape of a member lookup response
#[derive(Debug, Deserialize)]
struct WireMember {
    user: WireUser,
    nick: Option<String>,
    #[serde(default)]
    roles: Vec<Snowflake>,
    communication_disabled_until: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    id: Snowflake,
    username: String,
}

/// Wire shape of a DM channel creation response
#[derive(Debug, Deserialize)]
struct WireChannel {
    id: Snowflake,
}

#[async_trait]
impl Platform for RestPlatform {
    #[instrument(skip(self, content))]
    async fn send_dm(&self, member: Snowflake, content: &str) -> Result<(), PlatformError> {
        // DMs are two calls: open (or reuse) the DM channel, then post.
        let response = self
            .http
            .post(self.url("/users/@me/channels"))
            .header("Authorization", self.auth())
            .json(&json!({ "recipient_id": member.to_string() }))
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;
        let channel: WireChannel = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        let response = self
            .http
            .post(self.url(&format!("/channels/{}/messages", channel.id)))
            .header("Authorization", self.auth())
            .json(&json!({ "content": content }))
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_member(
        &self,
        guild: Snowflake,
        member: Snowflake,
    ) -> Result<Option<MemberProfile>, PlatformError> {
        let response = self
            .http
            .get(self.url(&format!("/guilds/{guild}/members/{member}")))
            .header("Authorization", self.auth())
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        let wire: WireMember = match Self::check(response).await {
            Ok(r) => r
                .json()
                .await
                .map_err(|e| PlatformError::Transport(e.to_string()))?,
            Err(PlatformError::NotFound) => return Ok(None),
            Err(e) => return Err(e),
        };

        Ok(Some(MemberProfile {
            id: wire.user.id,
            display_name: wire.nick.unwrap_or(wire.user.username),
            role_ids: wire.roles,
            timed_out_until: wire.communication_disabled_until,
        }))
    }

    #[instrument(skip(self, reason))]
    async fn timeout_member(
        &self,
        guild: Snowflake,
        member: Snowflake,
        until: DateTime<Utc>,
        reason: &str,
    ) -> Result<(), PlatformError> {
        let response = self
            .http
            .patch(self.url(&format!("/guilds/{guild}/members/{member}")))
            .header("Authorization", self.auth())
            .header("X-Audit-Log-Reason", reason)
            .json(&json!({ "communication_disabled_until": until.to_rfc3339() }))
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear_timeout(
        &self,
        guild: Snowflake,
        member: Snowflake,
    ) -> Result<(), PlatformError> {
        let response = self
            .http
            .patch(self.url(&format!("/guilds/{guild}/members/{member}")))
            .header("Authorization", self.auth())
            .json(&json!({ "communication_disabled_until": null }))
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }

    #[instrument(skip(self, reason))]
    async fn kick_member(
        &self,
        guild: Snowflake,
        member: Snowflake,
        reason: &str,
    ) -> Result<(), PlatformError> {
        let response = self
            .http
            .delete(self.url(&format!("/guilds/{guild}/members/{member}")))
            .header("Authorization", self.auth())
            .header("X-Audit-Log-Reason", reason)
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }

    #[instrument(skip(self, reason))]
    async fn ban_member(
        &self,
        guild: Snowflake,
        member: Snowflake,
        reason: &str,
    ) -> Result<(), PlatformError> {
        let response = self
            .http
            .put(self.url(&format!("/guilds/{guild}/bans/{member}")))
            .header("Authorization", self.auth())
            .header("X-Audit-Log-Reason", reason)
            .json(&json!({}))
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_message(
        &self,
        channel: Snowflake,
        message: Snowflake,
    ) -> Result<(), PlatformError> {
        let response = self
            .http
            .delete(self.url(&format!("/channels/{channel}/messages/{message}")))
            .header("Authorization", self.auth())
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }
}
