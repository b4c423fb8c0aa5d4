use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use taskcast_core::api::{Destination, DiscordServiceConfig, MessageSink};

use crate::http::{ensure_success, parse_json_response, ServiceHttpError};

const SERVICE: &str = "discord";

#[derive(Debug, Serialize)]
struct CreateMessage<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateDm<'a> {
    recipient_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct DmChannel {
    id: String,
}

/// Posts messages through the Discord REST API with a bot token.
///
/// DM channel ids are remembered for the life of the client, so a digest split
/// into several chunks opens the DM channel once.
#[derive(Clone)]
pub struct DiscordClient {
    token: String,
    http: reqwest::Client,
    base_url: String,
    dm_channels: Arc<Mutex<HashMap<String, String>>>,
}

impl DiscordClient {
    pub fn new(cfg: &DiscordServiceConfig) -> anyhow::Result<Self> {
        if cfg.token.trim().is_empty() {
            anyhow::bail!("discord token is empty (set chat.provider.token or TASKCAST_DISCORD_TOKEN)");
        }
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(cfg.timeout_ms))
            .build()?;
        Ok(Self {
            token: cfg.token.trim().to_string(),
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            dm_channels: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header(reqwest::header::AUTHORIZATION, format!("Bot {}", self.token))
    }

    /// Open the DM channel with a user.
    pub async fn open_dm(&self, user_id: &str) -> anyhow::Result<String> {
        let url = format!("{}/users/@me/channels", self.base_url);
        tracing::debug!(
            target: "taskcast.discord",
            stage = "discord.http.open_dm.in",
            user_id = %user_id
        );
        let req = self.http.post(&url).json(&CreateDm { recipient_id: user_id });
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| ServiceHttpError::from_reqwest(SERVICE, err, url.clone()))?;
        let channel: DmChannel = parse_json_response(SERVICE, resp).await?;
        tracing::debug!(
            target: "taskcast.discord",
            stage = "discord.http.open_dm.out",
            channel_id = %channel.id
        );
        Ok(channel.id)
    }

    async fn dm_channel(&self, user_id: &str) -> anyhow::Result<String> {
        let cached = self
            .dm_channels
            .lock()
            .ok()
            .and_then(|m| m.get(user_id).cloned());
        if let Some(channel_id) = cached {
            return Ok(channel_id);
        }
        let channel_id = self.open_dm(user_id).await?;
        if let Ok(mut m) = self.dm_channels.lock() {
            m.insert(user_id.to_string(), channel_id.clone());
        }
        Ok(channel_id)
    }

    pub async fn post_message(&self, channel_id: &str, content: &str) -> anyhow::Result<()> {
        let url = format!("{}/channels/{}/messages", self.base_url, channel_id);
        tracing::debug!(
            target: "taskcast.discord",
            stage = "discord.http.message.in",
            channel_id = %channel_id,
            content_chars = content.chars().count()
        );
        let req = self.http.post(&url).json(&CreateMessage { content });
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| ServiceHttpError::from_reqwest(SERVICE, err, url.clone()))?;
        let status = resp.status();
        ensure_success(SERVICE, resp).await?;
        tracing::debug!(
            target: "taskcast.discord",
            stage = "discord.http.message.out",
            status = %status
        );
        Ok(())
    }
}

#[async_trait]
impl MessageSink for DiscordClient {
    fn name(&self) -> &str {
        "discord"
    }

    async fn send(&self, destination: &Destination, content: &str) -> anyhow::Result<()> {
        match destination {
            Destination::Channel(id) => self.post_message(id, content).await,
            Destination::DirectMessage(user_id) => {
                let channel_id = self.dm_channel(user_id).await?;
                self.post_message(&channel_id, content).await
            }
        }
    }
}
