//! Webhook notification sink
//!
//! Posts a chat-style message with an embed summarising the error record. The
//! full detail is uploaded to the paste service first; if that fails the
//! message is still sent, without a link.

use super::paste::{PasteBody, PasteClient};
use crate::core::{ErrorRecord, ErrorSink, LogValue, LoggerConfig, LoggerError, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use std::time::Duration;

/// Embed accent color (blue)
pub const EMBED_COLOR: u32 = 0x3498DB;

/// Characters of trace kept in the embed description
pub const DESCRIPTION_LIMIT: usize = 4000;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookMessage {
    pub username: String,
    pub content: String,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub color: u32,
    pub author: EmbedAuthor,
    pub description: String,
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
}

impl WebhookMessage {
    pub fn build(record: &ErrorRecord, username: &str, paste_url: Option<&str>) -> Self {
        let author = match &record.cause {
            Some(LogValue::Error(err)) => err.kind().to_string(),
            _ => "Error".to_string(),
        };

        let trace = match (&record.cause, &record.content) {
            (Some(LogValue::Error(err)), _) | (_, LogValue::Error(err)) => err.stack(),
            (_, content) => content.to_string(),
        };
        let trace: String = trace.chars().take(DESCRIPTION_LIMIT).collect();

        let embed = Embed {
            color: EMBED_COLOR,
            author: EmbedAuthor { name: author },
            description: format!("```\n{}\n```", trace),
            fields: vec![EmbedField {
                name: "Description".to_string(),
                value: summary(record),
            }],
        };

        Self {
            username: username.to_string(),
            content: format!(
                "Error ID: {}\n{}",
                record.correlation_id,
                paste_url.unwrap_or_default()
            ),
            embeds: vec![embed],
        }
    }
}

/// Content message, else content text, else cause message, else "NA"
fn summary(record: &ErrorRecord) -> String {
    let from_content = match &record.content {
        LogValue::Error(err) => err.message().to_string(),
        other => other.to_string(),
    };
    if !from_content.is_empty() {
        return from_content;
    }
    match &record.cause {
        Some(LogValue::Error(err)) if !err.message().is_empty() => err.message().to_string(),
        _ => "NA".to_string(),
    }
}

pub struct WebhookSink {
    client: Client,
    target: Url,
    username: String,
    paste: Option<PasteClient>,
}

impl WebhookSink {
    /// # Errors
    ///
    /// Returns an invalid configuration error if `target` does not parse
    pub fn new(client: Client, target: &str, username: impl Into<String>) -> Result<Self> {
        let target = Url::parse(target)
            .map_err(|e| LoggerError::config("remote_notify_target", format!("'{}': {}", target, e)))?;

        Ok(Self {
            client,
            target,
            username: username.into(),
            paste: None,
        })
    }

    /// Sink configured from the logger settings, uploading detail to the paste service
    pub fn from_config(target: &str, config: &LoggerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LoggerError::config("remote_notify_target", e.to_string()))?;
        let paste = PasteClient::new(
            client.clone(),
            &config.paste_service_url,
            config.paste_language.clone(),
        )?;

        Ok(Self::new(client, target, config.webhook_username.clone())?.with_paste(paste))
    }

    #[must_use]
    pub fn with_paste(mut self, paste: PasteClient) -> Self {
        self.paste = Some(paste);
        self
    }

    pub fn target(&self) -> &Url {
        &self.target
    }

    async fn upload_detail(&self, record: &ErrorRecord) -> Option<String> {
        let paste = self.paste.as_ref()?;
        match paste.upload(PasteBody::from_value(record.detail())).await {
            Ok(url) => Some(url),
            Err(e) => {
                eprintln!(
                    "[LOGGER WARNING] Paste upload failed for error {}: {}",
                    record.correlation_id, e
                );
                None
            }
        }
    }
}

#[async_trait]
impl ErrorSink for WebhookSink {
    async fn deliver(&self, record: &ErrorRecord) -> Result<()> {
        let paste_url = self.upload_detail(record).await;
        let message = WebhookMessage::build(record, &self.username, paste_url.as_deref());

        let response = self
            .client
            .post(self.target.clone())
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoggerError::sink(
                self.name(),
                format!("webhook answered with status {}", status),
            ));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "webhook"
    }
}
