//! Paste service client
//!
//! Uploads full error detail to a hastebin-compatible service so the webhook
//! message can link to it instead of carrying the whole dump.

use crate::core::{LogValue, LoggerError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

/// Upload payload; the content type follows the shape
#[derive(Debug, Clone, PartialEq)]
pub enum PasteBody {
    Text(String),
    Json(serde_json::Value),
}

impl PasteBody {
    /// Structured values are uploaded as JSON, everything else as inspected text
    pub fn from_value(value: &LogValue) -> Self {
        match value {
            LogValue::Structured(json) => PasteBody::Json(json.clone()),
            other => PasteBody::Text(other.inspect()),
        }
    }

    fn content_type(&self) -> &'static str {
        match self {
            PasteBody::Text(_) => "text/plain; charset=utf-8",
            PasteBody::Json(_) => "application/json",
        }
    }

    fn into_string(self) -> Result<String> {
        match self {
            PasteBody::Text(text) => Ok(text),
            PasteBody::Json(json) => Ok(serde_json::to_string_pretty(&json)?),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PasteDocument {
    key: String,
}

#[derive(Clone)]
pub struct PasteClient {
    client: Client,
    base_url: Url,
    language: String,
}

impl PasteClient {
    /// # Errors
    ///
    /// Returns an invalid configuration error if `base_url` does not parse
    pub fn new(client: Client, base_url: &str, language: impl Into<String>) -> Result<Self> {
        // Trailing slash so `join` appends instead of replacing the last segment
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| LoggerError::config("paste_service_url", format!("'{}': {}", base_url, e)))?;

        Ok(Self {
            client,
            base_url,
            language: language.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// POST the body to `{base}/documents` and return the document URL
    ///
    /// Any status other than 200 is a failure.
    pub async fn upload(&self, body: PasteBody) -> Result<String> {
        let endpoint = self
            .base_url
            .join("documents")
            .map_err(|e| LoggerError::other(format!("invalid paste endpoint: {}", e)))?;

        let content_type = body.content_type();
        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, content_type)
            .body(body.into_string()?)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(LoggerError::paste_status(response.status().as_u16()));
        }

        let document: PasteDocument = response.json().await?;
        Ok(format!("{}{}.{}", self.base_url, document.key, self.language))
    }
}
