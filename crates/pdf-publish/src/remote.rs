//! Client for the spreadsheet-backed ledger web app
//!
//! Reservations are `GET ?action=reserve&category=XX`. Uploads and lifecycle
//! actions are form-encoded `POST`s. Every response is a JSON object with a
//! `success` flag and either a payload (`number`, `fileUrl`) or `error`.

use crate::config::ServiceConfig;
use crate::ledger::{Ledger, Upload};
use crate::types::{LedgerError, LedgerResult, PublishError, Result};
use async_trait::async_trait;
use pdf_compose::Category;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct WebAppResponse {
    #[serde(default)]
    success: bool,
    number: Option<String>,
    #[serde(rename = "fileUrl")]
    file_url: Option<String>,
    error: Option<String>,
}

impl WebAppResponse {
    fn into_result(self) -> LedgerResult<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(LedgerError::Rejected(
                self.error.unwrap_or_else(|| "unknown".to_string()),
            ))
        }
    }
}

/// Ledger reached over HTTP
#[derive(Debug, Clone)]
pub struct WebAppLedger {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl WebAppLedger {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| PublishError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.url()?,
        })
    }

    pub fn url(&self) -> &reqwest::Url {
        &self.url
    }

    async fn read(response: reqwest::Response) -> LedgerResult<WebAppResponse> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LedgerError::Protocol(format!("HTTP {}: {}", status, body)));
        }

        let body = response.text().await?;
        let parsed: WebAppResponse = serde_json::from_str(&body)
            .map_err(|e| LedgerError::Protocol(format!("Failed to parse response: {}", e)))?;
        parsed.into_result()
    }

    async fn post_action(&self, action: &str, number: &str) -> LedgerResult<()> {
        let response = self
            .client
            .post(self.url.clone())
            .form(&[("action", action), ("publicationNo", number)])
            .send()
            .await?;
        Self::read(response).await?;
        Ok(())
    }
}

#[async_trait]
impl Ledger for WebAppLedger {
    async fn reserve(&self, category: Category) -> LedgerResult<String> {
        let response = self
            .client
            .get(self.url.clone())
            .query(&[("action", "reserve"), ("category", category.code())])
            .send()
            .await?;

        Self::read(response)
            .await?
            .number
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| LedgerError::Protocol("Reservation returned no number".to_string()))
    }

    async fn upload(&self, upload: &Upload) -> LedgerResult<String> {
        let m = &upload.metadata;
        let form = [
            ("publicationNo", upload.number.as_str()),
            ("category", m.category.code()),
            ("author", m.author.as_str()),
            ("email", m.email.as_str()),
            ("title", m.title.as_str()),
            ("abstract", m.abstract_text.as_str()),
            ("jelcode", m.jel_code.as_str()),
            ("keywords", m.keywords.as_str()),
            ("acknow", m.acknowledgement.as_str()),
            ("fileContent", upload.file_content.as_str()),
            ("fileType", upload.file_type.as_str()),
            ("fileName", upload.file_name.as_str()),
        ];

        let response = self
            .client
            .post(self.url.clone())
            .form(&form)
            .send()
            .await?;

        Self::read(response)
            .await?
            .file_url
            .ok_or_else(|| LedgerError::Protocol("Upload returned no fileUrl".to_string()))
    }

    async fn finalize(&self, number: &str) -> LedgerResult<()> {
        self.post_action("finalize", number).await
    }

    async fn delete(&self, number: &str) -> LedgerResult<()> {
        self.post_action("delete", number).await
    }
}
