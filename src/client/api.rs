/**
 * Document API Client
 *
 * HTTP client for the `/docs` endpoints. `DocumentApi` is the seam the
 * editor talks through; `DocClient` is the reqwest-backed implementation.
 */

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use thiserror::Error;

use crate::client::config::Config;
use crate::shared::{
    CreateDocumentRequest, Document, DocumentId, EditBodyRequest, EditDocumentRequest,
};

/// Client-side failures
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or decoding failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Request failed: {status} - {message}")]
    Status {
        status: u16,
        message: String,
    },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Operations the editor needs from the server
#[async_trait]
pub trait DocumentApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Document>, ClientError>;
    async fn create(&self, title: &str) -> Result<Document, ClientError>;
    async fn get(&self, id: DocumentId) -> Result<Document, ClientError>;
    /// Acknowledged edit; returns the stored document
    async fn edit(&self, id: DocumentId, body: &str) -> Result<Document, ClientError>;
}

/// reqwest-backed [`DocumentApi`]
#[derive(Debug, Clone)]
pub struct DocClient {
    config: Config,
    client: Client,
}

impl Default for DocClient {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl DocClient {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Edit through `PUT /docs` without waiting for the stored document
    ///
    /// Failures are logged and otherwise ignored.
    pub async fn edit_untracked(&self, id: DocumentId, body: &str) {
        let url = self.config.api_url("/docs");
        let result = self
            .client
            .put(&url)
            .json(&EditDocumentRequest::new(id, body))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("[Editor] Untracked edit of document {} accepted", id);
            }
            Ok(response) => {
                tracing::warn!("[Editor] Untracked edit of document {} failed: {}", id, response.status());
            }
            Err(e) => {
                tracing::warn!("[Editor] Untracked edit of document {} failed: {}", id, e);
            }
        }
    }
}

/// Turn a non-success response into `ClientError::Status`
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or_else(|_| if text.is_empty() { status.to_string() } else { text });

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl DocumentApi for DocClient {
    async fn list(&self) -> Result<Vec<Document>, ClientError> {
        let response = self.client.get(self.config.api_url("/docs")).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn create(&self, title: &str) -> Result<Document, ClientError> {
        let response = self
            .client
            .post(self.config.api_url("/docs"))
            .json(&CreateDocumentRequest::new(title))
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn get(&self, id: DocumentId) -> Result<Document, ClientError> {
        let response = self
            .client
            .get(self.config.api_url(&format!("/docs/{}", id)))
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn edit(&self, id: DocumentId, body: &str) -> Result<Document, ClientError> {
        let response = self
            .client
            .put(self.config.api_url(&format!("/docs/{}", id)))
            .json(&EditBodyRequest::new(body))
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }
}
