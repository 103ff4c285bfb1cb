//! Google Photos Client Abstractions
//!
//! クライアントの抽象化と実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use super::models::{BatchCreateRequest, BatchCreateResponse};
use crate::domain::repositories::upload_transport::TransportError;

/// Trait for the two Library API calls an upload needs
/// This enables mocking in tests while using the real client in production
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PhotosApi: Send + Sync {
    /// Upload raw bytes and return the upload token
    async fn upload_bytes(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        mime_type: &str,
        token: &str,
    ) -> Result<String, TransportError>;

    /// Turn an upload token into a media item in the user's library
    async fn create_media_item(
        &self,
        upload_token: &str,
        filename: &str,
        token: &str,
    ) -> Result<(), TransportError>;
}

/// reqwest based Library API client
pub struct HttpPhotosApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpPhotosApi {
    pub fn new(base_url: &str, request_timeout_secs: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn rejected(response: reqwest::Response) -> TransportError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        TransportError::Rejected { status, message }
    }
}

fn network_error(e: reqwest::Error) -> TransportError {
    TransportError::Network(e.to_string())
}

#[async_trait]
impl PhotosApi for HttpPhotosApi {
    async fn upload_bytes(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        mime_type: &str,
        token: &str,
    ) -> Result<String, TransportError> {
        let response = self
            .http
            .post(format!("{}/v1/uploads", self.base_url))
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .header("X-Goog-Upload-Content-Type", mime_type)
            .header("X-Goog-Upload-Protocol", "raw")
            .header("X-Goog-Upload-File-Name", filename)
            .body(bytes)
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(Self::rejected(response).await);
        }

        let upload_token = response.text().await.map_err(network_error)?;
        if upload_token.trim().is_empty() {
            return Err(TransportError::InvalidPayload(format!(
                "Empty upload token returned for {}",
                filename
            )));
        }
        debug!("Received upload token for {}", filename);

        Ok(upload_token.trim().to_string())
    }

    async fn create_media_item(
        &self,
        upload_token: &str,
        filename: &str,
        token: &str,
    ) -> Result<(), TransportError> {
        let request = BatchCreateRequest::single(upload_token, filename);
        let response = self
            .http
            .post(format!("{}/v1/mediaItems:batchCreate", self.base_url))
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(Self::rejected(response).await);
        }

        let body: BatchCreateResponse = response.json().await.map_err(|e| {
            TransportError::InvalidPayload(format!("Malformed batchCreate response: {}", e))
        })?;

        match body.new_media_item_results.first() {
            Some(result) if result.is_success() => Ok(()),
            Some(result) => Err(TransportError::MediaItemRejected {
                filename: filename.to_string(),
                message: result.status_message(),
            }),
            None => Err(TransportError::MediaItemRejected {
                filename: filename.to_string(),
                message: "No result returned".to_string(),
            }),
        }
    }
}
