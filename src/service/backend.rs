//! Backend execution: send an `OutboundRequest` and hand back the raw status and body.

use crate::config::Settings;
use crate::error::{AppError, ConfigError};
use crate::query::OutboundRequest;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

/// Backend reply before normalization.
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait Backend: Send + Sync {
    async fn execute(&self, request: &OutboundRequest) -> Result<RawResponse, AppError>;
}

/// reqwest client preloaded with the PostgREST auth and representation headers.
#[derive(Clone)]
pub struct PostgrestClient {
    client: Client,
}

impl PostgrestClient {
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|_| ConfigError::Load("BACKEND_API_KEY is not a valid header value".into()))?;
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| ConfigError::Load("BACKEND_API_KEY is not a valid header value".into()))?;
        key.set_sensitive(true);
        bearer.set_sensitive(true);
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("prefer", HeaderValue::from_static("return=representation"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::Load(format!("http client: {}", e)))?;
        Ok(PostgrestClient { client })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        Self::new(&settings.api_key, settings.backend_timeout)
    }
}

#[async_trait]
impl Backend for PostgrestClient {
    async fn execute(&self, request: &OutboundRequest) -> Result<RawResponse, AppError> {
        tracing::debug!(method = %request.method, url = %request.url, has_body = request.body.is_some(), "backend request");
        let mut builder = self.client.request(request.method.clone(), &request.url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        tracing::debug!(status, bytes = body.len(), "backend response");
        Ok(RawResponse { status, body })
    }
}
