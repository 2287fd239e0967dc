//! Prediction endpoint client
//!
//! Wire contract: `POST <endpoint>` with `Content-Type: application/json` and
//! body `{"sample": [n1..n7], "lang": "es"}`. The response body is returned as
//! untyped JSON; classification happens in `response`.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::sample::Sample;

/// Language tag the endpoint uses to translate crop names
pub const DEFAULT_LANG: &str = "es";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictRequest {
    pub sample: Sample,
    pub lang: String,
}

impl PredictRequest {
    pub fn new(sample: Sample, lang: impl Into<String>) -> Self {
        Self {
            sample,
            lang: lang.into(),
        }
    }
}

/// Transport or decoding failure; displays as the bare message
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    #[error("{0}")]
    Request(String),
    #[error("{0}")]
    Decode(String),
}

#[async_trait]
pub trait PredictClient: Send + Sync {
    /// One attempt, no retry
    async fn predict(&self, request: &PredictRequest) -> Result<Value, ClientError>;
}

#[async_trait]
impl<C: PredictClient + ?Sized> PredictClient for std::sync::Arc<C> {
    async fn predict(&self, request: &PredictRequest) -> Result<Value, ClientError> {
        (**self).predict(request).await
    }
}

// ============================================================================
// HTTP Client
// ============================================================================

#[cfg(feature = "web")]
pub use http_client::HttpPredictClient;

#[cfg(feature = "web")]
mod http_client {
    use super::*;

    #[derive(Debug, Clone)]
    pub struct HttpPredictClient {
        http: reqwest::Client,
        endpoint: String,
    }

    impl HttpPredictClient {
        pub fn new(endpoint: impl Into<String>) -> Self {
            Self::with_client(reqwest::Client::new(), endpoint)
        }

        pub fn with_client(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
            Self {
                http,
                endpoint: endpoint.into(),
            }
        }

        pub fn endpoint(&self) -> &str {
            &self.endpoint
        }
    }

    #[async_trait]
    impl PredictClient for HttpPredictClient {
        async fn predict(&self, request: &PredictRequest) -> Result<Value, ClientError> {
            tracing::debug!("POST {} sample={:?}", self.endpoint, request.sample.values());

            let response = self
                .http
                .post(&self.endpoint)
                .json(request)
                .send()
                .await
                .map_err(|e| ClientError::Request(e.to_string()))?;

            // Status is not interpreted: error bodies are classified like any other JSON
            let status = response.status();
            if !status.is_success() {
                tracing::warn!("Prediction endpoint returned {}", status);
            }

            response.json::<Value>().await.map_err(|e| {
                if e.is_decode() {
                    ClientError::Decode(e.to_string())
                } else {
                    ClientError::Request(e.to_string())
                }
            })
        }
    }
}
