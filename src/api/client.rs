//! HTTP client for the prediction service
//!
//! One request per call, no retry and no timeout. Every way a call can go
//! wrong is reported through [`ApiError`]; callers decide how much of that
//! detail to keep.

use async_trait::async_trait;
use log::debug;
use reqwest::Url;

use crate::api::wire::{HealthResponse, PredictRequest};
use crate::domain::PredictionResult;

/// Errors produced while talking to the prediction service
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Service answered with HTTP status {status}")]
    Status { status: u16 },

    #[error("Malformed response payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Cannot derive service root from {url}")]
    InvalidUrl { url: String },
}

/// Something that can classify an article
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Sends one classification request and waits for its outcome
    async fn predict(&self, request: &PredictRequest) -> Result<PredictionResult, ApiError>;
}

/// [`PredictionService`] backed by a remote HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    client: reqwest::Client,
    predict_url: Url,
}

impl HttpPredictionClient {
    /// Creates a client posting to `predict_url`
    pub fn new(predict_url: Url) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("veritium/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, predict_url))
    }

    /// Creates a client around an already configured `reqwest::Client`
    pub fn with_client(client: reqwest::Client, predict_url: Url) -> Self {
        Self {
            client,
            predict_url,
        }
    }

    /// Address requests are posted to
    pub fn predict_url(&self) -> &Url {
        &self.predict_url
    }

    /// Root of the service, where the health message lives
    pub fn root_url(&self) -> Result<Url, ApiError> {
        self.predict_url.join("/").map_err(|_| ApiError::InvalidUrl {
            url: self.predict_url.to_string(),
        })
    }

    /// Asks the service root whether the API is up
    ///
    /// # Returns
    /// The message the service reports on `GET /`
    pub async fn health(&self) -> Result<String, ApiError> {
        let url = self.root_url()?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let health: HealthResponse = serde_json::from_slice(&bytes)?;
        Ok(health.message)
    }
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    async fn predict(&self, request: &PredictRequest) -> Result<PredictionResult, ApiError> {
        debug!(
            "POST {} (title: {} chars, text: {} chars)",
            self.predict_url,
            request.title.chars().count(),
            request.text.chars().count()
        );

        let response = self
            .client
            .post(self.predict_url.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        let result = serde_json::from_slice::<PredictionResult>(&bytes)?;
        debug!("Prediction received: {:?}", result);
        Ok(result)
    }
}
