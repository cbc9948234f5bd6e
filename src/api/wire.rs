//! JSON bodies exchanged with the prediction service

use serde::{Deserialize, Serialize};

use crate::domain::FormInput;

/// Body of `POST /predict`
///
/// The service names the article body `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub title: String,
    pub text: String,
}

impl From<&FormInput> for PredictRequest {
    fn from(input: &FormInput) -> Self {
        Self {
            title: input.title.clone(),
            text: input.body.clone(),
        }
    }
}

/// Body of `GET /` on the service root
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}
