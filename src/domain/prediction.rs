//! Prediction results returned by the classification service
//!
//! The service answers with a small JSON object. Known fields are typed,
//! anything else is preserved untouched so the payload can be shown as it
//! arrived. Fields the service leaves out stay `None`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Label the service uses for genuine articles
pub const GENUINE_LABEL: i64 = 1;

/// Label stored when a request could not be completed
pub const FAILURE_LABEL: i64 = -1;

/// Prediction text stored when a request could not be completed
pub const FAILURE_TEXT: &str = "Error";

/// Classification returned for one article
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Human readable class name ("True", "Fake", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<String>,

    /// Numeric class id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<i64>,

    /// Probability of the predicted class, 0.0..=1.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Fields the client does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PredictionResult {
    /// Creates a fully populated result
    pub fn new(prediction: impl Into<String>, label: i64, confidence: f64) -> Self {
        Self {
            prediction: Some(prediction.into()),
            label: Some(label),
            confidence: Some(confidence),
            extra: Map::new(),
        }
    }

    /// The placeholder stored whenever a prediction request fails
    pub fn failure() -> Self {
        Self::new(FAILURE_TEXT, FAILURE_LABEL, 0.0)
    }

    /// Tone used to colour the prediction text
    pub fn tone(&self) -> LabelTone {
        LabelTone::for_label(self.label)
    }

    /// Confidence formatted as a percentage with two decimals
    ///
    /// Ties round away from zero, so 0.12125 reads "12.13%". Returns an
    /// empty string when the service did not send a confidence.
    pub fn confidence_percent(&self) -> String {
        match self.confidence {
            Some(confidence) => {
                let percent = confidence * 100.0;
                format!("{:.2}%", (percent * 100.0).round() / 100.0)
            }
            None => String::new(),
        }
    }

    /// Names of the expected fields the payload did not carry
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.prediction.is_none() {
            missing.push("prediction");
        }
        if self.label.is_none() {
            missing.push("label");
        }
        if self.confidence.is_none() {
            missing.push("confidence");
        }
        missing
    }
}

/// Visual tone of a prediction label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelTone {
    /// Genuine article, shown in green
    Positive,
    /// Anything else, including failures, shown in red
    Negative,
}

impl LabelTone {
    pub fn for_label(label: Option<i64>) -> Self {
        if label == Some(GENUINE_LABEL) {
            LabelTone::Positive
        } else {
            LabelTone::Negative
        }
    }

    /// RGB components of the tone
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            LabelTone::Positive => (0x7e, 0xe3, 0xa6),
            LabelTone::Negative => (0xff, 0x7b, 0x7b),
        }
    }
}
