use std::path::PathBuf;

use reqwest::Url;
use thiserror::Error;

/// Environment variable holding the prediction endpoint
pub const ENV_API_URL: &str = "VERITIUM_API_URL";
/// Environment variable holding a TTF/OTF font path
pub const ENV_FONT: &str = "VERITIUM_FONT";
pub const ENV_CANVAS_WIDTH: &str = "VERITIUM_CANVAS_WIDTH";
pub const ENV_CANVAS_HEIGHT: &str = "VERITIUM_CANVAS_HEIGHT";
/// Environment variable holding the default PNG export path
pub const ENV_OUTPUT: &str = "VERITIUM_OUTPUT";

/// Runtime settings for the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Where prediction requests are posted
    pub api_url: Url,
    /// Font used to draw text on the rendered panel
    pub font_path: Option<PathBuf>,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Default destination of `:render`
    pub output_path: PathBuf,
}

impl Settings {
    pub const DEFAULT_API_URL: &'static str = "http://127.0.0.1:8000/predict";
    pub const DEFAULT_CANVAS_WIDTH: u32 = 1100;
    pub const DEFAULT_CANVAS_HEIGHT: u32 = 720;
    pub const MIN_CANVAS_WIDTH: u32 = 640;
    pub const MAX_CANVAS_WIDTH: u32 = 3840;
    pub const MIN_CANVAS_HEIGHT: u32 = 480;
    pub const MAX_CANVAS_HEIGHT: u32 = 2160;
    pub const DEFAULT_OUTPUT: &'static str = "veritium.png";

    /// Reads settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary key lookup
    ///
    /// Unset and empty values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_url = match get(ENV_API_URL) {
            Some(raw) => parse_api_url(raw.trim())?,
            None => parse_api_url(Self::DEFAULT_API_URL)?,
        };

        let canvas_width = match get(ENV_CANVAS_WIDTH) {
            Some(raw) => Self::sanitize_width(parse_dimension(ENV_CANVAS_WIDTH, &raw)?),
            None => Self::DEFAULT_CANVAS_WIDTH,
        };
        let canvas_height = match get(ENV_CANVAS_HEIGHT) {
            Some(raw) => Self::sanitize_height(parse_dimension(ENV_CANVAS_HEIGHT, &raw)?),
            None => Self::DEFAULT_CANVAS_HEIGHT,
        };

        Ok(Self {
            api_url,
            font_path: get(ENV_FONT).map(PathBuf::from),
            canvas_width,
            canvas_height,
            output_path: get(ENV_OUTPUT)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_OUTPUT)),
        })
    }

    pub fn sanitize_width(value: u32) -> u32 {
        value.clamp(Self::MIN_CANVAS_WIDTH, Self::MAX_CANVAS_WIDTH)
    }

    pub fn sanitize_height(value: u32) -> u32 {
        value.clamp(Self::MIN_CANVAS_HEIGHT, Self::MAX_CANVAS_HEIGHT)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid API URL '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },
    #[error("API URL must use http or https, got '{scheme}'")]
    UnsupportedScheme { scheme: String },
    #[error("{key} must be a positive integer, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        value: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}

fn parse_dimension(key: &'static str, raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| ConfigError::InvalidNumber {
            key,
            value: raw.to_string(),
        })
}
