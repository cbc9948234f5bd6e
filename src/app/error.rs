use crate::api::ApiError;
use crate::config::ConfigError;
use crate::ui::RendererError;

/// Errors that stop the application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Prediction client error: {0}")]
    Client(#[from] ApiError),

    #[error("Rendering error: {0}")]
    Renderer(#[from] RendererError),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}
