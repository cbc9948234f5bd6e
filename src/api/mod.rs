//! Outbound interface to the remote prediction service

pub mod client;
pub mod wire;

pub use client::{ApiError, HttpPredictionClient, PredictionService};
pub use wire::{HealthResponse, PredictRequest};
