//! Application orchestration layer
//!
//! Owns the form state and coordinates edits, submissions and the
//! prediction service.

pub mod controller;
pub mod error;
pub mod state;

pub use controller::{FormController, SubmitOutcome};
pub use error::AppError;
pub use state::{FormState, RequestStatus, StateEvent, StateMachine};
