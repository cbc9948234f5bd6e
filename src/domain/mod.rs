//! Domain data for the article checker
//!
//! Plain data types with no knowledge of HTTP, rendering or the terminal.

pub mod form;
pub mod prediction;

pub use form::FormInput;
pub use prediction::{LabelTone, PredictionResult};
