//! Veritium: news authenticity checker client
//!
//! Collects an article's title and text, asks a remote prediction service
//! whether it looks genuine, and shows the answer with its confidence.

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod input;
pub mod ui;
