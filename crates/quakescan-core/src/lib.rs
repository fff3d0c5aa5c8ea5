//! Quakescan Core - Domain models, error taxonomy, and configuration
//!
//! This crate contains the event record model and shared infrastructure for
//! the quakescan proximity search engine.

pub mod config;
pub mod error;
pub mod models;

pub use error::{QuakescanError, Result};
pub use models::{EventHit, EventRecord};
