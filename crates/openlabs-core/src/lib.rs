//! Core library for the OpenLabs CLI.
//!
//! Owns everything below the command layer: the persisted configuration
//! store, the credential extractor that digs session tokens out of login
//! responses, the authenticated HTTP client, and the API payload models.
//! Command handlers live in the `openlabs-cli` binary crate.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;

pub use api::{ApiClient, Overrides};
pub use config::Config;
pub use error::Error;
