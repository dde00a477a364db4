//! Command handlers, one module per resource.
//!
//! Every handler follows the same shape: build a client from the stored
//! configuration and the invocation's overrides, perform one or two
//! sequential requests, render the result as a table or pretty JSON.

use anyhow::Result;

use openlabs_core::{ApiClient, Config, Overrides};

pub mod auth;
pub mod blueprint;
pub mod config;
pub mod range;
pub mod secrets;
pub mod workspace;

pub(crate) fn client(overrides: &Overrides) -> Result<ApiClient> {
    let config = Config::load()?;
    Ok(ApiClient::new(&config, overrides)?)
}
