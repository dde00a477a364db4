//! HTTP client for the OpenLabs API.
//!
//! One [`ApiClient`] is constructed per command invocation from the
//! persisted configuration plus any flag/environment overrides, and is
//! dropped when the command exits. Authentication rides on every request
//! as a set of cookies plus a bearer header.

pub mod client;

pub use client::{ApiClient, Overrides};
