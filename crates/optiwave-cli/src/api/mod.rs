//! HTTP API access for the OptiWave CLI

pub mod client;
pub mod endpoints;

pub use client::ApiClient;
