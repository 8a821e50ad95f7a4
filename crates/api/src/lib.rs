//! HTTP API for contact and collaboration form submissions.

pub mod app;
pub mod config;
