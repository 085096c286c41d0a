//! Core modules for the siteplot reporting pipeline.
//!
//! The pipeline is a straight line: ingest a CSV of per-site counts, derive
//! error metrics and the composite aggregate, compose a figure model from the
//! settings document, and render it.

pub mod color;
pub mod dataset;
pub mod error;
pub mod figure;
pub mod layout;
pub mod metrics;
pub mod render;
pub mod settings;
pub mod summary;
