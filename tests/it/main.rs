//! Single test binary entry point.
//!
//! Structure:
//! - unit: Single-component tests against the public API
//! - integration: End-to-end pipeline and answer workflows

mod helpers;
mod integration;
mod unit;
