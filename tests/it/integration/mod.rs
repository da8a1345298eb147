//! Integration tests for answerviz.
//!
//! These tests run complete workflows: answer text to a renderable chart,
//! and answer text to a copied HTML table.

mod answer_copy_tests;
