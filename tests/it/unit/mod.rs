//! Unit tests for answerviz.

mod clipboard_tests;
mod expr_tests;
mod formatter_tests;
mod markdown_table_tests;
mod perf_tests;
mod sanitize_tests;
mod settings_tests;
mod snapshot_tests;
mod toolbar_tests;
mod types_tests;
