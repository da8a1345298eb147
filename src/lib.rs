//! answerviz: turns loosely-typed chart configurations and answer text from an
//! assistant into safe, renderable artifacts.
//!
//! - [`pipeline`] normalizes chart configurations (formatter materialization,
//!   toolbar defaults, option adjustments, callback sanitizing)
//! - [`markdown`] extracts and converts pipe tables, renders captions
//! - [`clipboard`] copies HTML with a plain-text fallback
//! - [`expr`] is the closed formatter language behind materialized callables

pub mod answer;
pub mod clipboard;
pub mod constants;
pub mod expr;
pub mod formatters;
pub mod markdown;
pub mod perf;
pub mod pipeline;
pub mod settings;
pub mod text_utils;
pub mod types;

pub use answer::{parse_chart_payload, AnswerDocument, PayloadError};
pub use clipboard::{copy_html_to_clipboard, ClipboardSink, CopyOutcome, MemoryClipboard};
pub use formatters::{Formatter, NamedFormatter};
pub use markdown::{extract_first_markdown_table, markdown_table_to_html};
pub use pipeline::{normalize_chart_config, NormalizedChart, PipelineReport, RenderableChart};
pub use settings::Settings;
pub use types::{ConfigMap, ConfigValue};
