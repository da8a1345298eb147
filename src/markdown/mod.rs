//! Markdown handling for answer text: pipe-table extraction and HTML rendering.

pub mod render;
pub mod table;

pub use render::render_markdown_html;
pub use table::{
    extract_first_markdown_table, extract_first_markdown_table_value, markdown_table_to_html,
    parse_markdown_table, HtmlTable,
};
