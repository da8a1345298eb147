use pulldown_cmark::{html, Options, Parser};

/// Render markdown to an HTML fragment with GFM tables and strikethrough
pub fn render_markdown_html(text: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(text, options);
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
