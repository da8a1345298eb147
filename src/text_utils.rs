//! Small string helpers for answer text.

/// Content between the first `<tag>` and the next `</tag>`
pub fn extract_between_tags<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
    let start_tag = format!("<{}>", tag);
    let end_tag = format!("</{}>", tag);

    let start = text.find(&start_tag)? + start_tag.len();
    let end = text[start..].find(&end_tag)? + start;
    Some(&text[start..end])
}

/// Strip every leading and trailing occurrence of `ch`
pub fn remove_char_from_start_and_end(text: &str, ch: char) -> &str {
    text.trim_start_matches(ch).trim_end_matches(ch)
}
