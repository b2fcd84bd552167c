//! Markdown rendering for assistant answers.

#[cfg(test)]
#[path = "markdown_test.rs"]
mod markdown_test;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

/// Schemes a rendered link or image may point at. Relative URLs are allowed.
const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Whether `url` is relative or uses one of [`SAFE_SCHEMES`].
///
/// Browsers ignore whitespace and control characters inside a scheme, so
/// those are stripped before the scheme is compared.
pub(crate) fn is_safe_url(url: &str) -> bool {
    let compact: String = url.chars().filter(|c| !c.is_ascii_whitespace() && !c.is_control()).collect();
    let scheme_end = compact.find([':', '/', '?', '#']);
    match scheme_end {
        Some(idx) if compact[idx..].starts_with(':') => {
            let scheme = compact[..idx].to_ascii_lowercase();
            SAFE_SCHEMES.contains(&scheme.as_str())
        }
        _ => true,
    }
}

fn neutralize(dest_url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&dest_url) { dest_url } else { CowStr::Borrowed("#") }
}

/// Render `markdown` to HTML for `inner_html`.
pub fn render_markdown_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    // Answers quote retrieved documents: no raw HTML, no script URLs.
    let parser = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(_) | Event::InlineHtml(_) => None,
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
            Some(Event::Start(Tag::Link { link_type, dest_url: neutralize(dest_url), title, id }))
        }
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => {
            Some(Event::Start(Tag::Image { link_type, dest_url: neutralize(dest_url), title, id }))
        }
        other => Some(other),
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
