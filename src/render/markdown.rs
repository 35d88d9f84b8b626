//! Markdown to HTML adapter.
//!
//! Parsing is done by `pulldown-cmark` with the GitHub extensions. On top of
//! the stock HTML output this module:
//!
//! - routes fenced code blocks with a language tag to the [`Highlighter`]
//! - rewrites emoji + label tokens such as `🔴 CRITICAL` into inline badges
//! - wraps tables in a scroll container
//!
//! Raw HTML in the source is rendered as text.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, TextMergeStream};

use crate::registry::Severity;
use crate::render::escape::push_escaped;
use crate::render::highlight::{Highlighter, plain_block};

const TABLE_OPEN: &str = "<div class=\"table-container\">\n";
const TABLE_CLOSE: &str = "</div>\n";

/// Token → badge severity. Earlier entries win when two match at one offset.
const BADGE_TOKENS: &[(&str, Severity)] = &[
    ("🔴 CRITICAL", Severity::Critical),
    ("🔴 Critical", Severity::Critical),
    ("🟠 HIGH", Severity::High),
    ("🟠 High", Severity::High),
    ("🟡 MEDIUM", Severity::Medium),
    ("🟡 Medium", Severity::Medium),
    ("🟡 Low", Severity::Medium),
    ("🟢 LOW", Severity::Low),
    ("🟢 Low", Severity::Low),
];

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Renders a markdown document to an HTML fragment.
#[must_use]
pub fn render_markdown(markdown: &str, highlighter: &Highlighter) -> String {
    let parser = TextMergeStream::new(Parser::new_ext(markdown, options()));

    let mut events: Vec<Event<'_>> = Vec::new();
    // (language, accumulated text) while inside a code block
    let mut code: Option<(Option<String>, String)> = None;
    // Text under an image becomes its alt attribute and must stay plain
    let mut image_depth = 0usize;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                code = Some((fence_language(&kind), String::new()));
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((lang, text)) = code.take() {
                    let html = match lang {
                        Some(lang) => highlighter.highlight(&text, &lang),
                        None => plain_block(&text, None),
                    };
                    events.push(Event::Html(html.into()));
                }
            }
            Event::Start(tag @ Tag::Image { .. }) => {
                image_depth += 1;
                events.push(Event::Start(tag));
            }
            Event::End(TagEnd::Image) => {
                image_depth = image_depth.saturating_sub(1);
                events.push(Event::End(TagEnd::Image));
            }
            Event::Text(text) => {
                if let Some((_, buf)) = code.as_mut() {
                    buf.push_str(&text);
                } else if image_depth > 0 {
                    events.push(Event::Text(text));
                } else if let Some(html) = substitute_badges(&text) {
                    events.push(Event::InlineHtml(html.into()));
                } else {
                    events.push(Event::Text(text));
                }
            }
            Event::Html(raw) | Event::InlineHtml(raw) => {
                events.push(Event::Text(raw));
            }
            Event::Start(Tag::Table(alignments)) => {
                events.push(Event::Html(CowStr::Borrowed(TABLE_OPEN)));
                events.push(Event::Start(Tag::Table(alignments)));
            }
            Event::End(TagEnd::Table) => {
                events.push(Event::End(TagEnd::Table));
                events.push(Event::Html(CowStr::Borrowed(TABLE_CLOSE)));
            }
            other => events.push(other),
        }
    }

    let mut out = String::with_capacity(markdown.len() + markdown.len() / 2);
    pulldown_cmark::html::push_html(&mut out, events.into_iter());
    out
}

/// Language tag of a fenced block: the first word of the info string.
fn fence_language(kind: &CodeBlockKind<'_>) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info
            .split_whitespace()
            .next()
            .map(|lang| lang.trim_matches(|c| c == '{' || c == '}'))
            .filter(|lang| !lang.is_empty())
            .map(str::to_string),
        CodeBlockKind::Indented => None,
    }
}

/// Inline badge markup for a severity.
#[must_use]
pub fn badge_html(severity: Severity) -> String {
    format!(
        "<span class=\"severity-indicator severity-{}\">{} {}</span>",
        severity.as_str(),
        severity.icon(),
        severity.label()
    )
}

/// Rewrites badge tokens in `text` to escaped HTML with inline badges.
///
/// Returns `None` when `text` contains no token. A token only matches when it
/// is not immediately followed by an alphanumeric character.
#[must_use]
pub fn substitute_badges(text: &str) -> Option<String> {
    let mut out: Option<String> = None;
    let mut rest = text;

    while let Some((offset, token, severity)) = next_token(rest) {
        let buf = out.get_or_insert_with(|| String::with_capacity(text.len() + 64));
        push_escaped(buf, &rest[..offset]);
        buf.push_str(&badge_html(severity));
        rest = &rest[offset + token.len()..];
    }

    out.map(|mut buf| {
        push_escaped(&mut buf, rest);
        buf
    })
}

fn next_token(text: &str) -> Option<(usize, &'static str, Severity)> {
    BADGE_TOKENS
        .iter()
        .filter_map(|&(token, severity)| {
            text.match_indices(token)
                .find(|(offset, _)| {
                    !text[offset + token.len()..]
                        .chars()
                        .next()
                        .is_some_and(char::is_alphanumeric)
                })
                .map(|(offset, _)| (offset, token, severity))
        })
        .min_by_key(|(offset, _, _)| *offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_THEME;
    use crate::registry::Registry;

    fn highlighter() -> Highlighter {
        Highlighter::new(DEFAULT_THEME).unwrap()
    }

    #[test]
    fn substitutes_token_and_keeps_surrounding_text() {
        let html = substitute_badges("Risk: 🔴 Critical <now>").unwrap();
        assert_eq!(
            html,
            "Risk: <span class=\"severity-indicator severity-critical\">🔴 CRITICAL</span> &lt;now&gt;"
        );
    }

    #[test]
    fn yellow_low_maps_to_medium() {
        let html = substitute_badges("🟡 Low").unwrap();
        assert!(html.contains("severity-medium"));
        assert!(html.contains("🟡 MEDIUM"));
    }

    #[test]
    fn multiple_tokens_in_order() {
        let html = substitute_badges("🟠 High then 🟢 LOW").unwrap();
        let high = html.find("severity-high").unwrap();
        let low = html.find("severity-low").unwrap();
        assert!(high < low);
        assert!(html.contains(" then "));
    }

    #[test]
    fn no_token_returns_none() {
        assert_eq!(substitute_badges("plain text"), None);
        assert_eq!(substitute_badges("🔴 only emoji"), None);
        assert_eq!(substitute_badges("🔴 CRITICALLY"), None);
    }

    #[test]
    fn fenced_code_is_highlighted() {
        let html = render_markdown("```rust\nlet x = 1;\n```\n", &highlighter());
        assert!(html.starts_with("<pre style="), "got: {html}");
        assert!(!html.contains("<code class=\"language-rust\">"));
    }

    #[test]
    fn untagged_code_block_is_plain() {
        let html = render_markdown("```\na < b\n```\n", &highlighter());
        assert_eq!(html, "<pre><code>a &lt; b\n</code></pre>\n");
    }

    #[test]
    fn badges_are_not_applied_inside_code() {
        let html = render_markdown("`🔴 CRITICAL`\n\n```\n🔴 CRITICAL\n```\n", &highlighter());
        assert!(!html.contains("severity-indicator"));
    }

    #[test]
    fn badges_in_paragraphs_and_tables() {
        let md = "**Severity:** 🔴 CRITICAL\n\n| Risk | Level |\n|---|---|\n| Loss | 🟠 High |\n";
        let html = render_markdown(md, &highlighter());
        assert!(html.contains("<span class=\"severity-indicator severity-critical\">🔴 CRITICAL</span>"));
        assert!(html.contains("<span class=\"severity-indicator severity-high\">🟠 HIGH</span>"));
        assert!(html.contains("<div class=\"table-container\">\n<table>"));
        assert!(html.contains("</table>\n</div>"));
    }

    #[test]
    fn image_alt_text_keeps_tokens_plain() {
        let html = render_markdown(
            "![🔴 CRITICAL crash](crash.png) 🔴 CRITICAL\n",
            &highlighter(),
        );
        assert!(html.contains("alt=\"🔴 CRITICAL crash\""), "got: {html}");
        assert!(!html.contains("alt=\"&lt;span"));
        assert_eq!(html.matches("severity-indicator").count(), 1);
    }

    #[test]
    fn raw_html_is_escaped() {
        let html = render_markdown("<script>alert(1)</script>\n", &highlighter());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn task_lists_render_checkboxes() {
        let html = render_markdown("- [ ] todo\n- [x] done\n", &highlighter());
        assert!(html.contains("type=\"checkbox\""));
    }

    #[test]
    fn builtin_documents_render() {
        let h = highlighter();
        for doc in Registry::builtin() {
            let html = render_markdown(&doc.content, &h);
            assert!(html.contains("<h1>"), "'{}' has no heading", doc.id);
            assert!(html.contains("severity-indicator"), "'{}' has no badge", doc.id);
        }
    }
}
