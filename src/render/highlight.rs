//! Syntax highlighting for fenced code blocks.
//!
//! Syntax definitions and themes are the sets bundled with `syntect`,
//! loaded once per process.

use std::sync::LazyLock;

use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};

use crate::error::RenderError;
use crate::render::escape::push_escaped;

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Names of the bundled themes, sorted.
#[must_use]
pub fn theme_names() -> Vec<&'static str> {
    // ThemeSet keeps themes in a BTreeMap, so keys come out sorted.
    THEMES.themes.keys().map(String::as_str).collect()
}

/// Whether `name` is a bundled theme.
#[must_use]
pub fn has_theme(name: &str) -> bool {
    THEMES.themes.contains_key(name)
}

/// Highlights code blocks with one theme.
#[derive(Debug, Clone)]
pub struct Highlighter {
    theme: &'static Theme,
}

impl Highlighter {
    /// Creates a highlighter for a bundled theme.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownTheme`] if the theme is not bundled.
    pub fn new(theme: &str) -> Result<Self, RenderError> {
        THEMES
            .themes
            .get(theme)
            .map(|theme| Self { theme })
            .ok_or_else(|| RenderError::UnknownTheme {
                name: theme.to_string(),
                available: theme_names().join(", "),
            })
    }

    /// Renders `code` as a highlighted `<pre>` block.
    ///
    /// `lang` is matched against syntax names and file extensions; unknown
    /// languages are highlighted as plain text. Falls back to an escaped
    /// `<pre><code>` block if highlighting fails.
    #[must_use]
    pub fn highlight(&self, code: &str, lang: &str) -> String {
        let code = code.strip_suffix('\n').unwrap_or(code);
        let syntax = find_syntax(lang);

        match highlighted_html_for_string(code, &SYNTAXES, syntax, self.theme) {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(lang, error = %e, "highlighting failed, rendering plain block");
                plain_block(code, Some(lang))
            }
        }
    }
}

fn find_syntax(lang: &str) -> &'static SyntaxReference {
    SYNTAXES
        .find_syntax_by_token(lang)
        .unwrap_or_else(|| SYNTAXES.find_syntax_plain_text())
}

/// Unhighlighted code block.
#[must_use]
pub fn plain_block(code: &str, lang: Option<&str>) -> String {
    let mut out = String::with_capacity(code.len() + 32);
    match lang {
        Some(lang) if !lang.is_empty() => {
            out.push_str("<pre><code class=\"language-");
            push_escaped(&mut out, lang);
            out.push_str("\">");
        }
        _ => out.push_str("<pre><code>"),
    }
    push_escaped(&mut out, code);
    out.push_str("</code></pre>\n");
    out
}
