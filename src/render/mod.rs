//! Rendering
//!
//! Markdown adapter, code highlighting and the HTML views built on them.

pub mod escape;
pub mod highlight;
pub mod markdown;
pub mod views;

pub use escape::escape_html;
pub use highlight::Highlighter;
pub use markdown::{render_markdown, substitute_badges};
pub use views::{PageContext, STYLESHEET, STYLESHEET_PATH, render_page};
