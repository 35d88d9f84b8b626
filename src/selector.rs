//! Route selection
//!
//! Maps request paths to registry entries and holds the single
//! "currently selected document" value.

use std::borrow::Cow;

use crate::registry::{Document, Registry};

/// Body shown when a selected document has no content.
pub const CONTENT_NOT_FOUND: &str = "# Error\n\nContent not found for this document.";

/// What a path resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route<'a> {
    /// Landing view.
    Dashboard,
    /// Viewer for one document.
    Document(&'a Document),
}

/// Immutable snapshot handed to renderers.
#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    /// Landing view.
    Dashboard,
    /// Viewer for `document` showing `body`.
    Document {
        /// The selected record.
        document: &'a Document,
        /// Markdown to render.
        body: Cow<'a, str>,
    },
}

impl<'a> View<'a> {
    /// The selected document, if any.
    #[must_use]
    pub const fn document(&self) -> Option<&'a Document> {
        match self {
            Self::Dashboard => None,
            Self::Document { document, .. } => Some(document),
        }
    }
}

/// Extracts the single id segment from a path.
///
/// `/security` and `/security/` yield `security`; `/`, the empty path and
/// multi-segment paths yield `None`.
#[must_use]
pub fn path_id(path: &str) -> Option<&str> {
    let rest = path.strip_prefix('/').unwrap_or(path);
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    (!rest.is_empty() && !rest.contains('/')).then_some(rest)
}

/// Exact-match lookup of the document a path points at.
#[must_use]
pub fn select<'a>(registry: &'a Registry, path: &str) -> Option<&'a Document> {
    path_id(path).and_then(|id| registry.find(id))
}

/// Resolves a path to a route; anything unmatched falls back to the dashboard.
#[must_use]
pub fn resolve<'a>(registry: &'a Registry, path: &str) -> Route<'a> {
    select(registry, path).map_or(Route::Dashboard, Route::Document)
}

/// Markdown shown for a document, or the not-found placeholder.
#[must_use]
pub fn viewer_body(document: &Document) -> Cow<'_, str> {
    if document.content.trim().is_empty() {
        Cow::Borrowed(CONTENT_NOT_FOUND)
    } else {
        Cow::Borrowed(document.content.as_str())
    }
}

/// Holds the currently selected document.
///
/// [`Navigator::navigate`] is the only writer.
#[derive(Debug, Clone)]
pub struct Navigator<'a> {
    registry: &'a Registry,
    selected: Option<&'a Document>,
}

impl<'a> Navigator<'a> {
    /// Starts on the landing view.
    #[must_use]
    pub const fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            selected: None,
        }
    }

    /// Moves to `path`, updating the selection, and returns the new route.
    pub fn navigate(&mut self, path: &str) -> Route<'a> {
        let route = resolve(self.registry, path);
        self.selected = match route {
            Route::Dashboard => None,
            Route::Document(doc) => Some(doc),
        };
        tracing::debug!(
            path,
            selected = self.selected.map(|d| d.id.as_str()),
            "navigated"
        );
        route
    }

    /// Currently selected document.
    #[must_use]
    pub const fn selected(&self) -> Option<&'a Document> {
        self.selected
    }

    /// Snapshot of the current state for rendering.
    #[must_use]
    pub fn view(&self) -> View<'a> {
        self.selected.map_or(View::Dashboard, |document| View::Document {
            document,
            body: viewer_body(document),
        })
    }
}
