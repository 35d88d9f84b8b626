//! HTTP server.
//!
//! Serves the dashboard with axum. Pages are rendered per request from
//! immutable shared state; no handler mutates anything.
//!
//! Routes:
//! - `GET /` landing view
//! - `GET /{id}` document viewer, landing view when the id is unknown
//! - `GET /assets/style.css` stylesheet
//! - `GET /api/documents`, `GET /api/documents/{id}`, `GET /api/summary`
//! - `GET /healthz`
//! - anything else: landing view

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use serde::Serialize;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::aggregate::Summary;
use crate::config::SiteConfig;
use crate::error::ServerError;
use crate::registry::{Document, Registry, Severity};
use crate::render::{Highlighter, PageContext, STYLESHEET, STYLESHEET_PATH, render_page};
use crate::selector::{self, Route, View};

/// Default bind address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Immutable state shared by all handlers.
#[derive(Debug)]
pub struct AppState {
    /// Documents served.
    pub registry: Arc<Registry>,
    /// Editorial content.
    pub site: Arc<SiteConfig>,
    /// Code block highlighter for the configured theme.
    pub highlighter: Highlighter,
}

impl AppState {
    /// Builds state, resolving the site's highlight theme.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`](crate::error::RenderError) if the theme is
    /// not bundled.
    pub fn new(
        registry: Arc<Registry>,
        site: Arc<SiteConfig>,
    ) -> Result<Self, crate::error::RenderError> {
        let highlighter = Highlighter::new(&site.theme)?;
        Ok(Self {
            registry,
            site,
            highlighter,
        })
    }

    fn page_context(&self) -> PageContext<'_> {
        PageContext {
            registry: &self.registry,
            site: &self.site,
            highlighter: &self.highlighter,
        }
    }

    /// Renders the page for a request path.
    #[must_use]
    pub fn render_path(&self, path: &str) -> String {
        let view = match selector::resolve(&self.registry, path) {
            Route::Dashboard => {
                if selector::path_id(path).is_some() {
                    debug!(path, "no document for path, showing dashboard");
                }
                View::Dashboard
            }
            Route::Document(document) => View::Document {
                document,
                body: selector::viewer_body(document),
            },
        };
        render_page(&self.page_context(), &view)
    }
}

/// A bound, not yet running HTTP server.
#[derive(Debug)]
pub struct HttpServer {
    listener: TcpListener,
    router: Router,
    bound_addr: SocketAddr,
}

impl HttpServer {
    /// Binds the listening socket.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] if the address cannot be bound.
    pub async fn bind(addr: &str, state: Arc<AppState>) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        let bound_addr = listener.local_addr()?;

        Ok(Self {
            listener,
            router: build_router(state),
            bound_addr,
        })
    }

    /// Actual bound address (useful when binding port 0).
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.bound_addr
    }

    /// Serves until `cancel` fires.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Serve`] if the accept loop fails.
    pub async fn run(self, cancel: CancellationToken) -> Result<(), ServerError> {
        let bound_addr = self.bound_addr;
        info!(%bound_addr, "HTTP server listening");

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
            })
            .await?;

        debug!("HTTP server shut down");
        Ok(())
    }
}

/// Builds the router over shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handle_dashboard))
        .route("/healthz", get(handle_health))
        .route(STYLESHEET_PATH, get(handle_stylesheet))
        .route("/api/documents", get(handle_list_documents))
        .route("/api/documents/{id}", get(handle_get_document))
        .route("/api/summary", get(handle_summary))
        .route("/{id}", get(handle_document))
        .fallback(handle_fallback)
        .with_state(state)
}

/// Normalizes a `--bind` value: `:8080` and `8080` bind all interfaces.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the result is not a socket address.
pub fn parse_bind_addr(input: &str) -> Result<String, ServerError> {
    let addr = if input.starts_with(':') {
        format!("0.0.0.0{input}")
    } else if input.parse::<u16>().is_ok() {
        format!("0.0.0.0:{input}")
    } else {
        input.to_string()
    };
    addr.parse::<SocketAddr>().map_err(|e| ServerError::Bind {
        addr: input.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e),
    })?;
    Ok(addr)
}

// ============================================================================
// Page Handlers
// ============================================================================

async fn handle_dashboard(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.render_path("/"))
}

async fn handle_document(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Html<String> {
    Html(state.render_path(&format!("/{id}")))
}

async fn handle_fallback(State(state): State<Arc<AppState>>, uri: Uri) -> Html<String> {
    Html(state.render_path(uri.path()))
}

async fn handle_stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

async fn handle_health() -> &'static str {
    "ok"
}

// ============================================================================
// JSON Handlers
// ============================================================================

/// Document metadata without the markdown body.
#[derive(Debug, Serialize)]
pub struct DocumentMeta<'a> {
    /// Document id.
    pub id: &'a str,
    /// Title.
    pub title: &'a str,
    /// Summary.
    pub description: &'a str,
    /// Severity.
    pub severity: Severity,
    /// Score.
    pub score: f64,
    /// Type label.
    #[serde(rename = "type")]
    pub kind: &'a str,
}

impl<'a> From<&'a Document> for DocumentMeta<'a> {
    fn from(doc: &'a Document) -> Self {
        Self {
            id: &doc.id,
            title: &doc.title,
            description: &doc.description,
            severity: doc.severity,
            score: doc.score,
            kind: &doc.kind,
        }
    }
}

async fn handle_list_documents(State(state): State<Arc<AppState>>) -> Response {
    let docs: Vec<DocumentMeta<'_>> = state.registry.iter().map(DocumentMeta::from).collect();
    Json(docs).into_response()
}

async fn handle_get_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.registry.find(&id) {
        Some(doc) => Json(doc).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "document not found", "id": id })),
        )
            .into_response(),
    }
}

async fn handle_summary(State(state): State<Arc<AppState>>) -> Json<Summary> {
    Json(Summary::from_documents(&*state.registry))
}

// ============================================================================
// Tests
// ============================================================================
