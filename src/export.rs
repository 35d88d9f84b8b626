//! Static site export.
//!
//! Writes the same pages the server renders into a directory tree:
//! `index.html`, `<id>/index.html` per document and the stylesheet. Links
//! stay root-relative, so the tree must be served from a site root.

use std::path::{Path, PathBuf};

use crate::error::RenderError;
use crate::registry::Registry;
use crate::render::{PageContext, STYLESHEET, STYLESHEET_PATH, render_page};
use crate::selector::Navigator;

/// Files written by an export.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Paths of written files, in write order.
    pub files: Vec<PathBuf>,
}

/// Exports every page of the site under `out_dir`.
///
/// # Errors
///
/// Returns [`RenderError::Write`] if a directory or file cannot be written.
pub fn export_site(ctx: &PageContext<'_>, out_dir: &Path) -> Result<ExportReport, RenderError> {
    let mut report = ExportReport {
        files: Vec::with_capacity(page_count(ctx.registry) + 1),
    };
    let mut navigator = Navigator::new(ctx.registry);

    navigator.navigate("/");
    write_file(
        &mut report,
        &out_dir.join("index.html"),
        &render_page(ctx, &navigator.view()),
    )?;

    for doc in ctx.registry {
        navigator.navigate(&format!("/{}", doc.id));
        let path = out_dir.join(&doc.id).join("index.html");
        write_file(&mut report, &path, &render_page(ctx, &navigator.view()))?;
    }

    let stylesheet = out_dir.join(STYLESHEET_PATH.trim_start_matches('/'));
    write_file(&mut report, &stylesheet, STYLESHEET)?;

    tracing::info!(
        out_dir = %out_dir.display(),
        pages = page_count(ctx.registry),
        files = report.files.len(),
        "static site exported"
    );
    Ok(report)
}

/// Number of pages an export of `registry` produces (excluding assets).
#[must_use]
pub fn page_count(registry: &Registry) -> usize {
    registry.len() + 1
}

fn write_file(report: &mut ExportReport, path: &Path, contents: &str) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| RenderError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, contents).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    report.files.push(path.to_path_buf());
    Ok(())
}
