//! Document command handlers
//!
//! Implements `list` and `show`.

use std::fmt::Write as _;
use std::path::Path;

use crate::aggregate::{Summary, format_document_score};
use crate::cli::args::{ListArgs, OutputFormat, ShowArgs};
use crate::config::load_or_default;
use crate::error::ReviewDeckError;
use crate::registry::{Document, Registry, Severity};
use crate::render::{Highlighter, render_markdown};
use crate::selector::viewer_body;

/// List review documents.
///
/// Displays documents grouped by severity (human) or as a JSON array.
///
/// # Errors
///
/// Returns a JSON error if output serialization fails.
pub fn list(args: &ListArgs) -> Result<(), ReviewDeckError> {
    let registry = Registry::builtin();
    let results: Vec<&Document> = match args.severity {
        Some(severity) => registry.filter_by_severity(severity),
        None => registry.iter().collect(),
    };

    match args.format {
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = results
                .iter()
                .map(|d| {
                    serde_json::json!({
                        "id": d.id,
                        "title": d.title,
                        "description": d.description,
                        "severity": d.severity,
                        "score": d.score,
                        "type": d.kind,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Human => {
            if results.is_empty() {
                println!("No documents match the given filters.");
                return Ok(());
            }

            let summary = Summary::from_documents(results.iter().copied());
            println!(
                "Review Documents ({} listed, mean score {}, {})\n",
                summary.total,
                summary.score_display(),
                summary.status.label()
            );

            for &severity in Severity::all() {
                let count = summary.counts.get(severity);
                if count == 0 {
                    continue;
                }

                println!("  {} {} ({count})", severity.icon(), severity.label());
                for d in results.iter().filter(|d| d.severity == severity) {
                    println!(
                        "    {:<20}{:<36}{}",
                        d.id,
                        d.title,
                        format_document_score(d.score)
                    );
                }
                println!();
            }

            println!("View a document: reviewdeck show <id>");
        }
    }

    Ok(())
}

/// Print one document's markdown, or its rendered HTML with `--html`.
///
/// # Errors
///
/// Returns a usage error if the id is not found, or a configuration error
/// if `--html` needs a site file that is invalid.
pub fn show(args: &ShowArgs, config: Option<&Path>) -> Result<(), ReviewDeckError> {
    let registry = Registry::builtin();
    let document = registry
        .find(&args.id)
        .ok_or_else(|| unknown_document(registry, &args.id))?;

    let body = viewer_body(document);
    if args.html {
        let site = load_or_default(config)?;
        let highlighter = Highlighter::new(&site.theme)?;
        print!("{}", render_markdown(&body, &highlighter));
    } else {
        print!("{body}");
    }
    Ok(())
}

fn unknown_document(registry: &Registry, id: &str) -> ReviewDeckError {
    let mut message = format!("Unknown document '{id}'");

    if let Some(suggestion) = registry.suggest(id) {
        let _ = write!(message, "\n\nDid you mean '{suggestion}'?");
    }

    message.push_str("\n\nAvailable documents:");
    for d in registry {
        let _ = write!(message, "\n  {:<20}{}", d.id, d.title);
    }

    message.push_str("\n\nUse 'reviewdeck list' for full details.");
    ReviewDeckError::Usage(message)
}
