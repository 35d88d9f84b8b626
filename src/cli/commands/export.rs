//! `export` command handler.

use std::path::Path;

use crate::cli::args::ExportArgs;
use crate::config::load_or_default;
use crate::error::ReviewDeckError;
use crate::export::export_site;
use crate::registry::Registry;
use crate::render::{Highlighter, PageContext};

/// Writes the static site to `args.out` and prints where it went.
///
/// # Errors
///
/// Returns a configuration error for an invalid site file, or a render
/// error if a file cannot be written.
pub fn run(args: &ExportArgs, config: Option<&Path>) -> Result<(), ReviewDeckError> {
    let site = load_or_default(config)?;
    let highlighter = Highlighter::new(&site.theme)?;
    let ctx = PageContext {
        registry: Registry::builtin(),
        site: &site,
        highlighter: &highlighter,
    };

    let report = export_site(&ctx, &args.out)?;
    println!(
        "Exported {} files to {}",
        report.files.len(),
        args.out.display()
    );
    Ok(())
}
