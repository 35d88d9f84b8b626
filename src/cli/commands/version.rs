//! Version information display
//!
//! Prints version and document-set metadata in human or JSON format.

use crate::cli::args::{OutputFormat, VersionArgs};
use crate::registry::Registry;

/// Print version information.
pub fn run(args: &VersionArgs) {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");
    let documents = Registry::builtin().len();

    match args.format {
        OutputFormat::Human => {
            println!("{name} {version} ({documents} built-in documents)");
        }
        OutputFormat::Json => {
            println!(r#"{{"name":"{name}","version":"{version}","documents":{documents}}}"#);
        }
    }
}
