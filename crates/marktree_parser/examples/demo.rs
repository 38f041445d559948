//! Parses a small document, prints its JSON form, checks it against a
//! hand-built tree and shows the raw HTML failure.
//!
//! Run with `RUST_LOG=debug` to see the builder's log output.

use std::process::ExitCode;

use marktree_ast::children;
use marktree_ast::construct::{document, heading, paragraph, strong};
use marktree_parser::{Options, parse};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let options = Options::default();

    let doc = match parse("# Title\n\nThis is **bold** text.", &options) {
        Ok(doc) => doc,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(1);
        }
    };

    match serde_json::to_string_pretty(&doc) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!("Failed to serialize document: {}", e);
            return ExitCode::from(1);
        }
    }

    let manual = document([
        heading(1, "Title", ["Title"]),
        paragraph(children!["This is ", strong(["bold"]), " text."]),
    ]);
    info!("Parsed tree equals hand-built tree: {}", doc == manual);

    match parse("<span>Hello!</span>", &options) {
        Ok(_) => {
            error!("Raw HTML was accepted");
            ExitCode::from(1)
        }
        Err(e) => {
            println!("{e}");
            ExitCode::SUCCESS
        }
    }
}
