//! Corpus CLI - Front-matter indexer and validator for Markdown content

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = corpus_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
