//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `build` | Run the full pipeline, print index + diagnostics |
//! | `check` | Diagnostics only; `--strict` fails on any finding |
//! | `list`  | Chronological listing, `--tag` / `--featured` filters |
//! | `show`  | One post's metadata by slug |
//! | `tags`  | All tags with post counts |
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod query;
mod report;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
