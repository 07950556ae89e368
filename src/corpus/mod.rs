//! # Corpus Layer
//!
//! Ingestion layer: everything between raw files on disk and the
//! validated domain records.
//!
//! ## Input Format
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Posts | Markdown + YAML front matter | `content/**/*.md` |
//! | Config | TOML | `corpus.toml` |
//!
//! ## Pipeline
//!
//! ```text
//! content/**/*.md
//!     │  discover (walkdir, sorted, hidden skipped)
//!     ▼
//! frontmatter::parse        — split `---` header from body
//!     ▼
//! PostRecord::validate      — typed field checks, slug derivation
//!     ▼
//! CorpusIndex::build        — deterministic chronological/tag/slug views
//!     ▼
//! domain::detect            — duplicate slug and (title, date) findings
//! ```
//!
//! Every per-file failure is accumulated as a [`Rejection`]; the pass
//! always completes and returns the full [`CorpusReport`].
//!
//! ## Key Types
//!
//! - [`Config`] - `corpus.toml` settings (content dir, extensions, policy)
//! - [`CorpusReport`] - index + rejections + conflicts for one run
//! - [`ParseError`] / [`RejectReason`] - why a file was turned away

mod config;
pub mod frontmatter;
mod scan;

pub use config::{Config, ConfigError, CONFIG_FILE};
pub use frontmatter::{ParseError, RawDocument};
pub use scan::{process_text, scan, CorpusReport, RejectReason, Rejection};
