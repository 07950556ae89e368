//! Corpus CLI - Front-matter indexer and validator for Markdown content
//!
//! Corpus ingests a directory of Markdown posts with YAML front matter,
//! validates their metadata, builds a queryable in-memory index, and
//! reports duplicate slugs and duplicate (title, date) pairs.

pub mod cli;
pub mod corpus;
pub mod domain;

pub use corpus::{CorpusReport, ParseError, RejectReason, Rejection};
pub use domain::{Conflict, ConflictKind, CorpusIndex, PostRecord, Slug, ValidateError};
