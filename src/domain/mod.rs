//! Domain models for the corpus indexer
//!
//! Contains the core record, index, and conflict logic without any I/O
//! concerns.

mod conflict;
mod index;
mod record;
mod slug;

pub use conflict::{detect, Conflict, ConflictKind};
pub use index::CorpusIndex;
pub use record::{PostRecord, ValidateError};
pub use slug::{Slug, SlugError};
