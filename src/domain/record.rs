//! Post record domain model and validation
//!
//! A [`PostRecord`] is the validated, immutable representation of one
//! content file's metadata. It is constructed exactly once per successful
//! parse-and-validate pass; a file that changes is re-read and re-validated
//! from scratch, never patched in place.
//!
//! Validation never trusts YAML's inferred types: every field goes through
//! an explicit tagged lookup so "missing" and "present but wrong type" are
//! distinct outcomes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeSet;
use thiserror::Error;

use super::slug::Slug;
use crate::corpus::frontmatter::yaml_type_name;

#[derive(Debug, Error, PartialEq)]
pub enum ValidateError {
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("Invalid date: expected YYYY-MM-DD, got {0}")]
    InvalidDateFormat(String),

    #[error("Title is empty or not a string")]
    EmptyTitle,

    #[error("Invalid tags: expected a list of strings, got {0}")]
    InvalidTagsType(String),

    #[error("Invalid featured flag: expected a boolean, got {0}")]
    InvalidFeaturedType(String),
}

impl ValidateError {
    /// Stable machine-readable name for reports
    pub fn kind(&self) -> &'static str {
        match self {
            ValidateError::MissingRequiredField(_) => "missing_required_field",
            ValidateError::InvalidDateFormat(_) => "invalid_date_format",
            ValidateError::EmptyTitle => "empty_title",
            ValidateError::InvalidTagsType(_) => "invalid_tags_type",
            ValidateError::InvalidFeaturedType(_) => "invalid_featured_type",
        }
    }
}

/// Outcome of looking up one front-matter field
enum Field<T> {
    /// Present with the expected type
    Ok(T),
    /// Present but with a different YAML type (the name of the actual type)
    WrongType(&'static str),
    /// Key not present at all
    Missing,
}

/// Validated metadata for one content file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Unique key within the corpus, derived from the file name
    pub slug: Slug,

    /// Post title, non-empty after trimming
    pub title: String,

    /// Publication date, the primary sort key
    pub date: NaiveDate,

    /// Short summary; empty string when the author omitted it
    #[serde(default)]
    pub excerpt: String,

    /// Tag set, deduplicated, insertion order irrelevant
    #[serde(default)]
    pub tags: BTreeSet<String>,

    /// Featured flag for front-page placement
    #[serde(default)]
    pub featured: bool,

    /// Byte offset where the Markdown body begins in the source file
    pub body_offset: usize,

    /// Originating file, used only for diagnostics
    pub source_path: String,
}

impl PostRecord {
    /// Validates a raw front-matter mapping into a `PostRecord`.
    ///
    /// `source_path` feeds slug derivation and diagnostics; `body_offset`
    /// is carried through from the parser. Every failure is returned as a
    /// [`ValidateError`] value.
    pub fn validate(
        fields: &Mapping,
        source_path: &str,
        body_offset: usize,
    ) -> Result<Self, ValidateError> {
        let title = match string_field(fields, "title") {
            Field::Ok(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(ValidateError::EmptyTitle);
                }
                trimmed.to_string()
            }
            Field::WrongType(_) => return Err(ValidateError::EmptyTitle),
            Field::Missing => return Err(ValidateError::MissingRequiredField("title")),
        };

        let date = match string_field(fields, "date") {
            Field::Ok(s) => parse_date(&s)?,
            Field::WrongType(actual) => {
                return Err(ValidateError::InvalidDateFormat(actual.to_string()));
            }
            Field::Missing => return Err(ValidateError::MissingRequiredField("date")),
        };

        // Non-string excerpts are treated as absent rather than growing the
        // error taxonomy; the field is optional and advisory.
        let excerpt = match string_field(fields, "excerpt") {
            Field::Ok(s) => s,
            Field::WrongType(_) | Field::Missing => String::new(),
        };

        let tags = match string_list_field(fields, "tags") {
            Field::Ok(list) => list
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            Field::WrongType(actual) => {
                return Err(ValidateError::InvalidTagsType(actual.to_string()));
            }
            Field::Missing => BTreeSet::new(),
        };

        let featured = match bool_field(fields, "featured") {
            Field::Ok(b) => b,
            Field::WrongType(actual) => {
                return Err(ValidateError::InvalidFeaturedType(actual.to_string()));
            }
            Field::Missing => false,
        };

        Ok(Self {
            slug: Slug::derive(source_path),
            title,
            date,
            excerpt,
            tags,
            featured,
            body_offset,
            source_path: source_path.to_string(),
        })
    }

    /// Returns true if this record carries the given tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// chrono is lenient about zero-padding, so the shape is checked first:
/// exactly ten bytes with hyphens at positions 4 and 7.
fn parse_date(s: &str) -> Result<NaiveDate, ValidateError> {
    let bytes = s.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(ValidateError::InvalidDateFormat(format!("'{s}'")));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| ValidateError::InvalidDateFormat(format!("'{s}'")))
}

fn lookup<'a>(fields: &'a Mapping, key: &str) -> Option<&'a Value> {
    fields.get(Value::from(key))
}

fn string_field(fields: &Mapping, key: &str) -> Field<String> {
    match lookup(fields, key) {
        Some(Value::String(s)) => Field::Ok(s.clone()),
        Some(other) => Field::WrongType(yaml_type_name(other)),
        None => Field::Missing,
    }
}

fn bool_field(fields: &Mapping, key: &str) -> Field<bool> {
    match lookup(fields, key) {
        Some(Value::Bool(b)) => Field::Ok(*b),
        Some(other) => Field::WrongType(yaml_type_name(other)),
        None => Field::Missing,
    }
}

fn string_list_field(fields: &Mapping, key: &str) -> Field<Vec<String>> {
    match lookup(fields, key) {
        Some(Value::Sequence(seq)) => {
            let mut out = Vec::with_capacity(seq.len());
            for item in seq {
                match item {
                    Value::String(s) => out.push(s.clone()),
                    other => return Field::WrongType(yaml_type_name(other)),
                }
            }
            Field::Ok(out)
        }
        Some(other) => Field::WrongType(yaml_type_name(other)),
        None => Field::Missing,
    }
}
