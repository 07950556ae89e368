//! Slug derivation for content records
//!
//! Slug format:
//! - Lowercase ASCII alphanumerics joined by single hyphens (e.g., `rust-ownership-explained`)
//! - Derived from the source file name: extension dropped, leading
//!   `YYYY-MM-DD-` date prefix stripped, unicode transliterated
//!
//! Derivation is total: any source path produces a slug, even if an ugly
//! one. Uniqueness across the corpus is checked later by conflict
//! detection, never assumed here.

use deunicode::deunicode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SlugError {
    #[error("Invalid slug: expected lowercase alphanumerics and hyphens, got '{0}'")]
    InvalidSlug(String),
}

/// URL-safe identifier for one content record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Derives a slug from a source file path.
    ///
    /// Takes the file stem, strips a leading `YYYY-MM-DD-` prefix if one
    /// is present, and normalizes the rest: transliterate to ASCII,
    /// lowercase, collapse every run of non-alphanumerics into one hyphen.
    ///
    /// Total over all inputs; a path with no usable characters yields the
    /// fallback slug `untitled`.
    pub fn derive(source_path: &str) -> Self {
        let stem = Path::new(source_path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        let stem = strip_date_prefix(stem);
        let normalized = normalize(stem);

        if normalized.is_empty() {
            Self("untitled".to_string())
        } else {
            Self(normalized)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Strips a leading `YYYY-MM-DD-` prefix, if present
fn strip_date_prefix(stem: &str) -> &str {
    let bytes = stem.as_bytes();
    if bytes.len() < 11 {
        return stem;
    }

    let is_prefix = bytes[..10].iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    }) && bytes[10] == b'-';

    if is_prefix { &stem[11..] } else { stem }
}

/// Transliterates and collapses to `[a-z0-9]` runs joined by hyphens
fn normalize(s: &str) -> String {
    let ascii = deunicode(s).to_lowercase();
    let mut out = String::with_capacity(ascii.len());

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }

    out.trim_end_matches('-').to_string()
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let valid = !s.is_empty()
            && !s.starts_with('-')
            && !s.ends_with('-')
            && !s.contains("--")
            && s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(SlugError::InvalidSlug(s.to_string()))
        }
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_strips_extension_and_date_prefix() {
        let slug = Slug::derive("content/2026-02-07-nodejs-error-handling.md");
        assert_eq!(slug.as_str(), "nodejs-error-handling");
    }

    #[test]
    fn derive_without_date_prefix() {
        let slug = Slug::derive("content/rust-ownership.md");
        assert_eq!(slug.as_str(), "rust-ownership");
    }

    #[test]
    fn derive_lowercases_and_collapses_separators() {
        let slug = Slug::derive("posts/My  Great_Post!.md");
        assert_eq!(slug.as_str(), "my-great-post");
    }

    #[test]
    fn derive_transliterates_unicode() {
        let slug = Slug::derive("posts/café-société.md");
        assert_eq!(slug.as_str(), "cafe-societe");
    }

    #[test]
    fn derive_is_total_on_degenerate_input() {
        assert_eq!(Slug::derive("").as_str(), "untitled");
        assert_eq!(Slug::derive("....md").as_str(), "untitled");
        assert_eq!(Slug::derive("!!!.md").as_str(), "untitled");
    }

    #[test]
    fn short_stem_is_not_treated_as_date_prefix() {
        let slug = Slug::derive("posts/2026.md");
        assert_eq!(slug.as_str(), "2026");
    }

    #[test]
    fn date_like_but_malformed_prefix_is_kept() {
        let slug = Slug::derive("posts/20260207-hello.md");
        assert_eq!(slug.as_str(), "20260207-hello");
    }

    #[test]
    fn from_str_rejects_bad_slugs() {
        assert!("valid-slug".parse::<Slug>().is_ok());
        assert!("Bad Slug".parse::<Slug>().is_err());
        assert!("-leading".parse::<Slug>().is_err());
        assert!("double--hyphen".parse::<Slug>().is_err());
        assert!("".parse::<Slug>().is_err());
    }

    #[test]
    fn two_files_can_derive_the_same_slug() {
        let a = Slug::derive("content/2026-01-01-hello-world.md");
        let b = Slug::derive("drafts/hello-world.md");
        assert_eq!(a, b);
    }
}
