//! Corpus scanning pipeline
//!
//! Drives the full pass: discover content files, split front matter,
//! validate records, build the index, detect conflicts. One bad file
//! never aborts the run — it becomes a rejection and scanning continues.
//! The result is always the full triple of index, rejections, and
//! conflicts; nothing is silently dropped.
//!
//! Each run is a fresh, stateless pass over the whole corpus. There is
//! no incremental mode and no cache to go stale.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use walkdir::WalkDir;

use super::config::Config;
use super::frontmatter::{self, ParseError};
use crate::domain::{self, Conflict, CorpusIndex, PostRecord, ValidateError};

/// Why one file did not make it into the index
#[derive(Debug, PartialEq)]
pub enum RejectReason {
    /// The file could not be split into front matter and body
    Parse(ParseError),

    /// The front matter parsed but its data is invalid
    Validate(ValidateError),

    /// The file could not be read at all
    Unreadable(String),
}

impl RejectReason {
    /// Stable machine-readable name for reports
    pub fn kind(&self) -> &'static str {
        match self {
            RejectReason::Parse(e) => e.kind(),
            RejectReason::Validate(e) => e.kind(),
            RejectReason::Unreadable(_) => "unreadable",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::Parse(e) => e.fmt(f),
            RejectReason::Validate(e) => e.fmt(f),
            RejectReason::Unreadable(detail) => write!(f, "Unreadable file: {detail}"),
        }
    }
}

/// One rejected file with the reason it was turned away
#[derive(Debug, PartialEq)]
pub struct Rejection {
    pub source_path: String,
    pub reason: RejectReason,
}

impl Serialize for Rejection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Rejection", 3)?;
        s.serialize_field("source_path", &self.source_path)?;
        s.serialize_field("reason", self.reason.kind())?;
        s.serialize_field("detail", &self.reason.to_string())?;
        s.end()
    }
}

/// Outcome of one full corpus pass
#[derive(Debug, Serialize)]
pub struct CorpusReport {
    /// All valid records, queryable
    pub index: CorpusIndex,

    /// Files that failed parsing or validation
    pub rejections: Vec<Rejection>,

    /// Advisory duplicate findings over the valid records
    pub conflicts: Vec<Conflict>,
}

impl CorpusReport {
    /// True when no file was rejected and no conflict was found
    pub fn is_clean(&self) -> bool {
        self.rejections.is_empty() && self.conflicts.is_empty()
    }
}

/// Runs the full pipeline over a corpus rooted at `root`.
///
/// The content directory and recognized extensions come from `config`.
/// Returns an error only when the content directory itself is unusable;
/// individual file failures are accumulated as rejections.
pub fn scan(root: &Path, config: &Config) -> Result<CorpusReport> {
    let content_dir = config.content_dir(root);
    let files = discover(&content_dir, config)
        .with_context(|| format!("Failed to scan content directory: {}", content_dir.display()))?;

    let mut records = Vec::new();
    let mut rejections = Vec::new();

    for path in files {
        let source_path = display_path(&path, root);

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                rejections.push(Rejection {
                    source_path,
                    reason: RejectReason::Unreadable(e.to_string()),
                });
                continue;
            }
        };

        match process_text(&text, &source_path) {
            Ok(record) => records.push(record),
            Err(rejection) => rejections.push(rejection),
        }
    }

    let index = CorpusIndex::build(records);
    let conflicts = domain::detect(&index);

    Ok(CorpusReport {
        index,
        rejections,
        conflicts,
    })
}

/// Parses and validates one file's text into a record.
///
/// Pure over its inputs; used by `scan` and directly testable without a
/// filesystem.
pub fn process_text(text: &str, source_path: &str) -> Result<PostRecord, Rejection> {
    let doc = frontmatter::parse(text).map_err(|e| Rejection {
        source_path: source_path.to_string(),
        reason: RejectReason::Parse(e),
    })?;

    PostRecord::validate(&doc.fields, source_path, doc.body_offset).map_err(|e| Rejection {
        source_path: source_path.to_string(),
        reason: RejectReason::Validate(e),
    })
}

/// Discovers content files under a directory, sorted by path.
///
/// Hidden files and directories are skipped, as is anything whose
/// extension the config does not recognize. Sorting fixes the discovery
/// order so runs are reproducible across platforms.
fn discover(dir: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        anyhow::bail!("No such directory: {}", dir.display());
    }

    let mut files = Vec::new();

    let walker = WalkDir::new(dir).into_iter().filter_entry(|entry| {
        entry.depth() == 0 || !entry.file_name().to_string_lossy().starts_with('.')
    });

    for entry in walker {
        let entry = entry.context("Failed to read directory entry")?;
        if !entry.file_type().is_file() {
            continue;
        }

        let matches = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| config.matches_extension(e));

        if matches {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Root-relative path string for diagnostics
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConflictKind;
    use tempfile::TempDir;

    fn write_post(root: &Path, rel: &str, text: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    fn valid_post(title: &str, date: &str) -> String {
        format!("---\ntitle: {title}\ndate: \"{date}\"\n---\n\nBody.\n")
    }

    #[test]
    fn scan_builds_index_from_nested_tree() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "content/2026/a.md", &valid_post("A", "2026-01-01"));
        write_post(dir.path(), "content/2026/b.md", &valid_post("B", "2026-02-01"));
        write_post(dir.path(), "content/notes/c.markdown", &valid_post("C", "2026-03-01"));

        let report = scan(dir.path(), &Config::default()).unwrap();
        assert_eq!(report.index.len(), 3);
        assert!(report.is_clean());
    }

    #[test]
    fn bad_file_is_rejected_without_aborting() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "content/good.md", &valid_post("Good", "2026-01-01"));
        write_post(dir.path(), "content/bad.md", "no front matter here\n");
        write_post(
            dir.path(),
            "content/worse.md",
            "---\ntitle: X\ndate: nope\n---\nbody\n",
        );

        let report = scan(dir.path(), &Config::default()).unwrap();
        assert_eq!(report.index.len(), 1);
        assert_eq!(report.rejections.len(), 2);

        let kinds: Vec<_> = report.rejections.iter().map(|r| r.reason.kind()).collect();
        assert!(kinds.contains(&"missing_front_matter"));
        assert!(kinds.contains(&"invalid_date_format"));
    }

    #[test]
    fn non_markdown_and_hidden_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "content/post.md", &valid_post("Post", "2026-01-01"));
        write_post(dir.path(), "content/notes.txt", "plain text\n");
        write_post(dir.path(), "content/.draft.md", &valid_post("Draft", "2026-01-02"));
        write_post(
            dir.path(),
            "content/.obsidian/cache.md",
            &valid_post("Cache", "2026-01-03"),
        );

        let report = scan(dir.path(), &Config::default()).unwrap();
        assert_eq!(report.index.len(), 1);
        assert!(report.rejections.is_empty());
    }

    #[test]
    fn slug_collision_is_reported_with_both_records_kept() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "content/a/hello.md", &valid_post("One", "2026-01-01"));
        write_post(
            dir.path(),
            "content/b/2026-02-01-hello.md",
            &valid_post("Two", "2026-02-01"),
        );

        let report = scan(dir.path(), &Config::default()).unwrap();
        assert_eq!(report.index.len(), 2);
        assert_eq!(report.conflicts.len(), 1);
        assert_eq!(report.conflicts[0].kind, ConflictKind::DuplicateSlug);
        assert_eq!(report.conflicts[0].source_paths.len(), 2);
    }

    #[test]
    fn missing_content_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(scan(dir.path(), &Config::default()).is_err());
    }

    #[test]
    fn process_text_round_trip() {
        let record = process_text(
            "---\ntitle: Test\ndate: \"2026-01-01\"\n---\n\nBody.\n",
            "content/test.md",
        )
        .unwrap();

        assert_eq!(record.title, "Test");
        assert_eq!(record.slug.as_str(), "test");
    }

    #[test]
    fn rejection_serializes_with_kind_and_detail() {
        let rejection = process_text("plain text", "a.md").unwrap_err();
        let json = serde_json::to_value(&rejection).unwrap();

        assert_eq!(json["source_path"], "a.md");
        assert_eq!(json["reason"], "missing_front_matter");
        assert!(json["detail"].as_str().unwrap().contains("front matter"));
    }

    #[test]
    fn custom_extensions_config() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "posts/a.mdx", &valid_post("A", "2026-01-01"));
        fs::write(
            dir.path().join("corpus.toml"),
            "[content]\ndir = \"posts\"\nextensions = [\"mdx\"]\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        let report = scan(dir.path(), &config).unwrap();
        assert_eq!(report.index.len(), 1);
    }
}
