//! Duplicate and conflict detection
//!
//! Scans a built index for two authoring mistakes: slug collisions (two
//! source files deriving the same slug) and exact (title, date) duplicates
//! (a copy-pasted post that never got renamed). Detection only — records
//! are never removed or mutated, and what to do about a conflict is the
//! caller's policy. An empty report is the common, successful outcome.
//!
//! Thematic near-duplicates (same topic under a different title or date)
//! are deliberately out of reach here; only exact matches fire.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use super::index::CorpusIndex;
use super::slug::Slug;

/// What kind of duplication was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Two or more source files derive the same slug
    DuplicateSlug,

    /// Two or more records share an identical (title, date) pair
    DuplicateTitleDate,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::DuplicateSlug => "duplicate_slug",
            ConflictKind::DuplicateTitleDate => "duplicate_title_date",
        }
    }
}

/// One detected conflict, naming every involved record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub slugs: Vec<Slug>,
    pub source_paths: Vec<String>,
}

/// Scans an index for duplicate slugs and duplicate (title, date) pairs.
///
/// Output order is deterministic: slug conflicts first (by slug), then
/// title/date conflicts (by date then title). Cannot fail; an empty
/// vector means a clean corpus.
pub fn detect(index: &CorpusIndex) -> Vec<Conflict> {
    let mut by_slug: BTreeMap<&Slug, Vec<usize>> = BTreeMap::new();
    let mut by_title_date: BTreeMap<(NaiveDate, &str), Vec<usize>> = BTreeMap::new();

    let records = index.chronological();
    for (pos, record) in records.iter().enumerate() {
        by_slug.entry(&record.slug).or_default().push(pos);
        by_title_date
            .entry((record.date, record.title.as_str()))
            .or_default()
            .push(pos);
    }

    let mut conflicts = Vec::new();

    for (_, positions) in by_slug {
        if positions.len() > 1 {
            conflicts.push(conflict_at(ConflictKind::DuplicateSlug, &positions, records));
        }
    }

    for (_, positions) in by_title_date {
        if positions.len() > 1 {
            conflicts.push(conflict_at(
                ConflictKind::DuplicateTitleDate,
                &positions,
                records,
            ));
        }
    }

    conflicts
}

fn conflict_at(
    kind: ConflictKind,
    positions: &[usize],
    records: &[crate::domain::PostRecord],
) -> Conflict {
    Conflict {
        kind,
        slugs: positions.iter().map(|&p| records[p].slug.clone()).collect(),
        source_paths: positions
            .iter()
            .map(|&p| records[p].source_path.clone())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostRecord;
    use serde_yaml::Mapping;

    fn record(source: &str, title: &str, date: &str) -> PostRecord {
        let yaml = format!("title: \"{}\"\ndate: \"{}\"\n", title, date);
        let map: Mapping = serde_yaml::from_str(&yaml).unwrap();
        PostRecord::validate(&map, source, 0).unwrap()
    }

    #[test]
    fn clean_corpus_has_empty_report() {
        let index = CorpusIndex::build(vec![
            record("a.md", "First", "2026-01-01"),
            record("b.md", "Second", "2026-02-01"),
        ]);
        assert!(detect(&index).is_empty());
    }

    #[test]
    fn slug_collision_lists_both_sources_and_keeps_records() {
        let index = CorpusIndex::build(vec![
            record("content/hello.md", "One", "2026-01-01"),
            record("drafts/2026-02-01-hello.md", "Two", "2026-02-01"),
        ]);

        let conflicts = detect(&index);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].kind, ConflictKind::DuplicateSlug);
        assert_eq!(conflicts[0].source_paths.len(), 2);
        assert!(conflicts[0]
            .source_paths
            .contains(&"content/hello.md".to_string()));
        assert!(conflicts[0]
            .source_paths
            .contains(&"drafts/2026-02-01-hello.md".to_string()));

        // Detection does not delete: both records still in the index
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn exact_title_date_duplicate_is_flagged() {
        let index = CorpusIndex::build(vec![
            record("a.md", "Node.js Error Handling", "2026-02-07"),
            record("b.md", "Node.js Error Handling", "2026-02-07"),
        ]);

        let conflicts = detect(&index);
        let title_date: Vec<_> = conflicts
            .iter()
            .filter(|c| c.kind == ConflictKind::DuplicateTitleDate)
            .collect();
        assert_eq!(title_date.len(), 1);
        assert_eq!(title_date[0].slugs.len(), 2);
    }

    #[test]
    fn same_title_different_dates_is_not_flagged() {
        // Republishing a topic under a new date is not a conflict
        let index = CorpusIndex::build(vec![
            record("a.md", "Node.js Error Handling", "2026-02-07"),
            record("b.md", "Node.js Error Handling Revisited", "2026-02-14"),
            record("c.md", "Node.js Error Handling", "2026-02-14"),
        ]);

        assert!(detect(&index).is_empty());
    }

    #[test]
    fn same_date_different_titles_is_not_flagged() {
        let index = CorpusIndex::build(vec![
            record("a.md", "Morning Post", "2026-02-07"),
            record("b.md", "Evening Post", "2026-02-07"),
        ]);

        assert!(detect(&index).is_empty());
    }

    #[test]
    fn three_way_collision_is_one_conflict() {
        let index = CorpusIndex::build(vec![
            record("a/hello.md", "A", "2026-01-01"),
            record("b/hello.md", "B", "2026-01-02"),
            record("c/hello.md", "C", "2026-01-03"),
        ]);

        let conflicts = detect(&index);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].source_paths.len(), 3);
    }

    #[test]
    fn report_order_is_deterministic() {
        let records = vec![
            record("x/dup.md", "X", "2026-01-01"),
            record("y/dup.md", "Y", "2026-01-02"),
            record("p.md", "Same", "2026-03-01"),
            record("q.md", "Same", "2026-03-01"),
        ];

        let forward = detect(&CorpusIndex::build(records.clone()));
        let reversed = detect(&CorpusIndex::build(records.into_iter().rev().collect()));
        assert_eq!(forward, reversed);
        assert_eq!(forward[0].kind, ConflictKind::DuplicateSlug);
        assert_eq!(forward[1].kind, ConflictKind::DuplicateTitleDate);
    }
}
