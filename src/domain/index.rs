//! Corpus index
//!
//! Aggregates validated records into one queryable, read-only value with
//! three surfaces: slug lookup, chronological listing, and tag grouping.
//! Built once per run; downstream consumers never mutate it.
//!
//! Ordering is deterministic regardless of file-discovery order: newest
//! date first, ties broken by slug ascending. This makes regeneration
//! idempotent and test assertions stable.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::record::PostRecord;
use super::slug::Slug;

/// Read-only queryable view over all valid records of one run
#[derive(Debug, Clone, Default, Serialize)]
pub struct CorpusIndex {
    /// Records in chronological order (newest first, slug ties ascending)
    records: Vec<PostRecord>,

    /// Slug to position in `records`; colliding slugs resolve to the
    /// chronologically-first record, collisions are the detector's job
    #[serde(skip)]
    by_slug: HashMap<Slug, usize>,

    /// Tag to positions in `records`, already in chronological order
    #[serde(skip)]
    by_tag: BTreeMap<String, Vec<usize>>,
}

impl CorpusIndex {
    /// Builds an index from records in discovery order.
    ///
    /// Pure aggregation: given already-validated records this cannot fail,
    /// and any permutation of the same input set produces an identical
    /// index.
    pub fn build(mut records: Vec<PostRecord>) -> Self {
        records.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));

        let mut by_slug = HashMap::with_capacity(records.len());
        let mut by_tag: BTreeMap<String, Vec<usize>> = BTreeMap::new();

        for (pos, record) in records.iter().enumerate() {
            by_slug.entry(record.slug.clone()).or_insert(pos);
            for tag in &record.tags {
                by_tag.entry(tag.clone()).or_default().push(pos);
            }
        }

        Self {
            records,
            by_slug,
            by_tag,
        }
    }

    /// Looks up a record by slug
    pub fn by_slug(&self, slug: &Slug) -> Option<&PostRecord> {
        self.by_slug.get(slug).map(|&pos| &self.records[pos])
    }

    /// All records, newest first
    pub fn chronological(&self) -> &[PostRecord] {
        &self.records
    }

    /// Records carrying the given tag, newest first
    pub fn by_tag(&self, tag: &str) -> Vec<&PostRecord> {
        self.by_tag
            .get(tag)
            .map(|positions| positions.iter().map(|&pos| &self.records[pos]).collect())
            .unwrap_or_default()
    }

    /// All tags present in the corpus with their record counts, sorted
    pub fn tags(&self) -> impl Iterator<Item = (&str, usize)> {
        self.by_tag
            .iter()
            .map(|(tag, positions)| (tag.as_str(), positions.len()))
    }

    /// Number of records in the index
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the index holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
