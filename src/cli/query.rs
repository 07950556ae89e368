//! Query commands (list, show, tags)
//!
//! Read-only views over a freshly built index. Rejected files do not
//! block queries; they are mentioned in verbose output only.

use std::path::Path;

use anyhow::Result;

use super::output::Output;
use crate::corpus::{scan, Config};
use crate::domain::{PostRecord, Slug};

/// List posts chronologically, optionally filtered by tag or featured flag
pub fn list(output: &Output, dir: &Path, tag: Option<&str>, featured: bool) -> Result<()> {
    let config = Config::load(dir)?;
    let report = scan(dir, &config)?;
    output.verbose_ctx(
        "list",
        &format!(
            "Indexed {} record(s), skipped {} rejected file(s)",
            report.index.len(),
            report.rejections.len()
        ),
    );

    let records: Vec<&PostRecord> = match tag {
        Some(tag) => report.index.by_tag(tag),
        None => report.index.chronological().iter().collect(),
    };

    let records: Vec<&PostRecord> = if featured {
        records.into_iter().filter(|r| r.featured).collect()
    } else {
        records
    };

    if output.is_json() {
        output.data(&records);
    } else if records.is_empty() {
        println!("No posts found.");
    } else {
        println!("{:<12} {:<32} TITLE", "DATE", "SLUG");
        println!("{}", "-".repeat(70));
        for record in &records {
            let marker = if record.featured { " *" } else { "" };
            println!(
                "{:<12} {:<32} {}{}",
                record.date, record.slug, record.title, marker
            );
        }
        output.blank();
        println!("{} post(s)", records.len());
    }

    Ok(())
}

/// Show one post's full metadata by slug
pub fn show(output: &Output, dir: &Path, slug: &str) -> Result<()> {
    let config = Config::load(dir)?;
    let report = scan(dir, &config)?;

    let slug: Slug = slug
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid slug: {e}"))?;

    let Some(record) = report.index.by_slug(&slug) else {
        anyhow::bail!("No post found with slug '{slug}'");
    };

    if output.is_json() {
        output.data(record);
    } else {
        println!("Slug:     {}", record.slug);
        println!("Title:    {}", record.title);
        println!("Date:     {}", record.date);
        println!("Featured: {}", record.featured);
        if !record.tags.is_empty() {
            let tags: Vec<&str> = record.tags.iter().map(String::as_str).collect();
            println!("Tags:     {}", tags.join(", "));
        }
        println!("Source:   {}", record.source_path);
        if !record.excerpt.is_empty() {
            output.blank();
            println!("{}", record.excerpt);
        }
    }

    Ok(())
}

/// List all tags with their post counts
pub fn tags(output: &Output, dir: &Path) -> Result<()> {
    let config = Config::load(dir)?;
    let report = scan(dir, &config)?;

    if output.is_json() {
        let items: Vec<_> = report
            .index
            .tags()
            .map(|(tag, count)| serde_json::json!({ "tag": tag, "count": count }))
            .collect();
        output.data(&items);
    } else if report.index.tags().next().is_none() {
        println!("No tags found.");
    } else {
        println!("{:<24} POSTS", "TAG");
        println!("{}", "-".repeat(32));
        for (tag, count) in report.index.tags() {
            println!("{:<24} {}", tag, count);
        }
    }

    Ok(())
}
