//! Report commands (build, check)
//!
//! `build` runs the full pipeline and prints the index plus diagnostics;
//! `check` prints diagnostics only and can be made strict, turning any
//! rejection or conflict into a failing exit code. Strictness is the
//! caller-side policy the detector itself deliberately does not have.

use std::path::Path;

use anyhow::Result;

use super::output::Output;
use crate::corpus::{scan, Config, Rejection};
use crate::domain::Conflict;

/// Run the pipeline and print the resulting index with diagnostics
pub fn build(output: &Output, dir: &Path) -> Result<()> {
    let config = Config::load(dir)?;
    output.verbose_ctx("build", &format!("Scanning corpus at: {}", dir.display()));

    let report = scan(dir, &config)?;
    output.verbose_ctx(
        "build",
        &format!(
            "Indexed {} record(s), {} rejection(s), {} conflict(s)",
            report.index.len(),
            report.rejections.len(),
            report.conflicts.len()
        ),
    );

    if output.is_json() {
        output.data(&report);
        return Ok(());
    }

    output.success(&format!(
        "Indexed {} post(s) ({} rejected, {} conflict(s))",
        report.index.len(),
        report.rejections.len(),
        report.conflicts.len()
    ));

    if !report.index.is_empty() {
        output.blank();
        println!("{:<12} {:<32} TITLE", "DATE", "SLUG");
        println!("{}", "-".repeat(70));
        for record in report.index.chronological() {
            println!("{:<12} {:<32} {}", record.date, record.slug, record.title);
        }
    }

    print_diagnostics(&report.rejections, &report.conflicts, output);
    Ok(())
}

/// Print diagnostics only; with `--strict`, any finding fails the run
pub fn check(output: &Output, dir: &Path, strict: bool) -> Result<()> {
    let config = Config::load(dir)?;
    let strict = strict || config.check.strict;
    output.verbose_ctx(
        "check",
        &format!("Checking corpus at: {} (strict: {})", dir.display(), strict),
    );

    let report = scan(dir, &config)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "clean": report.is_clean(),
            "checked": report.index.len() + report.rejections.len(),
            "rejections": report.rejections,
            "conflicts": report.conflicts,
        }));
    } else if report.is_clean() {
        output.success(&format!(
            "Checked {} post(s): no problems found",
            report.index.len()
        ));
    } else {
        print_diagnostics(&report.rejections, &report.conflicts, output);
    }

    if strict && !report.is_clean() {
        anyhow::bail!(
            "Corpus check failed: {} rejection(s), {} conflict(s)",
            report.rejections.len(),
            report.conflicts.len()
        );
    }

    Ok(())
}

/// Shared text rendering for rejections and conflicts
fn print_diagnostics(rejections: &[Rejection], conflicts: &[Conflict], output: &Output) {
    if !rejections.is_empty() {
        output.blank();
        println!("Rejected files ({}):", rejections.len());
        for rejection in rejections {
            println!("  {}: {}", rejection.source_path, rejection.reason);
        }
    }

    if !conflicts.is_empty() {
        output.blank();
        println!("Conflicts ({}):", conflicts.len());
        for conflict in conflicts {
            println!(
                "  {}: {}",
                conflict.kind.as_str(),
                conflict.source_paths.join(", ")
            );
        }
    }
}
