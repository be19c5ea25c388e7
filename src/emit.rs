//! Final ordering and TypeScript data-module generation.
//!
//! Sorts the deduplicated set by `(year, citations)` descending (stable, so
//! ties keep their input order), snapshots the aggregate author stats, and
//! renders both as a TypeScript module with two exports: `scholarStats` and
//! `publications`. The site imports this file directly; the only contract is
//! the field shapes, with `type` constrained to the three-value union.

use crate::error::Result;
use crate::publication::Publication;
use crate::scholar::AuthorProfile;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

/// Aggregate snapshot emitted alongside the publication list.
/// Immutable once produced; `total_publications` is counted after dedup.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorStats {
    pub total_publications: usize,
    pub total_citations: i64,
    pub h_index: i64,
    pub i10_index: i64,
    /// ISO-8601 timestamp of this run
    pub last_updated: String,
}

/// Sort the final set and take the stats snapshot.
///
/// Highest year first, highest citation count within a year; the sort is
/// stable so equal `(year, citations)` pairs keep their relative order.
pub fn emit(
    profile: &AuthorProfile,
    mut pubs: Vec<Publication>,
    now: DateTime<Local>,
) -> (AuthorStats, Vec<Publication>) {
    pubs.sort_by(|a, b| (b.year, b.citations).cmp(&(a.year, a.citations)));

    let stats = AuthorStats {
        total_publications: pubs.len(),
        total_citations: profile.cited_by,
        h_index: profile.h_index,
        i10_index: profile.i10_index,
        last_updated: now.to_rfc3339(),
    };

    (stats, pubs)
}

/// Render the TypeScript data module.
pub fn render_typescript(
    profile: &AuthorProfile,
    stats: &AuthorStats,
    pubs: &[Publication],
    now: DateTime<Local>,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "// Auto-generated from Google Scholar");
    let _ = writeln!(out, "// Last updated: {}", now.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "// Scholar ID: {}", profile.scholar_id);
    let _ = writeln!(out, "// Total citations: {}", stats.total_citations);
    let _ = writeln!(out, "// h-index: {}", stats.h_index);
    let _ = writeln!(out, "// i10-index: {}", stats.i10_index);
    out.push('\n');

    let _ = writeln!(out, "export const scholarStats = {{");
    let _ = writeln!(out, "  totalPublications: {},", stats.total_publications);
    let _ = writeln!(out, "  totalCitations: {},", stats.total_citations);
    let _ = writeln!(out, "  hIndex: {},", stats.h_index);
    let _ = writeln!(out, "  i10Index: {},", stats.i10_index);
    let _ = writeln!(out, "  lastUpdated: '{}',", escape_ts(&stats.last_updated));
    let _ = writeln!(out, "}};");
    out.push('\n');

    let _ = writeln!(out, "export const publications = [");
    for pub_ in pubs {
        let _ = writeln!(out, "  {{");
        let _ = writeln!(out, "    title: '{}',", escape_ts(&pub_.title));
        let _ = writeln!(out, "    authors: '{}',", escape_ts(&pub_.authors));
        let _ = writeln!(out, "    venue: '{}',", escape_ts(&pub_.venue));
        let _ = writeln!(out, "    year: {},", pub_.year);
        let _ = writeln!(out, "    type: '{}' as const,", pub_.pub_type.as_str());
        let _ = writeln!(out, "    citations: {},", pub_.citations);
        let _ = writeln!(out, "    url: '{}',", escape_ts(&pub_.url));
        let _ = writeln!(out, "    abstract: '{}',", escape_ts(&pub_.abstract_text));
        let _ = writeln!(out, "    scholarId: '{}',", escape_ts(&pub_.scholar_id));
        let _ = writeln!(out, "  }},");
    }
    let _ = writeln!(out, "];");

    out
}

/// Write the rendered module, creating parent directories as needed.
pub fn write_data_module(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    info!(path = %path.display(), bytes = content.len(), "Wrote data module");
    Ok(())
}

/// Escape a value for embedding in a single-quoted TS string literal.
/// Newlines and tabs are flattened so the literal stays on one line.
fn escape_ts(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' | '\r' | '\t' => escaped.push(' '),
            _ => escaped.push(c),
        }
    }
    escaped
}
