//! Normalized publication model and the raw-record parser.
//!
//! [`Publication::from_raw`] is pure and infallible: every missing or
//! malformed source field falls back to its documented default instead of
//! erroring, so no single bad record can abort a batch.

use crate::classify::classify;
use crate::record::{AuthorField, RawRecord};
use serde::{Deserialize, Serialize};

/// Maximum abstract length kept in the artifact
const MAX_ABSTRACT_CHARS: usize = 500;

/// Publication category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PubType {
    Journal,
    #[default]
    Conference,
    Book,
}

impl PubType {
    /// Lowercase name used in the emitted data module
    pub fn as_str(&self) -> &'static str {
        match self {
            PubType::Journal => "journal",
            PubType::Conference => "conference",
            PubType::Book => "book",
        }
    }
}

/// A normalized publication. All fields are populated; defaults replace
/// anything the source omitted or mangled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    /// Comma-joined if the source gave a list, passed through otherwise
    pub authors: String,
    pub venue: String,
    /// 0 means the source year was missing or unparseable
    pub year: i32,
    pub pub_type: PubType,
    pub citations: i64,
    pub url: String,
    /// Truncated to 500 characters
    pub abstract_text: String,
    /// The source's own record id; informational only
    pub scholar_id: String,
}

impl Publication {
    /// Parse one raw record into its normalized form.
    ///
    /// Never fails: missing fields become defaults ("Untitled", "Unknown",
    /// "Unknown Venue", year 0, 0 citations), a non-numeric or negative year
    /// becomes the sentinel 0, and the abstract is truncated to 500 chars.
    pub fn from_raw(raw: &RawRecord) -> Self {
        let title = non_empty(raw.bib.title.as_deref()).unwrap_or("Untitled").to_string();

        let authors = match &raw.bib.author {
            Some(AuthorField::Many(names)) if !names.is_empty() => names.join(", "),
            Some(AuthorField::One(s)) if !s.trim().is_empty() => s.clone(),
            _ => "Unknown".to_string(),
        };

        let venue = non_empty(raw.bib.venue.as_deref())
            .unwrap_or("Unknown Venue")
            .to_string();

        let year = raw
            .bib
            .pub_year
            .as_deref()
            .and_then(|y| y.trim().parse::<i32>().ok())
            .filter(|y| *y >= 0)
            .unwrap_or(0);

        let citations = raw.num_citations.unwrap_or(0).max(0);

        let abstract_text: String = raw
            .bib
            .abstract_text
            .as_deref()
            .unwrap_or("")
            .chars()
            .take(MAX_ABSTRACT_CHARS)
            .collect();

        let pub_type = classify(&venue, &title);

        Publication {
            title,
            authors,
            venue,
            year,
            pub_type,
            citations,
            url: raw.pub_url.clone().unwrap_or_default(),
            abstract_text,
            scholar_id: raw.author_pub_id.clone().unwrap_or_default(),
        }
    }
}

/// Trimmed non-empty string, or None
fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(value: serde_json::Value) -> RawRecord {
        serde_json::from_value(value).expect("invalid raw record fixture")
    }

    #[test]
    fn test_defaults_for_empty_record() {
        let pub_ = Publication::from_raw(&raw(serde_json::json!({})));
        assert_eq!(pub_.title, "Untitled");
        assert_eq!(pub_.authors, "Unknown");
        assert_eq!(pub_.venue, "Unknown Venue");
        assert_eq!(pub_.year, 0);
        assert_eq!(pub_.pub_type, PubType::Conference);
        assert_eq!(pub_.citations, 0);
        assert_eq!(pub_.url, "");
        assert_eq!(pub_.abstract_text, "");
        assert_eq!(pub_.scholar_id, "");
    }

    #[test]
    fn test_full_record() {
        let pub_ = Publication::from_raw(&raw(serde_json::json!({
            "bib": {
                "title": "Edge Caching at Scale",
                "author": "J Doe, A Smith",
                "venue": "IEEE Transactions on Networking",
                "pub_year": "2019",
                "abstract": "We study caching."
            },
            "num_citations": 42,
            "pub_url": "https://example.com/paper",
            "author_pub_id": "abc:123"
        })));
        assert_eq!(pub_.title, "Edge Caching at Scale");
        assert_eq!(pub_.year, 2019);
        assert_eq!(pub_.pub_type, PubType::Journal);
        assert_eq!(pub_.citations, 42);
        assert_eq!(pub_.scholar_id, "abc:123");
    }

    #[test]
    fn test_author_list_is_comma_joined() {
        let pub_ = Publication::from_raw(&raw(serde_json::json!({
            "bib": {"author": ["J Doe", "A Smith", "B Lee"]}
        })));
        assert_eq!(pub_.authors, "J Doe, A Smith, B Lee");
    }

    #[test]
    fn test_year_fallback_on_garbage() {
        for bad in ["n/a", "", "two thousand", "-5"] {
            let pub_ = Publication::from_raw(&raw(serde_json::json!({
                "bib": {"pub_year": bad}
            })));
            assert_eq!(pub_.year, 0, "year {:?} should fall back to 0", bad);
        }
    }

    #[test]
    fn test_year_parses_with_whitespace() {
        let pub_ = Publication::from_raw(&raw(serde_json::json!({
            "bib": {"pub_year": " 2021 "}
        })));
        assert_eq!(pub_.year, 2021);
    }

    #[test]
    fn test_negative_citations_clamped() {
        let pub_ = Publication::from_raw(&raw(serde_json::json!({
            "num_citations": -3
        })));
        assert_eq!(pub_.citations, 0);
    }

    #[test]
    fn test_abstract_truncated_to_500_chars() {
        let long = "x".repeat(1200);
        let pub_ = Publication::from_raw(&raw(serde_json::json!({
            "bib": {"abstract": long}
        })));
        assert_eq!(pub_.abstract_text.chars().count(), 500);
    }

    #[test]
    fn test_classifier_runs_on_defaulted_fields() {
        // Empty venue defaults to "Unknown Venue", which matches nothing.
        let pub_ = Publication::from_raw(&raw(serde_json::json!({
            "bib": {"title": "A Paper", "venue": "  "}
        })));
        assert_eq!(pub_.venue, "Unknown Venue");
        assert_eq!(pub_.pub_type, PubType::Conference);
    }
}
