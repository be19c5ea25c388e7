//! Raw publication record shapes as returned by the Scholar source.
//!
//! These are the untrusted wire types: every field may be absent, empty, or
//! malformed (e.g. a non-numeric year). Normalization into [`Publication`]
//! happens in [`crate::publication`], never here.
//!
//! [`Publication`]: crate::publication::Publication

use serde::{Deserialize, Serialize};

/// One raw publication record from the source.
///
/// Mirrors the shape the Scholar profile exposes: a bibliographic sub-record
/// plus top-level citation count, landing URL, and the source's own record id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    /// Bibliographic fields
    #[serde(default)]
    pub bib: RawBib,
    /// Citation count as reported by the source
    #[serde(default)]
    pub num_citations: Option<i64>,
    /// Landing page URL
    #[serde(default)]
    pub pub_url: Option<String>,
    /// The source's record id (`citation_for_view` key); not used for dedup
    #[serde(default)]
    pub author_pub_id: Option<String>,
}

/// Bibliographic sub-record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBib {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    /// Year as the source gives it: a string that may not be numeric
    #[serde(default)]
    pub pub_year: Option<String>,
    /// Either a single display string or a list of author names
    #[serde(default)]
    pub author: Option<AuthorField>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
}

/// Author field: the source sometimes gives a pre-joined string (profile
/// rows) and sometimes a list of names (filled detail pages).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorField {
    /// Single pre-joined author string
    One(String),
    /// List of individual author names
    Many(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_author_string() {
        let raw: RawRecord = serde_json::from_value(serde_json::json!({
            "bib": {"title": "A Paper", "author": "J Doe, A Smith"}
        }))
        .expect("deserialize failed");

        match raw.bib.author {
            Some(AuthorField::One(s)) => assert_eq!(s, "J Doe, A Smith"),
            other => panic!("expected single author string, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_author_list() {
        let raw: RawRecord = serde_json::from_value(serde_json::json!({
            "bib": {"author": ["J Doe", "A Smith"]}
        }))
        .expect("deserialize failed");

        match raw.bib.author {
            Some(AuthorField::Many(v)) => assert_eq!(v, vec!["J Doe", "A Smith"]),
            other => panic!("expected author list, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_empty_record() {
        let raw: RawRecord = serde_json::from_value(serde_json::json!({})).expect("deserialize failed");
        assert!(raw.bib.title.is_none());
        assert!(raw.num_citations.is_none());
    }
}
