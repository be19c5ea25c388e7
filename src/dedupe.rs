//! Duplicate detection by normalized title.
//!
//! Scholar profiles routinely list the same paper twice (preprint vs. camera
//! ready, casing differences). The key is the title lower-cased with all
//! whitespace removed; the first record seen for a key wins, so input order
//! decides which duplicate survives. Exact-after-normalization only: titles
//! differing by punctuation or a single character stay distinct.

use crate::publication::Publication;
use std::collections::HashSet;
use tracing::debug;

/// Dedup key: lower-cased title with every whitespace character stripped.
pub fn normalized_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Collapse near-identical records, keeping the first occurrence per
/// normalized title and preserving relative order. Single pass, O(n).
pub fn dedupe_by_title(pubs: Vec<Publication>) -> Vec<Publication> {
    let before = pubs.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(before);

    let kept: Vec<Publication> = pubs
        .into_iter()
        .filter(|p| seen.insert(normalized_title(&p.title)))
        .collect();

    if kept.len() < before {
        debug!(dropped = before - kept.len(), kept = kept.len(), "Removed duplicate titles");
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawRecord;

    fn pub_with_title(title: &str) -> Publication {
        let mut raw = RawRecord::default();
        raw.bib.title = Some(title.to_string());
        Publication::from_raw(&raw)
    }

    #[test]
    fn test_normalized_title_strips_all_whitespace() {
        assert_eq!(normalized_title("Deep  Learning\tBasics"), "deeplearningbasics");
        assert_eq!(normalized_title(" deep learning basics "), "deeplearningbasics");
    }

    #[test]
    fn test_first_occurrence_wins_order_preserved() {
        let pubs = vec![
            pub_with_title("Deep Learning"),
            pub_with_title("deep learning"),
            pub_with_title("Other Paper"),
        ];
        let out = dedupe_by_title(pubs);
        let titles: Vec<&str> = out.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Deep Learning", "Other Paper"]);
    }

    #[test]
    fn test_punctuation_variants_stay_distinct() {
        let pubs = vec![pub_with_title("A Study."), pub_with_title("A Study")];
        assert_eq!(dedupe_by_title(pubs).len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let pubs = vec![
            pub_with_title("One"),
            pub_with_title("o n e"),
            pub_with_title("Two"),
        ];
        let once = dedupe_by_title(pubs);
        let titles_once: Vec<String> = once.iter().map(|p| p.title.clone()).collect();
        let twice = dedupe_by_title(once);
        let titles_twice: Vec<String> = twice.iter().map(|p| p.title.clone()).collect();
        assert_eq!(titles_once, titles_twice);
    }

    #[test]
    fn test_distinct_titles_all_kept() {
        let pubs = vec![pub_with_title("A"), pub_with_title("B"), pub_with_title("C")];
        assert_eq!(dedupe_by_title(pubs).len(), 3);
    }
}
