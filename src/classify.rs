//! Publication type classification from venue/title text.
//!
//! A fixed rule table of keyword sets, evaluated in a fixed order with the
//! first match winning. The order is load-bearing: a venue like "Proceedings
//! of the IEEE Transactions on X" matches both journal and conference
//! keywords and must classify as journal because that rule runs first.

use crate::publication::PubType;

/// Keywords marking a journal venue
const JOURNAL_KEYWORDS: &[&str] = &[
    "journal",
    "transactions",
    "magazine",
    "letters",
    "review",
    "proceedings",
    "jnl",
    "trans.",
    "ieee access",
    "nature",
    "science",
    "communications",
    "annals",
    "bulletin",
];

/// Keywords marking a book or book chapter
const BOOK_KEYWORDS: &[&str] = &["book", "chapter", "handbook", "encyclopedia"];

/// Keywords marking a conference venue
const CONFERENCE_KEYWORDS: &[&str] = &[
    "conference",
    "symposium",
    "workshop",
    "congress",
    "summit",
    "meeting",
    "colloquium",
    "seminar",
];

/// Which text a rule matches against
#[derive(Debug, Clone, Copy)]
enum Field {
    Venue,
    Title,
}

/// Ordered rule table. First match wins; anything unmatched defaults to
/// conference.
const RULES: &[(Field, &[&str], PubType)] = &[
    (Field::Venue, JOURNAL_KEYWORDS, PubType::Journal),
    (Field::Venue, BOOK_KEYWORDS, PubType::Book),
    (Field::Title, BOOK_KEYWORDS, PubType::Book),
    (Field::Venue, CONFERENCE_KEYWORDS, PubType::Conference),
];

/// Classify a publication from its venue and title.
///
/// Case-insensitive substring match against the rule table above. Ties are
/// resolved by rule order, not by any scoring.
pub fn classify(venue: &str, title: &str) -> PubType {
    let venue = venue.to_lowercase();
    let title = title.to_lowercase();

    for (field, keywords, pub_type) in RULES {
        let haystack = match field {
            Field::Venue => venue.as_str(),
            Field::Title => title.as_str(),
        };
        if keywords.iter().any(|k| haystack.contains(k)) {
            return *pub_type;
        }
    }

    PubType::Conference
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_venue() {
        assert_eq!(classify("IEEE Transactions on Communications", "X"), PubType::Journal);
        assert_eq!(classify("Nature", "X"), PubType::Journal);
        assert_eq!(classify("Physics Letters B", "X"), PubType::Journal);
    }

    #[test]
    fn test_journal_beats_conference_in_venue() {
        // Venue contains both "transactions" (journal) and "conference";
        // the journal rule runs first.
        assert_eq!(
            classify("2020 IEEE Transactions on Something Conference", "X"),
            PubType::Journal
        );
        assert_eq!(
            classify("Proceedings of the 5th Symposium on Y", "X"),
            PubType::Journal
        );
    }

    #[test]
    fn test_book_venue() {
        assert_eq!(classify("Springer Handbook of Robotics", "X"), PubType::Book);
        assert_eq!(classify("Encyclopedia of Algorithms", "X"), PubType::Book);
    }

    #[test]
    fn test_book_by_title_beats_conference_in_venue() {
        // No book keyword in the venue, but the title says handbook; that
        // rule runs before conference-in-venue.
        assert_eq!(classify("Misc Symposium", "The Handbook of X"), PubType::Book);
    }

    #[test]
    fn test_conference_venue() {
        assert_eq!(classify("International Conference on Machine Learning", "X"), PubType::Conference);
        assert_eq!(classify("NeurIPS Workshop on Z", "X"), PubType::Conference);
    }

    #[test]
    fn test_default_is_conference() {
        assert_eq!(classify("Unknown Venue", "A Paper"), PubType::Conference);
        assert_eq!(classify("", ""), PubType::Conference);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("JOURNAL OF THINGS", "X"), PubType::Journal);
        assert_eq!(classify("x", "HANDBOOK of y"), PubType::Book);
    }
}
