// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reference resolution against the shown-listing list.
//!
//! Resolution order: bare/`#N` numbers, "number N", ordinal words and
//! "the Nth one", then fuzzy matching against address and summary fields.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::ShownListing;

/// Minimum Jaro-Winkler similarity for a non-substring address match.
/// Substring containment scores above this unconditionally.
const MIN_SIMILARITY: f64 = 0.8;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?(\d+)$").expect("static regex"));
static NUMBER_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bnumber\s+(\d+)\b").expect("static regex"));
static NTH_ONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bthe\s+(\d+)(?:st|nd|rd|th)\s+one\b").expect("static regex"));

const ORDINAL_WORDS: &[(&str, u32)] = &[
    ("first", 1),
    ("second", 2),
    ("third", 3),
    ("fourth", 4),
    ("fifth", 5),
];

/// Resolve a user reference to one of the shown listings.
pub fn resolve<'a>(text: &str, shown: &'a [ShownListing]) -> Option<&'a ShownListing> {
    if shown.is_empty() {
        return None;
    }
    let lower = text.trim().to_lowercase();
    if lower.is_empty() {
        return None;
    }

    if let Some(index) = numeric_index(&lower).or_else(|| ordinal_index(&lower)) {
        return shown.iter().find(|s| s.index == index);
    }

    fuzzy_match(&lower, shown)
}

/// "2", "#2", "number 2".
fn numeric_index(lower: &str) -> Option<u32> {
    let caps = NUMBER_RE
        .captures(lower)
        .or_else(|| NUMBER_WORD_RE.captures(lower))?;
    caps[1].parse().ok()
}

/// "first one", "the third one", "the 4th one".
fn ordinal_index(lower: &str) -> Option<u32> {
    for (word, index) in ORDINAL_WORDS {
        if lower.contains(word) {
            return Some(*index);
        }
    }
    NTH_ONE_RE.captures(lower).and_then(|c| c[1].parse().ok())
}

/// Best substring/fuzzy match of the reference against address and summary
/// fields, above `MIN_SIMILARITY`.
fn fuzzy_match<'a>(lower: &str, shown: &'a [ShownListing]) -> Option<&'a ShownListing> {
    let mut best: Option<(&ShownListing, f64)> = None;

    for listing in shown {
        let address = listing.summary.address.to_lowercase();
        let haystack = format!(
            "{} {} {}",
            address,
            listing.summary.city.to_lowercase(),
            listing.summary.property_type.to_lowercase()
        );

        // Substring containment is the strongest signal.
        let score = if address.contains(lower) || lower.contains(&address) {
            1.0
        } else if haystack.contains(lower) {
            0.9
        } else {
            strsim::jaro_winkler(lower, &address)
        };

        if score >= MIN_SIMILARITY
            && best.map(|(_, s)| score > s).unwrap_or(true)
        {
            best = Some((listing, score));
        }
    }

    best.map(|(listing, _)| listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reva_core::types::ListingSummary;

    fn shown_list() -> Vec<ShownListing> {
        ["12 Elm Street", "98 Oak Avenue", "5 Birch Road", "301 Maple Drive", "77 Cedar Lane"]
            .iter()
            .enumerate()
            .map(|(i, address)| ShownListing {
                index: (i + 1) as u32,
                listing_id: format!("L{}", i + 1),
                summary: ListingSummary {
                    id: format!("L{}", i + 1),
                    address: (*address).into(),
                    city: "Boston".into(),
                    price: 400_000,
                    bedrooms: 3,
                    bathrooms: 2.0,
                    property_type: "house".into(),
                },
            })
            .collect()
    }

    #[test]
    fn bare_number_resolves_by_index() {
        let shown = shown_list();
        assert_eq!(resolve("2", &shown).unwrap().listing_id, "L2");
        assert_eq!(resolve("#4", &shown).unwrap().listing_id, "L4");
        assert_eq!(resolve("number 3", &shown).unwrap().listing_id, "L3");
    }

    #[test]
    fn out_of_range_number_returns_none() {
        let shown = shown_list();
        assert!(resolve("99", &shown).is_none());
        assert!(resolve("0", &shown).is_none());
    }

    #[test]
    fn ordinal_words_resolve() {
        let shown = shown_list();
        assert_eq!(resolve("the first one", &shown).unwrap().listing_id, "L1");
        assert_eq!(resolve("second one", &shown).unwrap().listing_id, "L2");
        assert_eq!(resolve("the fifth one", &shown).unwrap().listing_id, "L5");
    }

    #[test]
    fn nth_one_pattern_resolves() {
        let shown = shown_list();
        assert_eq!(resolve("the 3rd one", &shown).unwrap().listing_id, "L3");
        assert_eq!(resolve("the 4th one", &shown).unwrap().listing_id, "L4");
    }

    #[test]
    fn partial_address_fuzzy_matches() {
        let shown = shown_list();
        assert_eq!(resolve("98 oak avenue", &shown).unwrap().listing_id, "L2");
        assert_eq!(resolve("oak avenue", &shown).unwrap().listing_id, "L2");
        assert_eq!(resolve("maple", &shown).unwrap().listing_id, "L4");
    }

    #[test]
    fn unrelated_text_returns_none() {
        let shown = shown_list();
        assert!(resolve("tell me about mortgages", &shown).is_none());
    }

    #[test]
    fn empty_shown_list_never_resolves() {
        assert!(resolve("1", &[]).is_none());
        assert!(resolve("the first one", &[]).is_none());
    }

    proptest::proptest! {
        #[test]
        fn numeric_references_resolve_exactly_when_in_range(
            reference in 0u32..30,
            len in 0usize..8,
        ) {
            let shown: Vec<ShownListing> = (1..=len)
                .map(|i| ShownListing {
                    index: i as u32,
                    listing_id: format!("L{i}"),
                    summary: ListingSummary {
                        id: format!("L{i}"),
                        address: format!("{} Elm Street", i * 10),
                        city: "Boston".into(),
                        price: 400_000,
                        bedrooms: 3,
                        bathrooms: 2.0,
                        property_type: "house".into(),
                    },
                })
                .collect();

            let resolved = resolve(&reference.to_string(), &shown);
            if (1..=len as u32).contains(&reference) {
                proptest::prop_assert_eq!(resolved.unwrap().index, reference);
            } else {
                proptest::prop_assert!(resolved.is_none());
            }
        }
    }
}
