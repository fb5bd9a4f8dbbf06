// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! FAQ index with tunable similarity scoring.
//!
//! Exact normalized matches score 1.0. Otherwise the score blends edit
//! similarity and keyword overlap, with small bonuses for category and
//! keyword hits. The weights are tunable data, not a correctness invariant;
//! acceptance thresholds live with the cascade.

use strsim::normalized_levenshtein;

/// One FAQ entry: the canned answer plus the match surface.
#[derive(Debug, Clone)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
    pub category: String,
    pub keywords: Vec<String>,
}

/// Weights of the FAQ scoring blend.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub levenshtein: f64,
    pub keyword_overlap: f64,
    pub category_bonus: f64,
    pub keyword_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            levenshtein: 0.4,
            keyword_overlap: 0.6,
            category_bonus: 0.1,
            keyword_bonus: 0.3,
        }
    }
}

/// The best-scoring FAQ entry for a question.
#[derive(Debug, Clone)]
pub struct FaqMatch<'a> {
    pub entry: &'a FaqEntry,
    pub score: f64,
}

/// In-memory FAQ index.
pub struct FaqIndex {
    entries: Vec<FaqEntry>,
    weights: ScoringWeights,
}

/// Lowercase, strip punctuation, collapse whitespace.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl FaqIndex {
    pub fn new(entries: Vec<FaqEntry>, weights: ScoringWeights) -> Self {
        Self { entries, weights }
    }

    /// Starter entries covering the questions agents get asked every day.
    pub fn with_starters() -> Self {
        let entry = |question: &str, answer: &str, category: &str, keywords: &[&str]| FaqEntry {
            question: question.into(),
            answer: answer.into(),
            category: category.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        };
        Self::new(
            vec![
                entry(
                    "how do i schedule a tour",
                    "I can set up a tour for you. Tell me which property you'd like to \
                     see and your name, email, and phone number, and I'll take care of \
                     the rest.",
                    "tours",
                    &["schedule", "tour", "visit", "showing"],
                ),
                entry(
                    "do i need a mortgage pre approval",
                    "A pre-approval isn't required to browse, but most sellers expect \
                     one with an offer. It also tells you your real budget before you \
                     fall in love with a place.",
                    "financing",
                    &["mortgage", "pre-approval", "preapproval", "financing", "loan"],
                ),
                entry(
                    "what are closing costs",
                    "Closing costs are the fees due when the sale completes: lender \
                     fees, title insurance, taxes, and escrow charges. Budget roughly \
                     2-5% of the purchase price on top of your down payment.",
                    "financing",
                    &["closing", "costs", "fees", "escrow"],
                ),
                entry(
                    "how does escrow work",
                    "Escrow is a neutral third party that holds the deposit and \
                     documents while the sale is in progress, releasing funds only \
                     when both sides have met the contract terms.",
                    "financing",
                    &["escrow", "deposit", "earnest"],
                ),
                entry(
                    "can you help me sell my home",
                    "Yes. I can connect you with one of our listing agents for a \
                     comparative market analysis and a walkthrough of the selling \
                     process. Just share your name and contact details.",
                    "selling",
                    &["sell", "selling", "list my", "cma"],
                ),
            ],
            ScoringWeights::default(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best-scoring entry for a question, if any entry scores above zero.
    pub fn lookup(&self, question: &str) -> Option<FaqMatch<'_>> {
        let normalized = normalize(question);
        if normalized.is_empty() {
            return None;
        }

        let mut best: Option<FaqMatch<'_>> = None;
        for entry in &self.entries {
            let score = self.score(&normalized, entry);
            if score > 0.0 && best.as_ref().is_none_or(|b| score > b.score) {
                best = Some(FaqMatch { entry, score });
            }
        }
        best
    }

    fn score(&self, normalized_question: &str, entry: &FaqEntry) -> f64 {
        let entry_question = normalize(&entry.question);
        if normalized_question == entry_question {
            return 1.0;
        }

        let edit = normalized_levenshtein(normalized_question, &entry_question);

        let matched_keywords = entry
            .keywords
            .iter()
            .filter(|k| normalized_question.contains(&normalize(k)))
            .count();
        let overlap = if entry.keywords.is_empty() {
            0.0
        } else {
            matched_keywords as f64 / entry.keywords.len() as f64
        };

        let mut score = self.weights.levenshtein * edit + self.weights.keyword_overlap * overlap;
        if normalized_question.contains(&normalize(&entry.category)) {
            score += self.weights.category_bonus;
        }
        if matched_keywords > 0 {
            score += self.weights.keyword_bonus;
        }
        score.min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_normalized_match_scores_one() {
        let index = FaqIndex::with_starters();
        let m = index.lookup("How does ESCROW work?").unwrap();
        assert_eq!(m.score, 1.0);
        assert_eq!(m.entry.category, "financing");
    }

    #[test]
    fn keyword_heavy_paraphrase_scores_high() {
        let index = FaqIndex::with_starters();
        let m = index
            .lookup("can you schedule a tour or showing visit for me")
            .unwrap();
        assert!(m.score >= 0.85, "got {}", m.score);
        assert_eq!(m.entry.category, "tours");
    }

    #[test]
    fn unrelated_question_scores_low() {
        let index = FaqIndex::with_starters();
        let score = index
            .lookup("what is the capital of France")
            .map(|m| m.score)
            .unwrap_or(0.0);
        assert!(score < 0.65, "got {score}");
    }

    #[test]
    fn empty_input_matches_nothing() {
        let index = FaqIndex::with_starters();
        assert!(index.lookup("").is_none());
        assert!(index.lookup("?!").is_none());
    }

    #[test]
    fn score_is_clamped_to_one() {
        let index = FaqIndex::new(
            vec![FaqEntry {
                question: "closing costs and escrow fees".into(),
                answer: "a".into(),
                category: "closing".into(),
                keywords: vec!["closing".into(), "escrow".into(), "fees".into()],
            }],
            ScoringWeights::default(),
        );
        let m = index.lookup("closing costs escrow fees closing").unwrap();
        assert!(m.score <= 1.0);
    }

    #[test]
    fn normalization_strips_punctuation_and_case() {
        assert_eq!(normalize("  What's UP?? "), "what s up");
        assert_eq!(normalize("MLS#12345"), "mls 12345");
    }
}
