// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned responses for greeting/thanks/goodbye/help patterns.

/// A matched canned response.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateResponse {
    pub text: &'static str,
    pub confidence: f64,
}

const GREETINGS: &[&str] = &["hi", "hello", "hey", "good morning", "good afternoon", "good evening"];
const THANKS: &[&str] = &["thanks", "thank you", "appreciate it"];
const GOODBYES: &[&str] = &["bye", "goodbye", "see you", "talk later"];
const HELP: &[&str] = &["help", "what can you do", "how does this work", "what do you do"];

/// Match a message against the canned-response patterns.
pub fn template_match(message: &str) -> Option<TemplateResponse> {
    let bare = message
        .trim()
        .to_lowercase()
        .trim_end_matches(['!', '.', '?'])
        .to_string();

    if GREETINGS.iter().any(|p| bare == *p) {
        return Some(TemplateResponse {
            text: "Hi! I can help you search listings, answer questions about \
                   properties and neighborhoods, and set up tours. What are you \
                   looking for?",
            confidence: 0.9,
        });
    }
    if THANKS.iter().any(|p| bare == *p || bare.starts_with(p)) {
        return Some(TemplateResponse {
            text: "You're welcome! Let me know if there's anything else I can help \
                   you find.",
            confidence: 0.9,
        });
    }
    if GOODBYES.iter().any(|p| bare == *p) {
        return Some(TemplateResponse {
            text: "Goodbye! Feel free to come back any time you want to look at \
                   listings or schedule a tour.",
            confidence: 0.9,
        });
    }
    if HELP.iter().any(|p| bare == *p) {
        return Some(TemplateResponse {
            text: "I can search properties by city, price, and size, pull up \
                   details and market stats, compare listings, and schedule tours \
                   with an agent. Just ask in plain language.",
            confidence: 0.85,
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greetings_match_with_punctuation_and_case() {
        assert!(template_match("Hello!").is_some());
        assert!(template_match("  hi  ").is_some());
        assert!(template_match("GOOD MORNING").is_some());
    }

    #[test]
    fn thanks_and_goodbyes_match() {
        assert!(template_match("thank you!").is_some());
        assert!(template_match("thanks so much").is_some());
        assert!(template_match("bye").is_some());
    }

    #[test]
    fn help_requests_match() {
        let m = template_match("what can you do?").unwrap();
        assert!(m.confidence >= 0.65);
    }

    #[test]
    fn substantive_questions_do_not_match() {
        assert!(template_match("show me condos in Boston").is_none());
        assert!(template_match("hello, can you find me a house?").is_none());
    }
}
