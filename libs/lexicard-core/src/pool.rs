//! Sentence pool construction: which sentences are usable as card context,
//! and in what order they are offered.

use crate::matcher::ExpressionMatcher;
use crate::text::{normalize_sentence, unique_sentences};

const MIN_WORDS: usize = 4;
const MIN_CHARS: usize = 20;
const MAX_CHARS: usize = 220;

/// Whether a sentence is usable as context for the expression: after
/// normalization it has at least 4 words, 20..=220 characters, and actually
/// contains the expression.
pub fn is_context_sentence(sentence: &str, matcher: &ExpressionMatcher) -> bool {
    let normalized = normalize_sentence(sentence);
    let words = normalized.split(' ').filter(|word| !word.is_empty()).count();
    let chars = normalized.chars().count();

    words >= MIN_WORDS && (MIN_CHARS..=MAX_CHARS).contains(&chars) && matcher.is_match(&normalized)
}

/// Build the ordered candidate pool.
///
/// Priority order: context sources contribute first, in the order the caller
/// supplies them; dictionary examples come last. The result is deduplicated
/// case-insensitively, keeping first-seen order.
pub fn build_pool(
    context_sources: &[Vec<String>],
    dictionary_examples: &[String],
    matcher: &ExpressionMatcher,
) -> Vec<String> {
    let mut collected = Vec::new();

    for source in context_sources {
        for sentence in source {
            let normalized = normalize_sentence(sentence);
            if is_context_sentence(&normalized, matcher) {
                collected.push(normalized);
            }
        }
    }

    for example in dictionary_examples {
        let normalized = normalize_sentence(example);
        if is_context_sentence(&normalized, matcher) {
            collected.push(normalized);
        }
    }

    unique_sentences(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn matcher() -> ExpressionMatcher {
        ExpressionMatcher::new("hello")
    }

    #[test]
    fn accepts_a_usable_sentence() {
        assert!(is_context_sentence(
            "People often say hello when meeting someone.",
            &matcher()
        ));
    }

    #[test]
    fn rejects_short_sentences() {
        // Fewer than 4 words.
        assert!(!is_context_sentence(
            "Extraordinarily enthusiastic hello",
            &matcher()
        ));
        // Fewer than 20 characters.
        assert!(!is_context_sentence("Say hello to me", &matcher()));
    }

    #[test]
    fn rejects_overlong_sentences() {
        let long = format!("hello {}", "word ".repeat(60));
        assert!(!is_context_sentence(&long, &matcher()));
    }

    #[test]
    fn rejects_sentences_without_the_expression() {
        assert!(!is_context_sentence(
            "A perfectly fine sentence with no greeting.",
            &matcher()
        ));
    }

    #[test]
    fn pool_keeps_source_priority_and_dedupes() {
        let first_source = vec![
            "People often say hello when meeting someone.".to_string(),
            "Not related at all, nothing to see.".to_string(),
        ];
        let second_source = vec!["She waved hello from across the street.".to_string()];
        let examples = vec![
            "people often say HELLO when meeting someone.".to_string(),
            "A cheerful hello brightened the whole room.".to_string(),
        ];

        let pool = build_pool(&[first_source, second_source], &examples, &matcher());
        assert_eq!(
            pool,
            vec![
                "People often say hello when meeting someone.",
                "She waved hello from across the street.",
                "A cheerful hello brightened the whole room.",
            ]
        );
    }

    #[test]
    fn empty_sources_build_empty_pool() {
        assert!(build_pool(&[], &[], &matcher()).is_empty());
    }
}
