//! Expression matching: whether an expression occurs in a sentence, and
//! highlighted copies of matched sentences.
//!
//! Containment and highlighting are built on the same compiled pattern, so a
//! sentence reported as containing the expression can always be highlighted.

use regex::Regex;

use crate::text::{escape_pattern, normalize_sentence};
use crate::verbs::{is_phrasal_particle, verb_forms};

/// Words that may separate a phrasal verb from its particle ("turn the
/// lights off").
const MAX_SEPARATION_WORDS: usize = 3;

/// How a tokenized expression is matched.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ExpressionKind {
    /// Empty or whitespace-only: never matches.
    Empty,
    /// One token: case-insensitive whole-word match.
    Single(String),
    /// Two tokens where the second is a known particle: inflected verb,
    /// particle up to `MAX_SEPARATION_WORDS` words away.
    Phrasal { verb: String, particle: String },
    /// Any other multi-token expression: first token inflected, the rest
    /// literal.
    Literal(Vec<String>),
}

fn tokenize_expression(expression: &str) -> Vec<String> {
    normalize_sentence(expression)
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn classify(tokens: &[String]) -> ExpressionKind {
    match tokens {
        [] => ExpressionKind::Empty,
        [token] => ExpressionKind::Single(token.clone()),
        [verb, particle] if is_phrasal_particle(particle) => ExpressionKind::Phrasal {
            verb: verb.clone(),
            particle: particle.clone(),
        },
        _ => ExpressionKind::Literal(tokens.to_vec()),
    }
}

fn verb_alternatives(verb: &str) -> String {
    verb_forms(verb)
        .iter()
        .map(|form| escape_pattern(form))
        .collect::<Vec<_>>()
        .join("|")
}

fn emit_pattern(kind: &ExpressionKind) -> Option<String> {
    match kind {
        ExpressionKind::Empty => None,
        ExpressionKind::Single(token) => Some(format!(r"(?i)\b{}\b", escape_pattern(token))),
        ExpressionKind::Phrasal { verb, particle } => Some(format!(
            r"(?i)\b(?:{})\b(?:\s+\w+){{0,{}}}\s+\b{}\b",
            verb_alternatives(verb),
            MAX_SEPARATION_WORDS,
            escape_pattern(particle),
        )),
        ExpressionKind::Literal(tokens) => {
            let rest = tokens[1..]
                .iter()
                .map(|token| escape_pattern(token))
                .collect::<Vec<_>>()
                .join(r"\s+");
            Some(format!(
                r"(?i)\b(?:{})\b\s+{}\b",
                verb_alternatives(&tokens[0]),
                rest,
            ))
        }
    }
}

/// A compiled matcher for one expression, reusable across any number of
/// sentences.
#[derive(Debug, Clone)]
pub struct ExpressionMatcher {
    pattern: Option<Regex>,
}

impl ExpressionMatcher {
    /// Tokenize, classify, and compile `expression` into a match pattern.
    pub fn new(expression: &str) -> Self {
        let kind = classify(&tokenize_expression(expression));
        let pattern = emit_pattern(&kind).and_then(|pattern| Regex::new(&pattern).ok());
        Self { pattern }
    }

    /// Whether the expression occurs in `sentence`.
    pub fn is_match(&self, sentence: &str) -> bool {
        self.pattern
            .as_ref()
            .map_or(false, |regex| regex.is_match(sentence))
    }

    /// Wrap the first matched span with `wrap`. Returns `sentence` unchanged
    /// when the expression does not occur.
    pub fn highlight_with<F>(&self, sentence: &str, wrap: F) -> String
    where
        F: Fn(&str) -> String,
    {
        match &self.pattern {
            Some(regex) => regex
                .replace(sentence, |caps: &regex::Captures<'_>| wrap(&caps[0]))
                .into_owned(),
            None => sentence.to_string(),
        }
    }

    /// Wrap the first matched span in `<b>...</b>` for card fronts.
    pub fn highlight(&self, sentence: &str) -> String {
        self.highlight_with(sentence, |matched| format!("<b>{matched}</b>"))
    }
}

/// Whether `expression` occurs in `sentence`, honoring verb inflection and
/// phrasal-verb particle separation.
pub fn contains_expression(sentence: &str, expression: &str) -> bool {
    ExpressionMatcher::new(expression).is_match(sentence)
}

/// Highlight the first occurrence of `expression` in `sentence` with
/// `<b>...</b>` tags; no-op when the expression does not occur.
pub fn highlight(sentence: &str, expression: &str) -> String {
    ExpressionMatcher::new(expression).highlight(sentence)
}
