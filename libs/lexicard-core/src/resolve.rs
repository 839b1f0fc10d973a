//! Candidate scoring and meaning resolution.
//!
//! The scoring weights and confidence thresholds are tuning values carried
//! over unchanged; do not re-derive them.

use std::cmp::Ordering;
use std::collections::HashSet;

use rand::seq::SliceRandom;
use serde_json::Value;

use crate::error::{ResolveError, Result};
use crate::extract::{self, Extraction, PHONETIC_FALLBACK};
use crate::matcher::ExpressionMatcher;
use crate::pool::build_pool;
use crate::text::normalize_sentence;
use crate::types::{
    DefinitionCandidate, MeaningConfidence, MeaningMode, ResolvedMeaning, WordData,
};

const EXPRESSION_IN_DEFINITION_BONUS: f64 = 2.0;
const EXPRESSION_IN_EXAMPLE_BONUS: f64 = 2.0;
const EXAMPLE_OVERLAP_CAP: f64 = 3.0;
const GENERIC_TONE_PENALTY: f64 = 1.5;
const SHORT_DEFINITION_PENALTY: f64 = 0.5;
const SHORT_DEFINITION_CHARS: usize = 20;
const MAX_ALTERNATES: usize = 5;

const HIGH_SCORE: f64 = 5.0;
const HIGH_GAP: f64 = 2.0;
const MEDIUM_SCORE: f64 = 3.0;
const MEDIUM_GAP: f64 = 1.0;

/// Wordings that mark a definition as generic filler rather than a specific
/// sense.
const GENERIC_TONE_MARKERS: &[&str] = &[
    "something", "someone", "thing", "a kind of", "an act of", "used to", "to do",
];

struct ScoredCandidate<'a> {
    candidate: &'a DefinitionCandidate,
    score: f64,
}

/// Lowercase, strip non-alphanumerics, and keep tokens of length >= 3.
fn score_tokens(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|word| word.chars().filter(|ch| ch.is_alphanumeric()).collect::<String>())
        .filter(|word| word.chars().count() >= 3)
        .collect()
}

fn overlap_count(tokens: &HashSet<String>, sentence_tokens: &HashSet<String>) -> usize {
    tokens.intersection(sentence_tokens).count()
}

fn score_candidate(
    candidate: &DefinitionCandidate,
    matcher: &ExpressionMatcher,
    pool_tokens: &[HashSet<String>],
) -> f64 {
    let definition_tokens = score_tokens(&candidate.definition);
    let base = pool_tokens
        .iter()
        .map(|sentence| overlap_count(&definition_tokens, sentence))
        .max()
        .unwrap_or(0);
    let mut score = base as f64;

    if matcher.is_match(&candidate.definition) {
        score += EXPRESSION_IN_DEFINITION_BONUS;
    }

    if let Some(example) = &candidate.example {
        if matcher.is_match(example) {
            score += EXPRESSION_IN_EXAMPLE_BONUS;
        }
        let example_tokens = score_tokens(example);
        let aggregate: usize = pool_tokens
            .iter()
            .map(|sentence| overlap_count(&example_tokens, sentence))
            .sum();
        score += (aggregate as f64).min(EXAMPLE_OVERLAP_CAP);
    }

    let lowered = candidate.definition.to_lowercase();
    if GENERIC_TONE_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        score -= GENERIC_TONE_PENALTY;
    }

    if candidate.definition.chars().count() < SHORT_DEFINITION_CHARS {
        score -= SHORT_DEFINITION_PENALTY;
    }

    score
}

fn confidence_for(top: f64, gap: f64) -> MeaningConfidence {
    if top >= HIGH_SCORE && gap >= HIGH_GAP {
        MeaningConfidence::High
    } else if top >= MEDIUM_SCORE && gap >= MEDIUM_GAP {
        MeaningConfidence::Medium
    } else {
        MeaningConfidence::Low
    }
}

/// Pick one definition, up to 5 ranked alternates, and a confidence tier.
/// Returns `None` when there are no candidates at all.
pub fn resolve_meaning(
    candidates: &[DefinitionCandidate],
    matcher: &ExpressionMatcher,
    pool: &[String],
    mode: MeaningMode,
) -> Option<ResolvedMeaning> {
    let first = candidates.first()?;

    match mode {
        MeaningMode::Normal => Some(ResolvedMeaning {
            definition: first.definition.clone(),
            meaning_candidates: vec![first.definition.clone()],
            meaning_confidence: MeaningConfidence::Medium,
        }),
        MeaningMode::Precise => {
            let pool_tokens: Vec<HashSet<String>> =
                pool.iter().map(|sentence| score_tokens(sentence)).collect();

            let mut ranked: Vec<ScoredCandidate<'_>> = candidates
                .iter()
                .map(|candidate| ScoredCandidate {
                    candidate,
                    score: score_candidate(candidate, matcher, &pool_tokens),
                })
                .collect();
            // Stable sort: ties keep extraction order.
            ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

            let top = ranked[0].score;
            let gap = ranked
                .get(1)
                .map_or(f64::INFINITY, |runner_up| top - runner_up.score);

            let mut meaning_candidates: Vec<String> = Vec::new();
            for scored in &ranked {
                if meaning_candidates.len() == MAX_ALTERNATES {
                    break;
                }
                if !meaning_candidates.contains(&scored.candidate.definition) {
                    meaning_candidates.push(scored.candidate.definition.clone());
                }
            }

            Some(ResolvedMeaning {
                definition: ranked[0].candidate.definition.clone(),
                meaning_candidates,
                meaning_confidence: confidence_for(top, gap),
            })
        }
    }
}

/// Best-effort meaning for multi-token expressions with zero exact
/// candidates: a substring hit over known expression-level senses, else a
/// deterministic placeholder.
fn fallback_meaning(expression: &str, extraction: &Extraction) -> ResolvedMeaning {
    let requested = expression.to_lowercase();
    let found = extraction
        .expression_senses
        .iter()
        .find(|(text, _)| text.contains(&requested))
        .map(|(_, definition)| definition.clone());

    match found {
        Some(definition) => ResolvedMeaning {
            meaning_candidates: vec![definition.clone()],
            definition,
            meaning_confidence: MeaningConfidence::Medium,
        },
        None => {
            let placeholder = format!("Definition not found for expression \"{expression}\".");
            ResolvedMeaning {
                meaning_candidates: vec![placeholder.clone()],
                definition: placeholder,
                meaning_confidence: MeaningConfidence::Low,
            }
        }
    }
}

/// Resolve an expression into card data from already-fetched payloads and
/// context sentence sources.
///
/// Fails with [`ResolveError::NoDictionaryData`] when a single-token lookup
/// extracts zero candidates, and with [`ResolveError::NoContextualSentence`]
/// when the sentence pool is empty.
pub fn resolve(
    expression: &str,
    payloads: &[Value],
    context_sources: &[Vec<String>],
    mode: MeaningMode,
) -> Result<WordData> {
    let expression = normalize_sentence(expression);
    let matcher = ExpressionMatcher::new(&expression);
    let multi_word = expression.contains(' ');

    let extraction = extract::extract(payloads, &expression, &matcher);

    if extraction.candidates.is_empty() && !multi_word {
        return Err(ResolveError::NoDictionaryData { expression });
    }

    let pool = build_pool(context_sources, &extraction.pool_examples, &matcher);
    if pool.is_empty() {
        return Err(ResolveError::NoContextualSentence { expression });
    }

    let meaning = resolve_meaning(&extraction.candidates, &matcher, &pool, mode)
        .unwrap_or_else(|| fallback_meaning(&expression, &extraction));

    // The pool was checked non-empty above, so choose always yields a value.
    let sentence = pool
        .choose(&mut rand::thread_rng())
        .cloned()
        .unwrap_or_default();

    Ok(WordData {
        definition: meaning.definition,
        phonetic: extraction
            .phonetic
            .unwrap_or_else(|| PHONETIC_FALLBACK.to_string()),
        sentence,
        sentence_candidates: pool,
        meaning_candidates: meaning.meaning_candidates,
        meaning_confidence: meaning.meaning_confidence,
    })
}
