//! Typed extraction of definition candidates from raw dictionary payloads.
//!
//! Parsing is total: payloads or entries that do not fit the expected nested
//! shape contribute nothing instead of failing the lookup.

use serde::Deserialize;
use serde_json::Value;

use crate::matcher::ExpressionMatcher;
use crate::pool::is_context_sentence;
use crate::text::normalize_sentence;
use crate::types::DefinitionCandidate;

/// Literal fallback when no transcription is present anywhere in a payload.
pub const PHONETIC_FALLBACK: &str = "N/A";

/// One dictionary entry as served by dictionary-style sources.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DictionaryEntry {
    pub phonetic: Option<String>,
    pub phonetics: Vec<PhoneticVariant>,
    pub meanings: Vec<MeaningGroup>,
    /// Expression-level senses carrying their own literal expression text.
    pub expressions: Vec<ExpressionSense>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PhoneticVariant {
    pub text: Option<String>,
}

/// A part-of-speech group of senses.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MeaningGroup {
    #[serde(rename = "partOfSpeech")]
    pub part_of_speech: Option<String>,
    pub definitions: Vec<SenseDefinition>,
}

/// One sense: a definition with zero or more attached examples.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SenseDefinition {
    pub definition: Option<String>,
    pub example: Option<String>,
    pub examples: Vec<String>,
}

impl SenseDefinition {
    /// Every textual example attached to this sense, singular field first.
    fn attached_examples(&self) -> impl Iterator<Item = &str> {
        self.example
            .as_deref()
            .into_iter()
            .chain(self.examples.iter().map(String::as_str))
    }
}

/// A multi-word sense keyed by its literal expression text.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExpressionSense {
    pub expression: Option<String>,
    pub definition: Option<String>,
    pub example: Option<String>,
}

/// Flattened extraction result across all payloads for one expression.
#[derive(Debug, Default)]
pub struct Extraction {
    pub candidates: Vec<DefinitionCandidate>,
    /// Usable context sentences pulled from every sense's examples.
    pub pool_examples: Vec<String>,
    pub phonetic: Option<String>,
    /// All expression-level senses seen, as (normalized lowercase expression
    /// text, normalized definition); kept for best-effort fallback lookups.
    pub expression_senses: Vec<(String, String)>,
}

/// Parse a raw payload into typed entries. Array payloads are parsed
/// per-entry so one malformed element only drops itself.
pub fn parse_entries(payload: &Value) -> Vec<DictionaryEntry> {
    match payload {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        Value::Object(_) => serde_json::from_value(payload.clone()).ok().into_iter().collect(),
        _ => Vec::new(),
    }
}

fn normalized_nonempty(value: Option<&str>) -> Option<String> {
    let normalized = normalize_sentence(value?);
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

fn pick_phonetic(entry: &DictionaryEntry) -> Option<String> {
    if let Some(phonetic) = entry.phonetic.as_deref() {
        let trimmed = phonetic.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }

    entry
        .phonetics
        .iter()
        .filter_map(|variant| variant.text.as_deref())
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

/// Walk every sense of every entry across all payloads, producing definition
/// candidates, the dictionary side of the sentence pool, and the phonetic.
pub fn extract(payloads: &[Value], expression: &str, matcher: &ExpressionMatcher) -> Extraction {
    let requested = normalize_sentence(expression).to_lowercase();
    let multi_word = requested.contains(' ');
    let mut out = Extraction::default();

    for payload in payloads {
        for entry in parse_entries(payload) {
            if out.phonetic.is_none() {
                out.phonetic = pick_phonetic(&entry);
            }

            for meaning in &entry.meanings {
                for sense in &meaning.definitions {
                    let Some(definition) = normalized_nonempty(sense.definition.as_deref()) else {
                        continue;
                    };

                    let example = sense
                        .attached_examples()
                        .map(normalize_sentence)
                        .find(|text| !text.is_empty());

                    for raw in sense.attached_examples() {
                        let normalized = normalize_sentence(raw);
                        if is_context_sentence(&normalized, matcher) {
                            out.pool_examples.push(normalized);
                        }
                    }

                    out.candidates.push(DefinitionCandidate { definition, example });
                }
            }

            if multi_word {
                for sense in &entry.expressions {
                    let Some(text) = normalized_nonempty(sense.expression.as_deref()) else {
                        continue;
                    };
                    let Some(definition) = normalized_nonempty(sense.definition.as_deref()) else {
                        continue;
                    };
                    let text = text.to_lowercase();
                    out.expression_senses.push((text.clone(), definition.clone()));

                    if text == requested {
                        let example = normalized_nonempty(sense.example.as_deref());
                        if let Some(example) = &example {
                            if is_context_sentence(example, matcher) {
                                out.pool_examples.push(example.clone());
                            }
                        }
                        out.candidates.push(DefinitionCandidate { definition, example });
                    }
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn run(payload: Value, expression: &str) -> Extraction {
        let matcher = ExpressionMatcher::new(expression);
        extract(&[payload], expression, &matcher)
    }

    #[test]
    fn flattens_senses_across_groups() {
        let payload = json!([{
            "word": "run",
            "meanings": [
                {
                    "partOfSpeech": "verb",
                    "definitions": [
                        { "definition": "To  move  quickly.", "example": "She runs along the river every single morning." },
                        { "definition": "" }
                    ]
                },
                {
                    "partOfSpeech": "noun",
                    "definitions": [
                        { "definition": "An act of running." }
                    ]
                }
            ]
        }]);

        let extraction = run(payload, "run");
        assert_eq!(
            extraction.candidates,
            vec![
                DefinitionCandidate {
                    definition: "To move quickly.".to_string(),
                    example: Some("She runs along the river every single morning.".to_string()),
                },
                DefinitionCandidate {
                    definition: "An act of running.".to_string(),
                    example: None,
                },
            ]
        );
        assert_eq!(
            extraction.pool_examples,
            vec!["She runs along the river every single morning."]
        );
    }

    #[test]
    fn phonetic_prefers_top_level_field() {
        let payload = json!([{
            "phonetic": " /rʌn/ ",
            "phonetics": [{ "text": "/ɹʌn/" }],
            "meanings": []
        }]);
        assert_eq!(run(payload, "run").phonetic.as_deref(), Some("/rʌn/"));
    }

    #[test]
    fn phonetic_falls_back_to_variants() {
        let payload = json!([{
            "phonetic": "  ",
            "phonetics": [{ "audio": "x.mp3" }, { "text": " /ɹʌn/ " }],
            "meanings": []
        }]);
        assert_eq!(run(payload, "run").phonetic.as_deref(), Some("/ɹʌn/"));
    }

    #[test]
    fn missing_phonetic_yields_none() {
        let payload = json!([{ "meanings": [] }]);
        assert_eq!(run(payload, "run").phonetic, None);
    }

    #[test]
    fn malformed_payloads_contribute_nothing() {
        for payload in [json!("oops"), json!(42), json!(null), json!([1, "two"])] {
            let extraction = run(payload, "run");
            assert!(extraction.candidates.is_empty());
            assert!(extraction.pool_examples.is_empty());
        }
    }

    #[test]
    fn malformed_entry_only_drops_itself() {
        let payload = json!([
            { "meanings": "not-a-list" },
            { "meanings": [{ "definitions": [{ "definition": "Still extracted." }] }] }
        ]);
        let extraction = run(payload, "run");
        assert_eq!(extraction.candidates.len(), 1);
        assert_eq!(extraction.candidates[0].definition, "Still extracted.");
    }

    #[test]
    fn expression_senses_match_case_insensitively() {
        let payload = json!([{
            "meanings": [],
            "expressions": [
                { "expression": "Turn  Off", "definition": "To deactivate something." },
                { "expression": "turn off the road", "definition": "To leave a road." }
            ]
        }]);

        let extraction = run(payload, "turn off");
        assert_eq!(
            extraction.candidates,
            vec![DefinitionCandidate {
                definition: "To deactivate something.".to_string(),
                example: None,
            }]
        );
        assert_eq!(extraction.expression_senses.len(), 2);
    }

    #[test]
    fn expression_senses_ignored_for_single_words() {
        let payload = json!([{
            "meanings": [],
            "expressions": [{ "expression": "run", "definition": "Should not appear." }]
        }]);
        let extraction = run(payload, "run");
        assert!(extraction.candidates.is_empty());
        assert!(extraction.expression_senses.is_empty());
    }
}
