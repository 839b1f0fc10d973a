//! Core types for word-sense resolution.

use serde::{Deserialize, Serialize};

/// Resolution strategy for picking a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeaningMode {
    /// First extracted candidate, fixed medium confidence.
    Normal,
    /// Score every candidate against the sentence pool and pick the best.
    Precise,
}

impl Default for MeaningMode {
    fn default() -> Self {
        Self::Normal
    }
}

impl std::str::FromStr for MeaningMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "normal" => Ok(Self::Normal),
            "precise" => Ok(Self::Precise),
            other => Err(format!(
                "unknown meaning mode {other:?} (expected \"normal\" or \"precise\")"
            )),
        }
    }
}

/// How decisively the chosen definition beat its runner-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeaningConfidence {
    Low,
    Medium,
    High,
}

/// One normalized definition plus its optional attached example, extracted
/// from a single dictionary sense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionCandidate {
    pub definition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// The resolver's chosen definition plus ranked alternates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMeaning {
    pub definition: String,
    /// Up to 5 distinct definitions, best first; the chosen one leads.
    pub meaning_candidates: Vec<String>,
    pub meaning_confidence: MeaningConfidence,
}

/// Everything the caller needs to build a card for one expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordData {
    pub definition: String,
    pub phonetic: String,
    /// One representative pick from `sentence_candidates`.
    pub sentence: String,
    pub sentence_candidates: Vec<String>,
    pub meaning_candidates: Vec<String>,
    pub meaning_confidence: MeaningConfidence,
}
