//! Word-sense and context resolution engine for building language-learning
//! flashcards.
//!
//! Provides:
//! - Expression matching with verb inflection and phrasal-verb separation
//! - Candidate extraction from raw dictionary-style payloads
//! - Sentence pool filtering and deduplication
//! - Definition scoring and meaning resolution (normal / precise modes)
//!
//! The engine is pure and synchronous: callers fetch raw payloads however
//! they like and hand them in; every function here is a deterministic,
//! side-effect-free transformation (apart from the random representative
//! sentence pick in [`resolve`]).

pub mod error;
pub mod extract;
pub mod matcher;
pub mod pool;
pub mod resolve;
pub mod text;
pub mod types;
pub mod verbs;

pub use error::{ResolveError, Result};
pub use matcher::{contains_expression, highlight, ExpressionMatcher};
pub use pool::{build_pool, is_context_sentence};
pub use resolve::{resolve, resolve_meaning};
pub use text::{escape_markup, normalize_sentence, strip_markup, unique_sentences};
pub use types::{
    DefinitionCandidate, MeaningConfidence, MeaningMode, ResolvedMeaning, WordData,
};
