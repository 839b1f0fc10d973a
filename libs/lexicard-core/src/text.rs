//! Text normalization and escaping primitives shared by the matcher,
//! extractor, and card-building callers.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid markup tag pattern"));

/// Collapse any run of whitespace to a single space and trim the edges.
///
/// Idempotent: normalizing an already-normalized sentence is a no-op.
pub fn normalize_sentence(sentence: &str) -> String {
    sentence.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape regex metacharacters so a literal string can be embedded in a
/// generated match pattern.
pub fn escape_pattern(value: &str) -> String {
    regex::escape(value)
}

/// Replace every `<...>` markup segment with a single space, so tags that
/// stand in for whitespace (like `<br>`) never fuse adjacent words. An
/// unterminated `<` is kept as literal text.
pub fn strip_markup(value: &str) -> String {
    MARKUP_TAG.replace_all(value, " ").into_owned()
}

/// Escape `& < > " '` to their entity forms for embedding text into HTML
/// card fields.
pub fn escape_markup(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(ch),
        }
    }
    output
}

/// Normalize sentences, drop empties, and deduplicate case-insensitively,
/// keeping first-seen order.
pub fn unique_sentences<I, S>(sentences: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut output = Vec::new();

    for raw in sentences {
        let sentence = normalize_sentence(raw.as_ref());
        if sentence.is_empty() {
            continue;
        }
        if seen.insert(sentence.to_lowercase()) {
            output.push(sentence);
        }
    }

    output
}
