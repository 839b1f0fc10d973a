//! Verb inflection tables and form generation used by the expression
//! matcher.
//!
//! `verb_forms` is deterministic: the same base verb always yields the same
//! form list in the same order (base, irregular forms, 3rd person, past,
//! present participle).

/// Particles that mark a two-token expression as a likely phrasal verb.
pub const PHRASAL_PARTICLES: &[&str] = &[
    "about", "across", "after", "along", "around", "away", "back", "down", "for", "in", "into",
    "off", "on", "out", "over", "through", "up",
];

/// Irregular forms for high-frequency verbs. Regular suffix rules still apply
/// on top of these.
const IRREGULAR_VERB_FORMS: &[(&str, &[&str])] = &[
    ("be", &["am", "are", "is", "was", "were", "been", "being"]),
    ("come", &["comes", "came", "coming"]),
    ("do", &["does", "did", "done", "doing"]),
    ("get", &["gets", "got", "gotten", "getting"]),
    ("give", &["gives", "gave", "given", "giving"]),
    ("go", &["goes", "went", "gone", "going"]),
    ("have", &["has", "had", "having"]),
    ("make", &["makes", "made", "making"]),
    ("run", &["runs", "ran", "running"]),
    ("take", &["takes", "took", "taken", "taking"]),
];

/// Whether `token` belongs to the closed phrasal-particle set.
pub fn is_phrasal_particle(token: &str) -> bool {
    PHRASAL_PARTICLES.contains(&token)
}

fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_consonant(ch: char) -> bool {
    ch.is_ascii_alphabetic() && !is_vowel(ch)
}

fn ends_consonant_y(verb: &str) -> bool {
    let mut chars = verb.chars().rev();
    chars.next() == Some('y') && chars.next().map_or(false, |prev| !is_vowel(prev))
}

// CVC stress-doubling heuristic: final consonant not in {w,x,y}, preceded by
// a vowel, preceded by a consonant.
fn doubles_final_consonant(verb: &str) -> bool {
    let chars: Vec<char> = verb.chars().collect();
    if chars.len() < 3 {
        return false;
    }
    let last = chars[chars.len() - 1];
    let middle = chars[chars.len() - 2];
    let first = chars[chars.len() - 3];
    is_consonant(last) && !matches!(last, 'w' | 'x' | 'y') && is_vowel(middle) && is_consonant(first)
}

fn push_unique(forms: &mut Vec<String>, form: String) {
    if !forms.contains(&form) {
        forms.push(form);
    }
}

/// Generate every recognized form of a base verb: the base itself, irregular
/// forms, the regular 3rd person, past, and present participle.
pub fn verb_forms(verb: &str) -> Vec<String> {
    let base = verb.trim().to_lowercase();
    if base.is_empty() {
        return Vec::new();
    }

    let mut forms = vec![base.clone()];

    if let Some((_, irregular)) = IRREGULAR_VERB_FORMS.iter().find(|(b, _)| *b == base) {
        for form in *irregular {
            push_unique(&mut forms, (*form).to_string());
        }
    }

    let third_person = if ["s", "sh", "ch", "x", "z", "o"]
        .iter()
        .any(|suffix| base.ends_with(suffix))
    {
        format!("{base}es")
    } else if ends_consonant_y(&base) {
        format!("{}ies", &base[..base.len() - 1])
    } else {
        format!("{base}s")
    };
    push_unique(&mut forms, third_person);

    let past = if base.ends_with('e') {
        format!("{base}d")
    } else if ends_consonant_y(&base) {
        format!("{}ied", &base[..base.len() - 1])
    } else {
        format!("{base}ed")
    };
    push_unique(&mut forms, past);

    let participle = if base.ends_with("ie") {
        format!("{}ying", &base[..base.len() - 2])
    } else if base.ends_with('e') && !base.ends_with("ee") {
        format!("{}ing", &base[..base.len() - 1])
    } else if doubles_final_consonant(&base) {
        let last = base.chars().last().unwrap_or_default();
        format!("{base}{last}ing")
    } else {
        format!("{base}ing")
    };
    push_unique(&mut forms, participle);

    forms
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn forms(verb: &str) -> Vec<String> {
        verb_forms(verb)
    }

    #[test]
    fn includes_irregular_forms() {
        let go = forms("go");
        for expected in ["go", "goes", "went", "gone", "going"] {
            assert!(go.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[test]
    fn regular_third_person_rules() {
        assert!(forms("watch").contains(&"watches".to_string()));
        assert!(forms("try").contains(&"tries".to_string()));
        assert!(forms("turn").contains(&"turns".to_string()));
    }

    #[test]
    fn regular_past_rules() {
        assert!(forms("agree").contains(&"agreed".to_string()));
        assert!(forms("try").contains(&"tried".to_string()));
        assert!(forms("turn").contains(&"turned".to_string()));
    }

    #[test]
    fn participle_rules() {
        assert!(forms("die").contains(&"dying".to_string()));
        assert!(forms("make").contains(&"making".to_string()));
        assert!(forms("agree").contains(&"agreeing".to_string()));
        assert!(forms("stop").contains(&"stopping".to_string()));
        assert!(forms("try").contains(&"trying".to_string()));
    }

    #[test]
    fn deterministic_order_and_no_duplicates() {
        let first = forms("give");
        assert_eq!(first, forms("give"));

        let mut deduped = first.clone();
        deduped.dedup();
        assert_eq!(first.len(), deduped.len());
        assert_eq!(first[0], "give");
    }

    #[test]
    fn empty_verb_has_no_forms() {
        assert!(forms("  ").is_empty());
    }

    #[test]
    fn particle_set_membership() {
        assert!(is_phrasal_particle("off"));
        assert!(is_phrasal_particle("up"));
        assert!(!is_phrasal_particle("lights"));
    }
}
