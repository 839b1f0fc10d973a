//! Card assembly: HTML front/back fields from resolved word data.

use lexicard_core::{escape_markup, highlight, WordData};

use crate::export::ExportCard;

/// Build the export card: front is the sentence with the expression bolded,
/// back carries the meaning and phonetic with escaped field text.
pub fn build(expression: &str, sentence: &str, data: &WordData) -> ExportCard {
    let meaning = escape_markup(data.definition.trim());
    let phonetic = escape_markup(data.phonetic.trim());

    ExportCard {
        front: highlight(sentence, expression),
        back: format!(
            "<small>Meaning:</small> {meaning}<br><small>Phonetic:</small> <b>{phonetic}</b>"
        ),
    }
}
