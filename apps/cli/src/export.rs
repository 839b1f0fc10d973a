//! Anki import file generation: one tab-separated front/back line per card.

use chrono::Local;

/// A finished card ready for export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportCard {
    pub front: String,
    pub back: String,
}

const UTF8_BOM: &str = "\u{feff}";

/// Newlines become `<br>` so multi-line fields survive the TSV format; tabs
/// become spaces so they cannot split fields.
fn sanitize_field(value: &str) -> String {
    value
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
        .replace('\t', " ")
        .trim()
        .to_string()
}

/// Build the full import file contents, BOM included.
pub fn build_import_file(cards: &[ExportCard]) -> String {
    let body = cards
        .iter()
        .map(|card| {
            format!(
                "{}\t{}",
                sanitize_field(&card.front),
                sanitize_field(&card.back)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{UTF8_BOM}{body}\n")
}

/// Dated default name for the import file.
pub fn default_file_name() -> String {
    format!("lexicard-cards-{}.tsv", Local::now().format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sanitizes_newlines_and_tabs() {
        assert_eq!(
            sanitize_field(" line one\r\nline two\tend "),
            "line one<br>line two end"
        );
    }

    #[test]
    fn builds_bom_prefixed_tsv() {
        let cards = vec![
            ExportCard {
                front: "front one".to_string(),
                back: "back one".to_string(),
            },
            ExportCard {
                front: "front two".to_string(),
                back: "back two".to_string(),
            },
        ];
        assert_eq!(
            build_import_file(&cards),
            "\u{feff}front one\tback one\nfront two\tback two\n"
        );
    }

    #[test]
    fn default_file_name_is_dated_tsv() {
        let name = default_file_name();
        assert!(name.starts_with("lexicard-cards-"));
        assert!(name.ends_with(".tsv"));
    }
}
