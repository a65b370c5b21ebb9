use std::collections::HashSet;

use crate::util::escape_markup;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordMark<'a> {
    Kept(&'a str),
    Inserted(&'a str),
}

/// Marks every corrected word that appears nowhere in the original.
///
/// This is a presence test against the original word set, not an alignment:
/// moved or repeated words count as kept.
pub fn mark_words<'a>(original: &str, corrected: &'a str) -> Vec<WordMark<'a>> {
    let known: HashSet<&str> = original.split_whitespace().collect();
    corrected
        .split_whitespace()
        .map(|word| {
            if known.contains(word) {
                WordMark::Kept(word)
            } else {
                WordMark::Inserted(word)
            }
        })
        .collect()
}

pub fn render_diff(original: &str, corrected: &str) -> String {
    mark_words(original, corrected)
        .iter()
        .map(|mark| match mark {
            WordMark::Kept(word) => escape_markup(word),
            WordMark::Inserted(word) => format!("<ins>{}</ins>", escape_markup(word)),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_appended_word() {
        assert_eq!(
            render_diff("The cat sat", "The cat sat down"),
            "The cat sat <ins>down</ins>"
        );
    }

    #[test]
    fn order_and_duplicates_are_invisible() {
        assert_eq!(render_diff("a b", "b a a"), "b a a");
    }

    #[test]
    fn case_and_punctuation_matter() {
        let marks = mark_words("she go to school", "She goes to school.");
        assert_eq!(
            marks,
            vec![
                WordMark::Inserted("She"),
                WordMark::Inserted("goes"),
                WordMark::Kept("to"),
                WordMark::Inserted("school."),
            ]
        );
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(
            render_diff("i  am\nhere", "  I am\there  "),
            "<ins>I</ins> am here"
        );
    }

    #[test]
    fn escapes_inserted_markup() {
        assert_eq!(
            render_diff("x", "x <b>"),
            "x <ins>&lt;b&gt;</ins>"
        );
    }
}
