//! Run segmentation
//!
//! Splits raw text into maximal runs of a single category (Chinese, Latin
//! word, number, punctuation, whitespace). The partition is lossless:
//! concatenating the runs in order reproduces the input exactly.
//!
//! Classification is a left-to-right scan over Unicode scalar values with a
//! fixed table, so run boundaries are explicit:
//!
//! - Chinese: CJK Unified Ideographs (U+4E00..U+9FFF) and Extension A
//!   (U+3400..U+4DBF)
//! - Latin: ASCII letters, with at most one internal apostrophe followed by
//!   letters (`don't` stays one run)
//! - Number: ASCII digits with at most one embedded decimal point that is
//!   followed by a digit (`3.14`)
//! - Whitespace: anything `char::is_whitespace` accepts
//! - Punctuation: everything else, including CJK punctuation and other scripts

use serde::Serialize;

use crate::mapping::CharSpan;

/// Category of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunKind {
    Chinese,
    Latin,
    Number,
    Punctuation,
    Whitespace,
}

/// A maximal substring of one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRun<'a> {
    pub kind: RunKind,
    pub text: &'a str,
    /// Byte span of `text` in the segmented input
    pub span: CharSpan,
}

/// Whether `ch` belongs to the ideograph blocks handled by the word breaker
pub fn is_chinese_char(ch: char) -> bool {
    matches!(ch, '\u{3400}'..='\u{4DBF}' | '\u{4E00}'..='\u{9FFF}')
}

/// Category a single character starts
pub fn classify_char(ch: char) -> RunKind {
    if is_chinese_char(ch) {
        RunKind::Chinese
    } else if ch.is_ascii_alphabetic() {
        RunKind::Latin
    } else if ch.is_ascii_digit() {
        RunKind::Number
    } else if ch.is_whitespace() {
        RunKind::Whitespace
    } else {
        RunKind::Punctuation
    }
}

/// Split `text` into runs. Total over every input; empty input yields no runs.
pub fn segment(text: &str) -> Vec<TextRun<'_>> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut runs = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let kind = classify_char(chars[i].1);
        let end = match kind {
            RunKind::Latin => scan_latin(&chars, i),
            RunKind::Number => scan_number(&chars, i),
            _ => scan_same(&chars, i, kind),
        };

        let start_byte = chars[i].0;
        let end_byte = chars.get(end).map_or(text.len(), |(pos, _)| *pos);
        runs.push(TextRun {
            kind,
            text: &text[start_byte..end_byte],
            span: CharSpan::new(start_byte, end_byte),
        });
        i = end;
    }

    runs
}

/// Extend while the category is unchanged. Returns the exclusive end index.
fn scan_same(chars: &[(usize, char)], start: usize, kind: RunKind) -> usize {
    let mut end = start + 1;
    while end < chars.len() && classify_char(chars[end].1) == kind {
        end += 1;
    }
    end
}

fn scan_latin(chars: &[(usize, char)], start: usize) -> usize {
    let mut end = scan_same(chars, start, RunKind::Latin);

    // one contraction: letters ' letters
    let apostrophe = chars.get(end).is_some_and(|(_, c)| *c == '\'');
    let letter_after = chars.get(end + 1).is_some_and(|(_, c)| c.is_ascii_alphabetic());
    if apostrophe && letter_after {
        end = scan_same(chars, end + 1, RunKind::Latin);
    }

    end
}

fn scan_number(chars: &[(usize, char)], start: usize) -> usize {
    let mut end = scan_same(chars, start, RunKind::Number);

    let point = chars.get(end).is_some_and(|(_, c)| *c == '.');
    let digit_after = chars.get(end + 1).is_some_and(|(_, c)| c.is_ascii_digit());
    if point && digit_after {
        end = scan_same(chars, end + 1, RunKind::Number);
    }

    end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_texts(text: &str) -> Vec<(RunKind, &str)> {
        segment(text).into_iter().map(|r| (r.kind, r.text)).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(segment("").is_empty());
    }

    #[test]
    fn test_mixed_text() {
        assert_eq!(
            kinds_and_texts("Hello 世界 123!"),
            vec![
                (RunKind::Latin, "Hello"),
                (RunKind::Whitespace, " "),
                (RunKind::Chinese, "世界"),
                (RunKind::Whitespace, " "),
                (RunKind::Number, "123"),
                (RunKind::Punctuation, "!"),
            ]
        );
    }

    #[test]
    fn test_contraction_is_one_run() {
        assert_eq!(
            kinds_and_texts("don't"),
            vec![(RunKind::Latin, "don't")]
        );
    }

    #[test]
    fn test_only_one_apostrophe_joins() {
        assert_eq!(
            kinds_and_texts("rock'n'roll"),
            vec![
                (RunKind::Latin, "rock'n"),
                (RunKind::Punctuation, "'"),
                (RunKind::Latin, "roll"),
            ]
        );
    }

    #[test]
    fn test_trailing_apostrophe_is_punctuation() {
        assert_eq!(
            kinds_and_texts("dogs' "),
            vec![
                (RunKind::Latin, "dogs"),
                (RunKind::Punctuation, "'"),
                (RunKind::Whitespace, " "),
            ]
        );
    }

    #[test]
    fn test_decimal_number() {
        assert_eq!(kinds_and_texts("3.14"), vec![(RunKind::Number, "3.14")]);
        assert_eq!(
            kinds_and_texts("1.2.3"),
            vec![
                (RunKind::Number, "1.2"),
                (RunKind::Punctuation, "."),
                (RunKind::Number, "3"),
            ]
        );
        assert_eq!(
            kinds_and_texts("7."),
            vec![(RunKind::Number, "7"), (RunKind::Punctuation, ".")]
        );
    }

    #[test]
    fn test_cjk_punctuation_and_other_scripts() {
        assert_eq!(
            kinds_and_texts("你好，café"),
            vec![
                (RunKind::Chinese, "你好"),
                (RunKind::Punctuation, "，"),
                (RunKind::Latin, "caf"),
                (RunKind::Punctuation, "é"),
            ]
        );
    }

    #[test]
    fn test_extension_a_is_chinese() {
        assert!(is_chinese_char('\u{3400}'));
        assert!(is_chinese_char('\u{9FFF}'));
        assert!(!is_chinese_char('\u{3002}'));
    }

    #[test]
    fn test_spans_cover_input() {
        let text = "a，b 12.5\t中文";
        let runs = segment(text);
        let mut cursor = 0;
        for run in &runs {
            assert_eq!(run.span.start, cursor);
            assert_eq!(run.span.slice(text), Some(run.text));
            cursor = run.span.end;
        }
        assert_eq!(cursor, text.len());
    }
}
