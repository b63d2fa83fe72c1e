//! `wrap` — Word-wrap a phrase into rows of a maximum width.
//!
//! This is a greedy, editor-style reflow: words are packed left to right
//! into the current row while they fit, and a word longer than the whole
//! row is hard-broken into exact-width slices. There is no backtracking and
//! no attempt to balance line lengths.
//!
//! Widths are counted in characters, not bytes, so multi-byte input wraps
//! without slicing through a code point. The phrase is split on *single*
//! spaces; a run of spaces therefore yields empty words, which are kept
//! (they re-append as the extra spaces they came from rather than being
//! collapsed).

/// Wrap `phrase` into rows no longer than `width` characters.
///
/// `width` must be positive; the caller validates that before reaching
/// this function.
#[must_use]
pub fn wrap_phrase(phrase: &str, width: usize) -> Vec<String> {
    let mut rows: Vec<String> = Vec::new();
    let mut buffer: Vec<char> = Vec::new();

    for word in phrase.split(' ') {
        let mut word: Vec<char> = word.chars().collect();

        if buffer.is_empty() {
            hard_break(&mut word, width, &mut rows);
            buffer = word;
            continue;
        }

        if buffer.len() + 1 + word.len() <= width {
            buffer.push(' ');
            buffer.extend(word);
        } else {
            rows.push(buffer.iter().collect());
            hard_break(&mut word, width, &mut rows);
            buffer = word;
        }
    }

    if !buffer.is_empty() {
        rows.push(buffer.iter().collect());
    }

    rows
}

/// Emit exact-width prefix rows until the remainder of `word` fits.
fn hard_break(word: &mut Vec<char>, width: usize, rows: &mut Vec<String>) {
    while word.len() > width {
        rows.push(word[..width].iter().collect());
        word.drain(..width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_words_two_rows() {
        assert_eq!(wrap_phrase("AAAA BBBB", 4), vec!["AAAA", "BBBB"]);
    }

    #[test]
    fn test_words_packed_onto_one_row() {
        assert_eq!(wrap_phrase("AB CD", 5), vec!["AB CD"]);
    }

    #[test]
    fn test_hard_break_long_word() {
        assert_eq!(wrap_phrase("AAAAAAAAA", 4), vec!["AAAA", "AAAA", "A"]);
    }

    #[test]
    fn test_hard_break_after_partial_row() {
        // "AB" fills the row, then the long word breaks on its own rows
        assert_eq!(wrap_phrase("AB CCCCC", 4), vec!["AB", "CCCC", "C"]);
    }

    #[test]
    fn test_exact_fit_word() {
        assert_eq!(wrap_phrase("ABCD", 4), vec!["ABCD"]);
    }

    #[test]
    fn test_empty_phrase() {
        assert!(wrap_phrase("", 4).is_empty());
    }

    #[test]
    fn test_spaces_only_phrase() {
        // nothing but empty words; the buffer never becomes non-empty
        assert!(wrap_phrase("   ", 4).is_empty());
    }

    #[test]
    fn test_double_space_preserved_within_row() {
        // the empty word between "A" and "B" re-appends as a second space
        assert_eq!(wrap_phrase("A  B", 6), vec!["A  B"]);
    }

    #[test]
    fn test_double_space_no_extra_row_break() {
        // the empty word joins the first row as a trailing space; no
        // extra row appears beyond the normal overflow break
        assert_eq!(wrap_phrase("AA  BB", 4), vec!["AA ", "BB"]);
    }

    #[test]
    fn test_multibyte_characters_counted_not_sliced() {
        assert_eq!(wrap_phrase("ééééé", 2), vec!["éé", "éé", "é"]);
    }

    #[test]
    fn test_width_one() {
        assert_eq!(wrap_phrase("AB C", 1), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_rows_concatenate_back_to_phrase_words() {
        let rows = wrap_phrase("the quick brown fox", 7);
        assert_eq!(rows, vec!["the", "quick", "brown", "fox"]);
        for row in &rows {
            assert!(row.chars().count() <= 7);
        }
    }
}
