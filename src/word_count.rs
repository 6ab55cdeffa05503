/// Word separator. Only the ASCII space splits words; tabs and other
/// whitespace are part of a word.
pub const WORD_SEPARATOR: u8 = b' ';

/// Count space-delimited words in `line` from byte offset `start` to the end.
///
/// A word is a maximal run of non-space bytes. Offsets at or past the end of
/// the line count nothing. The scan is byte-wise: a space byte never occurs
/// inside a multi-byte UTF-8 sequence, so an offset that lands mid-character
/// only shortens the first word, it never splits the count.
///
/// ```
/// use bardtally::word_count::count_words;
///
/// assert_eq!(count_words("one 2 three four five", 4), 4);
/// assert_eq!(count_words("one  two  three", 0), 3);
/// ```
pub fn count_words(line: &str, start: usize) -> u64 {
    let Some(tail) = line.as_bytes().get(start..) else {
        return 0;
    };

    let mut words = 0;
    let mut after_separator = true;
    for &byte in tail {
        let is_separator = byte == WORD_SEPARATOR;
        if after_separator && !is_separator {
            words += 1;
        }
        after_separator = is_separator;
    }
    words
}
