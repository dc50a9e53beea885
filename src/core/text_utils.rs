//! Text manipulation utilities for working with source lines.

/// Check if a character is considered part of a word (identifier).
///
/// Uses Unicode Standard Annex #31 rules for identifier characters, plus
/// `'` which Elm allows in identifiers (`model'`).
#[inline]
pub fn is_word_character(c: char) -> bool {
    unicode_ident::is_xid_continue(c) || c == '\''
}

/// Check if a character is part of a qualified token (identifier or `.`).
#[inline]
fn is_token_character(c: char) -> bool {
    is_word_character(c) || c == '.'
}

/// Find the boundaries of a word at the given position.
///
/// Returns `Some((start, end))` where `start` is the character index of the
/// word start and `end` is the character index after the last word
/// character. Returns `None` if there is no word at the position.
pub fn find_word_boundaries(chars: &[char], position: usize) -> Option<(usize, usize)> {
    if position >= chars.len() {
        return None;
    }

    if !is_word_character(chars[position]) {
        return None;
    }

    // Find start of word
    let mut start = position;
    while start > 0 && is_word_character(chars[start - 1]) {
        start -= 1;
    }

    // Find end of word
    let mut end = position;
    while end < chars.len() && is_word_character(chars[end]) {
        end += 1;
    }

    Some((start, end))
}

/// Extract the word (identifier) at the cursor position in a line of text.
///
/// Returns the word as a `String`, or `None` if there is no word at the
/// position.
///
/// # Example
/// ```
/// use glint::core::text_utils::extract_word_at_cursor;
///
/// let line = "update msg model";
/// assert_eq!(extract_word_at_cursor(line, 0), Some("update".to_string()));
/// assert_eq!(extract_word_at_cursor(line, 8), Some("msg".to_string()));
/// assert_eq!(extract_word_at_cursor(line, 6), None); // space
/// ```
pub fn extract_word_at_cursor(line: &str, position: usize) -> Option<String> {
    let chars: Vec<char> = line.chars().collect();

    let (start, end) = find_word_boundaries(&chars, position)?;

    Some(chars[start..end].iter().collect())
}

/// Extract the token at the cursor position in a line of text.
///
/// Unlike [`extract_word_at_cursor`], this keeps `.` separators, so it
/// extracts qualified names like `Json.Decode.string` as one token.
/// Leading and trailing dots are trimmed (a cursor on the `.` of `foo.`
/// yields `foo`). Returns `None` if there is no token at the position.
///
/// # Example
/// ```
/// use glint::core::text_utils::extract_token_at_cursor;
///
/// let line = "    Html.text model.title";
/// assert_eq!(extract_token_at_cursor(line, 5), Some("Html.text".to_string()));
/// assert_eq!(extract_token_at_cursor(line, 10), Some("Html.text".to_string()));
/// ```
pub fn extract_token_at_cursor(line: &str, position: usize) -> Option<String> {
    let chars: Vec<char> = line.chars().collect();

    if position >= chars.len() || !is_token_character(chars[position]) {
        return None;
    }

    // Find start of token
    let mut start = position;
    while start > 0 && is_token_character(chars[start - 1]) {
        start -= 1;
    }

    // Find end of token
    let mut end = position;
    while end < chars.len() && is_token_character(chars[end]) {
        end += 1;
    }

    let result: String = chars[start..end].iter().collect();
    let trimmed = result.trim_matches('.');

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_word_character() {
        assert!(is_word_character('a'));
        assert!(is_word_character('Z'));
        assert!(is_word_character('0'));
        assert!(is_word_character('_'));
        assert!(is_word_character('\''));
        assert!(!is_word_character(' '));
        assert!(!is_word_character('.'));
        assert!(!is_word_character('('));
    }

    #[test]
    fn test_find_word_boundaries() {
        let text = "foo bar_baz";
        let chars: Vec<char> = text.chars().collect();

        // Position in "foo"
        assert_eq!(find_word_boundaries(&chars, 0), Some((0, 3)));
        assert_eq!(find_word_boundaries(&chars, 2), Some((0, 3)));

        // Position in space
        assert_eq!(find_word_boundaries(&chars, 3), None);

        // Position in "bar_baz"
        assert_eq!(find_word_boundaries(&chars, 4), Some((4, 11)));
        assert_eq!(find_word_boundaries(&chars, 10), Some((4, 11)));
    }

    #[test]
    fn test_extract_word_at_cursor() {
        let line = "view model =";

        assert_eq!(extract_word_at_cursor(line, 0), Some("view".to_string()));
        assert_eq!(extract_word_at_cursor(line, 3), Some("view".to_string()));
        assert_eq!(extract_word_at_cursor(line, 5), Some("model".to_string()));

        // Spaces and '='
        assert_eq!(extract_word_at_cursor(line, 4), None);
        assert_eq!(extract_word_at_cursor(line, 11), None);
    }

    #[test]
    fn test_extract_word_out_of_bounds() {
        let line = "foo";
        assert_eq!(extract_word_at_cursor(line, 100), None);
    }

    #[test]
    fn test_extract_word_empty_line() {
        assert_eq!(extract_word_at_cursor("", 0), None);
    }

    #[test]
    fn test_extract_word_with_prime() {
        let line = "model' = step model";
        assert_eq!(extract_word_at_cursor(line, 0), Some("model'".to_string()));
        assert_eq!(extract_word_at_cursor(line, 5), Some("model'".to_string()));
    }

    #[test]
    fn test_unicode_identifiers() {
        let line = "où = αβγ";
        assert_eq!(extract_word_at_cursor(line, 0), Some("où".to_string()));
        assert_eq!(extract_word_at_cursor(line, 5), Some("αβγ".to_string()));
    }

    #[test]
    fn test_extract_token_qualified() {
        let line = "import Json.Decode exposing (field)";
        // Hovering over "Json"
        assert_eq!(
            extract_token_at_cursor(line, 7),
            Some("Json.Decode".to_string())
        );
        // Hovering over "Decode"
        assert_eq!(
            extract_token_at_cursor(line, 13),
            Some("Json.Decode".to_string())
        );
        // Hovering over the "."
        assert_eq!(
            extract_token_at_cursor(line, 11),
            Some("Json.Decode".to_string())
        );
    }

    #[test]
    fn test_extract_token_simple_name() {
        let line = "greet name = text name";
        assert_eq!(extract_token_at_cursor(line, 0), Some("greet".to_string()));
        assert_eq!(extract_token_at_cursor(line, 13), Some("text".to_string()));
    }

    #[test]
    fn test_extract_token_trailing_dot() {
        // Cursor mid-edit after typing the qualifier
        let line = "List.";
        assert_eq!(extract_token_at_cursor(line, 4), Some("List".to_string()));
    }

    #[test]
    fn test_extract_token_out_of_bounds() {
        assert_eq!(extract_token_at_cursor("foo", 10), None);
        assert_eq!(extract_token_at_cursor("", 0), None);
    }
}
