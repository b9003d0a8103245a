/// A cursor over unit text that tracks position.
///
/// Provides low-level character access with peek/advance semantics.
/// Positions are byte offsets into the full source, so slices taken from
/// the cursor can be handed back to callers without copying.
pub struct Cursor<'src> {
    /// The source text being scanned.
    source: &'src str,
    /// Remaining source text (slice starting at current position).
    rest: &'src str,
    /// Current byte offset from start of source.
    offset: usize,
}

impl<'src> Cursor<'src> {
    /// Create a new cursor at the start of the source.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            offset: 0,
        }
    }

    /// Create a cursor positioned at `offset`.
    ///
    /// `offset` must lie on a character boundary.
    pub fn at(source: &'src str, offset: usize) -> Self {
        debug_assert!(source.is_char_boundary(offset));
        Self {
            source,
            rest: &source[offset..],
            offset,
        }
    }

    /// Get the full source text.
    #[inline]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Current byte offset from start of source.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Check if we've reached the end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.rest.is_empty()
    }

    /// Peek at the current character without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        let bytes = self.rest.as_bytes();
        let first = *bytes.first()?;
        if first < 128 {
            Some(first as char)
        } else {
            self.rest.chars().next()
        }
    }

    /// Check if the current character satisfies a predicate.
    #[inline]
    pub fn check(&self, f: impl Fn(char) -> bool) -> bool {
        self.peek().is_some_and(f)
    }

    /// Check if the upcoming bytes match the given string.
    #[inline]
    pub fn check_str(&self, s: &str) -> bool {
        self.rest.starts_with(s)
    }

    /// Consume the current character and advance.
    ///
    /// Returns the consumed character, or `None` if at EOF.
    #[inline]
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        let len = ch.len_utf8();
        self.rest = &self.rest[len..];
        self.offset += len;
        Some(ch)
    }

    /// Consume if the current character matches.
    #[inline]
    pub fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the given string if the input starts with it.
    pub fn eat_str(&mut self, s: &str) -> bool {
        if self.check_str(s) {
            self.rest = &self.rest[s.len()..];
            self.offset += s.len();
            true
        } else {
            false
        }
    }

    /// Consume characters while the predicate matches.
    ///
    /// Returns the consumed slice.
    pub fn eat_while(&mut self, f: impl Fn(char) -> bool) -> &'src str {
        let start = self.offset;
        while self.check(&f) {
            self.advance();
        }
        &self.source[start..self.offset]
    }

    /// Consume whitespace.
    #[inline]
    pub fn skip_whitespace(&mut self) {
        self.eat_while(char::is_whitespace);
    }

    /// Consume a string literal body after its opening quote, honoring `\` escapes.
    ///
    /// Returns `false` if the input ended before the closing quote.
    pub fn skip_string(&mut self, quote: char) -> bool {
        while let Some(ch) = self.advance() {
            if ch == '\\' {
                self.advance();
            } else if ch == quote {
                return true;
            }
        }
        false
    }

    /// Get a slice of source from a starting offset to current position.
    #[inline]
    pub fn slice_from(&self, start: usize) -> &'src str {
        &self.source[start..self.offset]
    }
}

/// Check if a character can start an identifier.
#[inline]
pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier.
#[inline]
pub fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Check if a whole string is a single identifier.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(is_ident_start) && chars.all(is_ident_continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cursor = Cursor::new("hello");
        assert_eq!(cursor.peek(), Some('h'));
        assert_eq!(cursor.offset(), 0);

        assert_eq!(cursor.advance(), Some('h'));
        assert_eq!(cursor.peek(), Some('e'));
        assert_eq!(cursor.offset(), 1);
    }

    #[test]
    fn cursor_at_offset() {
        let cursor = Cursor::at("UPROPERTY(x)", 10);
        assert_eq!(cursor.peek(), Some('x'));
        assert_eq!(cursor.offset(), 10);
        assert_eq!(cursor.source(), "UPROPERTY(x)");
    }

    #[test]
    fn cursor_eat() {
        let mut cursor = Cursor::new("hello");

        assert!(cursor.eat('h'));
        assert!(!cursor.eat('h')); // Already consumed
        assert!(cursor.eat('e'));
    }

    #[test]
    fn cursor_eat_str() {
        let mut cursor = Cursor::new("const;");
        assert!(!cursor.eat_str("constexpr"));
        assert!(cursor.eat_str("const"));
        assert_eq!(cursor.peek(), Some(';'));
    }

    #[test]
    fn cursor_eat_while() {
        let mut cursor = Cursor::new("aaabbb");

        let as_ = cursor.eat_while(|c| c == 'a');
        assert_eq!(as_, "aaa");

        let bs = cursor.eat_while(|c| c == 'b');
        assert_eq!(bs, "bbb");

        assert!(cursor.is_eof());
    }

    #[test]
    fn cursor_utf8() {
        let mut cursor = Cursor::new("한a");
        assert_eq!(cursor.advance(), Some('한'));
        assert_eq!(cursor.offset(), 3);
        assert_eq!(cursor.advance(), Some('a'));
        assert!(cursor.is_eof());
    }

    #[test]
    fn cursor_skip_string() {
        let mut cursor = Cursor::new(r#"a \"quoted\" b" rest"#);
        assert!(cursor.skip_string('"'));
        assert_eq!(cursor.slice_from(cursor.offset()), "");
        assert_eq!(&cursor.source()[cursor.offset()..], " rest");

        let mut unterminated = Cursor::new("never closed");
        assert!(!unterminated.skip_string('"'));
        assert!(unterminated.is_eof());
    }

    #[test]
    fn cursor_slice_from() {
        let mut cursor = Cursor::new("hello world");
        let start = cursor.offset();

        cursor.eat_while(is_ident_continue);
        assert_eq!(cursor.slice_from(start), "hello");

        cursor.skip_whitespace();
        let word_start = cursor.offset();
        cursor.eat_while(is_ident_continue);
        assert_eq!(cursor.slice_from(word_start), "world");
    }

    #[test]
    fn is_ident() {
        assert!(is_ident_start('a'));
        assert!(is_ident_start('_'));
        assert!(!is_ident_start('0'));

        assert!(is_ident_continue('a'));
        assert!(is_ident_continue('0'));
        assert!(!is_ident_continue('-'));

        assert!(is_identifier("Damage"));
        assert!(is_identifier("_m2"));
        assert!(!is_identifier("2x"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("*Tex"));
    }
}
