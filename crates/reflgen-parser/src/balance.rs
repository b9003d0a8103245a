//! Delimiter-balanced span extraction.
//!
//! Annotation arguments and parameter lists routinely nest the delimiter
//! that closes them (`Range="0,1", meta=(ClampMin=(0))`, `TArray<TPair<A, B>>`),
//! so every capture here counts depth instead of searching for the next
//! closing character. Double-quoted strings are skipped wholesale: a `)`
//! inside a tooltip does not close anything.

use reflgen_core::{ScanError, Span};

use crate::cursor::Cursor;

/// Text enclosed by a matched delimiter pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalancedSpan<'src> {
    /// Text between the opening and the matching closing delimiter.
    pub inner: &'src str,
    /// Byte offset immediately after the matching closing delimiter.
    pub end: usize,
}

/// Extract the text enclosed by `open`/`close`, starting just past an
/// already-consumed opening delimiter (depth 1).
///
/// Fails with [`ScanError::UnbalancedDelimiter`] if the text ends before the
/// depth returns to zero; the span points at the opening delimiter.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn extract_balanced(
    source: &str,
    start: usize,
    open: char,
    close: char,
) -> Result<BalancedSpan<'_>, ScanError> {
    let mut cursor = Cursor::at(source, start);
    let mut depth = 1usize;

    while let Some(ch) = cursor.advance() {
        if ch == '"' {
            if !cursor.skip_string('"') {
                break;
            }
        } else if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                let close_at = cursor.offset() - close.len_utf8();
                return Ok(BalancedSpan {
                    inner: &source[start..close_at],
                    end: cursor.offset(),
                });
            }
        }
    }

    let open_at = start.saturating_sub(open.len_utf8());
    Err(ScanError::UnbalancedDelimiter {
        open,
        close,
        span: Span::from_offset(source, open_at, open.len_utf8()),
    })
}

/// Byte offsets of `separator` occurrences outside quotes and outside any
/// `()`, `[]`, `{}` or `<>` nesting.
fn top_level_positions(text: &str, separator: char) -> Vec<usize> {
    let mut cursor = Cursor::new(text);
    let mut depth = 0usize;
    let mut positions = Vec::new();

    while let Some(ch) = cursor.peek() {
        let at = cursor.offset();
        cursor.advance();
        match ch {
            '"' => {
                cursor.skip_string('"');
            }
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' | '>' => depth = depth.saturating_sub(1),
            _ if ch == separator && depth == 0 => positions.push(at),
            _ => {}
        }
    }

    positions
}

/// Split on `separator` at nesting depth zero.
///
/// Always yields at least one segment; segments are not trimmed.
pub fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    for at in top_level_positions(text, separator) {
        segments.push(&text[start..at]);
        start = at + separator.len_utf8();
    }
    segments.push(&text[start..]);
    segments
}

/// Offset of the first top-level `separator`, if any.
pub fn find_top_level(text: &str, separator: char) -> Option<usize> {
    top_level_positions(text, separator).first().copied()
}
