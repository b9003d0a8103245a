//! Annotation site scanning.
//!
//! An annotation site is a marker token followed by a delimited argument list
//! and, shortly after, the declaration it annotates:
//!
//! ```text
//! UPROPERTY(EditAnywhere, Category="Combat")   <- marker + arguments
//! float Damage = 10.0f;                        <- field: type, name, terminator
//!
//! UFUNCTION(LuaBind)
//! bool SetState(const FString& Name) const;    <- method: return type, name, params
//! ```
//!
//! The scanner is deliberately tolerant. A marker whose declaration cannot be
//! recovered inside the lookahead window (a marker in a comment, a macro
//! definition, ...) is skipped. Only an argument list that never closes is an
//! error, since everything after it would be misattributed.
//!
//! Scanning always resumes right after the consumed argument list, so each
//! byte of the unit is visited a bounded number of times.

use regex::Regex;

use reflgen_core::{ConfigError, ScanError};

use crate::balance::extract_balanced;
use crate::cursor::{Cursor, is_ident_continue, is_identifier};

/// Which declaration form follows the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationShape {
    /// `<type> <name>` terminated by `;`, `=` or `{`.
    Field,
    /// `<return type> <name>(<params>) [const]` terminated by `;` or `{`.
    Method,
}

/// Trailing part of a method declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodTail<'src> {
    /// Raw parameter list, without parentheses.
    pub parameters: &'src str,
    pub is_const: bool,
}

/// One recovered annotation site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationSite<'src> {
    /// Byte offset of the marker in the unit.
    pub offset: usize,
    /// Raw argument text, without parentheses.
    pub arguments: &'src str,
    /// Field type or method return type, trimmed.
    pub declared_type: &'src str,
    /// Field or method identifier.
    pub name: &'src str,
    /// Present for [`DeclarationShape::Method`] sites.
    pub method: Option<MethodTail<'src>>,
}

/// `(declared_type, name, method_tail)` of a recovered declaration.
type Recovered<'src> = (&'src str, &'src str, Option<MethodTail<'src>>);

/// Finds every site of one marker in a unit's text.
#[derive(Debug, Clone)]
pub struct AnnotationScanner {
    marker: Regex,
    shape: DeclarationShape,
    lookahead: usize,
}

impl AnnotationScanner {
    /// Build a scanner for `marker` (matched as a whole word, case-sensitive).
    pub fn new(marker: &str, shape: DeclarationShape, lookahead: usize) -> Result<Self, ConfigError> {
        let pattern = format!(r"\b{}\s*\(", regex::escape(marker));
        let marker = Regex::new(&pattern)
            .map_err(|e| ConfigError::Invalid(format!("marker '{marker}': {e}")))?;
        Ok(Self {
            marker,
            shape,
            lookahead,
        })
    }

    /// The declaration form this scanner recovers.
    pub fn shape(&self) -> DeclarationShape {
        self.shape
    }

    /// Lazily iterate the sites in `source`.
    ///
    /// The iterator borrows the scanner and can be recreated at will; each
    /// iteration starts from the beginning of the text.
    pub fn sites<'s, 'src>(&'s self, source: &'src str) -> AnnotationSites<'s, 'src> {
        AnnotationSites {
            scanner: self,
            source,
            pos: 0,
            done: false,
        }
    }

    /// Recover the declaration starting at `start`, or `None` to skip the site.
    fn recover<'src>(
        &self,
        source: &'src str,
        start: usize,
    ) -> Result<Option<Recovered<'src>>, ScanError> {
        let window = lookahead_window(source, start, self.lookahead);
        match self.shape {
            DeclarationShape::Field => Ok(recover_field(window).map(|(ty, name)| (ty, name, None))),
            DeclarationShape::Method => recover_method(source, start, window),
        }
    }
}

/// Iterator over the sites of one marker. Fused after the first error.
#[derive(Debug, Clone)]
pub struct AnnotationSites<'s, 'src> {
    scanner: &'s AnnotationScanner,
    source: &'src str,
    pos: usize,
    done: bool,
}

impl<'src> Iterator for AnnotationSites<'_, 'src> {
    type Item = Result<AnnotationSite<'src>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let Some(found) = self.scanner.marker.find_at(self.source, self.pos) else {
                self.done = true;
                break;
            };

            let args = match extract_balanced(self.source, found.end(), '(', ')') {
                Ok(args) => args,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };
            self.pos = args.end;

            match self.scanner.recover(self.source, args.end) {
                Ok(Some((declared_type, name, method))) => {
                    return Some(Ok(AnnotationSite {
                        offset: found.start(),
                        arguments: args.inner,
                        declared_type,
                        name,
                        method,
                    }));
                }
                Ok(None) => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

impl std::iter::FusedIterator for AnnotationSites<'_, '_> {}

/// `source[start..start + len]`, shortened to a character boundary.
fn lookahead_window(source: &str, start: usize, len: usize) -> &str {
    let mut end = start.saturating_add(len).min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    &source[start..end]
}

/// Whether text can be a declared type: identifiers, whitespace and `<>*&:,`.
fn is_type_text(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| is_ident_continue(c) || c.is_whitespace() || "<>*&:,".contains(c))
}

/// Split `<type> <identifier>` at the final identifier.
///
/// Leading `*`/`&` glued to the identifier (`UTexture *Tex`) belong to the type.
fn split_type_and_name(decl: &str) -> Option<(&str, &str)> {
    let decl = decl.trim_end();
    let name_start = decl
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_ident_continue(c))
        .last()
        .map(|(i, _)| i)?;
    let name = &decl[name_start..];
    let declared_type = decl[..name_start].trim();

    let separated = decl[..name_start]
        .chars()
        .last()
        .is_some_and(|c| c.is_whitespace() || c == '*' || c == '&');

    (separated && is_identifier(name) && is_type_text(declared_type)).then_some((declared_type, name))
}

/// Field form: the first of `;`, `=`, `{` bounds the declaration.
fn recover_field(window: &str) -> Option<(&str, &str)> {
    let boundary = window.find([';', '=', '{', '('])?;
    if window[boundary..].starts_with('(') {
        return None;
    }
    split_type_and_name(&window[..boundary])
}

/// Words allowed between a method's parameter list and its terminator.
const TRAILING_SPECIFIERS: [&str; 3] = ["override", "final", "noexcept"];

/// Consume `override`, `final`, `noexcept[(...)]` and a trailing `= 0`,
/// `= default` or `= delete`, leaving the cursor on the terminator.
///
/// Returns `false` when something else follows the parameter list.
fn skip_trailing_specifiers(cursor: &mut Cursor<'_>) -> Result<bool, ScanError> {
    loop {
        cursor.skip_whitespace();
        let start = cursor.offset();
        let word = cursor.eat_while(is_ident_continue);
        if word.is_empty() {
            break;
        }
        if !TRAILING_SPECIFIERS.contains(&word) {
            *cursor = Cursor::at(cursor.source(), start);
            return Ok(false);
        }
        if word == "noexcept" {
            cursor.skip_whitespace();
            if cursor.eat('(') {
                let condition = extract_balanced(cursor.source(), cursor.offset(), '(', ')')?;
                *cursor = Cursor::at(cursor.source(), condition.end);
            }
        }
    }

    if cursor.eat('=') {
        cursor.skip_whitespace();
        if !matches!(cursor.eat_while(is_ident_continue), "0" | "default" | "delete") {
            return Ok(false);
        }
        cursor.skip_whitespace();
    }
    Ok(true)
}

/// Method form: `<ret> <name>(` must start inside the window; the parameter
/// list itself is balanced against the full text.
fn recover_method<'src>(
    source: &'src str,
    start: usize,
    window: &'src str,
) -> Result<Option<Recovered<'src>>, ScanError> {
    let Some(paren) = window.find(['(', ';', '{', '=']) else {
        return Ok(None);
    };
    if !window[paren..].starts_with('(') {
        return Ok(None);
    }
    let Some((return_type, name)) = split_type_and_name(&window[..paren]) else {
        return Ok(None);
    };

    let params = extract_balanced(source, start + paren + 1, '(', ')')?;

    let mut cursor = Cursor::at(source, params.end);
    cursor.skip_whitespace();
    let is_const = cursor.eat_str("const") && !cursor.check(is_ident_continue);
    if !skip_trailing_specifiers(&mut cursor)? {
        return Ok(None);
    }
    if !cursor.check(|c| c == ';' || c == '{') {
        return Ok(None);
    }

    Ok(Some((
        return_type,
        name,
        Some(MethodTail {
            parameters: params.inner,
            is_const,
        }),
    )))
}
