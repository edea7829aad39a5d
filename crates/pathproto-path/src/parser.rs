//! Path expression parser.

use thiserror::Error;

use crate::types::{PathExpr, Segment, Selector};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty path expression")]
    Empty,
    #[error("unexpected character `{ch}` at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("unexpected end of path expression")]
    UnexpectedEnd,
    #[error("invalid index at position {pos}")]
    InvalidIndex { pos: usize },
    #[error("empty bracket selector at position {pos}")]
    EmptySelector { pos: usize },
    #[error("invalid escape sequence at position {pos}")]
    InvalidEscape { pos: usize },
    #[error("unclosed quoted name starting at position {pos}")]
    UnclosedString { pos: usize },
}

/// Parse a path expression.
///
/// The dialect is slash-separated and context-relative:
///
/// - `name` and `a/b/c` select object members.
/// - `[0]`, `items[-1]` select array elements (0-based, negative from the end).
/// - `['odd name']` selects a member whose name contains metacharacters;
///   backslash escapes `\'`, `\"` and `\\` are recognized inside quotes.
/// - `*` and `[*]` select every member value or element.
/// - `a//b` selects `b` at any depth below `a`.
/// - `.` selects the context node; a single leading `/` is tolerated.
///
/// Syntax errors are reported as [`ParseError`]; lenient evaluation applies
/// to resolution, never to parsing.
pub fn parse(input: &str) -> Result<PathExpr, ParseError> {
    Parser { input, pos: 0 }.parse_path()
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn parse_path(&mut self) -> Result<PathExpr, ParseError> {
        if self.input.is_empty() {
            return Err(ParseError::Empty);
        }

        let mut segments = Vec::new();
        let mut descendant = self.eat_separator();
        if self.is_at_end() {
            // A bare `/` selects the context root; a bare `//` selects nothing
            // meaningful and is rejected.
            return if descendant {
                Err(ParseError::UnexpectedEnd)
            } else {
                Ok(PathExpr::new(segments))
            };
        }

        loop {
            self.parse_segment(descendant, &mut segments)?;
            match self.peek() {
                None => break,
                Some('/') => {
                    descendant = self.eat_separator();
                    if self.is_at_end() {
                        return Err(ParseError::UnexpectedEnd);
                    }
                }
                Some(ch) => {
                    return Err(ParseError::UnexpectedChar { ch, pos: self.pos });
                }
            }
        }

        Ok(PathExpr::new(segments))
    }

    /// Consume `/` or `//`, returning whether the doubled (descendant) form
    /// was seen. Consumes nothing when the next character is not `/`.
    fn eat_separator(&mut self) -> bool {
        if self.peek() == Some('/') {
            self.advance();
            if self.peek() == Some('/') {
                self.advance();
                return true;
            }
        }
        false
    }

    fn parse_segment(
        &mut self,
        descendant: bool,
        out: &mut Vec<Segment>,
    ) -> Result<(), ParseError> {
        match self.peek() {
            None => Err(ParseError::UnexpectedEnd),
            Some('[') => {
                let selector = self.parse_bracket_selector()?;
                out.push(Segment::new(selector, descendant));
                self.parse_trailing_selectors(out)
            }
            Some('*') => {
                self.advance();
                out.push(Segment::new(Selector::Wildcard, descendant));
                self.parse_trailing_selectors(out)
            }
            Some('.') => {
                // Self step: selects the current node, contributes no segment.
                if descendant {
                    return Err(ParseError::UnexpectedChar { ch: '.', pos: self.pos });
                }
                self.advance();
                self.parse_trailing_selectors(out)
            }
            Some(_) => {
                let name = self.parse_name();
                out.push(Segment::new(Selector::Name(name), descendant));
                self.parse_trailing_selectors(out)
            }
        }
    }

    /// Collect a bare member name: any run of characters up to a separator
    /// or an opening bracket.
    fn parse_name(&mut self) -> String {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch == '/' || ch == '[' {
                break;
            }
            self.advance();
        }
        self.input[start..self.pos].to_string()
    }

    /// Index selectors chained directly onto a step: `items[0][1]`.
    fn parse_trailing_selectors(&mut self, out: &mut Vec<Segment>) -> Result<(), ParseError> {
        while self.peek() == Some('[') {
            let selector = self.parse_bracket_selector()?;
            out.push(Segment::new(selector, false));
        }
        Ok(())
    }

    fn parse_bracket_selector(&mut self) -> Result<Selector, ParseError> {
        self.expect('[')?;
        self.skip_whitespace();

        let selector = match self.peek() {
            Some('\'') | Some('"') => Selector::Name(self.parse_quoted()?),
            Some('*') => {
                self.advance();
                Selector::Wildcard
            }
            Some('-') | Some('0'..='9') => Selector::Index(self.parse_index()?),
            Some(']') => return Err(ParseError::EmptySelector { pos: self.pos }),
            Some(ch) => return Err(ParseError::UnexpectedChar { ch, pos: self.pos }),
            None => return Err(ParseError::UnexpectedEnd),
        };

        self.skip_whitespace();
        self.expect(']')?;
        Ok(selector)
    }

    fn parse_index(&mut self) -> Result<isize, ParseError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.advance();
        }
        while matches!(self.peek(), Some('0'..='9')) {
            self.advance();
        }
        self.input[start..self.pos]
            .parse()
            .map_err(|_| ParseError::InvalidIndex { pos: start })
    }

    fn parse_quoted(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        let quote = self.advance().ok_or(ParseError::UnexpectedEnd)?;
        let mut name = String::new();
        loop {
            match self.advance() {
                None => return Err(ParseError::UnclosedString { pos: start }),
                Some('\\') => match self.advance() {
                    Some(ch @ ('\'' | '"' | '\\')) => name.push(ch),
                    Some(_) => return Err(ParseError::InvalidEscape { pos: self.pos }),
                    None => return Err(ParseError::UnclosedString { pos: start }),
                },
                Some(ch) if ch == quote => return Ok(name),
                Some(ch) => name.push(ch),
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_whitespace()) {
            self.advance();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.peek() {
            Some(ch) if ch == expected => {
                self.advance();
                Ok(())
            }
            Some(ch) => Err(ParseError::UnexpectedChar { ch, pos: self.pos }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }
}
