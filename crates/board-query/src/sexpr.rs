//! Minimal s-expression reader for the KiCad board format.
//!
//! KiCad files are lists of atoms and nested lists; atoms are bare tokens
//! or double-quoted strings with backslash escapes. The reader keeps
//! everything as strings; numeric interpretation happens at the accessors.

use thiserror::Error;

/// A parsed s-expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum SExpr {
    Atom(String),
    List(Vec<SExpr>),
}

#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("unexpected end of input at byte {offset}")]
    UnexpectedEof { offset: usize },

    #[error("unexpected `)` at byte {offset}")]
    UnbalancedClose { offset: usize },

    #[error("unterminated string starting at byte {offset}")]
    UnterminatedString { offset: usize },

    #[error("trailing content after document at byte {offset}")]
    TrailingContent { offset: usize },
}

impl SExpr {
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            SExpr::Atom(s) => Some(s),
            SExpr::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SExpr]> {
        match self {
            SExpr::Atom(_) => None,
            SExpr::List(items) => Some(items),
        }
    }

    /// First atom of a list: the node's tag.
    pub fn tag(&self) -> Option<&str> {
        self.as_list()?.first()?.as_atom()
    }

    /// First child list whose tag is `key`.
    pub fn get(&self, key: &str) -> Option<&SExpr> {
        self.as_list()?
            .iter()
            .find(|item| item.tag() == Some(key))
    }

    /// All child lists whose tag is `key`.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a SExpr> + 'a {
        self.as_list()
            .unwrap_or(&[])
            .iter()
            .filter(move |item| item.tag() == Some(key))
    }

    /// Atom at position `idx` of a list.
    pub fn atom_at(&self, idx: usize) -> Option<&str> {
        self.as_list()?.get(idx)?.as_atom()
    }

    /// Atom at position `idx`, parsed as f64.
    pub fn f64_at(&self, idx: usize) -> Option<f64> {
        self.atom_at(idx)?.parse().ok()
    }

    /// Value atom of a child list `(key value)`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)?.atom_at(1)
    }

    /// Value atom of a child list `(key value)`, parsed as f64.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get_str(key)?.parse().ok()
    }
}

/// Parse a complete document: exactly one top-level expression.
pub fn parse_document(input: &str) -> Result<SExpr, SyntaxError> {
    let bytes = input.as_bytes();
    let mut pos = 0usize;
    skip_whitespace(bytes, &mut pos);
    let expr = parse_expr(input, bytes, &mut pos)?;
    skip_whitespace(bytes, &mut pos);
    if pos < bytes.len() {
        return Err(SyntaxError::TrailingContent { offset: pos });
    }
    Ok(expr)
}

fn parse_expr(input: &str, bytes: &[u8], pos: &mut usize) -> Result<SExpr, SyntaxError> {
    match bytes.get(*pos) {
        None => Err(SyntaxError::UnexpectedEof { offset: *pos }),
        Some(b')') => Err(SyntaxError::UnbalancedClose { offset: *pos }),
        Some(b'(') => {
            *pos += 1;
            let mut items = Vec::new();
            loop {
                skip_whitespace(bytes, pos);
                match bytes.get(*pos) {
                    None => return Err(SyntaxError::UnexpectedEof { offset: *pos }),
                    Some(b')') => {
                        *pos += 1;
                        return Ok(SExpr::List(items));
                    }
                    Some(_) => items.push(parse_expr(input, bytes, pos)?),
                }
            }
        }
        Some(b'"') => parse_string(input, bytes, pos),
        Some(_) => parse_bare_atom(input, bytes, pos),
    }
}

fn parse_string(input: &str, bytes: &[u8], pos: &mut usize) -> Result<SExpr, SyntaxError> {
    let start = *pos;
    *pos += 1; // opening quote
    let mut value = String::new();
    loop {
        match bytes.get(*pos) {
            None => return Err(SyntaxError::UnterminatedString { offset: start }),
            Some(b'"') => {
                *pos += 1;
                return Ok(SExpr::Atom(value));
            }
            Some(b'\\') => {
                // KiCad escapes: \" \\ \n \t; anything else passes through.
                match bytes.get(*pos + 1) {
                    None => return Err(SyntaxError::UnterminatedString { offset: start }),
                    Some(b'n') => value.push('\n'),
                    Some(b't') => value.push('\t'),
                    Some(&c) => value.push(c as char),
                }
                *pos += 2;
            }
            Some(_) => {
                // Advance by whole chars so multi-byte UTF-8 survives.
                let ch = input[*pos..].chars().next().unwrap_or('\u{fffd}');
                value.push(ch);
                *pos += ch.len_utf8();
            }
        }
    }
}

fn parse_bare_atom(input: &str, bytes: &[u8], pos: &mut usize) -> Result<SExpr, SyntaxError> {
    let start = *pos;
    while let Some(&c) = bytes.get(*pos) {
        if c == b'(' || c == b')' || c == b'"' || c.is_ascii_whitespace() {
            break;
        }
        *pos += 1;
    }
    Ok(SExpr::Atom(input[start..*pos].to_string()))
}

fn skip_whitespace(bytes: &[u8], pos: &mut usize) {
    while let Some(&c) = bytes.get(*pos) {
        if c.is_ascii_whitespace() {
            *pos += 1;
        } else {
            break;
        }
    }
}
