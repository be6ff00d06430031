//! Lexical layer shared by the path, transform and points parsers.

use crate::error::{Error, Result};

/// A path data token together with its byte offset in the source string.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum TokenKind {
    /// A single ASCII letter. Whether it names a known command is decided
    /// by the interpreter.
    Command(char),
    Number(f64),
}

impl Token {
    pub fn number(&self) -> Option<f64> {
        match self.kind {
            TokenKind::Number(value) => Some(value),
            TokenKind::Command(_) => None,
        }
    }
}

/// Whitespace (any control byte or space) and commas separate tokens.
pub(crate) fn is_separator(b: u8) -> bool {
    b <= b' ' || b == b','
}

pub(crate) fn is_whitespace(b: u8) -> bool {
    b <= b' '
}

pub(crate) fn skip_separators(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && is_separator(bytes[pos]) {
        pos += 1;
    }
    pos
}

pub(crate) fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && is_whitespace(bytes[pos]) {
        pos += 1;
    }
    pos
}

fn skip_digits(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    pos
}

/// Scan one numeric literal starting at `start`.
///
/// Grammar: `[+-]? (digits ('.' digits?)? | '.' digits) ([eE] [+-]? digits)?`.
/// The scan stops at the first byte that cannot extend the literal, so
/// `"1.5.5"` yields `1.5` and leaves `".5"` for the next call. An exponent
/// marker is only consumed when digits follow it.
///
/// Returns the value and the offset just past the literal.
pub(crate) fn scan_number(s: &str, start: usize) -> Result<(f64, usize)> {
    let bytes = s.as_bytes();
    let mut pos = start;

    if pos < bytes.len() && (bytes[pos] == b'+' || bytes[pos] == b'-') {
        pos += 1;
    }
    let int_end = skip_digits(bytes, pos);
    let mut mantissa_digits = int_end - pos;
    pos = int_end;
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_end = skip_digits(bytes, pos + 1);
        mantissa_digits += frac_end - (pos + 1);
        pos = frac_end;
    }
    if mantissa_digits == 0 {
        return Err(Error::Syntax(start));
    }

    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        let exp_end = skip_digits(bytes, exp);
        if exp_end > exp {
            pos = exp_end;
        }
    }

    let value = s[start..pos]
        .parse::<f64>()
        .map_err(|_| Error::Syntax(start))?;
    // Overflowing literals cannot be written back as path data.
    if !value.is_finite() {
        return Err(Error::Syntax(start));
    }
    Ok((value, pos))
}

/// Parse a flat list of numbers separated by whitespace and/or commas.
pub(crate) fn scan_numbers(s: &str) -> Result<Vec<f64>> {
    let bytes = s.as_bytes();
    let mut numbers = Vec::new();
    let mut pos = skip_separators(bytes, 0);
    while pos < bytes.len() {
        let (value, end) = scan_number(s, pos)?;
        numbers.push(value);
        pos = skip_separators(bytes, end);
    }
    Ok(numbers)
}

/// Split path data into command letters and numbers.
///
/// No grouping or validation of commands happens here; see
/// [`PathData::parse`](crate::PathData::parse).
pub fn tokenize(s: &str) -> Result<Vec<Token>> {
    let bytes = s.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let b = bytes[pos];
        if is_separator(b) {
            pos += 1;
        } else if b.is_ascii_alphabetic() {
            tokens.push(Token {
                kind: TokenKind::Command(char::from(b)),
                offset: pos,
            });
            pos += 1;
        } else {
            let (value, end) = scan_number(s, pos)?;
            tokens.push(Token {
                kind: TokenKind::Number(value),
                offset: pos,
            });
            pos = end;
        }
    }
    Ok(tokens)
}
