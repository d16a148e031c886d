//! Lenient recursive-descent parser.
//!
//! The accepted grammar is a superset of JSON: `/* */` and `//` comments,
//! unquoted object keys, single-quoted strings, optional trailing commas,
//! `\xHH` byte escapes and backslash line continuations. Failures carry
//! the line they happened on.

use bstr::BString;
use thiserror::Error;

use crate::value::{Array, Object, Value};

#[derive(Debug, Error)]
#[error("parse error at line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

/// Parse one document value from `text`. Content after the value is
/// ignored.
pub fn parse(text: &str) -> Result<Value, ParseError> {
    Parser::new(text).parse_value()
}

struct Parser<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 0x0a),
        b'A'..=b'F' => Some(b - b'A' + 0x0a),
        _ => None,
    }
}

fn is_key_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'$' || b == b'_'
}

fn is_key_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'$' || b == b'_' || b == b'-'
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Parser {
            input: text.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            line: self.line,
            message: message.into(),
        }
    }

    // consumes a newline at the cursor, treating CRLF as one line break
    fn newline(&mut self) {
        if self.peek() == Some(b'\r') {
            self.pos += 1;
            if self.peek() == Some(b'\n') {
                self.pos += 1;
            }
        } else {
            self.pos += 1;
        }
        self.line += 1;
    }

    fn skip_space(&mut self) {
        while let Some(b) = self.peek() {
            match b {
                b'\n' | b'\r' => self.newline(),
                b' ' | b'\t' | 0x0b | 0x0c => self.pos += 1,
                _ => break,
            }
        }
    }

    // cursor sits on '/'
    fn skip_comment(&mut self) -> Result<(), ParseError> {
        match self.peek_at(1) {
            Some(b'*') => {
                self.pos += 2;
                loop {
                    match self.peek() {
                        None => return Err(self.error("unterminated comment")),
                        Some(b'*') if self.peek_at(1) == Some(b'/') => {
                            self.pos += 2;
                            return Ok(());
                        }
                        Some(b'\n') | Some(b'\r') => self.newline(),
                        Some(_) => self.pos += 1,
                    }
                }
            }
            Some(b'/') => {
                self.pos += 2;
                // the newline itself is left for skip_space to count
                while let Some(b) = self.peek() {
                    if b == b'\n' || b == b'\r' {
                        break;
                    }
                    self.pos += 1;
                }
                Ok(())
            }
            _ => Err(self.error("unexpected character `/`")),
        }
    }

    // whitespace and comments, interleaved
    fn skip_blanks(&mut self) -> Result<(), ParseError> {
        loop {
            self.skip_space();
            if self.peek() == Some(b'/') {
                self.skip_comment()?;
            } else {
                return Ok(());
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        self.skip_blanks()?;
        match self.peek() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') | Some(b'\'') => Ok(Value::String(self.parse_string()?)),
            Some(b'-') | Some(b'+') | Some(b'.') | Some(b'0'..=b'9') => self.parse_number(),
            Some(b't') => self.parse_keyword("true", Value::Bool(true)),
            Some(b'f') => self.parse_keyword("false", Value::Bool(false)),
            Some(b'n') => self.parse_keyword("null", Value::Null),
            Some(b) => Err(self.error(format!("unexpected character `{}`", b as char))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_object(&mut self) -> Result<Value, ParseError> {
        self.pos += 1; // '{'
        let mut object = Object::new();
        loop {
            self.skip_blanks()?;
            match self.peek() {
                None => return Err(self.error("unexpected end of input in object")),
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(Value::Object(object));
                }
                _ => {}
            }
            let key = self.parse_key()?;
            self.skip_blanks()?;
            if self.peek() != Some(b':') {
                return Err(self.error("expected `:` after object key"));
            }
            self.pos += 1;
            let value = self.parse_value()?;
            object.set(key, value);
            self.skip_blanks()?;
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(Value::Object(object));
                }
                Some(b) => {
                    return Err(self.error(format!(
                        "expected `,` or `}}` in object, found `{}`",
                        b as char
                    )))
                }
                None => return Err(self.error("unexpected end of input in object")),
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value, ParseError> {
        self.pos += 1; // '['
        let mut array = Array::new();
        loop {
            self.skip_blanks()?;
            match self.peek() {
                None => return Err(self.error("unexpected end of input in array")),
                Some(b']') => {
                    self.pos += 1;
                    return Ok(Value::Array(array));
                }
                _ => {}
            }
            array.append(self.parse_value()?);
            self.skip_blanks()?;
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    return Ok(Value::Array(array));
                }
                Some(b) => {
                    return Err(self.error(format!(
                        "expected `,` or `]` in array, found `{}`",
                        b as char
                    )))
                }
                None => return Err(self.error("unexpected end of input in array")),
            }
        }
    }

    fn parse_key(&mut self) -> Result<BString, ParseError> {
        match self.peek() {
            Some(b'"') | Some(b'\'') => self.parse_string(),
            Some(b) if is_key_start(b) => {
                let mut key = vec![b];
                self.pos += 1;
                while let Some(b) = self.peek() {
                    if !is_key_continue(b) {
                        break;
                    }
                    key.push(b);
                    self.pos += 1;
                }
                Ok(BString::from(key))
            }
            Some(b) => Err(self.error(format!("expected object key, found `{}`", b as char))),
            None => Err(self.error("unexpected end of input in object")),
        }
    }

    fn parse_string(&mut self) -> Result<BString, ParseError> {
        let quote = match self.peek() {
            Some(b) => b,
            None => return Err(self.error("unexpected end of input")),
        };
        self.pos += 1;
        let mut out = Vec::new();
        loop {
            match self.peek() {
                None => {
                    return Err(self.error(format!(
                        "end of input before closing `{}` in string",
                        quote as char
                    )))
                }
                Some(b) if b == quote => {
                    self.pos += 1;
                    return Ok(BString::from(out));
                }
                Some(b'\\') => match self.peek_at(1) {
                    // line continuation: backslash-newline emits nothing
                    Some(b'\r') | Some(b'\n') => {
                        self.pos += 1;
                        self.newline();
                    }
                    _ => out.push(self.unescape()?),
                },
                Some(b) => {
                    out.push(b);
                    self.pos += 1;
                }
            }
        }
    }

    // cursor sits on the backslash
    fn unescape(&mut self) -> Result<u8, ParseError> {
        self.pos += 1;
        let b = match self.peek() {
            Some(b) => b,
            None => return Err(self.error("end of input in escape sequence")),
        };
        self.pos += 1;
        match b {
            b'\\' => Ok(b'\\'),
            b'/' => Ok(b'/'),
            b'\'' => Ok(b'\''),
            b'"' => Ok(b'"'),
            b'a' => Ok(0x07),
            b'b' => Ok(0x08),
            b'f' => Ok(0x0c),
            b'n' => Ok(b'\n'),
            b'r' => Ok(b'\r'),
            b't' => Ok(b'\t'),
            b'0' => Ok(0x00),
            b'x' => {
                let hi = self.peek().and_then(hex_value);
                let lo = self.peek_at(1).and_then(hex_value);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => {
                        self.pos += 2;
                        Ok((hi << 4) | lo)
                    }
                    _ => Err(self.error("invalid escape sequence `\\x`")),
                }
            }
            other => Err(self.error(format!("invalid escape sequence `\\{}`", other as char))),
        }
    }

    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;
        let mut is_real = false;
        if matches!(self.peek(), Some(b'+') | Some(b'-')) {
            self.pos += 1;
        }
        let mut digits = 0;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
            digits += 1;
        }
        if self.peek() == Some(b'.') {
            is_real = true;
            self.pos += 1;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
                digits += 1;
            }
        }
        if digits == 0 {
            return Err(self.error("invalid number"));
        }
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            is_real = true;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                self.pos += 1;
            }
            let mut exp_digits = 0;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
                exp_digits += 1;
            }
            if exp_digits == 0 {
                return Err(self.error("missing exponent digits in number"));
            }
        }
        // the scanned span is all ASCII
        let text = std::str::from_utf8(&self.input[start..self.pos]).unwrap();
        if !is_real {
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Value::Integer(n));
            }
            // magnitude beyond i64 degrades to a real
        }
        match text.parse::<f64>() {
            Ok(x) => Ok(Value::Real(x)),
            Err(_) => Err(self.error(format!("invalid number `{}`", text))),
        }
    }

    fn parse_keyword(&mut self, word: &str, value: Value) -> Result<Value, ParseError> {
        if self.input[self.pos..].starts_with(word.as_bytes()) {
            self.pos += word.len();
            Ok(value)
        } else {
            Err(self.error(format!("expected `{}`", word)))
        }
    }
}
