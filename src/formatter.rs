//! Pretty-printing serializer.
//!
//! Renders a value tree back to text in a fixed dialect: 4-space indents,
//! object pairs in key order, single-quoted strings with `\xHH` escapes
//! for anything outside printable ASCII. The output is pure ASCII and is
//! only guaranteed to re-parse with this crate's parser.

use std::fmt;

use bstr::BStr;

use crate::value::Value;

const INDENT: usize = 4;

pub fn serialize(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}

fn write_value(out: &mut String, value: &Value, indent: usize) {
    match value {
        Value::Object(object) => {
            out.push('{');
            if !object.is_empty() {
                for (key, value) in object.iter() {
                    out.push('\n');
                    push_indent(out, indent + INDENT);
                    write_key(out, key);
                    out.push_str(": ");
                    write_value(out, value, indent + INDENT);
                    out.push(',');
                }
                out.pop(); // trailing comma
                out.push('\n');
                push_indent(out, indent);
            }
            out.push('}');
        }
        Value::Array(array) => {
            out.push('[');
            if !array.is_empty() {
                for value in array.iter() {
                    out.push('\n');
                    push_indent(out, indent + INDENT);
                    write_value(out, value, indent + INDENT);
                    out.push(',');
                }
                out.pop();
                out.push('\n');
                push_indent(out, indent);
            }
            out.push(']');
        }
        Value::String(s) => write_string(out, s.as_ref()),
        Value::Integer(n) => out.push_str(&n.to_string()),
        Value::Real(x) => write_real(out, *x),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Null => out.push_str("null"),
    }
}

fn push_indent(out: &mut String, width: usize) {
    for _ in 0..width {
        out.push(' ');
    }
}

// identifier keys render bare, like the input grammar's unquoted keys;
// anything else is quoted so it survives a re-parse
fn write_key(out: &mut String, key: &BStr) {
    if is_bare_key(key) {
        for &b in key.iter() {
            out.push(b as char);
        }
    } else {
        write_string(out, key);
    }
}

fn is_bare_key(key: &BStr) -> bool {
    let first = match key.first() {
        Some(&b) => b,
        None => return false,
    };
    (first.is_ascii_alphabetic() || first == b'$' || first == b'_')
        && key
            .iter()
            .all(|&b| b.is_ascii_alphanumeric() || b == b'$' || b == b'_' || b == b'-')
}

fn write_string(out: &mut String, bytes: &BStr) {
    out.push('\'');
    for &b in bytes.iter() {
        match b {
            0x08 => out.push_str("\\b"),
            0x0c => out.push_str("\\f"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b'\'' => out.push_str("\\'"),
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            0x00 => out.push_str("\\0"),
            0x20..=0x7e => out.push(b as char),
            _ => {
                const HEX: &[u8; 16] = b"0123456789abcdef";
                out.push_str("\\x");
                out.push(HEX[(b >> 4) as usize] as char);
                out.push(HEX[(b & 0xf) as usize] as char);
            }
        }
    }
    out.push('\'');
}

// always keeps a '.' or exponent so a real never re-parses as an integer
fn write_real(out: &mut String, x: f64) {
    let text = format!("{:?}", x);
    out.push_str(&text);
}
