//! Whole-file load/save around the parser and serializer.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::formatter::serialize;
use crate::parser::parse;
use crate::value::Value;

/// Read `path` and parse its contents into a value tree.
pub fn load(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value = parse(&text)?;
    Ok(value)
}

/// Serialize `value` and write it to `path`, replacing the file.
pub fn save(value: &Value, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, serialize(value))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
