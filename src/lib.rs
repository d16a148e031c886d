//! Document library for a relaxed JSON dialect.
//!
//! Values form a single-owner tree: objects keep their pairs in a
//! balanced ordered map so key iteration is always sorted, arrays keep
//! insertion order, strings are byte buffers. A lenient parser (comments,
//! unquoted keys, single-quoted strings, `\xHH` escapes) builds the tree
//! and a pretty-printer renders it back out in a fixed dialect.
//!
//! ```
//! use jsontree::{parse, serialize, Value};
//!
//! let mut doc = parse("{greeting: 'hello', count: 1}").unwrap();
//! doc.as_object_mut().unwrap().set("count", Value::from(2));
//! assert_eq!(doc.get("count"), Some(&Value::Integer(2)));
//! assert_eq!(
//!     serialize(&doc),
//!     "{\n    count: 2,\n    greeting: 'hello'\n}"
//! );
//! ```

pub mod avl;
mod formatter;
mod io;
mod parser;
mod value;

pub use bstr::{BStr, BString};

pub use crate::formatter::serialize;
pub use crate::io::{load, save};
pub use crate::parser::{parse, ParseError};
pub use crate::value::{Array, Entries, Iter, Object, Value};
