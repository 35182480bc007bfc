//! Ordered, multi-valued document store.
//!
//! [`Ini`] maps composed keys to every value ever assigned to them, in
//! source order at both levels. Scalar reads take the last value; the
//! serializer walks the whole store back into canonical CRLF text.

use std::fmt;
use std::io;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::symbol::{self, Symbol};

const BOOL_SPELLINGS: &str = "true, false, 1, 0";

/// One stored value plus the comment lines that preceded it in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub value: String,
    /// Trimmed comment lines, leading `;` included. Empty when the value had
    /// no comment block.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
}

impl Record {
    pub fn new(value: impl Into<String>, comments: Vec<String>) -> Self {
        Record {
            value: value.into(),
            comments,
        }
    }
}

/// Parsed configuration contents.
///
/// Keys are the composed section-path-plus-name strings produced by the
/// loader. Insertion order is preserved for keys and for the values under
/// each key; loading appends and never removes. The store does no internal
/// locking, so concurrent mutation from multiple callers needs external
/// synchronization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ini {
    pub(crate) data: IndexMap<String, Vec<Record>>,
}

impl Ini {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `key` holds at least one value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.get(key).is_some_and(|records| !records.is_empty())
    }

    /// Most recently assigned value under `key`.
    pub fn get_last(&self, key: &str) -> Option<&str> {
        self.data
            .get(key)
            .and_then(|records| records.last())
            .map(|record| record.value.as_str())
    }

    /// Every record under `key`, oldest first. Empty slice for absent keys.
    pub fn records(&self, key: &str) -> &[Record] {
        self.data.get(key).map_or(&[], Vec::as_slice)
    }

    /// Keys in first-assignment order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// `(key, records)` pairs in first-assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.data
            .iter()
            .map(|(key, records)| (key.as_str(), records.as_slice()))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub(crate) fn append(&mut self, key: String, record: Record) {
        self.data.entry(key).or_default().push(record);
    }

    /// Last value under `key` as an integer.
    pub fn get_int(&self, key: &str) -> Result<i64, ParseError> {
        let value = self.require_last(key, "int")?;
        value.parse().map_err(|_| ParseError::Invalid {
            key: key.to_string(),
            expected: "int",
        })
    }

    /// Last value under `key` as a floating-point number.
    pub fn get_double(&self, key: &str) -> Result<f64, ParseError> {
        let value = self.require_last(key, "double")?;
        value.parse().map_err(|_| ParseError::Invalid {
            key: key.to_string(),
            expected: "double",
        })
    }

    /// Last value under `key` as a boolean. Accepts `1`, `true`, `0`,
    /// `false`, ignoring case.
    pub fn get_bool(&self, key: &str) -> Result<bool, ParseError> {
        let value = self.require_last(key, "bool")?;
        match value.to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            _ => Err(ParseError::Choice {
                key: key.to_string(),
                expected: "bool",
                allowed: BOOL_SPELLINGS.to_string(),
            }),
        }
    }

    /// Last value under `key` as a member of the symbol set `S`, matched
    /// case-insensitively against [`Symbol::VARIANTS`].
    pub fn get_symbol<S: Symbol>(&self, key: &str) -> Result<S, ParseError> {
        let value = self.require_last(key, S::NAME)?;
        symbol::lookup(value).ok_or_else(|| ParseError::Choice {
            key: key.to_string(),
            expected: S::NAME,
            allowed: symbol::spellings::<S>(),
        })
    }

    fn require_last(&self, key: &str, expected: &'static str) -> Result<&str, ParseError> {
        self.get_last(key).ok_or_else(|| ParseError::Missing {
            key: key.to_string(),
            expected,
        })
    }

    /// Push the canonical text form to `out`, one fragment at a time.
    ///
    /// Stored comment lines carry their `;` prefix and are emitted as-is,
    /// so the output re-loads into an identical store (for keys and values
    /// free of `=`, `[`, `]`, `;`, and newlines).
    pub fn emit<F: FnMut(&str)>(&self, mut out: F) {
        for (key, records) in &self.data {
            for record in records {
                for comment in &record.comments {
                    out(comment);
                    out("\r\n");
                }
                out(key);
                out("=");
                out(&record.value);
                out("\r\n");
            }
        }
    }

    /// Write the canonical text form to `writer`.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        for (key, records) in &self.data {
            for record in records {
                for comment in &record.comments {
                    writer.write_all(comment.as_bytes())?;
                    writer.write_all(b"\r\n")?;
                }
                writer.write_all(key.as_bytes())?;
                writer.write_all(b"=")?;
                writer.write_all(record.value.as_bytes())?;
                writer.write_all(b"\r\n")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Ini {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = String::new();
        self.emit(|fragment| text.push_str(fragment));
        f.write_str(&text)
    }
}
