//! Catalog sources: raw documents contributing products to the merge.

use std::path::Path;

use crate::ids::SourceTag;
use serde_json::Value;
use tracing::warn;

/// One raw catalog document with the tag that namespaces its ids.
///
/// The document is either a bare array of records or an object holding such
/// an array under any key.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSource {
    /// Tag prefixed to every id from this source.
    pub tag: SourceTag,
    /// Parsed document.
    pub document: Value,
}

impl CatalogSource {
    /// Create a source from an already-parsed document.
    pub fn new(tag: impl Into<SourceTag>, document: Value) -> Self {
        Self {
            tag: tag.into(),
            document,
        }
    }

    /// Parse a source from JSON text. Unparsable text yields an empty source.
    pub fn from_json(tag: impl Into<SourceTag>, json: &str) -> Self {
        let tag = tag.into();
        let document = match serde_json::from_str(json) {
            Ok(document) => document,
            Err(e) => {
                warn!(source = %tag, error = %e, "catalog source is not valid JSON");
                Value::Null
            }
        };
        Self { tag, document }
    }

    /// Read a source from a JSON file. A missing or unreadable file yields an
    /// empty source.
    pub fn from_path(tag: impl Into<SourceTag>, path: impl AsRef<Path>) -> Self {
        let tag = tag.into();
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_json(tag, &content),
            Err(e) => {
                warn!(source = %tag, path = %path.display(), error = %e, "could not read catalog source");
                Self {
                    tag,
                    document: Value::Null,
                }
            }
        }
    }

    /// The records this source contributes, in document order.
    ///
    /// For an object, the first value that is an array is used. Arrays nested
    /// directly inside the record list are flattened one level. Returns `None`
    /// when the document holds no array at all.
    pub fn records(&self) -> Option<Vec<&Value>> {
        let list = match &self.document {
            Value::Array(items) => items,
            Value::Object(fields) => fields.values().find_map(Value::as_array)?,
            _ => return None,
        };

        let mut records = Vec::with_capacity(list.len());
        for item in list {
            match item {
                Value::Array(inner) => records.extend(inner.iter()),
                other => records.push(other),
            }
        }
        Some(records)
    }
}
