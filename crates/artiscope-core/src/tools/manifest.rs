//! Property-list manifest parsing.

use std::collections::BTreeMap;
use std::io::Cursor;

use crate::InspectError;
use crate::Result;

/// Top-level scalar keys of a property list, values rendered as strings.
///
/// Arrays, dictionaries, dates and data blobs are omitted.
pub type PropertyMap = BTreeMap<String, String>;

/// Parses property-list manifests.
pub trait PropertyListParser: Send + Sync {
    /// Parses `bytes` into a [`PropertyMap`].
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::PropertyList`] if the bytes are not a property
    /// list or the root is not a dictionary.
    fn parse(&self, bytes: &[u8]) -> Result<PropertyMap>;
}

/// Parser backed by the `plist` crate. Accepts XML and binary formats.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlistParser;

impl PropertyListParser for PlistParser {
    fn parse(&self, bytes: &[u8]) -> Result<PropertyMap> {
        let value = plist::Value::from_reader(Cursor::new(bytes))
            .map_err(|e| InspectError::PropertyList(e.to_string()))?;
        let dict = value
            .into_dictionary()
            .ok_or_else(|| InspectError::PropertyList("root is not a dictionary".into()))?;

        Ok(dict
            .iter()
            .filter_map(|(key, value)| render_scalar(value).map(|v| (key.clone(), v)))
            .collect())
    }
}

fn render_scalar(value: &plist::Value) -> Option<String> {
    if let Some(s) = value.as_string() {
        return Some(s.to_string());
    }
    if let Some(b) = value.as_boolean() {
        return Some(b.to_string());
    }
    if let Some(n) = value.as_signed_integer() {
        return Some(n.to_string());
    }
    if let Some(n) = value.as_unsigned_integer() {
        return Some(n.to_string());
    }
    value.as_real().map(|r| r.to_string())
}
