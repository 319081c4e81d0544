use std::collections::BTreeMap;

use http::HeaderMap;

/// Multi-valued call metadata.
///
/// Keys are case-sensitive. A key that is present with zero values is distinct
/// from a key that is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: BTreeMap<String, Vec<String>>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .entry(key.into())
            .or_default()
            .push(value.into());
    }

    /// Replace every value under `key`. An empty `values` keeps the key present.
    pub fn set_all<I, V>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.entries
            .insert(key.into(), values.into_iter().map(Into::into).collect());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(key, value);
        self
    }

    /// All values under `key`, or `None` when the key was never set.
    pub fn get_all(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Build metadata from HTTP headers.
    ///
    /// `http` stores header names lowercased, so `Authorization` lands under
    /// `authorization`. Repeated headers keep every value in order.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut md = Self::new();
        for (name, value) in headers {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            md.append(name.as_str(), value);
        }
        md
    }
}
