use std::collections::HashMap;
use std::fmt;

/// String-to-string map used both for a field's raw tags and for decoded tag values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StrMap(HashMap<String, String>);

/// Tag name to raw tag value, for one field.
pub type TagMap = StrMap;

/// Sub-key to sub-value, produced by decoding one raw tag value.
pub type DecodedInfo = StrMap;

/// Field name to that field's tags.
pub type ParsedTags = HashMap<String, TagMap>;

impl StrMap {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(HashMap::with_capacity(capacity))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Value for `key`, or an empty string when missing.
    pub fn str(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    /// Value for `key` parsed as an integer, or 0 when missing or not numeric.
    pub fn int(&self, key: &str) -> i64 {
        self.get(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or_default()
    }

    /// Value for `key` read as a boolean flag.
    pub fn bool(&self, key: &str) -> bool {
        matches!(
            self.get(key).map(|v| v.trim().to_ascii_lowercase()).as_deref(),
            Some("true" | "1" | "on" | "yes")
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> HashMap<String, String> {
        self.0
    }
}

impl From<HashMap<String, String>> for StrMap {
    fn from(value: HashMap<String, String>) -> Self {
        Self(value)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StrMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for StrMap {
    type Item = (String, String);
    type IntoIter = std::collections::hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for StrMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable();
        f.write_str("{")?;
        for (i, (key, value)) in entries.into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{key}:{value}")?;
        }
        f.write_str("}")
    }
}
