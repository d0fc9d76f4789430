use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Query parameters parsed from the part of the hash after the first `?`.
///
/// A pair without `=` keeps its key with no value. Later duplicates win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryMap(BTreeMap<String, Option<String>>);

impl QueryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string such as `a=1&b&c=3`.
    ///
    /// Only the text between the first and second `=` becomes the value, so
    /// `x=1=2` yields `x -> "1"`. Empty pairs are ignored.
    pub fn parse(query: &str) -> Self {
        let mut map = BTreeMap::new();
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let mut parts = pair.split('=');
            let key = parts.next().unwrap_or_default();
            let value = parts.next().map(str::to_string);
            if value.is_none() {
                tracing::trace!(key, "query pair without value");
            }
            map.insert(key.to_string(), value);
        }
        Self(map)
    }

    /// Value for `key`; `None` both when absent and when it has no value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        self.0.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// JSON form handed to a history `replaceState` call.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        )
    }
}

/// Split a hash at the first `?` into path and query string.
pub fn split_hash(hash: &str) -> (&str, &str) {
    hash.split_once('?').unwrap_or((hash, ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_query_is_empty_map() {
        assert!(QueryMap::parse("").is_empty());
    }

    #[test]
    fn pairs_and_bare_keys() {
        let query = QueryMap::parse("x=1&flag&y=");

        assert_eq!(query.len(), 3);
        assert_eq!(query.get("x"), Some("1"));
        assert!(query.contains_key("flag"));
        assert_eq!(query.get("flag"), None);
        assert_eq!(query.get("y"), Some(""));
    }

    #[test]
    fn duplicate_keys_overwrite() {
        let query = QueryMap::parse("a=1&a=2");
        assert_eq!(query.get("a"), Some("2"));
        assert_eq!(query.len(), 1);
    }

    #[test]
    fn value_stops_at_second_equals() {
        assert_eq!(QueryMap::parse("x=1=2").get("x"), Some("1"));
    }

    #[test]
    fn empty_segments_are_skipped() {
        let query = QueryMap::parse("a=1&&b=2&");
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn split_on_first_question_mark() {
        assert_eq!(split_hash("#/music?x=1?y"), ("#/music", "x=1?y"));
        assert_eq!(split_hash("#/about"), ("#/about", ""));
        assert_eq!(split_hash(""), ("", ""));
    }

    #[test]
    fn json_uses_null_for_missing_values() {
        let query = QueryMap::parse("x=1&flag");
        assert_eq!(query.to_json(), json!({ "flag": null, "x": "1" }));
    }
}
