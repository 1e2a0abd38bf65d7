//! Membership Tags
//!
//! Stored tag data has accumulated several encodings over time:
//! - a single string (`"sultan"`)
//! - an array of strings (`["free", "premium"]`)
//! - a JSON-encoded array stored as a string (`"[\"free\",\"premium\"]"`)
//! - an array whose elements are themselves JSON-encoded arrays
//!
//! [`normalize`] reduces all of them to a canonical [`TagSet`]. Re-parsing of
//! encoded strings happens at most once per value, so normalization always
//! terminates in time proportional to the input.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// Raw, untyped tag data as it arrives from storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawTag {
    /// Missing or falsy value.
    #[default]
    Absent,
    /// A single string, possibly holding a JSON-encoded array.
    Literal(String),
    /// A list of raw values.
    List(Vec<RawTag>),
}

impl RawTag {
    /// Convert a JSON scalar into a raw tag, following falsy semantics:
    /// `null`, `false`, `0` and objects carry no tag.
    fn from_number(n: &Number) -> Self {
        if is_zero(n) {
            Self::Absent
        } else {
            Self::Literal(n.to_string())
        }
    }
}

#[allow(clippy::float_cmp)]
fn is_zero(n: &Number) -> bool {
    n.as_f64().is_some_and(|f| f == 0.0)
}

impl From<Value> for RawTag {
    fn from(value: Value) -> Self {
        match value {
            Value::Null | Value::Bool(false) | Value::Object(_) => Self::Absent,
            Value::Bool(true) => Self::Literal("true".to_owned()),
            Value::Number(n) => Self::from_number(&n),
            Value::String(s) => Self::Literal(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
        }
    }
}

impl From<&str> for RawTag {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_owned())
    }
}

impl From<String> for RawTag {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for RawTag {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for RawTag {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

impl From<&TagSet> for RawTag {
    fn from(set: &TagSet) -> Self {
        Self::List(set.iter().map(Self::from).collect())
    }
}

impl<'de> Deserialize<'de> for RawTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

/// Ordered set of unique, non-empty tags.
///
/// Only produced by [`normalize`] (directly, or through deserialization), so
/// every `TagSet` is canonical. Membership is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self { tags: Vec::new() }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Exact, case-sensitive membership test.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// First tag of `self` (in canonical order) that also appears in `other`.
    #[must_use]
    pub fn first_shared<'a>(&'a self, other: &Self) -> Option<&'a str> {
        self.iter().find(|tag| other.contains(tag))
    }

    /// Whether the two sets have a non-empty intersection.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.first_shared(other).is_some()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.tags.clone()
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

impl Serialize for TagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tags.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TagSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawTag::deserialize(deserializer).map(|raw| normalize(&raw))
    }
}

/// Canonicalize raw tag data.
///
/// Never fails. A string that looks like an encoded array (`[...]` or `{...}`)
/// is parsed once; if it does not parse to an array it is kept literally,
/// brackets included. Elements produced by that parse are taken verbatim.
/// Lists nested inside a list contribute their string members verbatim;
/// anything nested deeper is dropped. A verbatim string that still holds an
/// encoded array is dropped rather than parsed a second time, so a `TagSet`
/// never contains one and normalizing it again changes nothing.
#[must_use]
pub fn normalize(raw: &RawTag) -> TagSet {
    let mut builder = TagSetBuilder::default();

    match raw {
        RawTag::Absent => {}
        RawTag::Literal(s) => builder.push_decoded(s),
        RawTag::List(items) => {
            for item in items {
                match item {
                    RawTag::Absent => {}
                    RawTag::Literal(s) => builder.push_decoded(s),
                    RawTag::List(nested) => {
                        for member in nested {
                            if let RawTag::Literal(s) = member {
                                builder.push_verbatim(s);
                            }
                        }
                    }
                }
            }
        }
    }

    builder.finish()
}

/// Canonicalize a JSON value taken straight from a stored record.
#[must_use]
pub fn normalize_value(value: Value) -> TagSet {
    normalize(&RawTag::from(value))
}

#[derive(Default)]
struct TagSetBuilder {
    tags: Vec<String>,
    seen: HashSet<String>,
}

impl TagSetBuilder {
    /// Push a string, expanding it if it holds an encoded array.
    fn push_decoded(&mut self, s: &str) {
        match decode_once(s) {
            Some(items) => {
                for item in items {
                    if let RawTag::Literal(tag) = RawTag::from(item) {
                        self.push_verbatim(&tag);
                    }
                }
            }
            None => self.push(s),
        }
    }

    /// Push a string without expanding it. Encoded arrays are dropped.
    fn push_verbatim(&mut self, tag: &str) {
        if decode_once(tag).is_none() {
            self.push(tag);
        }
    }

    fn push(&mut self, tag: &str) {
        if tag.is_empty() || self.seen.contains(tag) {
            return;
        }
        self.seen.insert(tag.to_owned());
        self.tags.push(tag.to_owned());
    }

    fn finish(self) -> TagSet {
        TagSet { tags: self.tags }
    }
}

fn looks_encoded(s: &str) -> bool {
    (s.starts_with('[') && s.ends_with(']')) || (s.starts_with('{') && s.ends_with('}'))
}

/// Parse an encoded array string. `None` means "use the string literally".
fn decode_once(s: &str) -> Option<Vec<Value>> {
    if !looks_encoded(s) {
        return None;
    }
    match serde_json::from_str::<Value>(s) {
        Ok(Value::Array(items)) => Some(items),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_yields_empty_set() {
        assert!(normalize(&RawTag::Absent).is_empty());
        assert!(normalize_value(Value::Null).is_empty());
        assert!(normalize_value(json!(false)).is_empty());
        assert!(normalize_value(json!("")).is_empty());
        assert!(normalize_value(json!([])).is_empty());
    }

    #[test]
    fn test_single_string() {
        let set = normalize(&RawTag::from("sultan"));
        assert_eq!(set.to_vec(), vec!["sultan"]);
    }

    #[test]
    fn test_dedup_preserves_first_occurrence() {
        let set = normalize(&RawTag::from(vec!["a", "a", "b"]));
        assert_eq!(set.to_vec(), vec!["a", "b"]);

        let set = normalize(&RawTag::from(vec!["b", "a", "b", "a"]));
        assert_eq!(set.to_vec(), vec!["b", "a"]);
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let set = normalize(&RawTag::from(vec!["VIP", "vip"]));
        assert_eq!(set.to_vec(), vec!["VIP", "vip"]);
    }

    #[test]
    fn test_encoded_string_is_decoded() {
        let set = normalize(&RawTag::from(r#"["free","premium"]"#));
        assert_eq!(set.to_vec(), vec!["free", "premium"]);
    }

    #[test]
    fn test_double_encoded_element_is_spliced() {
        let set = normalize(&RawTag::from(vec![r#"["elite","sultan"]"#, "free"]));
        assert_eq!(set.to_vec(), vec!["elite", "sultan", "free"]);
    }

    #[test]
    fn test_malformed_encoding_kept_literally() {
        let set = normalize(&RawTag::from("[not-json"));
        assert_eq!(set.to_vec(), vec!["[not-json"]);

        let set = normalize(&RawTag::from(vec!["[VIP]", "free"]));
        assert_eq!(set.to_vec(), vec!["[VIP]", "free"]);
    }

    #[test]
    fn test_encoded_non_array_kept_literally() {
        let set = normalize(&RawTag::from(r#"{"tier":"pro"}"#));
        assert_eq!(set.to_vec(), vec![r#"{"tier":"pro"}"#]);

        let set = normalize(&RawTag::from("[42]x"));
        assert_eq!(set.to_vec(), vec!["[42]x"]);
    }

    #[test]
    fn test_reparse_happens_only_once() {
        // The inner element is itself an encoded array. It is not parsed a
        // second time, and it cannot stay as a tag either.
        let triple = r#"["outer","[\"inner\"]"]"#;
        let set = normalize(&RawTag::from(triple));
        assert_eq!(set.to_vec(), vec!["outer"]);
    }

    #[test]
    fn test_nested_list_flattened_one_level() {
        let set = normalize_value(json!([["a", "b"], "c", [["too-deep"]]]));
        assert_eq!(set.to_vec(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_nested_list_members_not_decoded() {
        let set = normalize_value(json!([[r#"["x","y"]"#, "z", "[VIP]"]]));
        assert_eq!(set.to_vec(), vec!["z", "[VIP]"]);
    }

    #[test]
    fn test_idempotent_after_single_reparse() {
        let inputs = [
            RawTag::from(r#"["outer","[\"inner\"]"]"#),
            RawTag::from(json!([[r#"["x","y"]"#]])),
            RawTag::from(json!([r#"["a","[\"b\",\"c\"]"]"#, ["[\"d\"]", "e"]])),
            RawTag::from(vec!["[VIP]", r#"{"tier":"pro"}"#, "[not-json"]),
        ];

        for raw in inputs {
            let once = normalize(&raw);
            let twice = normalize(&RawTag::from(&once));
            assert_eq!(once, twice, "input {raw:?}");
            assert!(once.iter().all(|tag| decode_once(tag).is_none()));
        }
    }

    #[test]
    fn test_non_string_scalars_coerced() {
        let set = normalize_value(json!([1, 0, true, false, null, "free", {"k": "v"}]));
        assert_eq!(set.to_vec(), vec!["1", "true", "free"]);
    }

    #[test]
    fn test_decoded_array_drops_falsy_and_nested() {
        let set = normalize(&RawTag::from(r#"["pro", "", null, ["x"], 7]"#));
        assert_eq!(set.to_vec(), vec!["pro", "7"]);
    }

    #[test]
    fn test_dedup_across_decoded_and_literal() {
        let set = normalize(&RawTag::from(vec!["free", r#"["free","pro"]"#, "pro"]));
        assert_eq!(set.to_vec(), vec!["free", "pro"]);
    }

    #[test]
    fn test_idempotent_on_canonical_set() {
        let set = normalize(&RawTag::from(vec![r#"["elite","sultan"]"#, "free", "elite"]));
        let again = normalize(&RawTag::from(&set));
        assert_eq!(again, set);
    }

    #[test]
    fn test_deterministic() {
        let raw = RawTag::from(vec![r#"["b","a"]"#, "c", "[oops"]);
        assert_eq!(normalize(&raw), normalize(&raw));
    }

    #[test]
    fn test_set_queries() {
        let mine = normalize(&RawTag::from(vec!["free", "premium"]));
        let wanted = normalize(&RawTag::from(vec!["elite", "premium"]));
        let other = normalize(&RawTag::from("sultan"));

        assert!(mine.contains("premium"));
        assert!(!mine.contains("Premium"));
        assert_eq!(mine.first_shared(&wanted), Some("premium"));
        assert!(mine.intersects(&wanted));
        assert!(!mine.intersects(&other));
        assert!(!mine.intersects(&TagSet::empty()));
        assert_eq!(mine.len(), 2);
    }

    #[test]
    fn test_deserialize_normalizes() {
        let set: TagSet = serde_json::from_value(json!(r#"["free","free","pro"]"#)).unwrap();
        assert_eq!(set.to_vec(), vec!["free", "pro"]);

        let out = serde_json::to_value(&set).unwrap();
        assert_eq!(out, json!(["free", "pro"]));
    }
}
