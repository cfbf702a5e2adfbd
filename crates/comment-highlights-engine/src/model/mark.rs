use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attribute map carried by a mark.
pub type Attrs = BTreeMap<String, Value>;

/// A typed, attribute-bearing annotation on a text run.
///
/// Marks compare structurally by `(type, attrs)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub mark_type: String,
    #[serde(default, skip_serializing_if = "Attrs::is_empty")]
    pub attrs: Attrs,
}

impl Mark {
    pub fn new(mark_type: impl Into<String>) -> Self {
        Self {
            mark_type: mark_type.into(),
            attrs: Attrs::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn is_type(&self, mark_type: &str) -> bool {
        self.mark_type == mark_type
    }

    /// Returns the attribute as a string, or `None` if missing or not a string.
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(Value::as_str)
    }
}

/// Ordered set of marks on a text run.
///
/// Never holds two equal marks: adding a mark that is already present is a
/// no-op, and deserialization drops duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Mark>", into = "Vec<Mark>")]
pub struct MarkSet(Vec<Mark>);

impl MarkSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds `mark` if not already present. Returns true if the set changed.
    pub fn add(&mut self, mark: Mark) -> bool {
        if self.contains(&mark) {
            return false;
        }
        self.0.push(mark);
        true
    }

    pub fn contains(&self, mark: &Mark) -> bool {
        self.0.contains(mark)
    }

    /// Removes every mark matching `pred`, returning how many were removed.
    pub fn remove_where(&mut self, mut pred: impl FnMut(&Mark) -> bool) -> usize {
        let before = self.0.len();
        self.0.retain(|mark| !pred(mark));
        before - self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mark> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Mark] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Mark>> for MarkSet {
    fn from(marks: Vec<Mark>) -> Self {
        marks.into_iter().collect()
    }
}

impl From<MarkSet> for Vec<Mark> {
    fn from(set: MarkSet) -> Self {
        set.0
    }
}

impl FromIterator<Mark> for MarkSet {
    fn from_iter<I: IntoIterator<Item = Mark>>(iter: I) -> Self {
        let mut set = MarkSet::new();
        for mark in iter {
            set.add(mark);
        }
        set
    }
}

impl<'a> IntoIterator for &'a MarkSet {
    type Item = &'a Mark;
    type IntoIter = std::slice::Iter<'a, Mark>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn highlight(id: &str) -> Mark {
        Mark::new("highlight").with_attr("highlightId", id)
    }

    #[test]
    fn marks_compare_by_type_and_attrs() {
        assert_eq!(highlight("a"), highlight("a"));
        assert_ne!(highlight("a"), highlight("b"));
        assert_ne!(Mark::new("bold"), Mark::new("italic"));
    }

    #[test]
    fn attr_str_ignores_non_strings() {
        let mark = Mark::new("highlight").with_attr("highlightId", 42);
        assert_eq!(mark.attr_str("highlightId"), None);
        assert_eq!(highlight("x").attr_str("highlightId"), Some("x"));
        assert_eq!(Mark::new("highlight").attr_str("highlightId"), None);
    }

    #[test]
    fn add_is_idempotent() {
        let mut set = MarkSet::new();
        assert!(set.add(highlight("a")));
        assert!(!set.add(highlight("a")));
        assert!(set.add(highlight("b")));
        assert!(set.add(Mark::new("bold")));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn remove_where_counts_removed() {
        let mut set: MarkSet = vec![highlight("a"), Mark::new("bold"), highlight("b")].into();
        let removed = set.remove_where(|m| m.is_type("highlight"));
        assert_eq!(removed, 2);
        assert_eq!(set.as_slice(), &[Mark::new("bold")]);
    }

    #[test]
    fn deserialization_drops_duplicates_and_keeps_order() {
        let set: MarkSet = serde_json::from_value(json!([
            {"type": "bold"},
            {"type": "highlight", "attrs": {"highlightId": "a"}},
            {"type": "bold"}
        ]))
        .unwrap();
        assert_eq!(set.as_slice(), &[Mark::new("bold"), highlight("a")]);
    }

    #[test]
    fn serializes_without_empty_attrs() {
        let value = serde_json::to_value(Mark::new("bold")).unwrap();
        assert_eq!(value, json!({"type": "bold"}));
    }
}
