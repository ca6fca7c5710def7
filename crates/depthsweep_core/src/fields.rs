//! Named generation results and the capability to look them up.

use depthsweep_error::{GenerationError, GenerationErrorKind};
use serde::{Deserialize, Serialize};

/// Anything that exposes generated values by field name.
pub trait FieldSource {
    /// Value of the named field, if present.
    fn field(&self, name: &str) -> Option<&str>;

    /// Whether the named field is present.
    fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

/// Ordered mapping of field name to generated value.
///
/// Insertion order is preserved; inserting an existing name replaces its
/// value in place.
///
/// # Examples
///
/// ```
/// use depthsweep_core::{FieldMap, FieldSource};
///
/// let mut fields = FieldMap::new();
/// fields.insert("empathy_score", "4");
/// assert_eq!(fields.field("empathy_score"), Some("4"));
/// assert!(!fields.has_field("engagement_score"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMap {
    entries: Vec<(String, String)>,
}

impl FieldMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl FieldSource for FieldMap {
    fn field(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }
}

impl<K, V> FromIterator<(K, V)> for FieldMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

/// Copy exactly the requested fields out of a model result.
///
/// Values are copied verbatim, in `keys` order. Only presence is checked.
///
/// # Errors
///
/// Returns [`GenerationErrorKind::MissingField`] for the first absent key.
pub fn extract<S>(output: &S, keys: &[&str]) -> Result<FieldMap, GenerationError>
where
    S: FieldSource + ?Sized,
{
    if let Some(missing) = keys.iter().find(|key| !output.has_field(key)) {
        return Err(GenerationError::new(GenerationErrorKind::MissingField(
            missing.to_string(),
        )));
    }

    Ok(keys
        .iter()
        .filter_map(|key| output.field(key).map(|value| (*key, value)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_keeps_only_requested_keys() {
        let output: FieldMap = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();
        let extracted = extract(&output, &["c", "a"]).unwrap();
        assert_eq!(extracted.iter().collect::<Vec<_>>(), vec![("c", "3"), ("a", "1")]);
    }

    #[test]
    fn test_extract_copies_values_verbatim() {
        let output: FieldMap = [("a", " 9x ")].into_iter().collect();
        let extracted = extract(&output, &["a"]).unwrap();
        assert_eq!(extracted.field("a"), Some(" 9x "));
    }

    #[test]
    fn test_extract_reports_missing_key() {
        let output: FieldMap = [("a", "1")].into_iter().collect();
        let err = extract(&output, &["a", "b"]).unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::MissingField("b".into()));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = FieldMap::new();
        map.insert("a", "1");
        map.insert("b", "2");
        map.insert("a", "3");
        assert_eq!(map.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.field("a"), Some("3"));
    }
}
