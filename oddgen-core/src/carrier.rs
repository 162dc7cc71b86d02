//! Generic attribute carrier.
//!
//! Generated `read` methods consume attributes from an [`AttributeCarrier`]
//! and generated `write` methods append to one. The carrier keeps the
//! document order of its pairs.

/// Ordered list of attribute name/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeCarrier {
    pairs: Vec<(String, String)>,
}

impl AttributeCarrier {
    /// Creates an empty carrier.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Returns the value of the first attribute with the given name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns true if an attribute with the given name is present.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.pairs.iter().any(|(key, _)| key == name)
    }

    /// Appends an attribute. Existing attributes with the same name are kept.
    pub fn append_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Removes every attribute with the given name.
    ///
    /// Returns true if at least one attribute was removed.
    pub fn remove_attribute(&mut self, name: &str) -> bool {
        let before = self.pairs.len();
        self.pairs.retain(|(key, _)| key != name);
        self.pairs.len() != before
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if the carrier holds no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over the pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Consumes the carrier, returning the pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeCarrier {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_lookup() {
        let carrier: AttributeCarrier = [("n", "1"), ("size", "5")].into_iter().collect();
        assert_eq!(carrier.attribute("size"), Some("5"));
        assert_eq!(carrier.attribute("missing"), None);
        assert!(carrier.has_attribute("n"));
        assert_eq!(carrier.len(), 2);
    }

    #[test]
    fn test_remove_attribute() {
        let mut carrier: AttributeCarrier = [("n", "1"), ("n", "2"), ("size", "5")]
            .into_iter()
            .collect();
        assert!(carrier.remove_attribute("n"));
        assert!(!carrier.remove_attribute("n"));
        assert_eq!(carrier.len(), 1);
        assert_eq!(carrier.attribute("size"), Some("5"));
    }

    #[test]
    fn test_append_keeps_order() {
        let mut carrier = AttributeCarrier::new();
        assert!(carrier.is_empty());
        carrier.append_attribute("b", "2");
        carrier.append_attribute("a", "1");
        let names: Vec<&str> = carrier.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(
            carrier.into_pairs(),
            vec![
                ("b".to_string(), "2".to_string()),
                ("a".to_string(), "1".to_string())
            ]
        );
    }
}
