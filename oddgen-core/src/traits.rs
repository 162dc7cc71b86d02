//! Traits implemented by generated attribute classes and elements.

use crate::carrier::AttributeCarrier;
use crate::value::AttValue;

/// A generated attribute-holder type.
pub trait AttClass {
    /// Restores every member to its default.
    fn reset(&mut self);

    /// Consumes every known attribute found on the carrier.
    ///
    /// When `remove_attr` is true, consumed attributes are removed from the
    /// carrier. Returns true if at least one attribute was read.
    fn read(&mut self, element: &mut AttributeCarrier, remove_attr: bool) -> bool;

    /// Appends every present attribute to the carrier.
    ///
    /// Returns true if at least one attribute was written.
    fn write(&self, element: &mut AttributeCarrier) -> bool;
}

/// A generated element type.
pub trait Element {
    /// Element name as written in documents.
    fn name(&self) -> &'static str;

    /// Identifier of this element instance.
    fn id(&self) -> &str;

    /// Sets the identifier.
    fn set_id(&mut self, id: String);

    /// Restores every composed attribute class and self-attribute.
    fn reset(&mut self);

    /// Reads the identifier and every composed attribute class.
    fn read(&mut self, element: &mut AttributeCarrier, remove_attr: bool) -> bool;

    /// Writes the identifier and every composed attribute class.
    fn write(&self, element: &mut AttributeCarrier) -> bool;

    /// Sets an attribute by wire name.
    ///
    /// Returns false if the name is not known for this element.
    fn set_attribute(&mut self, name: &str, value: &str) -> bool;

    /// Returns every present attribute as name/value pairs.
    fn attributes(&self) -> Vec<(String, String)>;

    /// Returns the tagged value of a present attribute.
    fn attribute_value(&self, name: &str) -> Option<AttValue>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct AttSized {
        size: Option<i32>,
    }

    impl AttClass for AttSized {
        fn reset(&mut self) {
            self.size = None;
        }

        fn read(&mut self, element: &mut AttributeCarrier, remove_attr: bool) -> bool {
            let Some(value) = element.attribute("size") else {
                return false;
            };
            self.size = value.parse().ok();
            if remove_attr {
                element.remove_attribute("size");
            }
            true
        }

        fn write(&self, element: &mut AttributeCarrier) -> bool {
            match self.size {
                Some(size) => {
                    element.append_attribute("size", size.to_string());
                    true
                }
                None => false,
            }
        }
    }

    #[test]
    fn test_read_write_cycle() {
        let mut carrier: AttributeCarrier = [("size", "5")].into_iter().collect();
        let mut att = AttSized::default();
        assert!(att.read(&mut carrier, true));
        assert!(carrier.is_empty());

        let mut out = AttributeCarrier::new();
        assert!(att.write(&mut out));
        assert_eq!(out.attribute("size"), Some("5"));

        att.reset();
        assert!(!att.write(&mut AttributeCarrier::new()));
    }
}
