//! Attribute value types.

use std::fmt;

/// Attribute value tagged by kind.
///
/// Returned by the generated dispatch tables so callers can inspect a value
/// by name without knowing the static type of its holder.
#[derive(Debug, Clone, PartialEq)]
pub enum AttValue {
    /// Integer member.
    Int(i32),
    /// Double member.
    Double(f64),
    /// Character member.
    Char(char),
    /// String member.
    Str(String),
    /// Enumerated member, carried as its literal text.
    Enum {
        /// Generated type name of the enumeration.
        type_name: &'static str,
        /// Literal text as written on the wire.
        literal: String,
    },
}

impl AttValue {
    /// Returns the kind name of the value.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Double(_) => "double",
            Self::Char(_) => "char",
            Self::Str(_) => "string",
            Self::Enum { .. } => "enum",
        }
    }

    /// Returns the integer value, if this is an integer.
    #[must_use]
    pub const fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the textual value for string and enumerated members.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Enum { literal, .. } => Some(literal),
            _ => None,
        }
    }
}

impl fmt::Display for AttValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{}", v),
            Self::Char(v) => write!(f, "{}", v),
            Self::Str(v) => f.write_str(v),
            Self::Enum { literal, .. } => f.write_str(literal),
        }
    }
}

/// Explicit-presence wrapper for alternate enumerations.
///
/// Presence is tracked by a flag rather than by comparing against a default
/// literal, since some enumerations have no sensible default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Alternate<T> {
    value: T,
    has_value: bool,
}

impl<T: Copy + Default> Alternate<T> {
    /// Creates a wrapper holding a value.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value,
            has_value: true,
        }
    }

    /// Creates an empty wrapper.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if a value was set.
    #[must_use]
    pub const fn has_value(&self) -> bool {
        self.has_value
    }

    /// Returns the stored value, or `T::default()` when empty.
    #[must_use]
    pub fn value(&self) -> T {
        self.value
    }

    /// Returns the value if present.
    #[must_use]
    pub fn get(&self) -> Option<T> {
        self.has_value.then_some(self.value)
    }

    /// Stores a value and marks the wrapper as present.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.has_value = true;
    }

    /// Clears the value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl<T: Copy + Default> From<T> for Alternate<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    enum Duration {
        #[default]
        None,
        Quarter,
    }

    #[test]
    fn test_alternate_presence_is_explicit() {
        let mut alt: Alternate<Duration> = Alternate::empty();
        assert!(!alt.has_value());
        assert_eq!(alt.get(), None);

        // Setting the default literal still counts as present.
        alt.set(Duration::None);
        assert!(alt.has_value());
        assert_eq!(alt.get(), Some(Duration::None));

        alt.reset();
        assert!(!alt.has_value());
    }

    #[test]
    fn test_alternate_from_value() {
        let alt = Alternate::from(Duration::Quarter);
        assert!(alt.has_value());
        assert_eq!(alt.value(), Duration::Quarter);
    }

    #[test]
    fn test_att_value_display() {
        assert_eq!(AttValue::Int(5).to_string(), "5");
        assert_eq!(AttValue::Str("abc".into()).to_string(), "abc");
        let value = AttValue::Enum {
            type_name: "data_BOOLEAN",
            literal: "true".into(),
        };
        assert_eq!(value.to_string(), "true");
        assert_eq!(value.kind(), "enum");
        assert_eq!(value.as_str(), Some("true"));
        assert_eq!(AttValue::Int(3).as_int(), Some(3));
    }
}
