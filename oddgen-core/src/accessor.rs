//! Name-indexed dispatch table rows.
//!
//! Every generated attribute class carries a static table of
//! [`AttAccessor`] rows, one per attribute, sorted by wire name. Lookups by
//! name go through that table instead of runtime type inspection.

use crate::value::AttValue;

/// Typed accessors for one attribute of holder type `T`.
pub struct AttAccessor<T> {
    /// Wire name of the attribute (`prefix:name` for namespaced attributes).
    pub name: &'static str,
    /// Returns the textual value when the attribute is present.
    pub get: fn(&T) -> Option<String>,
    /// Converts the text and stores it.
    pub set: fn(&mut T, &str),
    /// Copies the value from one holder to another.
    pub copy: fn(&T, &mut T),
    /// Returns the tagged value when the attribute is present.
    pub value: fn(&T) -> Option<AttValue>,
}

impl<T> Clone for AttAccessor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AttAccessor<T> {}

impl<T> std::fmt::Debug for AttAccessor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttAccessor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Finds the row for `name` in a table sorted by name.
#[must_use]
pub fn find_accessor<'a, T>(table: &'a [AttAccessor<T>], name: &str) -> Option<&'a AttAccessor<T>> {
    table
        .binary_search_by(|row| row.name.cmp(name))
        .ok()
        .map(|idx| &table[idx])
}

/// Appends the present attributes of `holder` to `out`, in table order.
///
/// Returns true if at least one attribute was appended.
pub fn collect_attributes<T>(
    table: &[AttAccessor<T>],
    holder: &T,
    out: &mut Vec<(String, String)>,
) -> bool {
    let before = out.len();
    out.extend(
        table
            .iter()
            .filter_map(|row| (row.get)(holder).map(|value| (row.name.to_string(), value))),
    );
    out.len() > before
}
