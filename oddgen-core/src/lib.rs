//! # oddgen Core
//!
//! Runtime types and traits used by the code that `oddgen` generates.
//!
//! This crate provides:
//! - [`AttributeCarrier`], the ordered name/value pairs generated `read` and
//!   `write` methods consume and produce
//! - Base converters for the primitive attribute kinds and the [`UNSET`]
//!   sentinel
//! - [`Alternate`], the explicit-presence wrapper for alternate enumerations
//! - [`AttValue`] and [`AttAccessor`], the rows of the generated name-indexed
//!   dispatch tables
//! - The [`AttClass`] and [`Element`] traits implemented by generated types

pub mod accessor;
pub mod carrier;
pub mod convert;
pub mod traits;
pub mod value;

pub use accessor::{AttAccessor, collect_attributes, find_accessor};
pub use carrier::AttributeCarrier;
pub use convert::{BaseConverter, UNSET, log_unknown_value, log_unsupported_value};
pub use traits::{AttClass, Element};
pub use value::{Alternate, AttValue};

/// Wire name of the intrinsic identifier attribute.
pub const ID_ATTRIBUTE: &str = "xml:id";
