//! # oddgen Conformance
//!
//! Generated code for `schema/sample.xml`, compiled as part of the workspace.
//!
//! The build script runs the generator twice:
//! - `elements`: element types, holders and the basic validator
//! - `accessors`: holders and the accessor module for hand-written elements

/// Output generated with `elements: true`.
pub mod elements {
    include!(concat!(env!("OUT_DIR"), "/elements.rs"));
}

/// Output generated with `elements: false`.
pub mod accessors {
    include!(concat!(env!("OUT_DIR"), "/accessors.rs"));
}
