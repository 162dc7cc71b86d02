//! Module index generation (`mod.rs`).

use std::collections::BTreeSet;

/// Generator for the `mod.rs` that declares every generated module.
pub struct ModuleIndexGenerator {
    modules: BTreeSet<String>,
}

impl ModuleIndexGenerator {
    /// Creates a generator for the given module stems.
    #[must_use]
    pub fn new<I, S>(modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            modules: modules.into_iter().map(Into::into).collect(),
        }
    }

    /// Generates the content of `mod.rs`.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();
        output.push_str("//! Generated by oddgen. Do not edit.\n\n");
        for module in &self.modules {
            output.push_str(&format!("pub mod {module};\n"));
        }
        output
    }
}
