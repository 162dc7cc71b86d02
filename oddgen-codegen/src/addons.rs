//! Hand-written companion modules copied into the output.

use crate::error::CodegenError;
use oddgen_schema::naming::is_identifier_fragment;
use std::path::Path;

/// A hand-written module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Addon {
    /// Module name (file stem).
    pub name: String,
    /// File content, copied verbatim.
    pub content: String,
}

/// Loads every `.rs` file of `dir`, sorted by name.
///
/// # Errors
/// Returns `CodegenError::Io` if the directory or a file cannot be read, and
/// `CodegenError::Generation` if a file stem is not a module name.
pub fn load_addons(dir: &Path) -> Result<Vec<Addon>, CodegenError> {
    let entries = std::fs::read_dir(dir).map_err(|e| CodegenError::io(dir, e))?;
    let mut addons = Vec::new();

    for entry in entries {
        let path = entry.map_err(|e| CodegenError::io(dir, e))?.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "rs") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if !is_module_name(name) {
            return Err(CodegenError::generation(format!(
                "addon '{}' is not a valid module name",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(&path).map_err(|e| CodegenError::io(&path, e))?;
        tracing::debug!(addon = name, "Loaded addon");
        addons.push(Addon {
            name: name.to_string(),
            content,
        });
    }

    addons.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(addons)
}

/// Returns true if `name` can be declared with `pub mod`.
pub(crate) fn is_module_name(name: &str) -> bool {
    is_identifier_fragment(name) && name.chars().next().is_some_and(|c| !c.is_ascii_digit())
}
