//! Output directory writer.

use crate::error::CodegenError;
use crate::generator::GeneratedFiles;
use std::path::Path;
use tempfile::TempDir;

/// Replaces `output_dir` with the generated files.
///
/// Files are staged in a temporary sibling directory which is then renamed
/// into place, so `output_dir` holds either the previous contents or the
/// complete new set. Files left over from a previous run do not survive.
///
/// # Errors
/// Returns `CodegenError::Io` if the staging directory cannot be created, a
/// file cannot be written, or the directory cannot be swapped in.
pub fn write_files(files: &GeneratedFiles, output_dir: &Path) -> Result<(), CodegenError> {
    let parent = match output_dir.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| CodegenError::io(parent, e))?;

    let mut staging = staging_dir(parent)?;
    for (name, content) in files.iter() {
        let path = staging.path().join(name);
        std::fs::write(&path, content).map_err(|e| CodegenError::io(&path, e))?;
        tracing::debug!(file = %name, "Staged file");
    }

    // Holds the previous contents until the new directory is in place.
    let previous = if output_dir.exists() {
        let backup = staging_dir(parent)?;
        let moved = backup.path().join("previous");
        std::fs::rename(output_dir, &moved).map_err(|e| CodegenError::io(output_dir, e))?;
        Some((backup, moved))
    } else {
        None
    };

    if let Err(e) = std::fs::rename(staging.path(), output_dir) {
        if let Some((_, moved)) = &previous {
            if let Err(restore) = std::fs::rename(moved, output_dir) {
                tracing::error!(
                    dir = %output_dir.display(),
                    error = %restore,
                    "Failed to restore previous output"
                );
            }
        }
        return Err(CodegenError::io(output_dir, e));
    }
    staging.disable_cleanup(true);

    tracing::info!(
        dir = %output_dir.display(),
        files = files.len(),
        "Wrote generated files"
    );
    Ok(())
}

fn staging_dir(parent: &Path) -> Result<TempDir, CodegenError> {
    tempfile::Builder::new()
        .prefix(".oddgen-")
        .tempdir_in(parent)
        .map_err(|e| CodegenError::io(parent, e))
}
