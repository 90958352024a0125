use std::path::Path;

use anyhow::Context;

pub mod extract;
pub mod repack;

/// Derives the naming prefix for extracted and replacement files from an
/// archive path: the file name without its extension.
pub fn archive_stem(path: &Path) -> anyhow::Result<String> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("Failed to derive a file stem from {}", path.display()))?;
    Ok(stem.to_string())
}

/// File name carrying entry `index`'s payload, shared by extraction and
/// repacking. The index is the entry's position in the header table.
pub fn payload_file_name(stem: &str, index: usize) -> String {
    format!("{}_{}.png", stem, index)
}
