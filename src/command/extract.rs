use std::path::Path;

use anyhow::Context;
use tracing::{debug, info};

use crate::command::{archive_stem, payload_file_name};
use crate::pna::{self, Entry};

/// Extracts every non-empty payload of `input` into `output`, one file per
/// entry named `{stem}_{index}.png`. The output directory must already
/// exist. Returns the parsed entry table.
pub fn extract(input: &Path, output: &Path) -> anyhow::Result<Vec<Entry>> {
    let data = std::fs::read(input)
        .with_context(|| format!("Failed to read archive {}", input.display()))?;
    info!("Extracting images from {}", input.display());

    let entries = pna::parse(&data)?;
    let stem = archive_stem(input)?;

    for (index, entry) in entries.iter().enumerate() {
        if entry.size == 0 {
            debug!("Skipping empty entry {}", index);
            continue;
        }

        let path = output.join(payload_file_name(&stem, index));
        std::fs::write(&path, &data[entry.payload_range()])
            .with_context(|| format!("Failed to write payload to {}", path.display()))?;
        info!(
            "Extracted entry {}: {}x{} at ({}, {}), {} bytes at offset {:#x}",
            index, entry.w, entry.h, entry.x, entry.y, entry.size, entry.offset
        );
    }

    Ok(entries)
}
