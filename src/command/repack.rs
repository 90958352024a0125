use std::io::{Cursor, Seek, SeekFrom};
use std::path::Path;

use anyhow::Context;
use byteorder::{LittleEndian, WriteBytesExt};
use tracing::{debug, info};

use crate::command::{archive_stem, payload_file_name};
use crate::normalize;
use crate::pna;

/// Rebuilds `original` with payloads substituted from `replacements` and
/// returns the complete archive bytes. The header region carries over
/// verbatim; after the payload pass the size field of every record is patched
/// to the (possibly updated) payload length. Offsets are never stored, they
/// are derived again on the next parse.
pub fn repack(replacements: &Path, original: &Path) -> anyhow::Result<Vec<u8>> {
    let data = std::fs::read(original)
        .with_context(|| format!("Failed to read original archive {}", original.display()))?;
    let mut entries = pna::parse(&data)?;
    let stem = archive_stem(original)?;
    let base = pna::payload_base(entries.len() as u32);

    let mut out = Vec::with_capacity(data.len());
    out.extend_from_slice(&data[..base]);

    // replacement files are matched by constructed name, one existence check
    // per entry; anything else in the directory is not consulted
    for (index, entry) in entries.iter_mut().enumerate() {
        let position = u32::try_from(out.len())
            .context("Repacked archive grew past the 32-bit range of the format")?;

        let candidate = replacements.join(payload_file_name(&stem, index));
        if candidate.is_file() {
            let payload = normalize::normalize(&candidate)
                .with_context(|| format!("Failed to normalize {}", candidate.display()))?;
            let size = u32::try_from(payload.len())
                .with_context(|| format!("Replacement {} does not fit a size field", candidate.display()))?;
            info!(
                "Updating entry {}: offset {:#x} -> {:#x}, size {:#x} -> {:#x}",
                index, entry.offset, position, entry.size, size
            );
            out.extend_from_slice(&payload);
            entry.offset = position;
            entry.size = size;
        } else {
            debug!("Keeping original payload for entry {}", index);
            out.extend_from_slice(&data[entry.payload_range()]);
            entry.offset = position;
        }
    }

    // patch the new sizes into the copied header table
    let mut cursor = Cursor::new(&mut out);
    for (index, entry) in entries.iter().enumerate() {
        cursor
            .seek(SeekFrom::Start(pna::size_field_offset(index)))
            .context("Failed to seek to size field")?;
        cursor
            .write_u32::<LittleEndian>(entry.size)
            .context("Failed to patch size field")?;
    }

    Ok(out)
}
