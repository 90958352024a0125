use std::io::Cursor;
use std::ops::Range;

use binrw::{binrw, BinRead};
use thiserror::Error;
use tracing::warn;

/// Offset of the entry count field.
pub const COUNT_OFFSET: usize = 0x10;
/// Offset of the first entry record, directly after the count.
pub const TABLE_OFFSET: usize = 0x14;
/// Byte stride of one entry record in the header table.
pub const RECORD_LEN: usize = 0x28;
/// Offset of the payload size field within an entry record.
pub const SIZE_FIELD_OFFSET: usize = 0x24;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Archive is too short to hold a header ({0} bytes)")]
    TooShort(usize),
    #[error("Entry table for {count} entries needs {needed} bytes, archive holds {actual}")]
    TableTruncated { count: u32, needed: usize, actual: usize },
    #[error("Payload region is truncated: entries declare {needed} bytes, archive holds {actual}")]
    PayloadTruncated { needed: usize, actual: usize },
    #[error("Entry offsets exceed the 32-bit range of the format")]
    Overflow,
    #[error("Failed to read entry record: {0}")]
    Record(#[from] binrw::Error),
}

/// On-disk layout of one header table record. Only the geometry and size
/// fields are interpreted; the unknown bytes are carried along so the record
/// can be preserved verbatim.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub _unknown: u64,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub _unknown2: [u8; 0xC],
    pub size: u32,
}

/// One sprite record with its payload location derived from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub offset: u32,
    pub size: u32,
}

impl Entry {
    /// Byte range of this entry's payload within the archive.
    pub fn payload_range(&self) -> Range<usize> {
        let start = self.offset as usize;
        start..start + self.size as usize
    }
}

/// Byte offset of the payload region in an archive with `count` entries.
pub fn payload_base(count: u32) -> usize {
    TABLE_OFFSET + count as usize * RECORD_LEN
}

/// Absolute offset of entry `index`'s size field in the header table.
pub fn size_field_offset(index: usize) -> u64 {
    (TABLE_OFFSET + index * RECORD_LEN + SIZE_FIELD_OFFSET) as u64
}

/// Parses the header table of a PNA archive into its entries. Payload offsets
/// are not stored in the file; entry `i` sits at the payload base plus the
/// sizes of all entries before it.
pub fn parse(data: &[u8]) -> Result<Vec<Entry>, FormatError> {
    if data.len() < TABLE_OFFSET {
        return Err(FormatError::TooShort(data.len()));
    }
    let count = u32::from_le_bytes([
        data[COUNT_OFFSET],
        data[COUNT_OFFSET + 1],
        data[COUNT_OFFSET + 2],
        data[COUNT_OFFSET + 3],
    ]);

    let base = payload_base(count);
    if data.len() < base {
        return Err(FormatError::TableTruncated {
            count,
            needed: base,
            actual: data.len(),
        });
    }

    let mut cursor = Cursor::new(&data[TABLE_OFFSET..base]);
    let mut entries = Vec::with_capacity(count as usize);
    let mut offset = base as u64;
    for _ in 0..count {
        let record = RawRecord::read(&mut cursor)?;
        entries.push(Entry {
            x: record.x,
            y: record.y,
            w: record.w,
            h: record.h,
            offset: u32::try_from(offset).map_err(|_| FormatError::Overflow)?,
            size: record.size,
        });
        offset += u64::from(record.size);
    }

    let end = usize::try_from(offset).map_err(|_| FormatError::Overflow)?;
    if data.len() < end {
        return Err(FormatError::PayloadTruncated {
            needed: end,
            actual: data.len(),
        });
    }
    if data.len() > end {
        warn!("Ignoring {} trailing bytes past the payload region", data.len() - end);
    }

    Ok(entries)
}
