use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::pna::{COUNT_OFFSET, RECORD_LEN, TABLE_OFFSET};

/// Builds a well-formed archive holding the given payloads. Preamble and the
/// unknown record bytes are filled with markers so tests can check they
/// survive a repack untouched.
pub fn build_archive(payloads: &[&[u8]]) -> Vec<u8> {
    let mut data = vec![0x5Au8; 0x10];
    data.resize(TABLE_OFFSET, 0);
    data[COUNT_OFFSET..COUNT_OFFSET + 4].copy_from_slice(&(payloads.len() as u32).to_le_bytes());

    for (i, payload) in payloads.iter().enumerate() {
        let mut record = [0xA5u8; RECORD_LEN];
        record[0x08..0x0C].copy_from_slice(&(i as u32 * 7).to_le_bytes());
        record[0x0C..0x10].copy_from_slice(&(i as u32 * 11).to_le_bytes());
        record[0x10..0x14].copy_from_slice(&64u32.to_le_bytes());
        record[0x14..0x18].copy_from_slice(&32u32.to_le_bytes());
        record[0x24..0x28].copy_from_slice(&(payload.len() as u32).to_le_bytes());
        data.extend_from_slice(&record);
    }
    for payload in payloads {
        data.extend_from_slice(payload);
    }
    data
}

/// Writes a 2x2 RGBA PNG to `path`: the top-left pixel is fully transparent
/// but carries color data, the rest are opaque.
pub fn write_rgba_png(path: &Path) {
    let mut img = RgbaImage::from_pixel(2, 2, Rgba([40, 50, 60, 255]));
    img.put_pixel(0, 0, Rgba([10, 20, 30, 0]));
    img.save(path).unwrap();
}
