use std::io::Cursor;
use std::path::Path;

use anyhow::Context;
use image::{DynamicImage, ImageFormat};
use tracing::debug;

/// Decodes the image at `path` and re-encodes it as PNG. If the image carries
/// an alpha channel, the color channels of every fully transparent pixel are
/// zeroed; pixels with nonzero alpha keep their color.
pub fn normalize(path: &Path) -> anyhow::Result<Vec<u8>> {
    let img = image::open(path)
        .with_context(|| format!("Failed to decode image {}", path.display()))?;

    let img = if img.color().has_alpha() {
        let mut rgba = img.into_rgba8();
        for pixel in rgba.pixels_mut() {
            if pixel[3] == 0 {
                pixel[0] = 0;
                pixel[1] = 0;
                pixel[2] = 0;
            }
        }
        DynamicImage::ImageRgba8(rgba)
    } else {
        img
    };

    let mut encoded = Cursor::new(Vec::new());
    img.write_to(&mut encoded, ImageFormat::Png)
        .with_context(|| format!("Failed to encode {} as PNG", path.display()))?;
    debug!("Normalized {} to {} bytes", path.display(), encoded.get_ref().len());

    Ok(encoded.into_inner())
}
