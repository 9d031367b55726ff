// export.rs - Framebuffer to PNG

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use image::RgbaImage;
use ripple_engine::Framebuffer;

pub fn write_png(frame: &Framebuffer, path: &Path) -> Result<()> {
    if frame.is_empty() {
        bail!("cannot export an empty {}x{} frame", frame.width(), frame.height());
    }
    let img = RgbaImage::from_raw(frame.width(), frame.height(), frame.as_bytes().to_vec())
        .ok_or_else(|| anyhow!("framebuffer does not match {}x{}", frame.width(), frame.height()))?;
    img.save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}

/// `ripple_00042.png`
pub fn frame_name(frame: u64) -> String {
    format!("ripple_{frame:05}.png")
}
