//! "Render and Save": a PNG of the last frame plus the coefficients that lit it.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use log::info;

use crate::raster::FrameBuffer;
use crate::sh::interchange::{write_coefficients, COEFFICIENT_FILE_NAME};
use crate::sh::ShCoefficients;

pub const IMAGE_FILE_NAME: &str = "rendered_image.png";

const RGBA8_CHANNELS: usize = 4;

/// Where an export landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub image: PathBuf,
    pub coefficients: PathBuf,
}

/// Output directory and naming for exports.
#[derive(Debug, Clone)]
pub struct ExportTarget {
    pub directory: PathBuf,
    /// Append a local timestamp so repeated saves don't overwrite each other.
    pub timestamped: bool,
}

impl ExportTarget {
    pub fn new(directory: impl Into<PathBuf>, timestamped: bool) -> Self {
        Self {
            directory: directory.into(),
            timestamped,
        }
    }

    pub fn paths(&self) -> ExportPaths {
        let suffix = self
            .timestamped
            .then(|| chrono::Local::now().format("%Y%m%d-%H%M%S%.3f").to_string());
        ExportPaths {
            image: self.directory.join(suffixed(IMAGE_FILE_NAME, suffix.as_deref())),
            coefficients: self
                .directory
                .join(suffixed(COEFFICIENT_FILE_NAME, suffix.as_deref())),
        }
    }
}

fn suffixed(file_name: &str, suffix: Option<&str>) -> String {
    match (suffix, file_name.rsplit_once('.')) {
        (Some(suffix), Some((stem, ext))) => format!("{}_{}.{}", stem, suffix, ext),
        _ => file_name.to_string(),
    }
}

/// Write the frame and the coefficients it was rendered with.
///
/// The coefficients are written verbatim; callers pass the snapshot taken
/// for the render pass that produced `frame`.
pub fn save_render(
    target: &ExportTarget,
    frame: &FrameBuffer,
    coefficients: &ShCoefficients,
) -> Result<ExportPaths> {
    fs::create_dir_all(&target.directory).with_context(|| {
        format!("failed to create output directory {}", target.directory.display())
    })?;

    let paths = target.paths();
    let (width, height) = frame.dimensions();
    write_png_rgba8(&paths.image, frame.pixels(), width, height)?;
    write_coefficients(&paths.coefficients, coefficients)?;

    info!(
        "saved {} and {}",
        paths.image.display(),
        paths.coefficients.display()
    );
    Ok(paths)
}

/// Encode a tightly packed RGBA8 buffer as PNG.
pub fn write_png_rgba8(path: &Path, data: &[u8], width: u32, height: u32) -> Result<()> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(RGBA8_CHANNELS))
        .ok_or_else(|| anyhow::anyhow!("image dimensions overflow when computing buffer size"))?;

    ensure!(
        data.len() == expected,
        "PNG writer requires tight RGBA8 buffer: expected {} bytes, got {}",
        expected,
        data.len()
    );

    let file = File::create(path)
        .with_context(|| format!("failed to create output PNG at {}", path.display()))?;

    let encoder = PngEncoder::new_with_quality(
        BufWriter::new(file),
        CompressionType::Default,
        FilterType::Adaptive,
    );
    encoder
        .write_image(data, width, height, ExtendedColorType::Rgba8)
        .context("failed to encode RGBA8 PNG")?;

    Ok(())
}
