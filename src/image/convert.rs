//! WebP conversion with width capping.
//!
//! Each source image gets a `.webp` sibling; the original is never touched.
//! Logos and icons are capped at a smaller width than other images.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use jwalk::WalkDir;
use thiserror::Error;

use crate::config::ConvertConfig;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("image directory `{0}` not found")]
    SourceMissing(PathBuf),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("IO error on `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

/// One successful conversion.
#[derive(Debug, Clone)]
pub struct Converted {
    pub output: PathBuf,
    /// Original pixel size.
    pub original: (u32, u32),
    /// New pixel size, if the image was scaled down.
    pub resized: Option<(u32, u32)>,
    pub original_bytes: u64,
    pub output_bytes: u64,
}

impl Converted {
    /// Size reduction in percent (negative if the WebP is larger).
    pub fn savings_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        (self.original_bytes as f64 - self.output_bytes as f64) / self.original_bytes as f64
            * 100.0
    }
}

/// Collect convertible images under `config.source`, sorted.
pub fn collect_sources(config: &ConvertConfig) -> Result<Vec<PathBuf>, ConvertError> {
    if !config.source.is_dir() {
        return Err(ConvertError::SourceMissing(config.source.clone()));
    }

    let mut sources: Vec<PathBuf> = WalkDir::new(&config.source)
        .sort(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| {
                    config
                        .extensions
                        .iter()
                        .any(|wanted| wanted.eq_ignore_ascii_case(ext))
                })
        })
        .collect();

    sources.sort();
    Ok(sources)
}

/// Convert one image to a lossless WebP sibling, capping its width.
pub fn convert_to_webp(path: &Path, max_width: u32) -> Result<Converted, ConvertError> {
    let img = image::open(path)?;
    let original = (img.width(), img.height());

    let (img, resized) = match scaled_size(original, max_width) {
        Some((width, height)) => (
            img.resize_exact(width, height, FilterType::Lanczos3),
            Some((width, height)),
        ),
        None => (img, None),
    };

    // The WebP encoder only accepts 8-bit RGB(A)
    let img = if img.color().has_alpha() {
        DynamicImage::ImageRgba8(img.to_rgba8())
    } else {
        DynamicImage::ImageRgb8(img.to_rgb8())
    };

    let output = path.with_extension("webp");
    let file = File::create(&output).map_err(|e| ConvertError::Io(output.clone(), e))?;
    img.write_with_encoder(WebPEncoder::new_lossless(BufWriter::new(file)))?;

    let original_bytes = file_size(path)?;
    let output_bytes = file_size(&output)?;

    Ok(Converted {
        output,
        original,
        resized,
        original_bytes,
        output_bytes,
    })
}

/// Aspect-preserving size for an image wider than `max_width`.
fn scaled_size((width, height): (u32, u32), max_width: u32) -> Option<(u32, u32)> {
    if width <= max_width {
        return None;
    }
    let new_height = (u64::from(height) * u64::from(max_width) / u64::from(width)).max(1);
    Some((max_width, u32::try_from(new_height).unwrap_or(u32::MAX)))
}

fn file_size(path: &Path) -> Result<u64, ConvertError> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| ConvertError::Io(path.to_path_buf(), e))
}
