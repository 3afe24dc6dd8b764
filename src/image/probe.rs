//! Dimension lookup.
//!
//! Reads only the image header; nothing is decoded or re-encoded here.

use std::path::Path;

use thiserror::Error;

/// Natural pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Dimensions could not be determined (corrupt, unsupported, unreadable).
#[derive(Debug, Clone, Error)]
#[error("{reason}")]
pub struct Unavailable {
    pub reason: String,
}

/// Source of image dimensions.
///
/// The dimension pass only ever asks this question, so tests can answer it
/// without real image files.
pub trait ImageProbe {
    fn dimensions(&self, path: &Path) -> Result<Dimensions, Unavailable>;
}

/// Probe backed by the `image` crate's header readers.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileProbe;

impl ImageProbe for FileProbe {
    fn dimensions(&self, path: &Path) -> Result<Dimensions, Unavailable> {
        image::image_dimensions(path)
            .map(|(width, height)| Dimensions::new(width, height))
            .map_err(|e| Unavailable {
                reason: e.to_string(),
            })
    }
}
