//! Image collaborators.
//!
//! # Modules
//!
//! - [`probe`]: natural width/height lookup for the dimension pass
//! - [`convert`]: optional WebP conversion run before it

pub mod convert;
mod probe;

pub use probe::{Dimensions, FileProbe, ImageProbe, Unavailable};
