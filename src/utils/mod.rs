//! Shared helpers: HTML tag tokenizing, paths, report text.

pub mod html;
pub mod path;
mod text;

pub use text::{plural_count, plural_s, relative_display};
