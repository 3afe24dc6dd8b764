//! Command-line interface module.

mod args;
pub mod convert;
pub mod dims;
pub mod snippet;

pub use args::{Cli, Commands};
