//! Configuration sections of `pagesync.toml`.

mod convert;
mod scan;
mod snippet;

pub use convert::ConvertConfig;
pub use scan::ScanConfig;
pub use snippet::SnippetConfig;
