//! WebP conversion step of the `dims` command.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::config::SyncConfig;
use crate::core::is_shutdown;
use crate::image::convert::{ConvertError, Converted, collect_sources, convert_to_webp};
use crate::logger::ProgressLine;
use crate::utils::plural_count;
use crate::{debug, log};

/// Convert every source image under `[convert].source`.
///
/// Never fails the command: a missing source directory is a warning, a
/// failed image is logged and counted.
pub fn run_convert(config: &SyncConfig) {
    let sources = match collect_sources(&config.convert) {
        Ok(sources) => sources,
        Err(ConvertError::SourceMissing(dir)) => {
            log!("warning"; "image directory {} not found, skipping conversion", config.root_relative(&dir).display());
            return;
        }
        Err(e) => {
            log!("error"; "{:#}", anyhow::Error::from(e));
            return;
        }
    };

    if sources.is_empty() {
        log!("convert"; "no images to convert");
        return;
    }

    log!("convert"; "converting {} to webp", plural_count(sources.len(), "image"));

    let progress = ProgressLine::new("convert", &[("images", sources.len())]);
    let failed = AtomicUsize::new(0);

    let converted: Vec<Converted> = sources
        .par_iter()
        .filter_map(|path| {
            if is_shutdown() {
                return None;
            }
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let result = convert_to_webp(path, config.convert.max_width_for(&name));
            progress.inc("images");

            match result {
                Ok(done) => {
                    debug!("convert"; "{} ({:.1}% smaller{})",
                        config.root_relative(&done.output).display(),
                        done.savings_percent(),
                        done.resized
                            .map(|(w, h)| format!(", {}x{} -> {w}x{h}", done.original.0, done.original.1))
                            .unwrap_or_default()
                    );
                    Some(done)
                }
                Err(e) => {
                    failed.fetch_add(1, Ordering::Relaxed);
                    log!("error"; "{}: {:#}", config.root_relative(path).display(), anyhow::Error::from(e));
                    None
                }
            }
        })
        .collect();

    progress.finish();

    let failed = failed.into_inner();
    let resized = converted.iter().filter(|c| c.resized.is_some()).count();
    log!(
        "convert";
        "{} converted ({} resized), {} failed, originals kept",
        plural_count(converted.len(), "image"),
        resized,
        failed
    );
}
