//! Concurrent card image download and resizing

use crate::cards::catalog::Card;
use crate::io::configuration::MAX_DOWNLOAD_WORKERS;
use crate::io::error::{PipelineError, Result};
use crate::io::progress::DownloadProgress;
use image::DynamicImage;
use image::imageops::FilterType;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Settings for the card image download pass
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Directory resized images are written to
    pub output_dir: PathBuf,
    /// Number of concurrent download workers
    pub workers: usize,
    /// Width images are resized to, preserving aspect ratio
    pub resize_width: u32,
    /// Skip cards whose resized image already exists
    pub skip_existing: bool,
}

/// Outcome counts of a download pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    /// Cards downloaded and resized
    pub downloaded: usize,
    /// Cards skipped because their resized image already existed
    pub skipped: usize,
    /// Cards that failed (missing URL, HTTP error, bad image data)
    pub failed: usize,
}

enum CardOutcome {
    Downloaded,
    Skipped,
}

fn download_error(url: &str, reason: &impl ToString) -> PipelineError {
    PipelineError::Download {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

/// Resize an image to the given width, preserving aspect ratio
///
/// Height is derived by integer scaling and floored at one pixel; images
/// already at the target width pass through unchanged.
pub fn resize_to_width(image: &DynamicImage, width: u32) -> DynamicImage {
    let (w, h) = (image.width(), image.height());
    if w == 0 || h == 0 || width == 0 || w == width {
        return image.clone();
    }
    let height = ((u64::from(h) * u64::from(width)) / u64::from(w)).max(1) as u32;
    image.resize_exact(width, height, FilterType::Lanczos3)
}

// One card, isolated: any failure is returned to the worker loop and counted
// there, never propagated across tasks.
fn fetch_card(
    client: &reqwest::blocking::Client,
    card: &Card,
    config: &FetchConfig,
) -> Result<CardOutcome> {
    let url = card
        .image_uris
        .png
        .as_deref()
        .ok_or_else(|| download_error("", &format!("no PNG URL for '{}'", card.name)))?;

    let resized_path = config
        .output_dir
        .join(card.resized_file_name(config.resize_width));
    if config.skip_existing && resized_path.exists() {
        return Ok(CardOutcome::Skipped);
    }

    let response = client
        .get(url)
        .send()
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(|e| download_error(url, &e))?;
    let bytes = response.bytes().map_err(|e| download_error(url, &e))?;

    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| download_error(url, &format!("invalid image data: {e}")))?;
    let resized = resize_to_width(&decoded, config.resize_width);

    resized
        .save(&resized_path)
        .map_err(|e| PipelineError::ImageExport {
            path: resized_path,
            source: e,
        })?;

    Ok(CardOutcome::Downloaded)
}

/// Download and resize every card image through a bounded worker pool
///
/// Workers pull cards from a shared atomic index; the only other cross-task
/// state is the outcome counters and the progress bar. One card's failure is
/// counted and reported but never affects the others. There are no retries.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or the HTTP
/// client cannot be constructed; per-card failures only show up in the
/// summary counts.
pub fn fetch_card_images(
    cards: &[Card],
    config: &FetchConfig,
    progress: Option<&DownloadProgress>,
) -> Result<FetchSummary> {
    std::fs::create_dir_all(&config.output_dir).map_err(|e| PipelineError::FileSystem {
        path: config.output_dir.clone(),
        operation: "create output directory",
        source: e,
    })?;

    let client = reqwest::blocking::Client::builder()
        .build()
        .map_err(|e| download_error("<client>", &e))?;

    let next = AtomicUsize::new(0);
    let downloaded = AtomicUsize::new(0);
    let skipped = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    let workers = config
        .workers
        .clamp(1, MAX_DOWNLOAD_WORKERS)
        .min(cards.len().max(1));

    std::thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| {
                loop {
                    let index = next.fetch_add(1, Ordering::Relaxed);
                    let Some(card) = cards.get(index) else {
                        break;
                    };

                    match fetch_card(&client, card, config) {
                        Ok(CardOutcome::Downloaded) => {
                            downloaded.fetch_add(1, Ordering::Relaxed);
                        }
                        Ok(CardOutcome::Skipped) => {
                            skipped.fetch_add(1, Ordering::Relaxed);
                            if let Some(bar) = progress {
                                bar.message(&format!(
                                    "Skipping {} ({}) - already exists",
                                    card.name,
                                    card.label()
                                ));
                            }
                        }
                        Err(error) => {
                            failed.fetch_add(1, Ordering::Relaxed);
                            if let Some(bar) = progress {
                                bar.message(&format!(
                                    "Failed {} ({}): {error}",
                                    card.name,
                                    card.label()
                                ));
                            }
                        }
                    }

                    if let Some(bar) = progress {
                        bar.advance();
                    }
                }
            });
        }
    });

    if let Some(bar) = progress {
        bar.finish();
    }

    Ok(FetchSummary {
        downloaded: downloaded.into_inner(),
        skipped: skipped.into_inner(),
        failed: failed.into_inner(),
    })
}
