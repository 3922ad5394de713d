//! Progress display for the card download pass

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static DOWNLOAD_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Cards: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar shared by the download workers
///
/// Messages print above the bar so concurrent task output never tears the
/// bar rendering. All methods take `&self`; the underlying bar is
/// thread-safe.
pub struct DownloadProgress {
    bar: ProgressBar,
}

impl DownloadProgress {
    /// Create a progress bar for the given card count
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(DOWNLOAD_STYLE.clone());
        Self { bar }
    }

    /// Print a status line above the bar
    pub fn message(&self, text: &str) {
        self.bar.println(text);
    }

    /// Record one completed card
    pub fn advance(&self) {
        self.bar.inc(1);
    }

    /// Finish the bar, leaving it on screen
    pub fn finish(&self) {
        self.bar.finish();
    }
}
