//! Terminal progress display while tiles are scored

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static SCORING_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress for scoring scrambled tiles against the reference set
///
/// One bar per run, advanced once per scrambled tile.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no active bar
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            bar: None,
        }
    }

    /// Start a bar for `total` scrambled tiles
    pub fn start(&mut self, label: &str, total: usize) {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(SCORING_STYLE.clone());
        bar.set_prefix(label.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(self.multi_progress.add(bar));
    }

    /// Record that a scrambled tile has been scored
    pub fn tile_scored(&self, index: usize) {
        if let Some(ref bar) = self.bar {
            bar.set_message(format!("tile {index}"));
            bar.inc(1);
        }
    }

    /// Number of tiles recorded so far
    pub fn position(&self) -> u64 {
        self.bar.as_ref().map_or(0, ProgressBar::position)
    }

    /// Clear the bar
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
        let _ = self.multi_progress.clear();
    }
}
