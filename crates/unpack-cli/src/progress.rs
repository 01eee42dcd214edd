//! Milestone progress bar for CLI extraction.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use unpack_core::ProgressSink;

/// CLI progress bar wrapper implementing `ProgressSink`.
///
/// The extraction engine reports coarse milestones (percent plus a status
/// line) rather than per-entry ticks, so the bar tracks a 0-100 position
/// and shows the latest milestone message. Positions are clamped
/// non-decreasing because the plain-to-tar fallback re-emits low
/// percentages. Automatically cleans up on drop.
pub struct MilestoneBar {
    bar: ProgressBar,
    high_water: u64,
}

impl MilestoneBar {
    /// Creates a new milestone bar.
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}%")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.set_message(message.to_string());

        Self { bar, high_water: 0 }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }
}

impl Drop for MilestoneBar {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressSink for MilestoneBar {
    fn milestone(&mut self, percent: u8, message: &str) {
        self.high_water = self.high_water.max(u64::from(percent.min(100)));
        self.bar.set_position(self.high_water);
        self.bar.set_message(message.to_string());
    }
}
