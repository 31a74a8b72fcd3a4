//! Progress bars for a harvest run.
//!
//! One bar tracks result pages; a second, transient bar tracks the results of
//! the page being processed. Both are hidden in quiet mode.
//!
//! ```ignore
//! use softscrape::utils::HarvestProgress;
//!
//! let progress = HarvestProgress::new(10, false);
//! let results = progress.page_results(1, 10);
//! results.inc(1);
//! results.finish_and_clear();
//! progress.page_done();
//! progress.finish(42);
//! ```

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Page and per-page result progress
#[derive(Debug, Clone)]
pub struct HarvestProgress {
    multi: MultiProgress,
    pages: ProgressBar,
    quiet: bool,
}

impl HarvestProgress {
    /// Create progress tracking for `total_pages` pages
    pub fn new(total_pages: usize, quiet: bool) -> Self {
        let multi = if quiet {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        } else {
            MultiProgress::new()
        };

        let pages = multi.add(ProgressBar::new(total_pages as u64));
        if let Ok(style) = ProgressStyle::with_template(
            "{msg}: {bar:40.cyan/blue} {pos}/{len} ({percent}%)",
        ) {
            pages.set_style(style.progress_chars("█▓▒░ "));
        }
        pages.set_message("Pages");

        Self {
            multi,
            pages,
            quiet,
        }
    }

    /// A quiet tracker that never draws
    pub fn hidden(total_pages: usize) -> Self {
        Self::new(total_pages, true)
    }

    /// Bar for the results of page `page_number` (1-based)
    pub fn page_results(&self, page_number: usize, count: usize) -> ProgressBar {
        let bar = self.multi.add(ProgressBar::new(count as u64));
        if let Ok(style) = ProgressStyle::with_template("  {msg}: {wide_bar:.green} {pos}/{len}") {
            bar.set_style(style.progress_chars("█  "));
        }
        bar.set_message(format!("Results {}", page_number));
        bar
    }

    /// Mark one page as processed
    pub fn page_done(&self) {
        self.pages.inc(1);
    }

    /// Number of pages marked as processed
    pub fn pages_done(&self) -> u64 {
        self.pages.position()
    }

    /// Finish with the number of records collected
    pub fn finish(&self, records: usize) {
        if self.quiet {
            self.pages.finish_and_clear();
        } else {
            self.pages
                .finish_with_message(format!("✓ Collected {} records", records));
        }
    }
}
