//! Progress bar utilities for displaying processing status

use kdam::{Animation, Bar, BarExt};

use crate::{Progress, ProgressUnit};

/// Configuration for creating a progress bar
pub struct ProgressBarConfig {
    pub total: usize,
    pub desc: &'static str,
    pub animation: Animation,
}

impl ProgressBarConfig {
    /// Create a new progress bar configuration
    pub fn new(total: usize, desc: &'static str, animation: Animation) -> Self {
        Self {
            total,
            desc,
            animation,
        }
    }
}

/// Create a progress bar with the given configuration
pub fn create_progress_bar(config: ProgressBarConfig) -> Bar {
    kdam::tqdm!(
        total = config.total,
        desc = config.desc,
        animation = config.animation
    )
}

/// Move the bar to an absolute checkpoint; the total follows the checkpoint's total.
pub fn advance_bar(bar: &mut Bar, p: Progress) {
    if bar.total != p.total {
        bar.total = p.total;
    }
    let _ = bar.update_to(p.done);
}

/// Label for the bar of each unit.
pub fn bar_desc(unit: ProgressUnit) -> &'static str {
    match unit {
        ProgressUnit::Rows => "Generating",
        ProgressUnit::Chunks => "Splitting",
    }
}

/// Build a progress callback for the CLI. Does nothing unless `verbose`; the bar is created on the
/// first checkpoint so its label matches the mode.
pub fn progress_callback(verbose: bool) -> impl FnMut(Progress) {
    let mut bar: Option<Bar> = None;
    move |p: Progress| {
        if !verbose {
            return;
        }
        let b = bar.get_or_insert_with(|| {
            create_progress_bar(ProgressBarConfig::new(
                p.total,
                bar_desc(p.unit),
                Animation::Classic,
            ))
        });
        advance_bar(b, p);
        if p.done == p.total {
            eprintln!();
        }
    }
}
