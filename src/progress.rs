// Progress bar management using indicatif. Bars live under one
// MultiProgress so parse and emit phases render on separate lines.
// With --debug the manager is disabled to keep stderr readable.

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::fs;

pub struct ProgressManager {
    multi: Option<MultiProgress>,
}

impl ProgressManager {
    // Create a new manager. If enabled=false, no bars are created.
    pub fn new(enabled: bool) -> Self {
        let multi = if enabled {
            Some(MultiProgress::new())
        } else {
            None
        };
        Self { multi }
    }

    // Byte-progress bar sized from the input file, for parse phases.
    pub fn new_file_bar(&self, path: &str, label: &str) -> Option<ProgressBar> {
        let mp = self.multi.as_ref()?;
        let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let bar = mp.add(ProgressBar::new(size));
        bar.set_style(byte_style());
        bar.set_prefix(label.to_string());
        Some(bar)
    }

    // Count-progress bar for statement emission.
    pub fn new_statement_bar(&self, total: u64) -> Option<ProgressBar> {
        let mp = self.multi.as_ref()?;
        let bar = mp.add(ProgressBar::new(total));
        bar.set_style(count_style());
        bar.set_prefix("Writing statements".to_string());
        Some(bar)
    }
}

fn byte_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{prefix:20} {bytes:>10}/{total_bytes:<10} [{bar:40}] {percent:>3}%",
    )
    .expect("valid byte bar template")
    .progress_chars("█ ")
}

fn count_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix:20} {pos:>5}/{len:<5} [{bar:40}] {percent:>3}%")
        .expect("valid count bar template")
        .progress_chars("█ ")
}
