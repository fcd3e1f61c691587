// Minimal leveled logger for the CLI. Messages go to stderr so they can
// never end up mixed into generated SQL when output is redirected.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

// Enable or disable debug logging based on the --debug flag.
pub fn set_debug(enabled: bool) {
    DEBUG_ENABLED.store(enabled, Ordering::Relaxed);
}

// Returns true if debug logging is enabled.
pub fn is_debug() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

// Print a DEBUG-level message if enabled.
pub fn debug(msg: &str) {
    if is_debug() {
        log_line("DEBUG", msg);
    }
}

// Print an INFO-level message.
pub fn info(msg: &str) {
    log_line("INFO", msg);
}

// Format log lines with a unix timestamp and short level label.
fn log_line(level: &str, msg: &str) {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    eprintln!("{} [{}] {}", ts, level, msg);
}
