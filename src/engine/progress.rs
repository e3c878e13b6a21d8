// ABOUTME: Progress logging sinks and ordinal label formatting for batch runs
// ABOUTME: Lines go through an injected ProgressLog so callers and tests choose the destination

use std::sync::Mutex;
use tracing::info;

/// Destination for per-item progress and failure lines
pub trait ProgressLog: Send + Sync {
    fn log(&self, line: &str);
}

/// Forwards every line to `tracing` at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl ProgressLog for TracingLog {
    fn log(&self, line: &str) {
        info!("{}", line);
    }
}

/// Keeps lines in memory, in the order they were logged
#[derive(Debug, Default)]
pub struct CapturedLog {
    lines: Mutex<Vec<String>>,
}

impl CapturedLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ProgressLog for CapturedLog {
    fn log(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line.to_string());
    }
}

/// Number of decimal digits in `n` (zero has one digit)
pub fn count_digits(n: usize) -> usize {
    let mut digits = 1;
    let mut rest = n / 10;
    while rest > 0 {
        digits += 1;
        rest /= 10;
    }
    digits
}

/// Left-pad `value` with zeros to `width` characters
pub fn left_pad(value: usize, width: usize) -> String {
    format!("{:0width$}", value, width = width)
}

/// Ordinal label for the `position`-th item (1-based) of a batch of `total`
pub fn ordinal_label(position: usize, total: usize) -> String {
    left_pad(position, count_digits(total))
}

/// Effective concurrency for a batch: zero requests one slot per item
pub fn effective_parallelism(requested: usize, total: usize) -> usize {
    if requested == 0 {
        total
    } else {
        requested.min(total)
    }
}
