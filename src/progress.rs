// src/progress.rs
/// Lightweight progress reporting for runs (single append or multi-year history).
/// Frontends implement this to surface status to users; the CLI prints lines.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One logical unit completed (e.g. a year page was scraped).
    fn item_done(&mut self, _label: &str) {}

    /// One logical unit failed but the run goes on.
    fn item_failed(&mut self, _label: &str, _err: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Collects messages; handy for tests and for callers that print later.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub lines: Vec<String>,
    pub done: Vec<String>,
    pub failed: Vec<String>,
}

impl Progress for RecordingProgress {
    fn log(&mut self, msg: &str) {
        self.lines.push(s!(msg));
    }
    fn item_done(&mut self, label: &str) {
        self.done.push(s!(label));
    }
    fn item_failed(&mut self, label: &str, _err: &str) {
        self.failed.push(s!(label));
    }
}
