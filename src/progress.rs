// src/progress.rs
/// Lightweight progress reporting for a crawl run.
/// Frontends implement this to surface status to users; every hook is optional.
pub trait Progress {
    /// Called at the start of each crawl level with the number of pages in it.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One page was fetched and extracted.
    fn item_done(&mut self, _url: &str, _summary: &str) {}

    /// One page was skipped (fetch, decode or extraction failure).
    fn item_failed(&mut self, _url: &str, _reason: &str) {}

    /// Called once at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
