// src/progress.rs
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{info, trace};
use notecount_ports::ScanProgress;
use notecount_shared_kernel::Result;

/// Reports scan progress through the log.
#[derive(Debug, Default)]
pub struct ScanLog {
    seen: AtomicUsize,
}

impl ScanLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files visited so far, counted or skipped.
    pub fn seen(&self) -> usize {
        self.seen.load(Ordering::Relaxed)
    }
}

impl ScanProgress for ScanLog {
    fn on_file(&self, path: &str) -> Result<()> {
        let seen = self.seen.fetch_add(1, Ordering::Relaxed) + 1;
        trace!("[{seen}] {path}");
        Ok(())
    }

    fn on_complete(&self, scanned: usize) -> Result<()> {
        info!("counted {scanned} of {} files", self.seen());
        Ok(())
    }
}
