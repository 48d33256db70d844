//! Cancellable scan over every candidate file.

use log::{debug, warn};
use notecount_domain::{CountsByPath, NoteCountSettings};
use notecount_ports::{FileEntryDto, FileSource, NoProgress, ScanProgress};
use notecount_shared_kernel::{ApplicationError, Result};

use crate::{cancellation::CancellationToken, file_counter::FileCounter};

static NO_PROGRESS: NoProgress = NoProgress;

/// Table produced by a scan, complete or cut short.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutcome {
    pub counts: CountsByPath,
    /// Files that produced a record.
    pub scanned: usize,
    /// Files skipped because they could not be read.
    pub failed: usize,
    pub cancelled: bool,
}

pub struct BulkScan<'a> {
    source: &'a dyn FileSource,
    counter: FileCounter<'a>,
    progress: &'a dyn ScanProgress,
}

impl<'a> BulkScan<'a> {
    pub fn new(source: &'a dyn FileSource, settings: &'a NoteCountSettings) -> Self {
        Self { source, counter: FileCounter::new(settings), progress: &NO_PROGRESS }
    }

    pub fn with_progress(mut self, progress: &'a dyn ScanProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Scans every file the source lists. Listing failures are errors; a
    /// cancelled scan returns what it has so far.
    pub fn scan_all(&self, token: &CancellationToken) -> Result<ScanOutcome> {
        let entries = self.source.list_files().map_err(|err| ApplicationError::FileListingFailed {
            reason: err.to_string(),
            source: Some(Box::new(err)),
        })?;
        Ok(self.scan_entries(entries, token))
    }

    /// Scans `entries` in order, checking `token` before each file.
    pub fn scan_entries(&self, entries: Vec<FileEntryDto>, token: &CancellationToken) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();
        debug!("scanning {} files", entries.len());

        for entry in entries {
            if token.is_cancelled() {
                debug!("scan cancelled after {} files", outcome.scanned);
                outcome.cancelled = true;
                return outcome;
            }
            match self.counter.count_entry(self.source, &entry) {
                Ok(record) => {
                    outcome.counts.insert(entry.path.clone(), record);
                    outcome.scanned += 1;
                }
                Err(err) => {
                    warn!("skipping {}: {err}", entry.path);
                    outcome.failed += 1;
                }
            }
            if let Err(err) = self.progress.on_file(&entry.path) {
                debug!("progress sink failed: {err}");
            }
        }

        if let Err(err) = self.progress.on_complete(outcome.scanned) {
            debug!("progress sink failed: {err}");
        }
        outcome
    }
}

/// Shorthand for a [`BulkScan`] without progress reporting.
pub fn scan_all(
    source: &dyn FileSource,
    settings: &NoteCountSettings,
    token: &CancellationToken,
) -> Result<ScanOutcome> {
    BulkScan::new(source, settings).scan_all(token)
}
