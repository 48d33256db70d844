//! Owner of the path table: bulk refreshes, incremental updates and reads.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError, RwLock},
};

use log::debug;
use notecount_domain::{
    CountRecord, CountsByPath, NoteCountSettings, ROOT_PATH, SessionCountRecord, TargetNode,
    aggregate,
};
use notecount_ports::{FileSource, NoProgress, ScanProgress};
use notecount_shared_kernel::Result;

use crate::{
    bulk_scan::{BulkScan, ScanOutcome},
    cancellation::{CancellationToken, CancellationTokenSource},
    label::{FormatOptions, Formatters, LabelFormatter},
};

/// Holds the current [`CountsByPath`] and guarantees only the latest scan
/// commits.
///
/// No lock is held while files are read, so a scan started from inside
/// another (through a re-entrant [`FileSource`]) cancels the outer one.
#[derive(Debug, Default)]
pub struct CountSession {
    settings: RwLock<NoteCountSettings>,
    counts: RwLock<CountsByPath>,
    active: Mutex<Vec<CancellationTokenSource>>,
}

impl CountSession {
    pub fn new(settings: NoteCountSettings) -> Self {
        Self::with_counts(settings, CountsByPath::new())
    }

    /// Session seeded with a table restored from a previous run.
    pub fn with_counts(settings: NoteCountSettings, counts: CountsByPath) -> Self {
        Self { settings: RwLock::new(settings), counts: RwLock::new(counts), active: Mutex::default() }
    }

    pub fn settings(&self) -> NoteCountSettings {
        self.settings.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set_settings(&self, settings: NoteCountSettings) {
        *self.settings.write().unwrap_or_else(PoisonError::into_inner) = settings;
    }

    /// Copy of the current table.
    pub fn snapshot(&self) -> CountsByPath {
        self.counts.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn active(&self) -> MutexGuard<'_, Vec<CancellationTokenSource>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cancels every in-flight scan and registers a fresh token.
    fn supersede(&self) -> (CancellationTokenSource, CancellationToken) {
        let source = CancellationTokenSource::new();
        let mut active = self.active();
        for previous in active.drain(..) {
            previous.cancel();
        }
        active.push(source.clone());
        let token = source.token();
        (source, token)
    }

    /// Registers a token without disturbing running scans.
    fn register(&self) -> (CancellationTokenSource, CancellationToken) {
        let source = CancellationTokenSource::new();
        self.active().push(source.clone());
        let token = source.token();
        (source, token)
    }

    fn release(&self, source: &CancellationTokenSource) {
        self.active().retain(|held| !held.issued(&source.token()));
    }

    /// Rescans every file. Returns `false` when a newer scan superseded this
    /// one and its result was dropped.
    pub fn refresh_all(&self, source: &dyn FileSource) -> Result<bool> {
        self.refresh_all_with_progress(source, &NoProgress)
    }

    /// [`Self::refresh_all`], reporting each counted file to `progress`.
    pub fn refresh_all_with_progress(&self, source: &dyn FileSource, progress: &dyn ScanProgress) -> Result<bool> {
        let (owner, token) = self.supersede();
        let settings = self.settings();
        debug!("bulk scan started");
        let outcome = BulkScan::new(source, &settings).with_progress(progress).scan_all(&token);
        self.release(&owner);
        let ScanOutcome { counts: mut fresh, scanned, failed, .. } = outcome?;

        let mut counts = self.counts.write().unwrap_or_else(PoisonError::into_inner);
        if token.is_cancelled() {
            debug!("bulk scan superseded after {scanned} files, result dropped");
            return Ok(false);
        }
        for (path, record) in fresh.iter_mut() {
            if let Some(previous) = counts.get(path) {
                record.session_start = previous.session_start;
            }
        }
        *counts = fresh;
        debug!("bulk scan committed: {scanned} files, {failed} skipped");
        Ok(true)
    }

    /// Rescans one file and replaces its leaf. A file that no longer exists
    /// is removed. Returns whether the update was committed.
    pub fn update_file(&self, source: &dyn FileSource, path: &str) -> Result<bool> {
        let (owner, token) = self.register();
        let result = self.recount(source, path, &token);
        self.release(&owner);
        let Some(record) = result? else {
            self.remove_path(path);
            return Ok(true);
        };

        let mut counts = self.counts.write().unwrap_or_else(PoisonError::into_inner);
        if token.is_cancelled() {
            debug!("update of {path} superseded");
            return Ok(false);
        }
        let session_start = counts.get(path).map_or_else(SessionCountRecord::default, |prev| prev.session_start);
        counts.insert(path, CountRecord { session_start, ..record });
        debug!("recounted {path}");
        Ok(true)
    }

    fn recount(&self, source: &dyn FileSource, path: &str, token: &CancellationToken) -> Result<Option<CountRecord>> {
        let Some(entry) = source.stat(path)? else {
            return Ok(None);
        };
        let settings = self.settings();
        let outcome = BulkScan::new(source, &settings).scan_entries(vec![entry], token);
        Ok(outcome.counts.get(path).cloned())
    }

    /// Drops the leaf at `path` and everything below it.
    pub fn remove_path(&self, path: &str) -> usize {
        let removed = self.counts.write().unwrap_or_else(PoisonError::into_inner).remove_descendants(path);
        debug!("removed {removed} records under {path}");
        removed
    }

    /// Moves `old` to `new`: the old leaves are dropped and the files now
    /// under `new` are scanned. Session snapshots follow the move.
    pub fn rename_path(&self, source: &dyn FileSource, old: &str, new: &str) -> Result<bool> {
        let moved: HashMap<String, SessionCountRecord> = {
            let mut counts = self.counts.write().unwrap_or_else(PoisonError::into_inner);
            let carried = counts
                .iter()
                .filter_map(|(path, record)| {
                    let rest = path.strip_prefix(old).filter(|rest| rest.is_empty() || rest.starts_with('/'))?;
                    Some((format!("{new}{rest}"), record.session_start))
                })
                .collect();
            counts.remove_descendants(old);
            carried
        };

        let (owner, token) = self.register();
        let settings = self.settings();
        let entries = source.list_files_under(new);
        let outcome = entries.map(|entries| BulkScan::new(source, &settings).scan_entries(entries, &token));
        self.release(&owner);
        let outcome = outcome?;

        let mut counts = self.counts.write().unwrap_or_else(PoisonError::into_inner);
        if token.is_cancelled() {
            debug!("rename {old} -> {new} superseded");
            return Ok(false);
        }
        for (path, record) in outcome.counts {
            let session_start = moved.get(&path).copied().unwrap_or_default();
            counts.insert(path, CountRecord { session_start, ..record });
        }
        debug!("renamed {old} -> {new}");
        Ok(true)
    }

    /// Starts a new writing session: every leaf snapshots its current values.
    pub fn start_new_session(&self) {
        let mut counts = self.counts.write().unwrap_or_else(PoisonError::into_inner);
        for record in counts.values_mut() {
            record.session_start = record.snapshot();
        }
    }

    /// Leaf record or directory aggregate for `path`.
    pub fn counts_for(&self, path: &str) -> CountRecord {
        aggregate(&self.counts.read().unwrap_or_else(PoisonError::into_inner), path)
    }

    pub fn target_of(&self, path: &str) -> TargetNode {
        if path == ROOT_PATH {
            TargetNode::Root
        } else if self.counts.read().unwrap_or_else(PoisonError::into_inner).contains(path) {
            TargetNode::File
        } else {
            TargetNode::Directory
        }
    }

    /// Label for the node at `path`, using the slots of its context.
    pub fn label_for(&self, path: &str, formatters: Formatters<'_>) -> String {
        let target = self.target_of(path);
        let record = self.counts_for(path);
        let settings = self.settings();
        let selections = settings.selections(target);
        let options = FormatOptions::for_target(&settings, target);
        LabelFormatter::new(formatters).format(&record, &selections, &options)
    }

    /// Number of scans currently holding a token.
    pub fn in_flight(&self) -> usize {
        self.active().len()
    }
}
