#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use notecount_ports::{
    DateFormatter, FileEntryDto, FileMetadata, FileSource, LabelSink, NumberFormatter, ScanProgress,
};
use notecount_shared_kernel::{
    ApplicationError, FileSize, InfrastructureError, Result, Timestamp,
};

type ReadHook = Box<dyn Fn(&str) + Send + Sync>;

/// In-memory notes, listed in insertion order.
#[derive(Default)]
pub struct MemorySource {
    entries: Mutex<Vec<FileEntryDto>>,
    contents: Mutex<HashMap<String, String>>,
    metadata: Mutex<HashMap<String, FileMetadata>>,
    unreadable: Mutex<HashSet<String>>,
    reads: Mutex<Vec<String>>,
    on_read: Mutex<Option<ReadHook>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_note(self, path: &str, content: &str) -> Self {
        self.put(path, content);
        self
    }

    pub fn with_metadata(self, path: &str, metadata: FileMetadata) -> Self {
        self.metadata.lock().unwrap().insert(path.to_string(), metadata);
        self
    }

    pub fn with_unreadable(self, path: &str) -> Self {
        self.put(path, "");
        self.unreadable.lock().unwrap().insert(path.to_string());
        self
    }

    pub fn on_read(&self, hook: impl Fn(&str) + Send + Sync + 'static) {
        *self.on_read.lock().unwrap() = Some(Box::new(hook));
    }

    /// Adds or replaces a note. Dates are fixed so tests stay deterministic.
    pub fn put(&self, path: &str, content: &str) {
        let mut entry = FileEntryDto::new(path);
        entry.size = FileSize::new(content.len() as u64);
        entry.created = Timestamp::from_millis(1_700_000_000_000);
        entry.modified = Timestamp::from_millis(1_700_000_500_000);

        let mut entries = self.entries.lock().unwrap();
        entries.retain(|e| e.path != path);
        entries.push(entry);
        self.contents.lock().unwrap().insert(path.to_string(), content.to_string());
    }

    pub fn delete(&self, path: &str) {
        self.entries.lock().unwrap().retain(|e| e.path != path);
        self.contents.lock().unwrap().remove(path);
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }
}

impl FileSource for MemorySource {
    fn list_files(&self) -> Result<Vec<FileEntryDto>> {
        Ok(self.entries.lock().unwrap().clone())
    }

    fn stat(&self, path: &str) -> Result<Option<FileEntryDto>> {
        Ok(self.entries.lock().unwrap().iter().find(|e| e.path == path).cloned())
    }

    fn read_text(&self, path: &str) -> Result<String> {
        self.reads.lock().unwrap().push(path.to_string());
        let hook = self.on_read.lock().unwrap().take();
        if let Some(hook) = hook {
            hook(path);
        }
        if self.unreadable.lock().unwrap().contains(path) {
            return Err(InfrastructureError::FileRead {
                path: path.into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            }
            .into());
        }
        Ok(self.contents.lock().unwrap().get(path).cloned().unwrap_or_default())
    }

    fn read_metadata(&self, path: &str, _content: &str) -> Result<FileMetadata> {
        Ok(self.metadata.lock().unwrap().get(path).cloned().unwrap_or_default())
    }
}

/// `1234567.891` renders as `1,234,567.89`.
pub struct EnglishNumbers;

impl NumberFormatter for EnglishNumbers {
    fn format_number(&self, value: f64, min_fraction: usize, max_fraction: usize) -> String {
        let negative = value < 0.0;
        let text = format!("{:.max_fraction$}", value.abs());
        let (int, frac) = text.split_once('.').unwrap_or((&text, ""));
        let mut frac = frac.to_string();
        while frac.len() > min_fraction && frac.ends_with('0') {
            frac.pop();
        }
        let mut grouped = String::new();
        for (i, ch) in int.chars().enumerate() {
            if i > 0 && (int.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if negative && (grouped != "0" || !frac.is_empty()) { "-" } else { "" };
        if frac.is_empty() { format!("{sign}{grouped}") } else { format!("{sign}{grouped}.{frac}") }
    }
}

/// Dates as `ms:{millis}` or `{pattern}@{millis}`.
pub struct RawDates;

impl DateFormatter for RawDates {
    fn format_date(&self, timestamp: Timestamp, pattern: Option<&str>) -> String {
        match pattern {
            Some(pattern) => format!("{pattern}@{}", timestamp.millis()),
            None => format!("ms:{}", timestamp.millis()),
        }
    }
}

/// Collects labels; the first `missing_for` publishes fail as missing.
#[derive(Default)]
pub struct RecordingSink {
    pub labels: Vec<(String, String)>,
    pub missing_for: u32,
    pub calls: u32,
}

impl LabelSink for RecordingSink {
    fn publish(&mut self, path: &str, label: &str) -> Result<()> {
        self.calls += 1;
        if self.missing_for > 0 {
            self.missing_for -= 1;
            return Err(ApplicationError::DisplayTargetUnavailable { reason: "file explorer not open".into() }.into());
        }
        self.labels.push((path.to_string(), label.to_string()));
        Ok(())
    }
}

/// Remembers every progress event.
#[derive(Default)]
pub struct RecordingProgress {
    pub files: Mutex<Vec<String>>,
    pub completed: Mutex<Option<usize>>,
}

impl ScanProgress for RecordingProgress {
    fn on_file(&self, path: &str) -> Result<()> {
        self.files.lock().unwrap().push(path.to_string());
        Ok(())
    }

    fn on_complete(&self, scanned: usize) -> Result<()> {
        *self.completed.lock().unwrap() = Some(scanned);
        Ok(())
    }
}
