// crates/infra/src/filesystem.rs
use std::{
    fs::Metadata,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use ignore::WalkBuilder;
use log::{debug, warn};
use notecount_ports::{FileEntryDto, FileMetadata, FileSource};
use notecount_shared_kernel::{
    FileSize, InfrastructureError, Result, Timestamp, logical_absolute, note_path, resolve_note_path,
};

use crate::{frontmatter::extract_metadata, persistence::FileReader};

/// Notes below a root directory on the local filesystem.
///
/// Paths handed out and accepted are `/`-separated and relative to the root.
/// Hidden entries (`.obsidian`, `.git`, the saved-data file) are skipped
/// unless [`FsFileSource::include_hidden`] is set; ignore files are honoured.
#[derive(Debug, Clone)]
pub struct FsFileSource {
    root: PathBuf,
    include_hidden: bool,
    follow_links: bool,
}

impl FsFileSource {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self { root: logical_absolute(root.as_ref()), include_hidden: false, follow_links: false }
    }

    pub fn include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn walker(&self, start: &Path) -> WalkBuilder {
        let mut builder = WalkBuilder::new(start);
        builder
            .follow_links(self.follow_links)
            .hidden(!self.include_hidden)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .ignore(true)
            .sort_by_file_name(|a, b| a.cmp(b));
        builder
    }

    fn collect(&self, start: &Path) -> Result<Vec<FileEntryDto>> {
        if !start.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for result in self.walker(start).build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("skipping unreadable entry under {}: {err}", start.display());
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let Some(path) = note_path(&self.root, entry.path()) else {
                continue;
            };
            match entry.metadata() {
                Ok(metadata) if metadata.is_file() => entries.push(to_port_entry(path, &metadata)),
                Ok(_) => {}
                Err(err) => warn!("unable to stat {path}: {err}"),
            }
        }
        debug!("listed {} files under {}", entries.len(), start.display());
        Ok(entries)
    }
}

fn to_port_entry(path: String, metadata: &Metadata) -> FileEntryDto {
    let mut entry = FileEntryDto::new(path);
    entry.size = FileSize::new(metadata.len());
    entry.created = metadata.created().map(Timestamp::from_system_time).unwrap_or_default();
    entry.modified = metadata.modified().map(Timestamp::from_system_time).unwrap_or_default();
    entry
}

impl FileSource for FsFileSource {
    fn list_files(&self) -> Result<Vec<FileEntryDto>> {
        if !self.root.is_dir() {
            return Err(InfrastructureError::WalkFailed {
                path: self.root.clone(),
                details: "not a directory".to_string(),
            }
            .into());
        }
        self.collect(&self.root)
    }

    fn stat(&self, path: &str) -> Result<Option<FileEntryDto>> {
        let absolute = resolve_note_path(&self.root, path);
        match std::fs::metadata(&absolute) {
            Ok(metadata) if metadata.is_file() => Ok(Some(to_port_entry(path.to_string(), &metadata))),
            Ok(_) => Ok(None),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(InfrastructureError::FileSystemOperation {
                operation: "stat".to_string(),
                path: absolute,
                source,
            }
            .into()),
        }
    }

    fn read_text(&self, path: &str) -> Result<String> {
        let absolute = resolve_note_path(&self.root, path);
        FileReader::read_text(&absolute).map_err(|source| InfrastructureError::FileRead { path: absolute, source }.into())
    }

    fn read_metadata(&self, path: &str, content: &str) -> Result<FileMetadata> {
        Ok(extract_metadata(path, content))
    }

    fn list_files_under(&self, dir: &str) -> Result<Vec<FileEntryDto>> {
        let start = resolve_note_path(&self.root, dir);
        if start.is_file() {
            return Ok(self.stat(dir)?.into_iter().collect());
        }
        self.collect(&start)
    }
}
