use std::ops::Range;

use notecount_shared_kernel::{FileExtension, FileSize, Result, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A candidate file as listed by a [`FileSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntryDto {
    /// `/`-separated path relative to the source root.
    pub path: String,
    pub extension: FileExtension,
    pub size: FileSize,
    pub created: Timestamp,
    pub modified: Timestamp,
}

impl FileEntryDto {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            extension: FileExtension::from_path(&path),
            path,
            size: FileSize::zero(),
            created: Timestamp::unknown(),
            modified: Timestamp::unknown(),
        }
    }

    /// True when the entry sits at `dir` or anywhere below it.
    pub fn is_under(&self, dir: &str) -> bool {
        self.path == dir
            || self.path.strip_prefix(dir).is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Metadata the host extracts from a note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub frontmatter: Option<Map<String, Value>>,
    /// Byte range of the front-matter block, excluded from counting.
    pub frontmatter_span: Option<Range<usize>>,
    pub link_count: u64,
    pub embed_count: u64,
    /// Tags with their leading `#`.
    pub tags: Vec<String>,
    pub aliases: Vec<String>,
}

/// Port for listing and reading notes.
pub trait FileSource: Send + Sync {
    /// Every candidate file, in the order they should be processed.
    fn list_files(&self) -> Result<Vec<FileEntryDto>>;

    /// Current entry for one path, `None` when it no longer exists.
    fn stat(&self, path: &str) -> Result<Option<FileEntryDto>>;

    fn read_text(&self, path: &str) -> Result<String>;

    /// Metadata of `path`, whose full text is `content`.
    fn read_metadata(&self, path: &str, content: &str) -> Result<FileMetadata>;

    /// Candidate files at or below `dir`.
    fn list_files_under(&self, dir: &str) -> Result<Vec<FileEntryDto>> {
        Ok(self.list_files()?.into_iter().filter(|entry| entry.is_under(dir)).collect())
    }
}
