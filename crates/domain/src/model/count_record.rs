use notecount_shared_kernel::{FileSize, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::parser::ScanResult;

/// Parsed front-matter block of a note.
pub type Frontmatter = Map<String, Value>;

/// Kind of tree node a label is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetNode {
    Root,
    Directory,
    File,
}

/// Statistics for one file, or a directory aggregate synthesised on demand.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CountRecord {
    pub is_countable: bool,
    pub is_directory: bool,
    pub note_count: u64,
    pub page_count: f64,
    pub word_count: u64,
    pub word_count_toward_goal: u64,
    pub word_goal: Option<f64>,
    pub character_count: u64,
    pub non_whitespace_character_count: u64,
    pub reading_time_in_minutes: f64,
    pub link_count: u64,
    pub embed_count: u64,
    #[serde(deserialize_with = "null_as_empty")]
    pub aliases: Vec<String>,
    pub size_in_bytes: FileSize,
    pub created_date: Timestamp,
    pub modified_date: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<Frontmatter>,
    pub session_start: SessionCountRecord,
}

/// Older data stores `null` for notes without aliases.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl CountRecord {
    pub fn builder() -> CountRecordBuilder {
        CountRecordBuilder::default()
    }

    /// The snapshot a session would take of this record right now.
    pub fn snapshot(&self) -> SessionCountRecord {
        SessionCountRecord {
            note_count: self.note_count,
            page_count: self.page_count,
            word_count: self.word_count,
            character_count: self.character_count,
            non_whitespace_character_count: self.non_whitespace_character_count,
        }
    }

    /// Goal only when one is set and positive.
    pub fn effective_word_goal(&self) -> Option<f64> {
        self.word_goal.filter(|goal| *goal > 0.0)
    }
}

/// Subset of [`CountRecord`] captured when a writing session starts.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionCountRecord {
    pub note_count: u64,
    pub page_count: f64,
    pub word_count: u64,
    pub character_count: u64,
    pub non_whitespace_character_count: u64,
}

impl SessionCountRecord {
    pub fn add(&mut self, other: &Self) {
        self.note_count += other.note_count;
        self.page_count += other.page_count;
        self.word_count += other.word_count;
        self.character_count += other.character_count;
        self.non_whitespace_character_count += other.non_whitespace_character_count;
    }
}

/// Builds leaf records. Every counter starts at zero.
#[derive(Debug, Default)]
pub struct CountRecordBuilder {
    record: CountRecord,
}

impl CountRecordBuilder {
    pub fn countable(mut self, countable: bool) -> Self {
        self.record.is_countable = countable;
        self
    }

    pub fn size(mut self, size: FileSize) -> Self {
        self.record.size_in_bytes = size;
        self
    }

    pub fn dates(mut self, created: Timestamp, modified: Timestamp) -> Self {
        self.record.created_date = created;
        self.record.modified_date = modified;
        self
    }

    /// Copies the counters of a content scan. `note_count` becomes 1.
    pub fn scan(mut self, scan: &ScanResult) -> Self {
        self.record.note_count = 1;
        self.record.word_count = scan.word_count() as u64;
        self.record.character_count = scan.char_count as u64;
        self.record.non_whitespace_character_count = scan.non_whitespace_char_count as u64;
        self
    }

    pub fn page_count(mut self, pages: f64) -> Self {
        self.record.page_count = pages;
        self
    }

    pub fn reading_time(mut self, minutes: f64) -> Self {
        self.record.reading_time_in_minutes = minutes;
        self
    }

    /// Sets the goal; the words counted toward it follow the word count.
    pub fn word_goal(mut self, goal: Option<f64>) -> Self {
        self.record.word_goal = goal;
        self
    }

    pub fn links(mut self, links: u64, embeds: u64) -> Self {
        self.record.link_count = links;
        self.record.embed_count = embeds;
        self
    }

    pub fn aliases(mut self, aliases: Vec<String>) -> Self {
        self.record.aliases = aliases;
        self
    }

    pub fn frontmatter(mut self, frontmatter: Option<Frontmatter>) -> Self {
        self.record.frontmatter = frontmatter;
        self
    }

    pub fn session_start(mut self, session_start: SessionCountRecord) -> Self {
        self.record.session_start = session_start;
        self
    }

    pub fn build(mut self) -> CountRecord {
        self.record.word_count_toward_goal = match self.record.word_goal {
            Some(_) => self.record.word_count,
            None => 0,
        };
        self.record
    }
}
