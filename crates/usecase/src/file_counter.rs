//! Turns one file into a leaf [`CountRecord`].

use log::warn;
use notecount_domain::{
    CountRecord, NoteCountSettings, PathFilter,
    model::CountRecordBuilder,
    parser::{ScanConfig, count_markdown},
};
use notecount_ports::{FileEntryDto, FileMetadata, FileSource};
use notecount_shared_kernel::{ErrorContext, FileExtension, Result};
use serde::Deserialize;
use serde_json::Value;

/// Extensions whose content is counted. The empty string is "no extension".
pub const COUNTABLE_EXTENSIONS: [&str; 7] = ["", "md", "txt", "rtf", "qmd", "rmd", "canvas"];

const CANVAS_EXTENSION: &str = "canvas";
const WORD_GOAL_KEY: &str = "word-goal";
const OPT_OUT_KEY: &str = "wordcount";
const EXCALIDRAW_TAG: &str = "#excalidraw";
const EXCLUDE_TAG: &str = "#excludefromwordcount";

pub fn is_countable_extension(extension: &FileExtension) -> bool {
    COUNTABLE_EXTENSIONS.contains(&extension.as_str())
}

/// Countability rules that depend on parsed metadata.
pub fn metadata_allows_counting(metadata: &FileMetadata) -> bool {
    let opted_out = metadata
        .frontmatter
        .as_ref()
        .and_then(|fm| fm.get(OPT_OUT_KEY))
        .is_some_and(|value| match value {
            Value::Null | Value::Bool(false) => true,
            Value::String(s) => s == "false",
            _ => false,
        });
    if opted_out {
        return false;
    }

    !metadata.tags.iter().map(|tag| tag.to_lowercase()).any(|tag| {
        tag == EXCALIDRAW_TAG
            || (tag.starts_with("#exclude") && tag.replace(['-', '_'], "") == EXCLUDE_TAG)
    })
}

/// Positive or negative numeric `word-goal`; zero and non-numbers mean none.
pub fn word_goal(metadata: &FileMetadata) -> Option<f64> {
    let goal = match metadata.frontmatter.as_ref()?.get(WORD_GOAL_KEY)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (goal.is_finite() && goal != 0.0).then_some(goal)
}

#[derive(Deserialize)]
struct CanvasData {
    #[serde(default)]
    nodes: Vec<CanvasNode>,
}

#[derive(Deserialize)]
struct CanvasNode {
    #[serde(default)]
    text: Option<String>,
}

/// Text of every canvas node, one per line. Malformed canvases are empty.
pub fn canvas_text(path: &str, content: &str) -> String {
    match serde_json::from_str::<CanvasData>(content) {
        Ok(canvas) => canvas
            .nodes
            .into_iter()
            .filter_map(|node| node.text.filter(|text| !text.is_empty()))
            .collect::<Vec<_>>()
            .join("\n"),
        Err(err) => {
            warn!("unable to parse canvas file {path}: {err}");
            String::new()
        }
    }
}

/// `content` with the front-matter byte range removed.
fn without_span<'c>(content: &'c str, metadata: &FileMetadata) -> std::borrow::Cow<'c, str> {
    let Some(span) = metadata.frontmatter_span.as_ref() else {
        return content.into();
    };
    match (content.get(..span.start), content.get(span.end..)) {
        (Some(head), Some(tail)) => format!("{head}{tail}").into(),
        _ => content.into(),
    }
}

/// Builds leaf records under one settings snapshot.
pub struct FileCounter<'a> {
    settings: &'a NoteCountSettings,
    scan_config: ScanConfig,
    path_filter: PathFilter,
}

impl<'a> FileCounter<'a> {
    pub fn new(settings: &'a NoteCountSettings) -> Self {
        Self { settings, scan_config: settings.scan_config(), path_filter: settings.path_filter() }
    }

    /// Cheap checks that need no file content.
    pub fn may_count(&self, entry: &FileEntryDto) -> bool {
        is_countable_extension(&entry.extension) && self.path_filter.accepts(&entry.path)
    }

    /// Reads and counts `entry`. Files that are not countable get a record
    /// carrying only their size and dates.
    pub fn count_entry(&self, source: &dyn FileSource, entry: &FileEntryDto) -> Result<CountRecord> {
        let base = CountRecord::builder().size(entry.size).dates(entry.created, entry.modified);
        if !self.may_count(entry) {
            return Ok(base.build());
        }

        let content = source
            .read_text(&entry.path)
            .with_context(|| format!("reading {}", entry.path))?;

        if entry.extension.as_str() == CANVAS_EXTENSION {
            let text = canvas_text(&entry.path, &content);
            return Ok(self.count_text(base, &text, &FileMetadata::default()));
        }

        let metadata = source
            .read_metadata(&entry.path, &content)
            .with_context(|| format!("reading metadata of {}", entry.path))?;
        if !metadata_allows_counting(&metadata) {
            return Ok(base.build());
        }

        let text = without_span(&content, &metadata);
        Ok(self.count_text(base, &text, &metadata))
    }

    /// Scans already-extracted text into a countable record.
    pub fn count_text(&self, base: CountRecordBuilder, text: &str, metadata: &FileMetadata) -> CountRecord {
        let scan = count_markdown(text, &self.scan_config);
        let record = base
            .countable(true)
            .scan(&scan)
            .page_count(self.settings.page_count(&scan))
            .reading_time(self.settings.reading_time_minutes(&scan))
            .word_goal(word_goal(metadata))
            .links(metadata.link_count, metadata.embed_count)
            .aliases(metadata.aliases.clone())
            .frontmatter(metadata.frontmatter.clone())
            .build();
        CountRecord { session_start: record.snapshot(), ..record }
    }
}
