//! Renders count records into display labels.

pub mod file_size;
pub mod read_time;

use notecount_domain::{
    CountRecord, CountType, CountTypeSelection, NoteCountSettings, SessionCountType, TargetNode,
    config::{CharacterCountType, DEFAULT_SEPARATOR},
};
use notecount_ports::{DateFormatter, NumberFormatter};
use notecount_shared_kernel::Timestamp;
use serde_json::Value;

pub use file_size::format_file_size;
pub use read_time::format_read_time;

/// Rendering switches for one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub abbreviate: bool,
    pub separator: String,
    /// Explicit date pattern; the locale default applies when `None`.
    pub date_pattern: Option<String>,
    pub character_count_type: CharacterCountType,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            abbreviate: false,
            separator: DEFAULT_SEPARATOR.to_string(),
            date_pattern: None,
            character_count_type: CharacterCountType::AllCharacters,
        }
    }
}

impl FormatOptions {
    pub fn for_target(settings: &NoteCountSettings, target: TargetNode) -> Self {
        Self {
            abbreviate: settings.abbreviate(target),
            separator: settings.separator(target).to_string(),
            date_pattern: settings.date_pattern().map(str::to_string),
            character_count_type: settings.character_count_type,
        }
    }
}

/// The injected locale collaborators.
#[derive(Clone, Copy)]
pub struct Formatters<'a> {
    pub number: &'a dyn NumberFormatter,
    pub date: &'a dyn DateFormatter,
}

impl<'a> Formatters<'a> {
    pub fn new(number: &'a dyn NumberFormatter, date: &'a dyn DateFormatter) -> Self {
        Self { number, date }
    }
}

fn as_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

pub struct LabelFormatter<'a> {
    formatters: Formatters<'a>,
}

impl<'a> LabelFormatter<'a> {
    pub fn new(formatters: Formatters<'a>) -> Self {
        Self { formatters }
    }

    /// Renders every selection that applies to `record`, joined by
    /// ` {separator} `.
    pub fn format(&self, record: &CountRecord, selections: &[CountTypeSelection], options: &FormatOptions) -> String {
        let separator = format!(" {} ", options.separator);
        selections
            .iter()
            .filter(|selection| selection.count_type != CountType::None)
            .filter_map(|selection| self.segment(record, selection, options))
            .collect::<Vec<_>>()
            .join(&separator)
    }

    fn segment(&self, record: &CountRecord, selection: &CountTypeSelection, options: &FormatOptions) -> Option<String> {
        let kind = selection.count_type;
        if !record.is_countable && !kind.is_unconditional() {
            return None;
        }
        let suffix = selection.custom_suffix.as_deref();
        let abbreviate = options.abbreviate;
        let number = self.formatters.number;

        match kind {
            CountType::None => None,
            CountType::Word => Some(basic(
                &number.format_integer(as_i64(record.word_count)),
                "word",
                "w",
                abbreviate,
                suffix,
            )),
            CountType::Page => Some(basic(
                &number.format_integer(record.page_count.ceil() as i64),
                "page",
                "p",
                abbreviate,
                suffix,
            )),
            CountType::PageDecimal => Some(basic(
                &number.format_number(record.page_count, 1, 2),
                "page",
                "p",
                abbreviate,
                suffix,
            )),
            CountType::Note => Some(basic(
                &number.format_integer(as_i64(record.note_count)),
                "note",
                "n",
                abbreviate,
                suffix,
            )),
            CountType::Character => {
                let count = match options.character_count_type {
                    CharacterCountType::AllCharacters => record.character_count,
                    CharacterCountType::ExcludeWhitespace => record.non_whitespace_character_count,
                };
                Some(basic(&number.format_integer(as_i64(count)), "character", "ch", abbreviate, suffix))
            }
            CountType::Link => (record.link_count > 0).then(|| {
                basic(&number.format_integer(as_i64(record.link_count)), "link", "x", abbreviate, suffix)
            }),
            CountType::Embed => (record.embed_count > 0).then(|| {
                basic(&number.format_integer(as_i64(record.embed_count)), "embed", "em", abbreviate, suffix)
            }),
            CountType::Alias => {
                let first = record.aliases.first()?;
                if abbreviate {
                    return Some(first.clone());
                }
                let more = match record.aliases.len() {
                    0 | 1 => String::new(),
                    n => format!(" +{}", n - 1),
                };
                Some(format!("alias: {first}{more}"))
            }
            CountType::Created => self.date_segment(record.created_date, "c", "Created", options, suffix),
            CountType::Modified => self.date_segment(record.modified_date, "u", "Updated", options, suffix),
            CountType::FileSize => Some(format_file_size(record.size_in_bytes, abbreviate, number)),
            CountType::ReadTime => Some(format_read_time(record.reading_time_in_minutes, abbreviate, number)),
            CountType::PercentGoal => {
                let goal = record.effective_word_goal()?;
                let percent = (record.word_count_toward_goal as f64 / goal * 100.0).round();
                let default_suffix = if abbreviate {
                    "%".to_string()
                } else {
                    format!("% of {}", number.format_number(goal, 0, 2))
                };
                Some(format!(
                    "{}{}",
                    number.format_integer(percent as i64),
                    suffix.map_or(default_suffix, str::to_string)
                ))
            }
            CountType::FrontmatterKey => {
                let key = selection.frontmatter_key.as_deref().filter(|k| !k.is_empty())?;
                let value = record.frontmatter.as_ref()?.get(key)?;
                let rendered = render_frontmatter_value(value)?;
                Some(format!("{rendered}{}", suffix.unwrap_or_default()))
            }
            CountType::TrackSession => Some(self.session_segment(record, selection.session_count_type, options, suffix)),
        }
    }

    fn date_segment(
        &self,
        date: Timestamp,
        short: &str,
        long: &str,
        options: &FormatOptions,
        suffix: Option<&str>,
    ) -> Option<String> {
        if !date.is_known() {
            return None;
        }
        let rendered = self.formatters.date.format_date(date, options.date_pattern.as_deref());
        Some(match suffix {
            Some(suffix) => format!("{rendered}{suffix}"),
            None if options.abbreviate => format!("{rendered}/{short}"),
            None => format!("{long} {rendered}"),
        })
    }

    /// Current value minus the session snapshot. Not clamped.
    fn session_segment(
        &self,
        record: &CountRecord,
        kind: SessionCountType,
        options: &FormatOptions,
        suffix: Option<&str>,
    ) -> String {
        let number = self.formatters.number;
        let start = &record.session_start;
        let abbreviate = options.abbreviate;
        match kind {
            SessionCountType::Word => {
                let delta = as_i64(record.word_count) - as_i64(start.word_count);
                basic(&number.format_integer(delta), "word", "w", abbreviate, suffix)
            }
            SessionCountType::Page => {
                let delta = record.page_count.ceil() as i64 - start.page_count.ceil() as i64;
                basic(&number.format_integer(delta), "page", "p", abbreviate, suffix)
            }
            SessionCountType::PageDecimal => {
                let delta = record.page_count - start.page_count;
                basic(&number.format_number(delta, 1, 2), "page", "p", abbreviate, suffix)
            }
            SessionCountType::Note => {
                let delta = as_i64(record.note_count) - as_i64(start.note_count);
                basic(&number.format_integer(delta), "note", "n", abbreviate, suffix)
            }
            SessionCountType::Character => {
                let delta = match options.character_count_type {
                    CharacterCountType::AllCharacters => {
                        as_i64(record.character_count) - as_i64(start.character_count)
                    }
                    CharacterCountType::ExcludeWhitespace => {
                        as_i64(record.non_whitespace_character_count)
                            - as_i64(start.non_whitespace_character_count)
                    }
                };
                basic(&number.format_integer(delta), "character", "ch", abbreviate, suffix)
            }
        }
    }
}

/// `{count}{suffix}` where the suffix is the custom one, the abbreviation,
/// or ` {noun}` pluralised unless the count is exactly `1`.
fn basic(count: &str, noun: &str, abbreviated: &str, abbreviate: bool, suffix: Option<&str>) -> String {
    match suffix {
        Some(suffix) => format!("{count}{suffix}"),
        None if abbreviate => format!("{count}{abbreviated}"),
        None => {
            let plural = if count == "1" { "" } else { "s" };
            format!("{count} {noun}{plural}")
        }
    }
}

fn render_frontmatter_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(items.iter().filter_map(render_frontmatter_value).collect::<Vec<_>>().join(", ")),
        Value::Object(_) => Some(value.to_string()),
    }
}

/// Renders `record` with a one-off [`LabelFormatter`].
pub fn format_label(
    record: &CountRecord,
    selections: &[CountTypeSelection],
    options: &FormatOptions,
    formatters: Formatters<'_>,
) -> String {
    LabelFormatter::new(formatters).format(record, selections, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_pluralises_unless_one() {
        assert_eq!(basic("1", "word", "w", false, None), "1 word");
        assert_eq!(basic("2", "word", "w", false, None), "2 words");
        assert_eq!(basic("0", "note", "n", false, None), "0 notes");
        assert_eq!(basic("1,204", "word", "w", true, None), "1,204w");
        assert_eq!(basic("3", "word", "w", true, Some(" wds")), "3 wds");
    }

    #[test]
    fn frontmatter_values() {
        assert_eq!(render_frontmatter_value(&Value::from("draft")).as_deref(), Some("draft"));
        assert_eq!(render_frontmatter_value(&Value::from(3)).as_deref(), Some("3"));
        assert_eq!(render_frontmatter_value(&Value::from(true)).as_deref(), Some("true"));
        assert_eq!(
            render_frontmatter_value(&serde_json::json!(["a", 1, null])).as_deref(),
            Some("a, 1")
        );
        assert_eq!(render_frontmatter_value(&Value::Null), None);
    }
}
