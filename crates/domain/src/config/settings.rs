use notecount_shared_kernel::DomainError;
use serde::{Deserialize, Serialize};

use super::{
    CharacterCountType, CountConfig, CountType, CountTypeSelection, PageCountType, PathFilter,
};
use crate::{
    model::TargetNode,
    parser::{ScanConfig, ScanResult},
};

pub const DEFAULT_WORDS_PER_PAGE: f64 = 300.0;
pub const DEFAULT_CHARS_PER_PAGE: f64 = 1500.0;
pub const DEFAULT_WORDS_PER_MINUTE: f64 = 265.0;
pub const DEFAULT_CHARS_PER_MINUTE: f64 = 500.0;
pub const DEFAULT_SEPARATOR: &str = "|";

/// User settings, stored next to the cached counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoteCountSettings {
    pub count_type: CountType,
    pub count_type2: CountType,
    pub count_type3: CountType,
    pub count_config: CountConfig,
    pub count_config2: CountConfig,
    pub count_config3: CountConfig,

    pub show_same_counts_on_folders: bool,
    pub folder_count_type: CountType,
    pub folder_count_type2: CountType,
    pub folder_count_type3: CountType,
    pub folder_count_config: CountConfig,
    pub folder_count_config2: CountConfig,
    pub folder_count_config3: CountConfig,

    pub show_same_counts_on_root: bool,
    pub root_count_type: CountType,
    pub root_count_type2: CountType,
    pub root_count_type3: CountType,
    pub root_count_config: CountConfig,
    pub root_count_config2: CountConfig,
    pub root_count_config3: CountConfig,

    pub abbreviate_descriptions: bool,
    pub folder_abbreviate_descriptions: bool,
    pub root_abbreviate_descriptions: bool,
    pub use_advanced_formatting: bool,
    pub pipe_separator: String,
    pub folder_pipe_separator: String,
    pub root_pipe_separator: String,
    pub date_format: String,

    pub exclude_comments: bool,
    pub exclude_code_blocks: bool,
    pub exclude_non_visible_link_portions: bool,
    pub exclude_footnotes: bool,
    pub character_count_type: CharacterCountType,
    pub page_count_type: PageCountType,
    pub chars_per_page_includes_whitespace: bool,
    pub include_directories: String,

    pub words_per_page: f64,
    pub chars_per_page: f64,
    pub words_per_minute: f64,
    pub chars_per_minute: f64,

    pub locales: Vec<String>,
    pub debug_mode: bool,
}

impl Default for NoteCountSettings {
    fn default() -> Self {
        Self {
            count_type: CountType::Word,
            count_type2: CountType::None,
            count_type3: CountType::None,
            count_config: CountConfig::default(),
            count_config2: CountConfig::default(),
            count_config3: CountConfig::default(),
            show_same_counts_on_folders: true,
            folder_count_type: CountType::Word,
            folder_count_type2: CountType::None,
            folder_count_type3: CountType::None,
            folder_count_config: CountConfig::default(),
            folder_count_config2: CountConfig::default(),
            folder_count_config3: CountConfig::default(),
            show_same_counts_on_root: true,
            root_count_type: CountType::Word,
            root_count_type2: CountType::None,
            root_count_type3: CountType::None,
            root_count_config: CountConfig::default(),
            root_count_config2: CountConfig::default(),
            root_count_config3: CountConfig::default(),
            abbreviate_descriptions: false,
            folder_abbreviate_descriptions: false,
            root_abbreviate_descriptions: false,
            use_advanced_formatting: false,
            pipe_separator: DEFAULT_SEPARATOR.to_string(),
            folder_pipe_separator: DEFAULT_SEPARATOR.to_string(),
            root_pipe_separator: DEFAULT_SEPARATOR.to_string(),
            date_format: String::new(),
            exclude_comments: false,
            exclude_code_blocks: false,
            exclude_non_visible_link_portions: false,
            exclude_footnotes: false,
            character_count_type: CharacterCountType::AllCharacters,
            page_count_type: PageCountType::ByWords,
            chars_per_page_includes_whitespace: false,
            include_directories: String::new(),
            words_per_page: DEFAULT_WORDS_PER_PAGE,
            chars_per_page: DEFAULT_CHARS_PER_PAGE,
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            chars_per_minute: DEFAULT_CHARS_PER_MINUTE,
            locales: vec!["en-US".to_string()],
            debug_mode: false,
        }
    }
}

/// Positive finite `value`, else `default`.
fn positive_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { default }
}

/// Slot group a label draws from after the `showSameCounts*` switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotGroup {
    Note,
    Folder,
    Root,
}

impl NoteCountSettings {
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            exclude_comments: self.exclude_comments,
            exclude_code_blocks: self.exclude_code_blocks,
            exclude_non_visible_link_portions: self.exclude_non_visible_link_portions,
            exclude_footnotes: self.exclude_footnotes,
        }
    }

    pub fn path_filter(&self) -> PathFilter {
        PathFilter::parse(&self.include_directories)
    }

    pub fn effective_words_per_page(&self) -> f64 {
        positive_or(self.words_per_page, DEFAULT_WORDS_PER_PAGE)
    }

    pub fn effective_chars_per_page(&self) -> f64 {
        positive_or(self.chars_per_page, DEFAULT_CHARS_PER_PAGE)
    }

    pub fn effective_words_per_minute(&self) -> f64 {
        positive_or(self.words_per_minute, DEFAULT_WORDS_PER_MINUTE)
    }

    pub fn effective_chars_per_minute(&self) -> f64 {
        positive_or(self.chars_per_minute, DEFAULT_CHARS_PER_MINUTE)
    }

    /// Knobs that currently fall back to their default.
    pub fn invalid_knobs(&self) -> Vec<DomainError> {
        [
            ("wordsPerPage", self.words_per_page),
            ("charsPerPage", self.chars_per_page),
            ("wordsPerMinute", self.words_per_minute),
            ("charsPerMinute", self.chars_per_minute),
        ]
        .into_iter()
        .filter(|(_, value)| !(value.is_finite() && *value > 0.0))
        .map(|(field, value)| DomainError::InvalidSetting {
            field: field.to_string(),
            reason: format!("{value} is not a positive number, using the default"),
        })
        .collect()
    }

    /// Page count of a scanned note under the configured page method.
    pub fn page_count(&self, scan: &ScanResult) -> f64 {
        match self.page_count_type {
            PageCountType::ByWords => scan.word_count() as f64 / self.effective_words_per_page(),
            PageCountType::ByChars if self.chars_per_page_includes_whitespace => {
                scan.char_count as f64 / self.effective_chars_per_page()
            }
            PageCountType::ByChars => {
                scan.non_whitespace_char_count as f64 / self.effective_chars_per_page()
            }
        }
    }

    pub fn reading_time_minutes(&self, scan: &ScanResult) -> f64 {
        scan.cjk_word_count as f64 / self.effective_chars_per_minute()
            + scan.space_delimited_word_count as f64 / self.effective_words_per_minute()
    }

    fn slot_group(&self, target: TargetNode) -> SlotGroup {
        match target {
            TargetNode::File => SlotGroup::Note,
            TargetNode::Directory if self.show_same_counts_on_folders => SlotGroup::Note,
            TargetNode::Directory => SlotGroup::Folder,
            TargetNode::Root if self.show_same_counts_on_root => SlotGroup::Note,
            TargetNode::Root => SlotGroup::Root,
        }
    }

    /// The three configured segments for `target`. Custom suffixes only
    /// survive with advanced formatting.
    pub fn selections(&self, target: TargetNode) -> Vec<CountTypeSelection> {
        let slots = match self.slot_group(target) {
            SlotGroup::Note => [
                (self.count_type, &self.count_config),
                (self.count_type2, &self.count_config2),
                (self.count_type3, &self.count_config3),
            ],
            SlotGroup::Folder => [
                (self.folder_count_type, &self.folder_count_config),
                (self.folder_count_type2, &self.folder_count_config2),
                (self.folder_count_type3, &self.folder_count_config3),
            ],
            SlotGroup::Root => [
                (self.root_count_type, &self.root_count_config),
                (self.root_count_type2, &self.root_count_config2),
                (self.root_count_type3, &self.root_count_config3),
            ],
        };
        slots
            .into_iter()
            .map(|(count_type, config)| {
                let mut selection = CountTypeSelection::from_config(count_type, config);
                if !self.use_advanced_formatting {
                    selection.custom_suffix = None;
                }
                selection
            })
            .collect()
    }

    pub fn abbreviate(&self, target: TargetNode) -> bool {
        match self.slot_group(target) {
            SlotGroup::Note => self.abbreviate_descriptions,
            SlotGroup::Folder => self.folder_abbreviate_descriptions,
            SlotGroup::Root => self.root_abbreviate_descriptions,
        }
    }

    pub fn separator(&self, target: TargetNode) -> &str {
        if !self.use_advanced_formatting {
            return DEFAULT_SEPARATOR;
        }
        match self.slot_group(target) {
            SlotGroup::Note => &self.pipe_separator,
            SlotGroup::Folder => &self.folder_pipe_separator,
            SlotGroup::Root => &self.root_pipe_separator,
        }
    }

    /// Explicit date pattern, only honoured with advanced formatting.
    pub fn date_pattern(&self) -> Option<&str> {
        (self.use_advanced_formatting && !self.date_format.trim().is_empty())
            .then_some(self.date_format.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionCountType;

    fn scan() -> ScanResult {
        ScanResult {
            char_count: 3000,
            non_whitespace_char_count: 1500,
            space_delimited_word_count: 530,
            cjk_word_count: 70,
        }
    }

    #[test]
    fn defaults_apply_to_missing_fields() {
        let settings: NoteCountSettings = serde_json::from_str(r#"{"wordsPerPage":250}"#).unwrap();
        assert_eq!(settings.words_per_page, 250.0);
        assert_eq!(settings.chars_per_minute, DEFAULT_CHARS_PER_MINUTE);
        assert!(settings.show_same_counts_on_folders);
        assert_eq!(settings.count_type, CountType::Word);
        assert_eq!(settings.locales, vec!["en-US".to_string()]);
    }

    #[test]
    fn page_count_follows_method() {
        let mut settings = NoteCountSettings::default();
        assert_eq!(settings.page_count(&scan()), 2.0);

        settings.page_count_type = PageCountType::ByChars;
        assert_eq!(settings.page_count(&scan()), 1.0);

        settings.chars_per_page_includes_whitespace = true;
        assert_eq!(settings.page_count(&scan()), 2.0);
    }

    #[test]
    fn invalid_knobs_fall_back() {
        let settings = NoteCountSettings {
            words_per_page: 0.0,
            words_per_minute: f64::NAN,
            ..NoteCountSettings::default()
        };
        assert_eq!(settings.effective_words_per_page(), DEFAULT_WORDS_PER_PAGE);
        assert_eq!(settings.effective_words_per_minute(), DEFAULT_WORDS_PER_MINUTE);
        assert_eq!(settings.invalid_knobs().len(), 2);

        let minutes = settings.reading_time_minutes(&scan());
        assert!((minutes - (70.0 / 500.0 + 2.0)).abs() < 1e-9);
    }

    #[test]
    fn folders_use_their_own_slots_when_requested() {
        let mut settings = NoteCountSettings {
            folder_count_type: CountType::Note,
            folder_count_type2: CountType::TrackSession,
            folder_abbreviate_descriptions: true,
            ..NoteCountSettings::default()
        };
        settings.folder_count_config2.session_count_type = SessionCountType::Character;

        let same = settings.selections(TargetNode::Directory);
        assert_eq!(same[0].count_type, CountType::Word);
        assert!(!settings.abbreviate(TargetNode::Directory));

        settings.show_same_counts_on_folders = false;
        let own = settings.selections(TargetNode::Directory);
        assert_eq!(own[0].count_type, CountType::Note);
        assert_eq!(own[1].session_count_type, SessionCountType::Character);
        assert!(settings.abbreviate(TargetNode::Directory));
        assert_eq!(settings.selections(TargetNode::File)[0].count_type, CountType::Word);
    }

    #[test]
    fn suffixes_and_separators_need_advanced_formatting() {
        let mut settings = NoteCountSettings::default();
        settings.count_config.custom_suffix = Some(" words!".into());
        settings.pipe_separator = "•".into();
        settings.date_format = "%Y".into();

        assert_eq!(settings.selections(TargetNode::File)[0].custom_suffix, None);
        assert_eq!(settings.separator(TargetNode::File), "|");
        assert_eq!(settings.date_pattern(), None);

        settings.use_advanced_formatting = true;
        assert_eq!(settings.selections(TargetNode::File)[0].custom_suffix.as_deref(), Some(" words!"));
        assert_eq!(settings.separator(TargetNode::File), "•");
        assert_eq!(settings.date_pattern(), Some("%Y"));
    }
}
