use std::{fmt, str::FromStr};

use notecount_shared_kernel::DomainError;
use serde::{Deserialize, Serialize};

/// Statistic a label segment can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountType {
    #[default]
    None,
    Word,
    Page,
    PageDecimal,
    Note,
    Character,
    Link,
    Embed,
    Alias,
    Created,
    Modified,
    FileSize,
    ReadTime,
    PercentGoal,
    #[serde(rename = "frontmatterKey")]
    FrontmatterKey,
    TrackSession,
}

impl CountType {
    pub const ALL: [Self; 16] = [
        Self::None,
        Self::Word,
        Self::Page,
        Self::PageDecimal,
        Self::Note,
        Self::Character,
        Self::Link,
        Self::Embed,
        Self::Alias,
        Self::Created,
        Self::Modified,
        Self::FileSize,
        Self::ReadTime,
        Self::PercentGoal,
        Self::FrontmatterKey,
        Self::TrackSession,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Word => "word",
            Self::Page => "page",
            Self::PageDecimal => "pagedecimal",
            Self::Note => "note",
            Self::Character => "character",
            Self::Link => "link",
            Self::Embed => "embed",
            Self::Alias => "alias",
            Self::Created => "created",
            Self::Modified => "modified",
            Self::FileSize => "filesize",
            Self::ReadTime => "readtime",
            Self::PercentGoal => "percentgoal",
            Self::FrontmatterKey => "frontmatterKey",
            Self::TrackSession => "tracksession",
        }
    }

    /// Kinds rendered even for records that are not countable.
    pub const fn is_unconditional(self) -> bool {
        matches!(self, Self::Created | Self::Modified | Self::FileSize)
    }

    pub fn is_known(value: &str) -> bool {
        value.parse::<Self>().is_ok()
    }
}

impl fmt::Display for CountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CountType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::UnknownCountType { value: s.to_string() })
    }
}

/// Numeric kind a session delta is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionCountType {
    #[default]
    Word,
    Page,
    PageDecimal,
    Note,
    Character,
}

impl FromStr for SessionCountType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<CountType>()? {
            CountType::Word => Ok(Self::Word),
            CountType::Page => Ok(Self::Page),
            CountType::PageDecimal => Ok(Self::PageDecimal),
            CountType::Note => Ok(Self::Note),
            CountType::Character => Ok(Self::Character),
            other => Err(DomainError::UnknownCountType { value: other.to_string() }),
        }
    }
}

/// Per-slot options stored next to a count type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CountConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontmatter_key: Option<String>,
    #[serde(alias = "$sessionCountType")]
    pub session_count_type: SessionCountType,
}

/// One configured label segment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountTypeSelection {
    pub count_type: CountType,
    pub custom_suffix: Option<String>,
    pub frontmatter_key: Option<String>,
    pub session_count_type: SessionCountType,
}

impl CountTypeSelection {
    pub fn new(count_type: CountType) -> Self {
        Self { count_type, ..Self::default() }
    }

    pub fn from_config(count_type: CountType, config: &CountConfig) -> Self {
        Self {
            count_type,
            custom_suffix: config.custom_suffix.clone(),
            frontmatter_key: config.frontmatter_key.clone(),
            session_count_type: config.session_count_type,
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.custom_suffix = Some(suffix.into());
        self
    }

    pub fn with_frontmatter_key(mut self, key: impl Into<String>) -> Self {
        self.frontmatter_key = Some(key.into());
        self
    }

    pub fn with_session_count_type(mut self, kind: SessionCountType) -> Self {
        self.session_count_type = kind;
        self
    }
}

/// Which character total the `character` kind shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CharacterCountType {
    #[default]
    #[serde(alias = "StringLength")]
    AllCharacters,
    ExcludeWhitespace,
}

/// How page counts are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PageCountType {
    #[default]
    ByWords,
    ByChars,
}
