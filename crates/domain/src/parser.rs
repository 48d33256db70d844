//! Markdown content scanner.
//!
//! Markdown is treated as plain text: a handful of syntactic regions are cut
//! out before counting, there is no AST. Malformed or unterminated markup is
//! never an error; an unterminated fence or comment swallows the rest of the
//! input.

use std::{borrow::Cow, sync::OnceLock};

use regex::{Captures, Regex, Replacer};
use serde::{Deserialize, Serialize};

/// Which syntactic regions are removed before counting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanConfig {
    pub exclude_comments: bool,
    pub exclude_code_blocks: bool,
    pub exclude_non_visible_link_portions: bool,
    pub exclude_footnotes: bool,
}

impl ScanConfig {
    /// Every exclusion enabled.
    pub const fn excluding_all() -> Self {
        Self {
            exclude_comments: true,
            exclude_code_blocks: true,
            exclude_non_visible_link_portions: true,
            exclude_footnotes: true,
        }
    }
}

/// Raw counts produced by [`count_markdown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub char_count: usize,
    pub non_whitespace_char_count: usize,
    pub space_delimited_word_count: usize,
    pub cjk_word_count: usize,
}

impl ScanResult {
    /// Space-delimited words plus individually counted CJK characters.
    #[inline]
    pub const fn word_count(&self) -> usize {
        self.space_delimited_word_count + self.cjk_word_count
    }
}

fn cjk_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\p{Han}\p{Hiragana}\p{Katakana}\p{Hangul}]").expect("valid regex"))
}

fn symbol_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\p{S}\p{P}]").expect("valid regex"))
}

fn code_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(?:.*?```|.*)").expect("valid regex"))
}

fn comment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)%%(?:.*?%%|.*)|<!--(?:.*?-->|.*)").expect("valid regex"))
}

fn external_link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]*?)\]\([^)]*?\)").expect("valid regex"))
}

fn internal_link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[\[([^\r\n]*?)\]\]").expect("valid regex"))
}

fn footnote_definition_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[\^[^\r\n]+?\]: [^\r\n]*").expect("valid regex"))
}

fn footnote_mark_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[\^[^\r\n]+?\]").expect("valid regex"))
}

/// Counts characters and words of `content` after removing the regions
/// selected by `config`.
pub fn count_markdown(content: &str, config: &ScanConfig) -> ScanResult {
    let content = remove_non_counted_content(content, config);

    // CJK runs act as separators so they are never counted as Latin words.
    let separated = cjk_regex().replace_all(&content, " ");
    let letters_only = symbol_regex().replace_all(&separated, "");
    let space_delimited_word_count = letters_only.split(is_separator).filter(|word| !word.is_empty()).count();

    ScanResult {
        char_count: content.chars().count(),
        non_whitespace_char_count: count_non_whitespace_chars(&content),
        space_delimited_word_count,
        cjk_word_count: cjk_regex().find_iter(&content).count(),
    }
}

pub fn count_non_whitespace_chars(content: &str) -> usize {
    content.chars().filter(|c| !is_separator(*c)).count()
}

/// Whitespace, plus the byte-order mark that editors leave inside text.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Strips code blocks, comments, link decorations and footnotes, in that
/// order, for each exclusion enabled in `config`.
pub fn remove_non_counted_content<'a>(content: &'a str, config: &ScanConfig) -> Cow<'a, str> {
    let mut content = Cow::Borrowed(content);

    if config.exclude_code_blocks {
        content = replace(content, code_block_regex(), "");
    }

    if config.exclude_comments {
        content = replace(content, comment_regex(), "");
    }

    if config.exclude_non_visible_link_portions {
        content = replace(content, external_link_regex(), "${1}");
        content = replace(content, internal_link_regex(), |caps: &Captures<'_>| {
            visible_internal_link_text(caps.get(1).map_or("", |m| m.as_str())).to_string()
        });
    }

    if config.exclude_footnotes {
        content = replace(content, footnote_definition_regex(), "");
        content = replace(content, footnote_mark_regex(), "");
    }

    content
}

/// `target|alias` shows the alias, `target` shows itself, empty shows nothing.
fn visible_internal_link_text(inner: &str) -> &str {
    match inner.split_once('|') {
        Some((_, alias)) => alias,
        None => inner,
    }
}

fn replace<'a, R: Replacer>(content: Cow<'a, str>, re: &Regex, rep: R) -> Cow<'a, str> {
    let replaced = match re.replace_all(&content, rep) {
        Cow::Owned(updated) => Some(updated),
        Cow::Borrowed(_) => None,
    };
    match replaced {
        Some(updated) => Cow::Owned(updated),
        None => content,
    }
}
