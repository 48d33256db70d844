//! Metadata extraction from note text: the YAML front-matter block, tags,
//! links, embeds and aliases.

use std::{ops::Range, sync::OnceLock};

use log::warn;
use notecount_ports::FileMetadata;
use regex::Regex;
use serde_json::{Map, Value};

const FENCE: &str = "---";

fn link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(!?)\[\[[^\]\n]+\]\]|(!?)\[[^\]\n]*\]\(([^)\n]+)\)").expect("valid regex")
    })
}

fn inline_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:^|\s)#([\p{L}\p{N}_/\-]+)").expect("valid regex"))
}

/// Raw YAML and byte span of a leading `---` block, closing fence included.
pub fn front_matter_block(content: &str) -> Option<(&str, Range<usize>)> {
    let first_end = content.find('\n')?;
    if content[..first_end].trim_end() != FENCE {
        return None;
    }
    let body_start = first_end + 1;
    let mut offset = body_start;
    for line in content[body_start..].split_inclusive('\n') {
        if line.trim_end() == FENCE {
            return Some((&content[body_start..offset], 0..offset + FENCE.len()));
        }
        offset += line.len();
    }
    None
}

/// Parses the front-matter YAML into a JSON object. Empty blocks and
/// non-mapping documents yield `None`.
pub fn parse_front_matter(path: &str, yaml: &str) -> Option<Map<String, Value>> {
    if yaml.trim().is_empty() {
        return None;
    }
    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(err) => {
            warn!("invalid front matter in {path}: {err}");
            None
        }
    }
}

/// Values of a list-or-string property. Strings are split on commas.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => s.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn first_present<'a>(frontmatter: Option<&'a Map<String, Value>>, keys: &[&str]) -> Option<&'a Value> {
    let frontmatter = frontmatter?;
    keys.iter().find_map(|key| frontmatter.get(*key))
}

/// Tags from the `tags`/`tag` property plus inline `#tags` in `body`,
/// each with a leading `#`. Purely numeric inline tags are not tags.
pub fn collect_tags(frontmatter: Option<&Map<String, Value>>, body: &str) -> Vec<String> {
    let mut tags: Vec<String> = string_list(first_present(frontmatter, &["tags", "tag"]))
        .into_iter()
        .flat_map(|entry| entry.split_whitespace().map(str::to_string).collect::<Vec<_>>())
        .map(|tag| if tag.starts_with('#') { tag } else { format!("#{tag}") })
        .collect();

    tags.extend(
        inline_tag_re()
            .captures_iter(body)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|tag| !tag.chars().all(|c| c.is_ascii_digit()))
            .map(|tag| format!("#{tag}")),
    );
    tags
}

/// Internal links and embeds in `body`. Markdown links to URLs are external
/// and not counted.
pub fn count_links(body: &str) -> (u64, u64) {
    let mut links = 0;
    let mut embeds = 0;
    for caps in link_re().captures_iter(body) {
        if let Some(target) = caps.get(3) {
            let target = target.as_str().trim();
            if target.contains("://") || target.starts_with("mailto:") {
                continue;
            }
        }
        let bang = caps.get(1).or_else(|| caps.get(2)).is_some_and(|m| !m.as_str().is_empty());
        if bang {
            embeds += 1;
        } else {
            links += 1;
        }
    }
    (links, embeds)
}

/// Everything the counter needs to know about `content` besides its text.
pub fn extract_metadata(path: &str, content: &str) -> FileMetadata {
    let (frontmatter, span) = match front_matter_block(content) {
        Some((yaml, span)) => (parse_front_matter(path, yaml), Some(span)),
        None => (None, None),
    };
    let body = span.as_ref().and_then(|span| content.get(span.end..)).unwrap_or(content);
    let (link_count, embed_count) = count_links(body);

    FileMetadata {
        tags: collect_tags(frontmatter.as_ref(), body),
        aliases: string_list(first_present(frontmatter.as_ref(), &["aliases", "alias"])),
        link_count,
        embed_count,
        frontmatter,
        frontmatter_span: span,
    }
}
