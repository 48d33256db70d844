// src/cli.rs
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::warn;
use notecount_domain::{CountType, NoteCountSettings};

/// Name of the saved-data file kept in the notes root by default.
pub const DEFAULT_DATA_FILE: &str = ".notecount.json";

const SLOTS: usize = 3;

/// Command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "notecount",
    version,
    about = "Word, page and reading-time counts for a tree of markdown notes"
)]
pub struct Args {
    /// Notes directory to scan
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Saved-data file [default: ROOT/.notecount.json]
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Deepest tree level to print (0 prints the root only)
    #[arg(long, value_name = "N")]
    pub depth: Option<usize>,

    /// Short labels (`12w` instead of `12 words`)
    #[arg(long)]
    pub abbreviate: bool,

    /// Label kind for notes, repeatable up to three times
    #[arg(long = "count", value_name = "KIND", action = ArgAction::Append, value_parser = parse_count_type)]
    pub count: Vec<CountType>,

    /// Label kind for folders, repeatable up to three times
    #[arg(long = "folder-count", value_name = "KIND", action = ArgAction::Append, value_parser = parse_count_type)]
    pub folder_count: Vec<CountType>,

    /// Preferred locale for numbers and dates, repeatable
    #[arg(long = "locale", value_name = "TAG", action = ArgAction::Append)]
    pub locale: Vec<String>,

    /// Start a new writing session before printing
    #[arg(long)]
    pub new_session: bool,

    /// Verbose logging
    #[arg(long)]
    pub debug: bool,
}

fn parse_count_type(value: &str) -> Result<CountType, String> {
    value.parse::<CountType>().map_err(|err| err.to_string())
}

/// Up to three kinds padded with `none`.
fn slots(kinds: &[CountType], flag: &str) -> [CountType; SLOTS] {
    if kinds.len() > SLOTS {
        warn!("--{flag} accepts at most {SLOTS} kinds; ignoring the rest");
    }
    let mut slots = [CountType::None; SLOTS];
    for (slot, kind) in slots.iter_mut().zip(kinds) {
        *slot = *kind;
    }
    slots
}

impl Args {
    pub fn data_path(&self) -> PathBuf {
        self.data.clone().unwrap_or_else(|| self.root.join(DEFAULT_DATA_FILE))
    }

    /// Settings for this run: the stored ones with the flags laid over them.
    pub fn apply_to(&self, mut settings: NoteCountSettings) -> NoteCountSettings {
        if !self.count.is_empty() {
            [settings.count_type, settings.count_type2, settings.count_type3] = slots(&self.count, "count");
        }
        if !self.folder_count.is_empty() {
            settings.show_same_counts_on_folders = false;
            [settings.folder_count_type, settings.folder_count_type2, settings.folder_count_type3] =
                slots(&self.folder_count, "folder-count");
        }
        if self.abbreviate {
            settings.abbreviate_descriptions = true;
            settings.folder_abbreviate_descriptions = true;
            settings.root_abbreviate_descriptions = true;
        }
        if !self.locale.is_empty() {
            settings.locales = self.locale.clone();
        }
        settings.debug_mode |= self.debug;
        settings
    }
}
