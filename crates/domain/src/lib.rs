#![allow(clippy::multiple_crate_versions)]

pub mod analytics;
pub mod config;
pub mod model;
pub mod parser;

pub use analytics::{Aggregator, aggregate};
pub use config::{CountConfig, CountType, CountTypeSelection, NoteCountSettings, PathFilter, SessionCountType};
pub use model::{CountRecord, CountsByPath, ROOT_PATH, SessionCountRecord, TargetNode};
pub use parser::{ScanConfig, ScanResult, count_markdown, remove_non_counted_content};
