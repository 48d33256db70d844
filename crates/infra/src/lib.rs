// crates/infra/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod filesystem;
pub mod frontmatter;
pub mod locale;
pub mod persistence;

pub use filesystem::FsFileSource;
pub use frontmatter::extract_metadata;
pub use locale::LocaleFormat;
pub use persistence::{SavedData, SavedDataStore};
