//! # Ports
//!
//! Interface definitions for the collaborators the counting core talks to.
//!
//! - [`filesystem`]: candidate files, their text and parsed metadata
//! - [`locale`]: locale-aware number and date rendering
//! - [`display`]: where finished labels are handed over
//! - [`progress`]: progress reporting for bulk scans
//!
//! Keeping these as traits lets the use cases run against in-memory fakes.

#![allow(clippy::multiple_crate_versions)]

pub mod display;
pub mod filesystem;
pub mod locale;
pub mod progress;

pub use display::LabelSink;
pub use filesystem::{FileEntryDto, FileMetadata, FileSource};
pub use locale::{DateFormatter, NumberFormatter};
pub use progress::{NoProgress, ScanProgress};
