//! # Use Cases
//!
//! Application-level orchestration of the counting core:
//!
//! - [`bulk_scan`]: cancellable scan over every candidate file
//! - [`file_counter`]: countability rules and leaf record construction
//! - [`session`]: the table owner with incremental updates
//! - [`label`]: rendering records into display labels
//! - [`display`]: publishing labels with retry
//!
//! Use cases depend on the domain and ports, never on infrastructure.

#![allow(clippy::multiple_crate_versions)]

pub mod bulk_scan;
pub mod cancellation;
pub mod display;
pub mod file_counter;
pub mod label;
pub mod session;

pub use bulk_scan::{BulkScan, ScanOutcome, scan_all};
pub use cancellation::{CancellationToken, CancellationTokenSource};
pub use display::{RetryPolicy, publish_labels};
pub use file_counter::FileCounter;
pub use label::{FormatOptions, Formatters, LabelFormatter, format_label};
pub use session::CountSession;
