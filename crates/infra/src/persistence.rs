//! Saved-data blob: cached counts plus settings, stored as JSON.

pub mod file_reader;
pub mod file_writer;
pub mod migrations;
pub mod saved_data;

pub use file_reader::FileReader;
pub use file_writer::FileWriter;
pub use migrations::migrate_saved_data;
pub use saved_data::{SavedData, SavedDataStore, drop_unreadable_values, parse_saved_data};
