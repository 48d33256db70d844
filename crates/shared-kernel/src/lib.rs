// crates/shared-kernel/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub use error::{
    ApplicationError, DomainError, ErrorContext, InfrastructureError, NoteCountError, Result,
};

pub mod error;
pub mod path;
pub mod value_objects;

pub use path::{logical_absolute, note_path, resolve_note_path};
pub use value_objects::{FileExtension, FileSize, SizeUnit, Timestamp};
