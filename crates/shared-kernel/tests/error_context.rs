// crates/shared-kernel/tests/error_context.rs
use std::{io, path::PathBuf};

use notecount_shared_kernel::{ApplicationError, ErrorContext, InfrastructureError, NoteCountError};

fn unreadable() -> std::result::Result<(), InfrastructureError> {
    Err(InfrastructureError::FileRead {
        path: PathBuf::from("notes/a.md"),
        source: io::Error::other("root-io"),
    })
}

#[test]
fn context_wraps_and_formats() {
    let err = unreadable().context("loading saved data").unwrap_err();

    let display = err.to_string();
    assert!(display.contains("loading saved data"));
    assert!(display.contains("notes/a.md"));
    assert!(!err.is_retryable());
}

#[test]
fn missing_display_target_is_retryable_through_context() {
    let err: std::result::Result<(), ApplicationError> =
        Err(ApplicationError::DisplayTargetUnavailable { reason: "tree not mounted".into() });
    let wrapped = err.with_context(|| "publishing labels".to_string()).unwrap_err();

    assert!(wrapped.is_retryable());
    assert!(matches!(wrapped, NoteCountError::Context { .. }));
}

#[test]
fn json_errors_map_to_serialization() {
    let err = serde_json::from_str::<u32>("nope").unwrap_err();
    let converted = NoteCountError::from(err);
    assert!(converted.to_string().contains("JSON"));
}
