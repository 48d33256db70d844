mod common;

use common::{MemorySource, RecordingProgress};
use notecount_domain::NoteCountSettings;
use notecount_ports::FileMetadata;
use notecount_usecase::{BulkScan, CancellationToken, CancellationTokenSource, scan_all};
use serde_json::json;

fn scan(source: &MemorySource, settings: &NoteCountSettings) -> notecount_usecase::ScanOutcome {
    scan_all(source, settings, &CancellationToken::never()).unwrap()
}

#[test]
fn counts_markdown_and_keeps_other_files_as_size_only() {
    let source = MemorySource::new().with_note("notes/a.md", "one two three").with_note("image.png", "binary-ish");
    let outcome = scan(&source, &NoteCountSettings::default());

    assert_eq!(outcome.scanned, 2);
    assert!(!outcome.cancelled);

    let note = outcome.counts.get("notes/a.md").unwrap();
    assert!(note.is_countable);
    assert_eq!(note.word_count, 3);
    assert_eq!(note.note_count, 1);

    let image = outcome.counts.get("image.png").unwrap();
    assert!(!image.is_countable);
    assert_eq!(image.word_count, 0);
    assert_eq!(image.note_count, 0);
    assert_eq!(image.size_in_bytes.bytes(), 10);
    assert!(image.created_date.is_known());
    assert_eq!(source.reads(), vec!["notes/a.md".to_string()]);
}

#[test]
fn front_matter_opt_out_and_exclusion_tags_stop_counting() {
    let source = MemorySource::new()
        .with_note("opted-out.md", "some words here")
        .with_metadata(
            "opted-out.md",
            FileMetadata { frontmatter: json!({"wordcount": false}).as_object().cloned(), ..FileMetadata::default() },
        )
        .with_note("drawing.md", "drawing text")
        .with_metadata("drawing.md", FileMetadata { tags: vec!["#excalidraw".into()], ..FileMetadata::default() })
        .with_note("kept.md", "kept words");
    let outcome = scan(&source, &NoteCountSettings::default());

    assert!(!outcome.counts.get("opted-out.md").unwrap().is_countable);
    assert!(!outcome.counts.get("drawing.md").unwrap().is_countable);
    assert_eq!(outcome.counts.get("kept.md").unwrap().word_count, 2);
}

#[test]
fn path_filter_limits_counted_notes() {
    let source = MemorySource::new()
        .with_note("Drafts/ch1.md", "chapter one")
        .with_note("Drafts/Archive/old.md", "old text")
        .with_note("Notes/idea.md", "an idea");
    let settings = NoteCountSettings {
        include_directories: "Drafts, !Drafts/Archive".into(),
        ..NoteCountSettings::default()
    };
    let outcome = scan(&source, &settings);

    assert!(outcome.counts.get("Drafts/ch1.md").unwrap().is_countable);
    assert!(!outcome.counts.get("Drafts/Archive/old.md").unwrap().is_countable);
    assert!(!outcome.counts.get("Notes/idea.md").unwrap().is_countable);
    assert_eq!(source.reads(), vec!["Drafts/ch1.md".to_string()]);
}

#[test]
fn front_matter_is_cut_and_word_goal_recorded() {
    let content = "---\nword-goal: 10\n---\nalpha beta";
    let source = MemorySource::new().with_note("goal.md", content).with_metadata(
        "goal.md",
        FileMetadata {
            frontmatter: json!({"word-goal": 10}).as_object().cloned(),
            frontmatter_span: Some(0..21),
            link_count: 2,
            aliases: vec!["Goal".into()],
            ..FileMetadata::default()
        },
    );
    let outcome = scan(&source, &NoteCountSettings::default());
    let record = outcome.counts.get("goal.md").unwrap();

    assert_eq!(record.word_count, 2);
    assert_eq!(record.word_goal, Some(10.0));
    assert_eq!(record.word_count_toward_goal, 2);
    assert_eq!(record.link_count, 2);
    assert_eq!(record.aliases, vec!["Goal".to_string()]);
    assert!(record.frontmatter.is_some());
}

#[test]
fn canvas_node_text_is_counted() {
    let canvas = r#"{"nodes":[{"id":"1","text":"first card"},{"id":"2","type":"file"},{"id":"3","text":"second"}]}"#;
    let source = MemorySource::new().with_note("board.canvas", canvas);
    let outcome = scan(&source, &NoteCountSettings::default());

    let record = outcome.counts.get("board.canvas").unwrap();
    assert!(record.is_countable);
    assert_eq!(record.word_count, 3);
}

#[test]
fn unreadable_files_are_skipped() {
    let source = MemorySource::new()
        .with_note("a.md", "one")
        .with_unreadable("locked.md")
        .with_note("b.md", "two");
    let outcome = scan(&source, &NoteCountSettings::default());

    assert_eq!(outcome.scanned, 2);
    assert_eq!(outcome.failed, 1);
    assert!(!outcome.counts.contains("locked.md"));
}

#[test]
fn cancelled_scan_stops_before_reading() {
    let source = MemorySource::new().with_note("a.md", "one").with_note("b.md", "two");
    let owner = CancellationTokenSource::new();
    owner.cancel();
    let settings = NoteCountSettings::default();

    let outcome = BulkScan::new(&source, &settings).scan_all(&owner.token()).unwrap();

    assert!(outcome.cancelled);
    assert!(outcome.counts.is_empty());
    assert!(source.reads().is_empty());
}

#[test]
fn cancellation_mid_scan_keeps_partial_table() {
    let source = MemorySource::new()
        .with_note("a.md", "one")
        .with_note("b.md", "two")
        .with_note("c.md", "three");
    let owner = CancellationTokenSource::new();
    let token = owner.token();
    source.on_read(move |_| owner.cancel());
    let settings = NoteCountSettings::default();

    let outcome = BulkScan::new(&source, &settings).scan_all(&token).unwrap();

    assert!(outcome.cancelled);
    assert_eq!(outcome.counts.paths().collect::<Vec<_>>(), vec!["a.md"]);
    assert_eq!(source.reads(), vec!["a.md".to_string()]);
}

#[test]
fn progress_sees_every_file_and_the_total() {
    let source = MemorySource::new()
        .with_note("a.md", "one")
        .with_unreadable("locked.md")
        .with_note("b.md", "two");
    let settings = NoteCountSettings::default();
    let progress = RecordingProgress::default();
    let owner = CancellationTokenSource::new();

    let outcome = BulkScan::new(&source, &settings).with_progress(&progress).scan_all(&owner.token()).unwrap();

    assert_eq!(outcome.scanned, 2);
    assert_eq!(*progress.files.lock().unwrap(), vec!["a.md", "locked.md", "b.md"]);
    assert_eq!(*progress.completed.lock().unwrap(), Some(2));
}
