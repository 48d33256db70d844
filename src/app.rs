// src/app.rs
use anyhow::{Context, Result, bail};
use log::{debug, warn};
use notecount_infra::{FsFileSource, LocaleFormat, SavedData, SavedDataStore};
use notecount_usecase::{CountSession, Formatters, RetryPolicy, publish_labels};

use crate::{
    cli::Args,
    logging,
    presentation::{TreeView, tree_nodes},
    progress::ScanLog,
};

/// Loads saved data, rescans the notes, prints the labelled tree and saves
/// the refreshed cache. Flag overrides are not persisted.
pub fn run(args: &Args) -> Result<String> {
    if !args.root.is_dir() {
        bail!("notes directory {} does not exist", args.root.display());
    }

    let store = SavedDataStore::new(args.data_path());
    let SavedData { cached_counts, settings: stored } = store.load();
    let settings = args.apply_to(stored.clone());
    if settings.debug_mode {
        logging::enable_debug();
    }
    for problem in settings.invalid_knobs() {
        warn!("{problem}; using the default");
    }

    let session = CountSession::with_counts(settings.clone(), cached_counts);
    let source = FsFileSource::new(&args.root);
    let progress = ScanLog::new();
    let committed = session
        .refresh_all_with_progress(&source, &progress)
        .with_context(|| format!("failed to scan {}", args.root.display()))?;
    debug!("scan committed: {committed} after {} files", progress.seen());
    if args.new_session {
        session.start_new_session();
    }

    let snapshot = session.snapshot();
    let nodes = tree_nodes(&snapshot, args.depth);
    let paths: Vec<String> = nodes.iter().map(|node| node.path.clone()).collect();
    let locale = LocaleFormat::for_locales(settings.locales.as_slice());
    let mut view = TreeView::new(&nodes);
    publish_labels(&session, &mut view, &paths, Formatters::new(&locale, &locale), RetryPolicy::default())
        .context("failed to render labels")?;

    store
        .save(&SavedData { cached_counts: snapshot, settings: stored })
        .with_context(|| format!("failed to save {}", store.path().display()))?;

    Ok(view.render())
}
