//! Hands finished labels to the display sink, retrying while it is absent.

use std::{thread, time::Duration};

use log::{debug, warn};
use notecount_ports::LabelSink;
use notecount_shared_kernel::Result;

use crate::{label::Formatters, session::CountSession};

/// How often and how patiently a publish is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    pub attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { delay: Duration::from_secs(1), attempts: 3 }
    }
}

impl RetryPolicy {
    pub fn immediate(attempts: u32) -> Self {
        Self { delay: Duration::ZERO, attempts }
    }
}

/// Publishes one label per path. When the sink reports a missing display
/// target the whole batch is retried after `policy.delay`; other errors
/// and the final failed attempt are returned. Returns the number of labels
/// published.
pub fn publish_labels(
    session: &CountSession,
    sink: &mut dyn LabelSink,
    paths: &[String],
    formatters: Formatters<'_>,
    policy: RetryPolicy,
) -> Result<usize> {
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match publish_once(session, sink, paths, formatters) {
            Ok(published) => return Ok(published),
            Err(err) if err.is_retryable() && attempt < attempts => {
                warn!("display target not ready (attempt {attempt}/{attempts}): {err}");
                thread::sleep(policy.delay);
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

fn publish_once(
    session: &CountSession,
    sink: &mut dyn LabelSink,
    paths: &[String],
    formatters: Formatters<'_>,
) -> Result<usize> {
    for path in paths {
        let label = session.label_for(path, formatters);
        sink.publish(path, &label)?;
    }
    debug!("published {} labels", paths.len());
    Ok(paths.len())
}
