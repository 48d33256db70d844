use notecount_shared_kernel::Result;

/// Receives the finished label for each tree node.
pub trait LabelSink {
    /// Attaches `label` to the node at `path`. Fails with
    /// `ApplicationError::DisplayTargetUnavailable` while the target view
    /// does not exist yet.
    fn publish(&mut self, path: &str, label: &str) -> Result<()>;
}
