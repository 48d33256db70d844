use notecount_shared_kernel::Result;

pub trait ScanProgress: Send + Sync {
    fn on_file(&self, path: &str) -> Result<()>;
    fn on_complete(&self, scanned: usize) -> Result<()>;
}

/// Progress sink that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ScanProgress for NoProgress {
    fn on_file(&self, _path: &str) -> Result<()> {
        Ok(())
    }

    fn on_complete(&self, _scanned: usize) -> Result<()> {
        Ok(())
    }
}
