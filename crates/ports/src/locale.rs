use notecount_shared_kernel::Timestamp;

/// Locale-aware number rendering with digit grouping.
pub trait NumberFormatter: Send + Sync {
    /// `value` with between `min_fraction` and `max_fraction` fraction digits.
    fn format_number(&self, value: f64, min_fraction: usize, max_fraction: usize) -> String;

    fn format_integer(&self, value: i64) -> String {
        self.format_number(value as f64, 0, 0)
    }
}

/// Locale-aware short date rendering.
pub trait DateFormatter: Send + Sync {
    /// Renders a known timestamp. An explicit `pattern` overrides the
    /// locale's default layout.
    fn format_date(&self, timestamp: Timestamp, pattern: Option<&str>) -> String;
}
