// crates/shared-kernel/src/value_objects/file_info.rs
use std::{
    fmt,
    time::{SystemTime, UNIX_EPOCH},
};

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct FileExtension(String);

impl FileExtension {
    /// Lowercased file extension without the leading dot.
    pub fn new(ext: impl AsRef<str>) -> Self {
        Self(ext.as_ref().trim_start_matches('.').to_lowercase())
    }

    /// Extension of the last path segment of a `/`-separated path.
    pub fn from_path(path: &str) -> Self {
        let name = path.rsplit('/').next().unwrap_or(path);
        match name.rfind('.') {
            Some(ix) if ix > 0 => Self::new(&name[ix + 1..]),
            _ => Self::no_ext(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn no_ext() -> Self {
        Self(String::new())
    }
}

impl Default for FileExtension {
    fn default() -> Self {
        Self::no_ext()
    }
}

impl From<&str> for FileExtension {
    fn from(ext: &str) -> Self {
        Self::new(ext)
    }
}

impl fmt::Display for FileExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "(noext)")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Decimal (SI) unit used when rendering a [`FileSize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    Bytes,
    Kilobytes,
    Megabytes,
    Gigabytes,
    Terabytes,
}

impl SizeUnit {
    const ALL: [Self; 5] = [
        Self::Bytes,
        Self::Kilobytes,
        Self::Megabytes,
        Self::Gigabytes,
        Self::Terabytes,
    ];

    pub const fn divisor(self) -> f64 {
        match self {
            Self::Bytes => 1.0,
            Self::Kilobytes => 1_000.0,
            Self::Megabytes => 1_000_000.0,
            Self::Gigabytes => 1_000_000_000.0,
            Self::Terabytes => 1_000_000_000_000.0,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Bytes => "B",
            Self::Kilobytes => "kB",
            Self::Megabytes => "MB",
            Self::Gigabytes => "GB",
            Self::Terabytes => "TB",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[must_use]
#[repr(transparent)]
#[serde(transparent)]
pub struct FileSize(u64);

impl FileSize {
    #[inline]
    pub const fn new(bytes: u64) -> Self {
        Self(bytes)
    }

    #[inline]
    pub const fn zero() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn bytes(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Picks the largest SI unit that keeps the value below 1000 and returns
    /// the value expressed in that unit.
    pub fn scaled(self) -> (f64, SizeUnit) {
        let bytes = self.0 as f64;
        let largest = SizeUnit::Terabytes;
        for unit in SizeUnit::ALL {
            if bytes < unit.divisor() * 1_000.0 || unit == largest {
                return (bytes / unit.divisor(), unit);
            }
        }
        (bytes, SizeUnit::Bytes)
    }
}

impl From<u64> for FileSize {
    fn from(bytes: u64) -> Self {
        Self::new(bytes)
    }
}

impl From<FileSize> for u64 {
    fn from(size: FileSize) -> Self {
        size.bytes()
    }
}

impl fmt::Display for FileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            let (value, unit) = self.scaled();
            write!(f, "{value:.1} {}", unit.symbol())
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Milliseconds since the Unix epoch. Zero means "unknown".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[must_use]
#[repr(transparent)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    #[inline]
    pub const fn unknown() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn millis(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_known(self) -> bool {
        self.0 != 0
    }

    pub fn from_system_time(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(duration) => Self(i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)),
            Err(_) => Self::unknown(),
        }
    }

    pub fn to_local(self) -> Option<DateTime<Local>> {
        if !self.is_known() {
            return None;
        }
        Local.timestamp_millis_opt(self.0).single()
    }

    /// Earlier of two timestamps, ignoring unknown values.
    pub fn earliest(self, other: Self) -> Self {
        match (self.is_known(), other.is_known()) {
            (true, true) => Self(self.0.min(other.0)),
            (false, _) => other,
            (true, false) => self,
        }
    }

    /// Later of two timestamps, ignoring unknown values.
    pub fn latest(self, other: Self) -> Self {
        match (self.is_known(), other.is_known()) {
            (true, true) => Self(self.0.max(other.0)),
            (false, _) => other,
            (true, false) => self,
        }
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Self::from_millis(millis)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_local() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            None => write!(f, "(unknown)"),
        }
    }
}
