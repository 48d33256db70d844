//! Locale-aware number and date rendering for labels.

use std::fmt::Write as _;

use notecount_ports::{DateFormatter, NumberFormatter};
use notecount_shared_kernel::Timestamp;

const FALLBACK_LOCALE: &str = "en-US";
const NARROW_NBSP: &str = "\u{202f}";
const NBSP: &str = "\u{a0}";

/// Separators and short-date pattern of one supported locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFormat {
    tag: String,
    grouping: &'static str,
    decimal: &'static str,
    date_pattern: &'static str,
}

/// `(tag, grouping, decimal, chrono pattern)`. Full tags are tried before
/// their language.
const LOCALES: &[(&str, &str, &str, &str)] = &[
    ("en-us", ",", ".", "%-m/%-d/%Y"),
    ("en-gb", ",", ".", "%d/%m/%Y"),
    ("de-ch", "\u{2019}", ".", "%-d.%-m.%Y"),
    ("en", ",", ".", "%-m/%-d/%Y"),
    ("ja", ",", ".", "%Y/%-m/%-d"),
    ("zh", ",", ".", "%Y/%-m/%-d"),
    ("ko", ",", ".", "%Y. %-m. %-d."),
    ("de", ".", ",", "%-d.%-m.%Y"),
    ("es", ".", ",", "%Y-%m-%d"),
    ("it", ".", ",", "%Y-%m-%d"),
    ("nl", ".", ",", "%Y-%m-%d"),
    ("pt", ".", ",", "%Y-%m-%d"),
    ("id", ".", ",", "%Y-%m-%d"),
    ("tr", ".", ",", "%Y-%m-%d"),
    ("fr", NARROW_NBSP, ",", "%Y-%m-%d"),
    ("ru", NBSP, ",", "%Y-%m-%d"),
    ("pl", NBSP, ",", "%Y-%m-%d"),
    ("sv", NBSP, ",", "%Y-%m-%d"),
    ("nb", NBSP, ",", "%Y-%m-%d"),
    ("fi", NBSP, ",", "%Y-%m-%d"),
    ("cs", NBSP, ",", "%Y-%m-%d"),
    ("uk", NBSP, ",", "%Y-%m-%d"),
];

fn lookup(tag: &str) -> Option<LocaleFormat> {
    let normalized = tag.trim().replace('_', "-").to_lowercase();
    let language = normalized.split('-').next().unwrap_or_default();
    [normalized.as_str(), language].into_iter().find_map(|candidate| {
        LOCALES.iter().find(|(key, ..)| *key == candidate).map(|&(_, grouping, decimal, date_pattern)| LocaleFormat {
            tag: tag.trim().to_string(),
            grouping,
            decimal,
            date_pattern,
        })
    })
}

impl Default for LocaleFormat {
    fn default() -> Self {
        Self::for_locales::<&str>(&[])
    }
}

impl LocaleFormat {
    /// First supported entry of `preferences`, falling back to `en-US`.
    pub fn for_locales<S: AsRef<str>>(preferences: &[S]) -> Self {
        preferences
            .iter()
            .map(AsRef::as_ref)
            .chain(std::iter::once(FALLBACK_LOCALE))
            .find_map(lookup)
            .unwrap_or_else(|| LocaleFormat {
                tag: FALLBACK_LOCALE.to_string(),
                grouping: ",",
                decimal: ".",
                date_pattern: "%-m/%-d/%Y",
            })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn date_pattern(&self) -> &str {
        self.date_pattern
    }

    fn group(&self, digits: &str) -> String {
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * self.grouping.len());
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push_str(self.grouping);
            }
            grouped.push(ch);
        }
        grouped
    }
}

impl NumberFormatter for LocaleFormat {
    fn format_number(&self, value: f64, min_fraction: usize, max_fraction: usize) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        let max_fraction = max_fraction.max(min_fraction);
        let text = format!("{:.max_fraction$}", value.abs());
        let (int, frac) = text.split_once('.').unwrap_or((&text, ""));
        let mut frac = frac.to_string();
        while frac.len() > min_fraction && frac.ends_with('0') {
            frac.pop();
        }
        let is_zero = int.bytes().all(|b| b == b'0') && frac.bytes().all(|b| b == b'0');
        let sign = if value < 0.0 && !is_zero { "-" } else { "" };
        let grouped = self.group(int);
        if frac.is_empty() { format!("{sign}{grouped}") } else { format!("{sign}{grouped}{}{frac}", self.decimal) }
    }
}

impl DateFormatter for LocaleFormat {
    /// Local date in `pattern` (a chrono format string) or the locale's
    /// short form. Invalid patterns fall back to the short form.
    fn format_date(&self, timestamp: Timestamp, pattern: Option<&str>) -> String {
        let Some(local) = timestamp.to_local() else {
            return String::new();
        };
        let mut out = String::new();
        if let Some(pattern) = pattern
            && write!(out, "{}", local.format(pattern)).is_ok()
        {
            return out;
        }
        out.clear();
        let _ = write!(out, "{}", local.format(self.date_pattern));
        out
    }
}
