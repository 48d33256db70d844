use notecount_ports::NumberFormatter;

/// Renders a reading time given in minutes: `0m`, `42s`, `12m`, `2h` or
/// `1h30m`, followed by ` read` when not abbreviated.
pub fn format_read_time(minutes: f64, abbreviate: bool, number: &dyn NumberFormatter) -> String {
    let tail = if abbreviate { "" } else { " read" };

    if minutes * 60.0 < 1.0 {
        return format!("0m{tail}");
    }
    if minutes < 1.0 {
        return format!("{}s{tail}", (minutes * 60.0).round());
    }
    if minutes < 60.0 {
        return format!("{}m{tail}", minutes.round());
    }

    let hours = number.format_integer((minutes / 60.0).floor() as i64);
    let remainder = (minutes.floor() as i64) % 60;
    if remainder == 0 {
        format!("{hours}h{tail}")
    } else {
        format!("{hours}h{remainder}m{tail}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl NumberFormatter for Plain {
        fn format_number(&self, value: f64, _min: usize, max: usize) -> String {
            format!("{value:.max$}")
        }
    }

    #[test]
    fn thresholds() {
        assert_eq!(format_read_time(0.0, true, &Plain), "0m");
        assert_eq!(format_read_time(0.01, false, &Plain), "0m read");
        assert_eq!(format_read_time(0.5, true, &Plain), "30s");
        assert_eq!(format_read_time(12.4, true, &Plain), "12m");
        assert_eq!(format_read_time(59.6, false, &Plain), "60m read");
        assert_eq!(format_read_time(120.0, true, &Plain), "2h");
        assert_eq!(format_read_time(95.9, false, &Plain), "1h35m read");
    }
}
