use notecount_ports::NumberFormatter;
use notecount_shared_kernel::FileSize;

/// SI-scaled size with up to two fraction digits, e.g. `1.5kB` or `1.5 kB`.
pub fn format_file_size(size: FileSize, abbreviate: bool, number: &dyn NumberFormatter) -> String {
    let (value, unit) = size.scaled();
    let gap = if abbreviate { "" } else { " " };
    format!("{}{gap}{}", number.format_number(value, 0, 2), unit.symbol())
}
