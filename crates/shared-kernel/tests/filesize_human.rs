// crates/shared-kernel/tests/filesize_human.rs
use notecount_shared_kernel::{FileSize, SizeUnit};

#[test]
fn scaled_boundaries() {
    assert_eq!(FileSize::from(999).scaled(), (999.0, SizeUnit::Bytes));
    assert_eq!(FileSize::from(1_000).scaled(), (1.0, SizeUnit::Kilobytes));
    assert_eq!(FileSize::from(1_500).scaled(), (1.5, SizeUnit::Kilobytes));
    assert_eq!(FileSize::from(2_000_000).scaled(), (2.0, SizeUnit::Megabytes));
}

#[test]
fn largest_unit_absorbs_huge_values() {
    let (value, unit) = FileSize::from(5_000_000_000_000_000).scaled();
    assert_eq!(unit, SizeUnit::Terabytes);
    assert_eq!(value, 5_000.0);
}

#[test]
fn display_alternate_is_human() {
    let value = FileSize::from(1_536);
    assert_eq!(format!("{value}"), "1536");
    assert_eq!(format!("{value:#}"), "1.5 kB");
}
