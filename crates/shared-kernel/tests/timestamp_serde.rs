// crates/shared-kernel/tests/timestamp_serde.rs
use notecount_shared_kernel::{FileSize, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Wrapper {
    created: Timestamp,
    size: FileSize,
}

#[test]
fn json_is_transparent() {
    let original = Wrapper { created: Timestamp::from_millis(1_700_000_000_000), size: FileSize::from(2048) };
    let json = serde_json::to_string(&original).expect("serializes");
    assert_eq!(json, r#"{"created":1700000000000,"size":2048}"#);
    let decoded: Wrapper = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(decoded, original);
}

#[test]
fn zero_is_unknown() {
    assert!(Timestamp::unknown().to_local().is_none());
    assert!(Timestamp::from_millis(86_400_000).to_local().is_some());
    assert_eq!(Timestamp::unknown().to_string(), "(unknown)");
}
