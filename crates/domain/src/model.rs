pub mod count_record;
pub mod counts_by_path;

pub use count_record::{CountRecord, CountRecordBuilder, Frontmatter, SessionCountRecord, TargetNode};
pub use counts_by_path::{CountsByPath, ROOT_PATH};
