use crate::model::{CountRecord, CountsByPath};

/// Rolls leaf records up the path tree.
///
/// There is no physical tree: a directory is every key under `path + "/"`,
/// folded on each read.
pub struct Aggregator;

impl Aggregator {
    /// Leaf record when `path` is a stored key, otherwise the directory
    /// aggregate over its descendants.
    pub fn aggregate(table: &CountsByPath, path: &str) -> CountRecord {
        if let Some(leaf) = table.get(path) {
            return leaf.clone();
        }
        table
            .descendants(path)
            .fold(Self::directory_default(), |mut total, (_, child)| {
                Self::merge_into(&mut total, child);
                total
            })
    }

    fn directory_default() -> CountRecord {
        CountRecord { is_directory: true, ..CountRecord::default() }
    }

    /// Adds one child into a running directory total.
    pub fn merge_into(total: &mut CountRecord, child: &CountRecord) {
        total.is_countable |= child.is_countable;
        total.note_count += child.note_count;
        total.page_count += child.page_count;
        total.word_count += child.word_count;
        total.word_count_toward_goal += child.word_count_toward_goal;
        total.word_goal = match (total.word_goal, child.word_goal) {
            (Some(a), Some(b)) => Some(a + b),
            (a, b) => a.or(b),
        };
        total.character_count += child.character_count;
        total.non_whitespace_character_count += child.non_whitespace_character_count;
        total.reading_time_in_minutes += child.reading_time_in_minutes;
        total.link_count += child.link_count;
        total.embed_count += child.embed_count;
        total.size_in_bytes = total.size_in_bytes.saturating_add(child.size_in_bytes);
        total.created_date = total.created_date.earliest(child.created_date);
        total.modified_date = total.modified_date.latest(child.modified_date);
        total.session_start.add(&child.session_start);
    }
}

/// Shorthand for [`Aggregator::aggregate`].
pub fn aggregate(table: &CountsByPath, path: &str) -> CountRecord {
    Aggregator::aggregate(table, path)
}

#[cfg(test)]
mod tests {
    use notecount_shared_kernel::{FileSize, Timestamp};

    use super::*;
    use crate::model::ROOT_PATH;

    fn leaf(words: u64, created: i64, modified: i64) -> CountRecord {
        CountRecord {
            is_countable: true,
            note_count: 1,
            word_count: words,
            size_in_bytes: FileSize::new(words * 5),
            created_date: Timestamp::from_millis(created),
            modified_date: Timestamp::from_millis(modified),
            aliases: vec!["alias".into()],
            ..CountRecord::default()
        }
    }

    #[test]
    fn stored_leaf_is_returned_unchanged() {
        let mut table = CountsByPath::new();
        table.insert("a.md", leaf(3, 1, 2));
        assert_eq!(aggregate(&table, "a.md"), leaf(3, 1, 2));
    }

    #[test]
    fn directory_sums_descendants_and_drops_aliases() {
        let mut table = CountsByPath::new();
        table.insert("dir/a.md", leaf(3, 0, 50));
        table.insert("dir/sub/b.md", leaf(4, 1_000, 20));
        table.insert("dirx/c.md", leaf(100, 5, 5));

        let dir = aggregate(&table, "dir");
        assert!(dir.is_directory);
        assert!(dir.is_countable);
        assert_eq!(dir.note_count, 2);
        assert_eq!(dir.word_count, 7);
        assert_eq!(dir.size_in_bytes.bytes(), 35);
        assert_eq!(dir.created_date.millis(), 1_000);
        assert_eq!(dir.modified_date.millis(), 50);
        assert!(dir.aliases.is_empty());

        assert_eq!(aggregate(&table, ROOT_PATH).word_count, 107);
    }

    #[test]
    fn empty_directory_is_all_zero() {
        let dir = aggregate(&CountsByPath::new(), "missing");
        assert!(dir.is_directory);
        assert!(!dir.is_countable);
        assert_eq!(dir.word_count, 0);
        assert_eq!(dir.word_goal, None);
        assert!(!dir.created_date.is_known());
    }

    #[test]
    fn goals_sum_only_where_present() {
        let mut table = CountsByPath::new();
        table.insert("d/a.md", CountRecord { word_goal: Some(100.0), ..CountRecord::default() });
        table.insert("d/b.md", CountRecord::default());
        table.insert("d/c.md", CountRecord { word_goal: Some(50.0), ..CountRecord::default() });
        assert_eq!(aggregate(&table, "d").word_goal, Some(150.0));
    }
}
