use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::CountRecord;

/// Root of the path tree. Aggregating it covers every leaf.
pub const ROOT_PATH: &str = "/";

/// Leaf records keyed by `/`-separated path. Directories are never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountsByPath(BTreeMap<String, CountRecord>);

impl CountsByPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&CountRecord> {
        self.0.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    /// Replaces the leaf at `path` wholesale.
    pub fn insert(&mut self, path: impl Into<String>, record: CountRecord) -> Option<CountRecord> {
        self.0.insert(path.into(), record)
    }

    pub fn remove(&mut self, path: &str) -> Option<CountRecord> {
        self.0.remove(path)
    }

    /// Deletes the leaf at `path` and every leaf below it. Returns how many
    /// leaves were removed.
    pub fn remove_descendants(&mut self, path: &str) -> usize {
        let before = self.0.len();
        if path == ROOT_PATH {
            self.0.clear();
            return before;
        }
        let prefix = format!("{path}/");
        self.0.retain(|key, _| key != path && !key.starts_with(&prefix));
        before - self.0.len()
    }

    /// Leaves strictly below `path`; every leaf for [`ROOT_PATH`].
    pub fn descendants<'a>(&'a self, path: &str) -> impl Iterator<Item = (&'a String, &'a CountRecord)> + 'a {
        let prefix = if path == ROOT_PATH { None } else { Some(format!("{path}/")) };
        self.0.iter().filter(move |(key, _)| match &prefix {
            Some(prefix) => key.starts_with(prefix.as_str()),
            None => true,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CountRecord)> {
        self.0.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut CountRecord)> {
        self.0.iter_mut()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut CountRecord> {
        self.0.values_mut()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, CountRecord)> for CountsByPath {
    fn from_iter<I: IntoIterator<Item = (String, CountRecord)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<(String, CountRecord)> for CountsByPath {
    fn extend<I: IntoIterator<Item = (String, CountRecord)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for CountsByPath {
    type Item = (String, CountRecord);
    type IntoIter = std::collections::btree_map::IntoIter<String, CountRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
