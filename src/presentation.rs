// src/presentation.rs
use std::collections::HashSet;

use notecount_domain::{CountsByPath, ROOT_PATH};
use notecount_ports::LabelSink;
use notecount_shared_kernel::Result;

/// One printable node of the note tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub path: String,
    pub is_dir: bool,
}

fn depth_of(path: &str) -> usize {
    if path == ROOT_PATH { 0 } else { path.split('/').count() }
}

/// Root, directories and leaves in display order, each directory right
/// before its first descendant. Nodes deeper than `max_depth` are left out.
pub fn tree_nodes(counts: &CountsByPath, max_depth: Option<usize>) -> Vec<TreeNode> {
    let within = |path: &str| max_depth.is_none_or(|max| depth_of(path) <= max);
    let mut nodes = vec![TreeNode { path: ROOT_PATH.to_string(), is_dir: true }];
    let mut seen_dirs = HashSet::new();

    for path in counts.paths() {
        let mut end = 0;
        while let Some(offset) = path[end..].find('/') {
            end += offset;
            let dir = &path[..end];
            if seen_dirs.insert(dir.to_string()) && within(dir) {
                nodes.push(TreeNode { path: dir.to_string(), is_dir: true });
            }
            end += 1;
        }
        if within(path) {
            nodes.push(TreeNode { path: path.to_string(), is_dir: false });
        }
    }
    nodes
}

/// Indented text tree; receives one label per node.
#[derive(Debug, Default)]
pub struct TreeView {
    dirs: HashSet<String>,
    lines: Vec<String>,
}

impl TreeView {
    pub fn new(nodes: &[TreeNode]) -> Self {
        let dirs = nodes.iter().filter(|node| node.is_dir).map(|node| node.path.clone()).collect();
        Self { dirs, lines: Vec::new() }
    }

    pub fn render(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

impl LabelSink for TreeView {
    fn publish(&mut self, path: &str, label: &str) -> Result<()> {
        let depth = depth_of(path);
        let mut name = if path == ROOT_PATH {
            ROOT_PATH.to_string()
        } else {
            path.rsplit('/').next().unwrap_or(path).to_string()
        };
        if path != ROOT_PATH && self.dirs.contains(path) {
            name.push('/');
        }
        let indent = "  ".repeat(depth);
        let line = if label.is_empty() { format!("{indent}{name}") } else { format!("{indent}{name}  {label}") };
        self.lines.push(line);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use notecount_domain::CountRecord;

    use super::*;

    fn table(paths: &[&str]) -> CountsByPath {
        paths.iter().map(|p| ((*p).to_string(), CountRecord::default())).collect()
    }

    fn node_paths(nodes: &[TreeNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.path.as_str()).collect()
    }

    #[test]
    fn directories_precede_their_contents() {
        let counts = table(&["b.md", "a/x/1.md", "a/2.md", "a/x-y/3.md"]);
        let nodes = tree_nodes(&counts, None);
        assert_eq!(node_paths(&nodes), vec!["/", "a", "a/2.md", "a/x-y", "a/x-y/3.md", "a/x", "a/x/1.md", "b.md"]);
        assert!(nodes[1].is_dir);
        assert!(!nodes[2].is_dir);
    }

    #[test]
    fn depth_limit_drops_deeper_nodes() {
        let counts = table(&["a/x/1.md", "b.md"]);
        assert_eq!(node_paths(&tree_nodes(&counts, Some(1))), vec!["/", "a", "b.md"]);
        assert_eq!(node_paths(&tree_nodes(&counts, Some(0))), vec!["/"]);
    }

    #[test]
    fn view_indents_by_depth() {
        let counts = table(&["a/1.md"]);
        let nodes = tree_nodes(&counts, None);
        let mut view = TreeView::new(&nodes);
        view.publish("/", "3 words").unwrap();
        view.publish("a", "3 words").unwrap();
        view.publish("a/1.md", "").unwrap();
        assert_eq!(view.render(), "/  3 words\n  a/  3 words\n    1.md\n");
    }
}
