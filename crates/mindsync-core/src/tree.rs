use serde::{Deserialize, Serialize};

/// A node of the parsed mindmap, as handed over by the markdown parser.
///
/// `depth` and `path` are derived from the tree shape by [`MindmapNode::index`]; the root has
/// depth 0 and path `"0"`, its second child `"0.1"`, and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindmapNode {
    pub content: String,
    #[serde(default)]
    pub depth: usize,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub children: Vec<MindmapNode>,
}

impl MindmapNode {
    pub fn leaf(content: impl Into<String>) -> Self {
        Self::branch(content, Vec::new())
    }

    /// Builds an indexed node from its children.
    pub fn branch(content: impl Into<String>, children: Vec<MindmapNode>) -> Self {
        let mut node = Self {
            content: content.into(),
            depth: 0,
            path: String::new(),
            children,
        };
        node.index();
        node
    }

    /// Recomputes `depth` and `path` for the whole subtree, treating `self` as the root.
    pub fn index(&mut self) {
        self.index_at(0, "0".to_string());
    }

    fn index_at(&mut self, depth: usize, path: String) {
        for (i, child) in self.children.iter_mut().enumerate() {
            child.index_at(depth + 1, format!("{path}.{i}"));
        }
        self.depth = depth;
        self.path = path;
    }

    /// Pre-order traversal.
    pub fn walk(&self) -> impl Iterator<Item = &MindmapNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    pub fn node_count(&self) -> usize {
        self.walk().count()
    }
}
