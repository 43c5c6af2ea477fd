use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_NODE_ID: AtomicU32 = AtomicU32::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn unique() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    /// The node was not attached, e.g. because another tool already cleaned it up.
    AlreadyAbsent,
}

/// Ordered set of nodes currently shown above the canvas. Shared by every tool.
#[derive(Debug, Default)]
pub struct VisualTree {
    children: Vec<NodeId>,
}

impl VisualTree {
    pub fn contains(&self, node: NodeId) -> bool {
        self.children.contains(&node)
    }

    /// Appends without checking membership, callers keep nodes unique.
    pub fn append(&mut self, node: NodeId) {
        self.children.push(node);
    }

    pub fn remove(&mut self, node: NodeId) -> RemoveOutcome {
        match self.children.iter().position(|n| *n == node) {
            Some(idx) => {
                self.children.remove(idx);
                RemoveOutcome::Removed
            }
            None => RemoveOutcome::AlreadyAbsent,
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_reports_absent_node() {
        let mut tree = VisualTree::default();
        let node = NodeId::unique();
        tree.append(node);
        assert_eq!(tree.remove(node), RemoveOutcome::Removed);
        assert_eq!(tree.remove(node), RemoveOutcome::AlreadyAbsent);
        assert!(tree.is_empty());
    }

    #[test]
    fn node_ids_are_unique() {
        assert_ne!(NodeId::unique(), NodeId::unique());
    }
}
