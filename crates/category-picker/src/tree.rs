//! Category hierarchy
//!
//! The API returns categories flat, each naming its parent. [`CategoryTree`]
//! allocates every category once in an arena and links nodes by index, so a
//! child listed before its parent is handled the same as one listed after.

use commerce_client::Category;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Index of a node in a [`CategoryTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    category: Category,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Borrowed view of one node
#[derive(Debug, Clone, Copy)]
pub struct TreeNode<'a> {
    pub id: NodeId,
    pub category: &'a Category,
    pub parent: Option<NodeId>,
    pub children: &'a [NodeId],
}

/// Owned nested form, for tree-checkbox style renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<CategoryNode>,
}

// Deep chains would overflow the stack with the default recursive drop
impl Drop for CategoryNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// A category placed in display order with its indentation depth
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatCategory {
    #[serde(flatten)]
    pub category: Category,
    pub depth: usize,
}

/// Rooted forest of categories
#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
    roots: Vec<NodeId>,
}

impl CategoryTree {
    /// Build the forest from a flat list
    ///
    /// - Children keep their input order under each parent.
    /// - A category whose parent is absent, unknown, or itself is a root.
    /// - Duplicate ids keep the first occurrence.
    /// - A parent chain that loops back on itself is cut at its earliest
    ///   member (input order), which becomes a root.
    ///
    /// Roots are returned in input order.
    pub fn build(categories: Vec<Category>) -> Self {
        let mut nodes: Vec<Node> = Vec::with_capacity(categories.len());
        let mut index: HashMap<String, NodeId> = HashMap::with_capacity(categories.len());

        for category in categories {
            if index.contains_key(&category.id) {
                warn!(id = %category.id, "Duplicate category id, keeping first occurrence");
                continue;
            }
            index.insert(category.id.clone(), NodeId(nodes.len()));
            nodes.push(Node {
                category,
                parent: None,
                children: Vec::new(),
            });
        }

        let mut roots = Vec::new();
        for i in 0..nodes.len() {
            let id = NodeId(i);
            let category = &nodes[i].category;
            let parent = match category.parent_id() {
                Some(parent_id) if parent_id == category.id => {
                    debug!(id = %category.id, "Category names itself as parent");
                    None
                }
                Some(parent_id) => index.get(parent_id).copied(),
                None => None,
            };

            match parent {
                Some(parent) => {
                    nodes[i].parent = Some(parent);
                    nodes[parent.0].children.push(id);
                }
                None => roots.push(id),
            }
        }

        let mut tree = Self {
            nodes,
            index,
            roots,
        };
        tree.break_cycles();
        tree
    }

    /// Promote one member of every parent cycle to a root
    fn break_cycles(&mut self) {
        let mut reachable = vec![false; self.nodes.len()];
        for root in self.roots.clone() {
            self.mark_subtree(root, &mut reachable);
        }

        let mut promoted = false;
        for i in 0..self.nodes.len() {
            if reachable[i] {
                continue;
            }

            let entry = self.cycle_entry(NodeId(i));
            warn!(
                id = %self.nodes[entry.0].category.id,
                "Category parent chain forms a cycle, treating as root"
            );

            if let Some(parent) = self.nodes[entry.0].parent.take() {
                self.nodes[parent.0].children.retain(|c| *c != entry);
            }
            self.roots.push(entry);
            self.mark_subtree(entry, &mut reachable);
            promoted = true;
        }

        if promoted {
            self.roots.sort();
        }
    }

    /// Earliest (input order) member of the cycle above `start`
    fn cycle_entry(&self, start: NodeId) -> NodeId {
        let mut seen = HashSet::new();
        let mut current = start;
        while seen.insert(current) {
            match self.nodes[current.0].parent {
                Some(parent) => current = parent,
                None => return current,
            }
        }

        // `current` is on the cycle; walk it once to find the smallest id
        let mut earliest = current;
        let mut walker = current;
        while let Some(parent) = self.nodes[walker.0].parent {
            if parent == current {
                break;
            }
            earliest = earliest.min(parent);
            walker = parent;
        }
        earliest
    }

    fn mark_subtree(&self, from: NodeId, reachable: &mut [bool]) {
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if reachable[id.0] {
                continue;
            }
            reachable[id.0] = true;
            stack.extend(self.nodes[id.0].children.iter().copied());
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn category(&self, id: NodeId) -> &Category {
        &self.nodes[id.0].category
    }

    /// Look up a node by category id
    pub fn get(&self, category_id: &str) -> Option<NodeId> {
        self.index.get(category_id).copied()
    }

    /// Number of ancestors above a node
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.nodes[current.0].parent {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// All nodes in input order
    pub fn nodes(&self) -> impl Iterator<Item = TreeNode<'_>> + '_ {
        self.nodes.iter().enumerate().map(|(i, node)| TreeNode {
            id: NodeId(i),
            category: &node.category,
            parent: node.parent,
            children: &node.children,
        })
    }

    /// Pre-order listing with depths, for indented single-list renderers
    ///
    /// Each root is followed by its whole subtree before the next root.
    /// Recomputing from the same tree yields the same sequence.
    pub fn flatten(&self) -> Vec<FlatCategory> {
        let mut flat = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeId, usize)> =
            self.roots.iter().rev().map(|&root| (root, 0)).collect();

        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id.0];
            flat.push(FlatCategory {
                category: node.category.clone(),
                depth,
            });
            stack.extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
        }

        flat
    }

    /// Owned nested copy of the forest
    ///
    /// Built bottom-up over the reversed pre-order, so every child exists
    /// before its parent and no call depth grows with the tree.
    pub fn to_forest(&self) -> Vec<CategoryNode> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }

        let mut built: Vec<Option<CategoryNode>> = (0..self.nodes.len()).map(|_| None).collect();
        for &id in order.iter().rev() {
            let node = &self.nodes[id.0];
            let children = node
                .children
                .iter()
                .filter_map(|child| built[child.0].take())
                .collect();
            built[id.0] = Some(CategoryNode {
                category: node.category.clone(),
                children,
            });
        }

        self.roots
            .iter()
            .filter_map(|root| built[root.0].take())
            .collect()
    }
}
