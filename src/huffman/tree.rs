use std::fmt;

use crate::distribution::Symbol;

#[derive(Clone, Debug)]
pub(super) enum NodeKind {
    Leaf { symbol: Symbol },
    Placeholder,
    Inner { children: Vec<usize> },
}

#[derive(Clone, Debug)]
pub struct Node {
    pub(super) weight: f64,
    pub(super) index: usize,
    pub(super) kind: NodeKind,
}

impl Node {
    pub(super) fn leaf(index: usize, symbol: Symbol, weight: f64) -> Self {
        Self {
            weight,
            index,
            kind: NodeKind::Leaf { symbol },
        }
    }

    pub(super) fn placeholder(index: usize) -> Self {
        Self {
            weight: 0.0,
            index,
            kind: NodeKind::Placeholder,
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The symbol of a real leaf. Inner nodes and placeholders carry none.
    pub fn symbol(&self) -> Option<&Symbol> {
        match &self.kind {
            NodeKind::Leaf { symbol } => Some(symbol),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self.kind, NodeKind::Inner { .. })
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, NodeKind::Placeholder)
    }

    pub(super) fn child_indices(&self) -> &[usize] {
        match &self.kind {
            NodeKind::Inner { children } => children,
            _ => &[],
        }
    }
}

/// A finished code tree.
///
/// Nodes live in one arena and refer to their children by index. Leaves
/// (real and placeholder) come first in the order they were queued, inner
/// nodes follow in the order they were merged. Every inner node has exactly
/// `radix` children.
#[derive(Clone, Debug)]
pub struct Tree {
    pub(super) nodes: Vec<Node>,
    pub(super) root_index: usize,
    pub(super) radix: usize,
}

impl Tree {
    pub fn radix(&self) -> usize {
        self.radix
    }

    pub fn root(&self) -> &Node {
        &self.nodes[self.root_index]
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Children of `node` in digit order `0..radix`; empty for leaves.
    pub fn children<'a>(&'a self, node: &'a Node) -> impl Iterator<Item = &'a Node> + 'a {
        node.child_indices().iter().map(|&i| &self.nodes[i])
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.symbol().is_some()).count()
    }

    pub fn placeholder_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_placeholder()).count()
    }

    /// Number of edges on the longest root to leaf path.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self.root_index, 0)];
        while let Some((index, depth)) = stack.pop() {
            let node = &self.nodes[index];
            height = height.max(depth);
            for &child in node.child_indices() {
                stack.push((child, depth + 1));
            }
        }
        height
    }
}

const INDENT: &str = " ";

// Tree visualization
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(self.root_index, 0usize, None)];
        while let Some((index, level, digit)) = stack.pop() {
            let node = &self.nodes[index];
            let label = match digit {
                Some(digit) => format!("Child({})", digit),
                None => "Root".to_string(),
            };
            let indent = INDENT.repeat(level);
            match &node.kind {
                NodeKind::Leaf { symbol } => {
                    writeln!(f, "{}{}: '{}' ({:.4})", indent, label, symbol, node.weight)?
                }
                NodeKind::Placeholder => writeln!(f, "{}{}: [placeholder]", indent, label)?,
                NodeKind::Inner { children } => {
                    writeln!(f, "{}{}: ({:.4})", indent, label, node.weight)?;
                    for (digit, &child) in children.iter().enumerate().rev() {
                        stack.push((child, level + 1, Some(digit)));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{Node, NodeKind, Tree};
    use crate::distribution::Symbol;

    fn create_test_tree() -> Tree {
        let nodes = vec![
            Node::leaf(0, Symbol::from('a'), 0.5),
            Node::leaf(1, Symbol::from('b'), 0.25),
            Node::leaf(2, Symbol::from('c'), 0.25),
            Node::placeholder(3),
            Node {
                weight: 0.25,
                index: 4,
                kind: NodeKind::Inner {
                    children: vec![3, 2],
                },
            },
            Node {
                weight: 0.5,
                index: 5,
                kind: NodeKind::Inner {
                    children: vec![4, 1],
                },
            },
            Node {
                weight: 1.0,
                index: 6,
                kind: NodeKind::Inner {
                    children: vec![5, 0],
                },
            },
        ];
        Tree {
            nodes,
            root_index: 6,
            radix: 2,
        }
    }

    #[test]
    fn test_counts_and_height() {
        let tree = create_test_tree();
        assert_eq!(tree.leaf_count(), 3, "Placeholders must not count as leaves");
        assert_eq!(tree.placeholder_count(), 1);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_children_are_returned_in_digit_order() {
        let tree = create_test_tree();
        let weights: Vec<f64> = tree.children(tree.root()).map(|n| n.weight()).collect();
        assert_eq!(weights, [0.5, 0.5]);
        let leaf = tree.node(0).unwrap();
        assert_eq!(tree.children(leaf).count(), 0, "Leaves have no children");
    }

    #[test]
    fn test_node_accessors() {
        let tree = create_test_tree();
        let placeholder = tree.node(3).unwrap();
        assert!(placeholder.is_leaf());
        assert!(placeholder.is_placeholder());
        assert_eq!(placeholder.symbol(), None);
        assert!(!tree.root().is_leaf());
        assert_eq!(tree.root().symbol(), None, "Inner nodes carry no symbol");
    }

    #[test]
    fn test_display_renders_all_nodes_in_digit_order() {
        let tree = create_test_tree();
        let rendered = tree.to_string();
        let expected = "\
Root: (1.0000)
 Child(0): (0.5000)
  Child(0): (0.2500)
   Child(0): [placeholder]
   Child(1): 'c' (0.2500)
  Child(1): 'b' (0.2500)
 Child(1): 'a' (0.5000)
";
        assert_eq!(rendered, expected);
    }
}
